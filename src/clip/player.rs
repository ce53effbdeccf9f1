use crate::foundation::core::{Fps, Region};
use crate::foundation::error::SplitreelResult;
use crate::foundation::math::Fnv1a64;
use crate::render::canvas::FrameCanvas;
use crate::score::event::ClipData;
use crate::session::clock::PlaybackMode;

/// Per-clip rendering primitive.
///
/// The compositor owns geometry and lifecycle; a player only turns "this clip, this region, this
/// time" into pixels. Players must not retain the region between calls.
pub trait ClipPlayer {
    /// Called each time the pooled clip is reused for a new payload.
    fn start(&mut self, data: &ClipData, mode: PlaybackMode, position: f64);

    /// Advance playback state to timeline `time`.
    fn update(&mut self, time: f64);

    /// Draw the current frame into `region` (playback mode).
    fn draw(&mut self, canvas: &mut FrameCanvas, region: Region) -> SplitreelResult<()>;

    /// Draw the current frame and step exactly one output frame (capture mode).
    fn capture(
        &mut self,
        canvas: &mut FrameCanvas,
        region: Region,
        fps: Fps,
    ) -> SplitreelResult<()> {
        let _ = fps;
        self.draw(canvas, region)
    }
}

/// Reference player: a flat color per resource with a progress bar.
#[derive(Clone, Debug, Default)]
pub struct SwatchPlayer {
    color: [u8; 4],
    start: f64,
    end: f64,
    media_time: f64,
    capturing: bool,
    capture_origin: f64,
    captured_frames: u64,
}

impl SwatchPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of the clip played so far, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let len = self.end - self.start;
        if len <= 0.0 {
            return 0.0;
        }
        ((self.media_time - self.start) / len).clamp(0.0, 1.0)
    }

    pub fn color(&self) -> [u8; 4] {
        self.color
    }

    fn paint(&self, canvas: &mut FrameCanvas, region: Region) {
        canvas.fill_rect(region, self.color);

        let bar_h = (region.height() * 0.04).max(2.0).min(region.height());
        let bar = Region::new(
            region.x0,
            region.y1 - bar_h,
            region.x0 + region.width() * self.progress(),
            region.y1,
        );
        canvas.fill_rect(bar, highlight(self.color));
    }
}

impl ClipPlayer for SwatchPlayer {
    fn start(&mut self, data: &ClipData, mode: PlaybackMode, position: f64) {
        self.color = swatch_color(&data.resource_ref);
        self.capturing = mode.is_capture();
        self.start = data.start;
        self.end = data.end;
        self.media_time = position;
        self.capture_origin = position;
        self.captured_frames = 0;
    }

    fn update(&mut self, time: f64) {
        if !self.capturing {
            self.media_time = time;
        }
    }

    fn draw(&mut self, canvas: &mut FrameCanvas, region: Region) -> SplitreelResult<()> {
        self.paint(canvas, region);
        Ok(())
    }

    fn capture(
        &mut self,
        canvas: &mut FrameCanvas,
        region: Region,
        fps: Fps,
    ) -> SplitreelResult<()> {
        self.media_time = self.capture_origin + fps.frames_to_secs(self.captured_frames);
        self.paint(canvas, region);
        self.captured_frames += 1;
        Ok(())
    }
}

/// Stable, reasonably bright color for a resource reference.
pub fn swatch_color(resource_ref: &str) -> [u8; 4] {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(resource_ref.as_bytes());
    let v = h.finish();
    let channel = |shift: u32| 64 + ((v >> shift) & 0x9f) as u8;
    [channel(0), channel(8), channel(16), 255]
}

fn highlight(rgba: [u8; 4]) -> [u8; 4] {
    let lift = |c: u8| c + (255 - c) / 2;
    [lift(rgba[0]), lift(rgba[1]), lift(rgba[2]), rgba[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/clip/player.rs"]
mod tests;
