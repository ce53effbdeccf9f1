use std::time::Duration;

use crate::clip::clip::ClipId;
use crate::clip::player::{ClipPlayer, SwatchPlayer};
use crate::config::EngineConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::engine::compositor::Compositor;
use crate::engine::dispatch::DispatchReport;
use crate::foundation::core::FrameNumber;
use crate::foundation::error::{SplitreelError, SplitreelResult};
use crate::render::canvas::{FrameCanvas, FrameRGBA};
use crate::score::schedule::{Score, ScoreCursor};
use crate::session::clock::{Clock, PlaybackMode};

/// How a [`Session`] drives its clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionOpts {
    pub mode: PlaybackMode,
    /// Timeline time the session starts at; earlier score events are skipped.
    pub start_offset: f64,
    /// Host ticks per captured frame (capture mode only).
    pub ticks_per_frame: u32,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::Playback,
            start_offset: 0.0,
            ticks_per_frame: 1,
        }
    }
}

/// Summary of a [`Session::capture_until`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CaptureStats {
    pub frames: u64,
    pub first_time: f64,
    pub last_time: f64,
    pub clips_started: usize,
    pub clips_dropped: usize,
}

/// One playback or capture run: score cursor, clock, compositor and raster target.
pub struct Session {
    compositor: Compositor,
    cursor: ScoreCursor,
    clock: Clock,
    canvas: FrameCanvas,
}

impl Session {
    pub fn new(
        cfg: &EngineConfig,
        score: Score,
        opts: SessionOpts,
        make_player: impl FnMut(ClipId) -> Box<dyn ClipPlayer>,
    ) -> SplitreelResult<Self> {
        let compositor = Compositor::new(cfg, opts.mode, make_player)?;
        let clock = Clock::new(opts.mode, opts.start_offset, opts.ticks_per_frame)?;
        let canvas = FrameCanvas::new(cfg.canvas, cfg.clear_rgba)?;
        let mut cursor = score.cursor();
        let skipped = cursor.seek(opts.start_offset);
        if skipped > 0 {
            tracing::info!(
                skipped,
                start = opts.start_offset,
                "skipped score events before start offset"
            );
        }
        Ok(Self {
            compositor,
            cursor,
            clock,
            canvas,
        })
    }

    /// Session where every clip is drawn by a [`SwatchPlayer`].
    pub fn with_swatches(
        cfg: &EngineConfig,
        score: Score,
        opts: SessionOpts,
    ) -> SplitreelResult<Self> {
        Self::new(cfg, score, opts, |_| Box::new(SwatchPlayer::new()))
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn cursor(&self) -> &ScoreCursor {
        &self.cursor
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Advance by one host tick. Returns the rendered frame, or `None` when capture mode skips
    /// this tick.
    pub fn step(&mut self, wall_elapsed: Duration) -> SplitreelResult<Option<FrameRGBA>> {
        let Some(now) = self.clock.tick(wall_elapsed) else {
            return Ok(None);
        };
        let (frame, _) = self.render_at(now)?;
        Ok(Some(frame))
    }

    fn render_at(&mut self, now: f64) -> SplitreelResult<(FrameRGBA, DispatchReport)> {
        let due = self.cursor.take_due(now);
        let report = self.compositor.dispatch(due, now);
        self.canvas.begin_frame();
        self.compositor.tick(now, &mut self.canvas)?;
        Ok((self.canvas.finish_frame(), report))
    }

    /// Render frames until timeline time reaches `end`, pushing each one to `sink`.
    ///
    /// Frames are numbered from `00000`. A sink failure aborts the capture and is returned; the
    /// session itself stays usable.
    #[tracing::instrument(skip(self, sink))]
    pub fn capture_until(
        &mut self,
        end: f64,
        sink: &mut dyn FrameSink,
    ) -> SplitreelResult<CaptureStats> {
        let PlaybackMode::Capture { fps } = self.clock.mode() else {
            return Err(SplitreelError::config(
                "capture_until requires a session in capture mode",
            ));
        };
        if !end.is_finite() {
            return Err(SplitreelError::config(format!(
                "capture end must be finite, got {end}"
            )));
        }
        let size = self.canvas.size();
        sink.begin(SinkConfig {
            width: size.width,
            height: size.height,
            fps,
        })?;

        tracing::info!(
            width = size.width,
            height = size.height,
            fps = fps.as_f64(),
            "capture started"
        );

        let mut stats = CaptureStats::default();
        let mut number = FrameNumber::default();
        while self.clock.next_frame_time() < end {
            let Some(now) = self.clock.tick(Duration::ZERO) else {
                continue;
            };
            let (frame, report) = self.render_at(now)?;
            sink.push_frame(number, &frame)?;

            if stats.frames == 0 {
                stats.first_time = now;
            }
            stats.frames += 1;
            stats.last_time = now;
            stats.clips_started += report.started.len();
            stats.clips_dropped += report.dropped;
            number = number.next();
        }
        sink.end()?;

        tracing::info!(
            frames = stats.frames,
            clips = stats.clips_started,
            dropped = stats.clips_dropped,
            "capture finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/session.rs"]
mod tests;
