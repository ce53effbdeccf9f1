use crate::clip::player::ClipPlayer;
use crate::foundation::core::Region;
use crate::foundation::error::SplitreelResult;
use crate::render::canvas::FrameCanvas;
use crate::score::event::ClipData;
use crate::session::clock::PlaybackMode;

/// Stable handle of a pooled clip. Valid for the lifetime of its pool.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ClipId(pub usize);

/// One pooled, reusable playback unit.
///
/// A clip is never destroyed; `start` re-assigns its payload on every reuse.
pub struct Clip {
    id: ClipId,
    player: Box<dyn ClipPlayer>,
    data: Option<ClipData>,
    mode: PlaybackMode,
    playing: bool,
    tweening_in: bool,
    tweening_out: bool,
    tween_in_until: f64,
}

impl std::fmt::Debug for Clip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clip")
            .field("id", &self.id)
            .field("data", &self.data)
            .field("playing", &self.playing)
            .field("tweening_in", &self.tweening_in)
            .field("tweening_out", &self.tweening_out)
            .finish_non_exhaustive()
    }
}

impl Clip {
    pub(crate) fn new(id: ClipId, player: Box<dyn ClipPlayer>) -> Self {
        Self {
            id,
            player,
            data: None,
            mode: PlaybackMode::Playback,
            playing: false,
            tweening_in: false,
            tweening_out: false,
            tween_in_until: 0.0,
        }
    }

    pub(crate) fn start(&mut self, data: &ClipData, mode: PlaybackMode, position: f64) {
        self.player.start(data, mode, position);
        self.data = Some(data.clone());
        self.mode = mode;
        self.playing = position < data.end;
        self.tweening_in = false;
        self.tweening_out = false;
        self.tween_in_until = position;
    }

    /// Advance playback to `time`; a clip stops playing once `time` reaches its end.
    pub(crate) fn update(&mut self, time: f64) {
        self.player.update(time);
        self.playing = self.data.as_ref().is_some_and(|d| time < d.end);
    }

    pub(crate) fn draw(&mut self, canvas: &mut FrameCanvas, region: Region) -> SplitreelResult<()> {
        match self.mode {
            PlaybackMode::Playback => self.player.draw(canvas, region),
            PlaybackMode::Capture { fps } => self.player.capture(canvas, region, fps),
        }
    }

    /// Drop the payload once the clip is back in the idle set.
    pub(crate) fn reset(&mut self) {
        self.data = None;
        self.playing = false;
        self.tweening_in = false;
        self.tweening_out = false;
    }

    pub(crate) fn begin_tween_in(&mut self, until: f64) {
        self.tweening_in = true;
        self.tween_in_until = until;
    }

    pub(crate) fn end_tween_in(&mut self) {
        self.tweening_in = false;
    }

    pub(crate) fn begin_tween_out(&mut self) {
        self.tweening_out = true;
    }

    pub fn id(&self) -> ClipId {
        self.id
    }

    pub fn data(&self) -> Option<&ClipData> {
        self.data.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn start_time(&self) -> f64 {
        self.data.as_ref().map_or(0.0, |d| d.start)
    }

    pub fn end_time(&self) -> f64 {
        self.data.as_ref().map_or(0.0, |d| d.end)
    }

    /// Fixed geometry slot, if the payload requested one.
    pub fn index(&self) -> Option<usize> {
        self.data.as_ref().and_then(|d| d.index)
    }

    pub fn z_index(&self) -> i32 {
        self.data.as_ref().map_or(0, |d| d.z_index)
    }

    pub fn resource_ref(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.resource_ref.as_str())
    }

    pub fn is_tweening_in(&self) -> bool {
        self.tweening_in
    }

    pub fn is_tweening_out(&self) -> bool {
        self.tweening_out
    }

    /// Timeline time at which the tween-in window closes.
    pub fn tween_in_until(&self) -> f64 {
        self.tween_in_until
    }
}
