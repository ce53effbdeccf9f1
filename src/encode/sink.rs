use crate::foundation::core::{Fps, FrameNumber};
use crate::foundation::error::SplitreelResult;
use crate::render::canvas::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Capture framerate.
    pub fps: Fps,
}

/// Consumer of captured frames.
///
/// `push_frame` is called with strictly increasing frame numbers starting at `00000`. Any error
/// aborts the capture and is returned to whoever started it.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SplitreelResult<()>;
    /// Persist one frame.
    fn push_frame(&mut self, number: FrameNumber, frame: &FrameRGBA) -> SplitreelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SplitreelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameNumber, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameNumber, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was called after the last `begin`.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SplitreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, number: FrameNumber, frame: &FrameRGBA) -> SplitreelResult<()> {
        self.frames.push((number, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SplitreelResult<()> {
        self.ended = true;
        Ok(())
    }
}
