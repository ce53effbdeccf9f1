use std::time::Duration;

use crate::foundation::core::Fps;
use crate::foundation::error::{SplitreelError, SplitreelResult};

/// How timeline time relates to wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackMode {
    /// Timeline advances by real elapsed time.
    #[default]
    Playback,
    /// Timeline advances by exactly one frame at `fps`, independent of execution speed.
    Capture { fps: Fps },
}

impl PlaybackMode {
    pub fn is_capture(self) -> bool {
        matches!(self, Self::Capture { .. })
    }
}

/// Converts host ticks into timeline time.
///
/// In capture mode only every `ticks_per_frame`-th tick yields a time, and that time is
/// `origin + frames / fps`; the first tick yields `origin` itself.
#[derive(Clone, Debug)]
pub struct Clock {
    mode: PlaybackMode,
    origin: f64,
    time: f64,
    ticks_per_frame: u32,
    wall_ticks: u64,
    frames: u64,
}

impl Clock {
    pub fn new(mode: PlaybackMode, origin: f64, ticks_per_frame: u32) -> SplitreelResult<Self> {
        if !origin.is_finite() || origin < 0.0 {
            return Err(SplitreelError::config(format!(
                "clock origin must be finite and >= 0, got {origin}"
            )));
        }
        if ticks_per_frame == 0 {
            return Err(SplitreelError::config("ticks_per_frame must be >= 1"));
        }
        Ok(Self {
            mode,
            origin,
            time: origin,
            ticks_per_frame,
            wall_ticks: 0,
            frames: 0,
        })
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Last timeline time produced.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Frames produced so far in capture mode.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Timeline time the next produced frame will carry. In playback mode this is the current
    /// time, since the next step is not known ahead.
    pub fn next_frame_time(&self) -> f64 {
        match self.mode {
            PlaybackMode::Playback => self.time,
            PlaybackMode::Capture { fps } => self.origin + fps.frames_to_secs(self.frames),
        }
    }

    /// Advance by one host tick. Returns the timeline time to render, or `None` when capture mode
    /// skips this tick.
    pub fn tick(&mut self, wall_elapsed: Duration) -> Option<f64> {
        let tick = self.wall_ticks;
        self.wall_ticks += 1;
        match self.mode {
            PlaybackMode::Playback => {
                if tick > 0 {
                    self.time += wall_elapsed.as_secs_f64();
                }
                Some(self.time)
            }
            PlaybackMode::Capture { fps } => {
                if tick % u64::from(self.ticks_per_frame) != 0 {
                    return None;
                }
                self.time = self.origin + fps.frames_to_secs(self.frames);
                self.frames += 1;
                Some(self.time)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/clock.rs"]
mod tests;
