use std::str::FromStr;

use crate::foundation::error::{SplitreelError, SplitreelResult};

/// Musical tempo used to size tween windows.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tempo {
    /// Beats per minute.
    pub bpm: f64,
    /// Beats in one measure (4 for 4/4).
    pub beats_per_measure: u32,
    /// Subdivisions of a beat addressed by the third `MusicTime` field.
    pub steps_per_beat: u32,
}

impl Default for Tempo {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            beats_per_measure: 4,
            steps_per_beat: 4,
        }
    }
}

impl Tempo {
    pub fn validate(&self) -> SplitreelResult<()> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(SplitreelError::config("tempo bpm must be finite and > 0"));
        }
        if self.beats_per_measure == 0 || self.steps_per_beat == 0 {
            return Err(SplitreelError::config(
                "tempo beats_per_measure and steps_per_beat must be > 0",
            ));
        }
        Ok(())
    }

    pub fn beat_secs(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Length of one measure (`1:0:0`) in seconds.
    pub fn measure_secs(&self) -> f64 {
        self.to_secs(MusicTime {
            bars: 1,
            beats: 0,
            steps: 0,
        })
    }

    pub fn to_secs(&self, t: MusicTime) -> f64 {
        let beat = self.beat_secs();
        let beats = f64::from(t.bars) * f64::from(self.beats_per_measure) + f64::from(t.beats);
        beats * beat + f64::from(t.steps) * (beat / f64::from(self.steps_per_beat))
    }
}

/// Position in `bars:beats:steps` notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MusicTime {
    pub bars: u32,
    pub beats: u32,
    pub steps: u32,
}

impl FromStr for MusicTime {
    type Err = SplitreelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(SplitreelError::score(format!(
                "music time '{s}' must have the form bars:beats:steps"
            )));
        }
        let field = |p: &str| {
            p.trim().parse::<u32>().map_err(|e| {
                SplitreelError::score(format!("music time '{s}' has invalid field '{p}': {e}"))
            })
        };
        Ok(Self {
            bars: field(parts[0])?,
            beats: field(parts[1])?,
            steps: field(parts[2])?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/score/tempo.rs"]
mod tests;
