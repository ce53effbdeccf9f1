use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Fps, Orientation};
use crate::foundation::error::{SplitreelError, SplitreelResult};
use crate::score::tempo::Tempo;

/// Engine-wide settings fixed for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Number of pooled clip players. Never grows at runtime.
    pub pool_size: usize,
    /// Initial partition orientation.
    pub orientation: Orientation,
    /// Tempo that defines the measure used for tween windows.
    pub tempo: Tempo,
    /// Tween-in window as a fraction of one measure.
    pub tween_in_measures: f64,
    /// Tween-out window as a fraction of one measure.
    pub tween_out_measures: f64,
    /// Output framerate for capture mode.
    pub framerate: Fps,
    /// Seed for random slot selection of unindexed clips.
    pub seed: u64,
    /// Background color (straight RGBA8).
    pub clear_rgba: [u8; 4],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            pool_size: 12,
            orientation: Orientation::Columns,
            tempo: Tempo::default(),
            tween_in_measures: 0.7,
            tween_out_measures: 0.5,
            framerate: Fps::default(),
            seed: 0,
            clear_rgba: [0, 0, 0, 255],
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> SplitreelResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SplitreelError::config("canvas width/height must be > 0"));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(SplitreelError::config(format!(
                "canvas {}x{} exceeds the maximum raster size of {}",
                self.canvas.width,
                self.canvas.height,
                u16::MAX
            )));
        }
        if self.pool_size == 0 {
            return Err(SplitreelError::config("pool_size must be >= 1"));
        }
        for (name, v) in [
            ("tween_in_measures", self.tween_in_measures),
            ("tween_out_measures", self.tween_out_measures),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SplitreelError::config(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Fps::new(self.framerate.num, self.framerate.den)?;
        self.tempo.validate()
    }

    pub fn from_path(path: &Path) -> SplitreelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&s)
            .map_err(|e| SplitreelError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Tween-in duration in seconds.
    pub fn tween_in_secs(&self) -> f64 {
        self.tempo.measure_secs() * self.tween_in_measures
    }

    /// Tween-out duration in seconds.
    pub fn tween_out_secs(&self) -> f64 {
        self.tempo.measure_secs() * self.tween_out_measures
    }
}
