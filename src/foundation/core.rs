use crate::foundation::error::{SplitreelError, SplitreelResult};

pub use kurbo::Rect;

/// Axis-aligned pixel rectangle a clip is drawn into.
pub type Region = Rect;

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Length of the axis the partition divides for `orientation`.
    pub fn extent(self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Columns => f64::from(self.width),
            Orientation::Rows => f64::from(self.height),
        }
    }

    /// Full-canvas rectangle.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 480,
            height: 360,
        }
    }
}

/// Which canvas axis the partition divides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Regions are side-by-side columns; borders move along x.
    #[default]
    Columns,
    /// Regions are stacked rows; borders move along y.
    Rows,
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SplitreelResult<Self> {
        if den == 0 {
            return Err(SplitreelError::config("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SplitreelError::config("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Sequence number of an emitted output frame.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct FrameNumber(pub u64);

impl FrameNumber {
    /// Digits in a frame label.
    pub const LABEL_WIDTH: usize = 5;
    /// Largest representable label; higher frame numbers saturate to it.
    pub const MAX_LABEL: u64 = 99_999;

    /// Zero-padded label, e.g. `00042`. Saturates at [`FrameNumber::MAX_LABEL`].
    pub fn label(self) -> String {
        format!(
            "{:0width$}",
            self.0.min(Self::MAX_LABEL),
            width = Self::LABEL_WIDTH
        )
    }

    /// Following frame number.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for FrameNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
