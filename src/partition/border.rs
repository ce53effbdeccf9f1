use crate::foundation::math::lerp;

/// Which transition a border tween belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TweenKind {
    /// A clip is growing in from zero width.
    In,
    /// One or more clips are collapsing to zero width.
    Out,
}

/// Linear move of a border between two positions over a time window.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BorderTween {
    pub kind: TweenKind,
    pub from_value: f64,
    pub to_value: f64,
    pub from_time: f64,
    pub to_time: f64,
}

impl BorderTween {
    /// Interpolated position at `now`. Not clamped: past `to_time` it extrapolates.
    pub fn value_at(&self, now: f64) -> f64 {
        let span = self.to_time - self.from_time;
        if span <= 0.0 {
            return self.to_value;
        }
        lerp(self.from_value, self.to_value, (now - self.from_time) / span)
    }

    pub fn is_done(&self, now: f64) -> bool {
        now >= self.to_time
    }

    pub(crate) fn rescale(&mut self, k: f64) {
        self.from_value *= k;
        self.to_value *= k;
    }
}

/// A region boundary along the partition axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Border {
    pub value: f64,
    pub tween: Option<BorderTween>,
}

impl Border {
    pub fn at(value: f64) -> Self {
        Self { value, tween: None }
    }

    pub fn is_tweening(&self) -> bool {
        self.tween.is_some()
    }

    /// Position at `now`, clamped to the tween's target once its window closed.
    pub fn value_at(&self, now: f64) -> f64 {
        match self.tween {
            Some(t) if t.is_done(now) => t.to_value,
            Some(t) => t.value_at(now),
            None => self.value,
        }
    }

    /// Jump to the tween target and clear the tween.
    pub fn snap(&mut self) {
        if let Some(t) = self.tween.take() {
            self.value = t.to_value;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/partition/border.rs"]
mod tests;
