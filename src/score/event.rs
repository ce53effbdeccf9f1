use crate::foundation::error::{SplitreelError, SplitreelResult};

/// One scripted timeline event, resolved by its `type` discriminant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScoreEvent {
    /// Start a clip in a new partition region.
    Clip(ClipData),
    /// Change the partition layout.
    Action(ActionData),
}

impl ScoreEvent {
    /// Timeline time at which the event becomes due.
    pub fn trigger_time(&self) -> f64 {
        match self {
            Self::Clip(c) => c.start,
            Self::Action(a) => a.at,
        }
    }

    pub fn validate(&self) -> SplitreelResult<()> {
        match self {
            Self::Clip(c) => c.validate(),
            Self::Action(a) => {
                if !a.at.is_finite() || a.at < 0.0 {
                    return Err(SplitreelError::score(
                        "action time must be finite and >= 0",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Payload assigned to a pooled clip when it starts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipData {
    /// Timeline start in seconds.
    pub start: f64,
    /// Timeline end in seconds (exclusive).
    pub end: f64,
    /// Fixed geometry slot; `None` lets the engine pick one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Paint order; higher draws later.
    #[serde(default)]
    pub z_index: i32,
    /// Opaque reference understood by the clip player.
    pub resource_ref: String,
}

impl ClipData {
    pub fn validate(&self) -> SplitreelResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SplitreelError::score(format!(
                "clip '{}' has non-finite start/end",
                self.resource_ref
            )));
        }
        if self.start < 0.0 {
            return Err(SplitreelError::score(format!(
                "clip '{}' starts before 0",
                self.resource_ref
            )));
        }
        if self.end <= self.start {
            return Err(SplitreelError::score(format!(
                "clip '{}' must end after it starts",
                self.resource_ref
            )));
        }
        if self.resource_ref.trim().is_empty() {
            return Err(SplitreelError::score("clip resourceRef must be non-empty"));
        }
        Ok(())
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionData {
    pub action: LayoutAction,
    /// Timeline time the action fires at.
    #[serde(default)]
    pub at: f64,
}

/// Partition layout changes carried by action events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAction {
    Columns,
    Rows,
}

#[cfg(test)]
#[path = "../../tests/unit/score/event.rs"]
mod tests;
