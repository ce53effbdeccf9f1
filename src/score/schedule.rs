use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SplitreelError, SplitreelResult};
use crate::score::event::ScoreEvent;

/// Time-ordered score events.
///
/// Events are stably sorted by trigger time, so events sharing a time keep the order they were
/// supplied in.
#[derive(Clone, Debug, Default)]
pub struct Score {
    events: Vec<ScoreEvent>,
    skipped: usize,
}

impl Score {
    /// Build a score, dropping events that fail validation.
    pub fn from_events(events: impl IntoIterator<Item = ScoreEvent>) -> Self {
        let mut kept = Vec::new();
        let mut skipped = 0usize;
        for (i, ev) in events.into_iter().enumerate() {
            match ev.validate() {
                Ok(()) => kept.push(ev),
                Err(e) => {
                    tracing::warn!(event = i, error = %e, "skipping invalid score event");
                    skipped += 1;
                }
            }
        }
        kept.sort_by(|a, b| a.trigger_time().total_cmp(&b.trigger_time()));
        Self {
            events: kept,
            skipped,
        }
    }

    /// Parse a JSON array of events.
    ///
    /// Elements that do not decode are skipped individually; a document that is not an array
    /// fails the whole load.
    pub fn from_json_str(s: &str) -> SplitreelResult<Self> {
        let doc: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| SplitreelError::score(format!("score is not valid JSON: {e}")))?;
        let serde_json::Value::Array(items) = doc else {
            return Err(SplitreelError::score("score must be a JSON array of events"));
        };

        let mut decoded = Vec::with_capacity(items.len());
        let mut undecodable = 0usize;
        for (i, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<ScoreEvent>(item) {
                Ok(ev) => decoded.push(ev),
                Err(e) => {
                    tracing::warn!(event = i, error = %e, "skipping malformed score event");
                    undecodable += 1;
                }
            }
        }

        let mut score = Self::from_events(decoded);
        score.skipped += undecodable;
        Ok(score)
    }

    pub fn from_path(path: &Path) -> SplitreelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read score '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn events(&self) -> &[ScoreEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events dropped while loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Latest clip end time, or 0 for a score without clips.
    pub fn end_time(&self) -> f64 {
        self.events
            .iter()
            .filter_map(|e| match e {
                ScoreEvent::Clip(c) => Some(c.end),
                ScoreEvent::Action(_) => None,
            })
            .fold(0.0, f64::max)
    }

    pub fn cursor(self) -> ScoreCursor {
        ScoreCursor {
            score: self,
            next: 0,
        }
    }
}

/// Consume-once reader over a [`Score`].
#[derive(Clone, Debug)]
pub struct ScoreCursor {
    score: Score,
    next: usize,
}

impl ScoreCursor {
    /// Every unconsumed event due at or before `time`, in score order.
    pub fn take_due(&mut self, time: f64) -> &[ScoreEvent] {
        let start = self.next;
        let events = &self.score.events;
        let mut end = start;
        while end < events.len() && events[end].trigger_time() <= time {
            end += 1;
        }
        self.next = end;
        &events[start..end]
    }

    /// Skip every event that triggers strictly before `time`.
    pub fn seek(&mut self, time: f64) -> usize {
        let before = self.next;
        let events = &self.score.events;
        while self.next < events.len() && events[self.next].trigger_time() < time {
            self.next += 1;
        }
        self.next - before
    }

    pub fn remaining(&self) -> usize {
        self.score.events.len() - self.next
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    pub fn score(&self) -> &Score {
        &self.score
    }
}

#[cfg(test)]
#[path = "../../tests/unit/score/schedule.rs"]
mod tests;
