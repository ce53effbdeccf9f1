use crate::clip::clip::{Clip, ClipId};
use crate::engine::compositor::Compositor;
use crate::foundation::core::Orientation;
use crate::partition::border::TweenKind;
use crate::score::event::{ClipData, LayoutAction, ScoreEvent};

/// Outcome of one [`Compositor::dispatch`] batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Clips started, in event order.
    pub started: Vec<ClipId>,
    /// Clip events ignored because the pool was saturated.
    pub dropped: usize,
    /// Layout actions applied.
    pub actions: usize,
}

impl Compositor {
    /// Apply a batch of due score events at timeline time `now`.
    ///
    /// The first non-empty batch is the first run: its clips are spaced evenly without tweening.
    pub fn dispatch(&mut self, events: &[ScoreEvent], now: f64) -> DispatchReport {
        let mut report = DispatchReport::default();
        if events.is_empty() {
            return report;
        }
        for event in events {
            match event {
                ScoreEvent::Clip(data) => match self.start_clip(data, now) {
                    Some(id) => report.started.push(id),
                    None => report.dropped += 1,
                },
                ScoreEvent::Action(a) => {
                    self.apply_action(a.action);
                    report.actions += 1;
                }
            }
        }
        self.first_run = false;
        report
    }

    /// Start one clip from the pool and splice it into the partition.
    ///
    /// Returns `None` when no idle clip is available; the event is dropped and nothing changes.
    pub fn start_clip(&mut self, data: &ClipData, now: f64) -> Option<ClipId> {
        let Some(id) = self.pool.acquire() else {
            tracing::debug!(resource = %data.resource_ref, now, "clip pool exhausted, event dropped");
            return None;
        };
        let target = match data.index {
            Some(i) => i,
            None => self.rng.below(self.partition.len() + 1),
        };

        let tween_in_until = now + self.tweens.duration(TweenKind::In);
        if let Some(clip) = self.pool.get_mut(id) {
            clip.start(data, self.mode, now);
            if !self.first_run {
                clip.begin_tween_in(tween_in_until);
            }
        }

        // The spliced border copies its neighbor, so borders must be current first.
        self.tweens.advance(&mut self.partition, now);
        let pool = &self.pool;
        let slot = self
            .partition
            .insert(id, target, |c| pool.get(c).and_then(Clip::index));
        if self.first_run {
            self.partition.spread_evenly();
        } else {
            self.tweens
                .schedule(&mut self.partition, TweenKind::In, now, |c| {
                    pool.get(c).is_some_and(Clip::is_tweening_out)
                });
        }
        self.recompute_paint_order();

        tracing::debug!(
            clip = id.0,
            slot,
            resource = %data.resource_ref,
            start = data.start,
            end = data.end,
            "clip started"
        );
        Some(id)
    }

    /// Switch the partition axis. Returns `false` if it already had that orientation.
    pub fn apply_action(&mut self, action: LayoutAction) -> bool {
        let orientation = match action {
            LayoutAction::Columns => Orientation::Columns,
            LayoutAction::Rows => Orientation::Rows,
        };
        let changed = self.partition.set_orientation(orientation);
        if changed {
            tracing::info!(?orientation, time = self.time, "layout orientation changed");
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/dispatch.rs"]
mod tests;
