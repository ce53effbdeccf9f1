use crate::clip::clip::ClipId;
use crate::foundation::error::{SplitreelError, SplitreelResult};
use crate::partition::border::{BorderTween, TweenKind};
use crate::partition::layout::Partition;

/// Drives border tweens for one partition.
///
/// Batches always cover every interior border with a shared time window, so interpolating them
/// keeps the borders ordered. A new batch starts from the borders' current positions and replaces
/// whatever was in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenScheduler {
    tween_in: f64,
    tween_out: f64,
}

impl TweenScheduler {
    pub fn new(tween_in: f64, tween_out: f64) -> SplitreelResult<Self> {
        for (name, v) in [("tween_in", tween_in), ("tween_out", tween_out)] {
            if !v.is_finite() || v < 0.0 {
                return Err(SplitreelError::config(format!(
                    "{name} duration must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(Self {
            tween_in,
            tween_out,
        })
    }

    pub fn duration(&self, kind: TweenKind) -> f64 {
        match kind {
            TweenKind::In => self.tween_in,
            TweenKind::Out => self.tween_out,
        }
    }

    /// Retarget every interior border so `collapsed` clips shrink to zero width and the rest share
    /// the extent equally. Returns `false` (and leaves borders alone) when nothing would remain.
    pub fn schedule(
        &self,
        partition: &mut Partition,
        kind: TweenKind,
        now: f64,
        collapsed: impl Fn(ClipId) -> bool,
    ) -> bool {
        let Some(targets) = partition.targets(collapsed) else {
            return false;
        };
        let to_time = now + self.duration(kind);
        let borders = partition.borders_mut();
        let interior = borders.len().saturating_sub(1);
        for (b, &to_value) in borders.iter_mut().zip(&targets).take(interior).skip(1) {
            let from_value = b.value_at(now);
            b.value = from_value;
            b.tween = Some(BorderTween {
                kind,
                from_value,
                to_value,
                from_time: now,
                to_time,
            });
        }
        tracing::debug!(
            ?kind,
            now,
            to_time,
            borders = interior.saturating_sub(1),
            "tween batch scheduled"
        );
        true
    }

    /// Move tweening borders to their position at `now`, snapping those whose window closed.
    /// Returns how many borders completed.
    pub fn advance(&self, partition: &mut Partition, now: f64) -> usize {
        let mut done = 0;
        for b in partition.borders_mut() {
            let Some(t) = b.tween else { continue };
            if t.is_done(now) {
                b.snap();
                done += 1;
            } else {
                b.value = t.value_at(now);
            }
        }
        done
    }

    /// Snap every in-flight tween of `kind`. Returns how many borders were snapped.
    pub fn finish(&self, partition: &mut Partition, kind: TweenKind) -> usize {
        let mut done = 0;
        for b in partition.borders_mut() {
            if b.tween.is_some_and(|t| t.kind == kind) {
                b.snap();
                done += 1;
            }
        }
        done
    }
}

#[cfg(test)]
#[path = "../../tests/unit/partition/tween.rs"]
mod tests;
