use crate::clip::clip::{Clip, ClipId};
use crate::clip::player::ClipPlayer;
use crate::clip::pool::ClipPool;
use crate::config::EngineConfig;
use crate::foundation::core::{Orientation, Region};
use crate::foundation::error::{SplitreelError, SplitreelResult};
use crate::foundation::math::Rng64;
use crate::partition::border::TweenKind;
use crate::partition::layout::Partition;
use crate::partition::tween::TweenScheduler;
use crate::render::canvas::FrameCanvas;
use crate::session::clock::PlaybackMode;

/// The split-screen engine: clip pool, partition and tween state for one session.
///
/// Geometry order (which region a clip occupies) lives in the partition; paint order is a
/// separate z-sorted view over the same clips, so sorting for drawing never moves a region.
#[derive(Debug)]
pub struct Compositor {
    pub(super) mode: PlaybackMode,
    pub(super) pool: ClipPool,
    pub(super) partition: Partition,
    pub(super) tweens: TweenScheduler,
    pub(super) rng: Rng64,
    pub(super) paint_order: Vec<ClipId>,
    pub(super) first_run: bool,
    pub(super) time: f64,
}

/// What one [`Compositor::tick`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub time: f64,
    /// Clips handed to their player this tick.
    pub drawn: usize,
    /// Clips that entered their tween-out window this tick.
    pub departing: Vec<ClipId>,
    /// Clips that stopped playing and went back to the pool.
    pub retired: Vec<ClipId>,
    /// Border tweens that completed this tick.
    pub tweens_completed: usize,
}

/// One placed clip in a [`LayoutSnapshot`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SlotSnapshot {
    pub clip: ClipId,
    pub resource: String,
    pub index: Option<usize>,
    pub z_index: i32,
    pub region: Region,
    pub tweening_in: bool,
    pub tweening_out: bool,
}

/// Serializable view of the layout at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayoutSnapshot {
    pub time: f64,
    pub orientation: Orientation,
    pub borders: Vec<f64>,
    /// Placed clips in geometry order.
    pub slots: Vec<SlotSnapshot>,
    pub paint_order: Vec<ClipId>,
}

impl Compositor {
    pub fn new(
        cfg: &EngineConfig,
        mode: PlaybackMode,
        make_player: impl FnMut(ClipId) -> Box<dyn ClipPlayer>,
    ) -> SplitreelResult<Self> {
        cfg.validate()?;
        Ok(Self {
            mode,
            pool: ClipPool::new(cfg.pool_size, make_player)?,
            partition: Partition::new(cfg.canvas, cfg.orientation),
            tweens: TweenScheduler::new(cfg.tween_in_secs(), cfg.tween_out_secs())?,
            rng: Rng64::new(cfg.seed),
            paint_order: Vec::new(),
            first_run: true,
            time: 0.0,
        })
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn pool(&self) -> &ClipPool {
        &self.pool
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn tweens(&self) -> &TweenScheduler {
        &self.tweens
    }

    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.pool.get(id)
    }

    /// Placed clips sorted by z-index (stable over geometry order).
    pub fn paint_order(&self) -> &[ClipId] {
        &self.paint_order
    }

    /// `true` until the first dispatched batch has been processed.
    pub fn is_first_run(&self) -> bool {
        self.first_run
    }

    /// Timeline time of the last tick.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Run one draw/update pass at timeline time `now`.
    ///
    /// Borders are advanced first, then every playing clip is drawn in paint order and updated in
    /// geometry order. Clips entering their tween-out window trigger one collapse batch; clips
    /// that stopped are retired and the pool is reconciled before returning.
    pub fn tick(&mut self, now: f64, canvas: &mut FrameCanvas) -> SplitreelResult<TickReport> {
        self.time = now;
        let mut report = TickReport {
            time: now,
            tweens_completed: self.tweens.advance(&mut self.partition, now),
            ..TickReport::default()
        };
        self.trace_borders();

        for &id in &self.paint_order {
            let Some(region) = self
                .partition
                .slot_of(id)
                .and_then(|slot| self.partition.region(slot))
            else {
                continue;
            };
            let Some(clip) = self.pool.get_mut(id) else {
                continue;
            };
            if clip.is_playing() {
                clip.draw(canvas, region)?;
                report.drawn += 1;
            }
        }

        let out_window = self.tweens.duration(TweenKind::Out);
        let mut stopped = Vec::new();
        for &id in self.partition.slots() {
            let Some(clip) = self.pool.get_mut(id) else {
                continue;
            };
            clip.update(now);
            if !clip.is_tweening_out() && clip.end_time() - out_window <= now {
                clip.begin_tween_out();
                report.departing.push(id);
            }
            if clip.is_tweening_in() && now >= clip.tween_in_until() {
                clip.end_tween_in();
            }
            if !clip.is_playing() {
                stopped.push(id);
            }
        }

        if !report.departing.is_empty() {
            let pool = &self.pool;
            self.tweens
                .schedule(&mut self.partition, TweenKind::Out, now, |id| {
                    pool.get(id).is_some_and(Clip::is_tweening_out)
                });
        }

        if !stopped.is_empty() {
            report.tweens_completed += self.retire(&stopped);
            report.retired = stopped;
        }
        Ok(report)
    }

    fn retire(&mut self, stopped: &[ClipId]) -> usize {
        for &id in stopped {
            self.pool.release(id);
            if let Some(slot) = self.partition.remove(id) {
                tracing::debug!(clip = id.0, slot, "clip retired");
            }
        }
        let pool = &self.pool;
        let still_departing = self
            .partition
            .slots()
            .iter()
            .any(|&id| pool.get(id).is_some_and(Clip::is_tweening_out));
        let snapped = if still_departing {
            0
        } else {
            self.tweens.finish(&mut self.partition, TweenKind::Out)
        };
        self.pool.reconcile();
        self.recompute_paint_order();
        snapped
    }

    pub(super) fn recompute_paint_order(&mut self) {
        let pool = &self.pool;
        let mut order = self.partition.slots().to_vec();
        order.sort_by_key(|&id| pool.get(id).map_or(0, Clip::z_index));
        self.paint_order = order;
    }

    fn trace_borders(&self) {
        if tracing::enabled!(tracing::Level::TRACE) {
            let values: Vec<f64> = self.partition.borders().iter().map(|b| b.value).collect();
            tracing::trace!(time = self.time, borders = ?values, "borders");
        }
    }

    /// Current layout as plain data.
    pub fn layout(&self) -> LayoutSnapshot {
        let slots = self
            .partition
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(slot, &id)| {
                let clip = self.pool.get(id)?;
                Some(SlotSnapshot {
                    clip: id,
                    resource: clip.resource_ref().unwrap_or_default().to_string(),
                    index: clip.index(),
                    z_index: clip.z_index(),
                    region: self.partition.region(slot)?,
                    tweening_in: clip.is_tweening_in(),
                    tweening_out: clip.is_tweening_out(),
                })
            })
            .collect();
        LayoutSnapshot {
            time: self.time,
            orientation: self.partition.orientation(),
            borders: self.partition.borders().iter().map(|b| b.value).collect(),
            slots,
            paint_order: self.paint_order.clone(),
        }
    }

    /// Check the structural invariants that must hold between ticks.
    pub fn check_invariants(&self) -> SplitreelResult<()> {
        self.partition.validate()?;
        self.pool.validate()?;
        let active = self.pool.active();
        if active.len() != self.partition.len()
            || active.iter().any(|&id| self.partition.slot_of(id).is_none())
        {
            return Err(SplitreelError::layout(format!(
                "{} active clips but {} placed clips",
                active.len(),
                self.partition.len()
            )));
        }
        if self.paint_order.len() != self.partition.len() {
            return Err(SplitreelError::layout("paint order out of sync with geometry"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/compositor.rs"]
mod tests;
