use crate::clip::clip::ClipId;
use crate::foundation::core::{Canvas, Orientation, Region};
use crate::foundation::error::{SplitreelError, SplitreelResult};
use crate::partition::border::Border;

const MONOTONIC_EPS: f64 = 1e-9;

/// Division of the canvas into contiguous clip regions.
///
/// `slots[i]` is drawn into `[borders[i], borders[i + 1])` along the partition axis. The outer
/// borders stay pinned at `0` and the canvas extent, so `borders.len() == slots.len() + 1` while
/// any clip is placed (and `2` when empty).
#[derive(Clone, Debug)]
pub struct Partition {
    canvas: Canvas,
    orientation: Orientation,
    borders: Vec<Border>,
    slots: Vec<ClipId>,
}

impl Partition {
    pub fn new(canvas: Canvas, orientation: Orientation) -> Self {
        Self {
            canvas,
            orientation,
            borders: vec![Border::at(0.0), Border::at(canvas.extent(orientation))],
            slots: Vec::new(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Length of the divided axis.
    pub fn extent(&self) -> f64 {
        self.canvas.extent(self.orientation)
    }

    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    pub(crate) fn borders_mut(&mut self) -> &mut [Border] {
        &mut self.borders
    }

    /// Clips in geometry order.
    pub fn slots(&self) -> &[ClipId] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot_of(&self, id: ClipId) -> Option<usize> {
        self.slots.iter().position(|&s| s == id)
    }

    /// Place `id` near `target`, re-run fixed-index placement and splice a zero-width region for
    /// it. Returns the slot the clip ended up in.
    pub fn insert(
        &mut self,
        id: ClipId,
        target: usize,
        index_of: impl Fn(ClipId) -> Option<usize>,
    ) -> usize {
        let mut order = std::mem::take(&mut self.slots);
        order.insert(target.min(order.len()), id);
        self.slots = place_slots(&order, index_of);

        let slot = self.slot_of(id).unwrap_or(0);
        if self.slots.len() > 1 {
            let value = self.borders[slot].value;
            self.borders.insert(slot + 1, Border::at(value));
        }
        slot
    }

    /// Drop `id` and one border adjacent to its region. Returns the slot it occupied.
    ///
    /// The right border goes unless it is the pinned far edge, in which case the left one does.
    /// The last remaining region keeps both pinned edges.
    pub fn remove(&mut self, id: ClipId) -> Option<usize> {
        let slot = self.slot_of(id)?;
        self.slots.remove(slot);
        if slot + 1 < self.borders.len() - 1 {
            self.borders.remove(slot + 1);
        } else if slot > 0 {
            self.borders.remove(slot);
        }
        Some(slot)
    }

    /// Space every border equally with no animation.
    pub fn spread_evenly(&mut self) {
        let n = self.slots.len().max(1);
        let extent = self.extent();
        for (i, b) in self.borders.iter_mut().enumerate() {
            *b = Border::at(extent * i as f64 / n as f64);
        }
    }

    /// Switch the divided axis, rescaling every border (and tween endpoint) proportionally.
    ///
    /// Returns `false` when the orientation is already `orientation`.
    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        if self.orientation == orientation {
            return false;
        }
        let old = self.extent();
        self.orientation = orientation;
        let new = self.extent();
        let k = new / old;
        for b in &mut self.borders {
            b.value *= k;
            if let Some(t) = b.tween.as_mut() {
                t.rescale(k);
            }
        }
        if let Some(last) = self.borders.last_mut() {
            last.value = new;
        }
        true
    }

    /// Pixel rectangle of `slot` from the current border values.
    pub fn region(&self, slot: usize) -> Option<Region> {
        if slot >= self.slots.len() {
            return None;
        }
        let a = self.borders.get(slot)?.value;
        let b = self.borders.get(slot + 1)?.value;
        let (w, h) = (f64::from(self.canvas.width), f64::from(self.canvas.height));
        Some(match self.orientation {
            Orientation::Columns => Region::new(a, 0.0, b, h),
            Orientation::Rows => Region::new(0.0, a, w, b),
        })
    }

    /// Border positions that give each `collapsed` clip zero width and share the extent equally
    /// among the others. `None` when every clip collapses.
    pub fn targets(&self, collapsed: impl Fn(ClipId) -> bool) -> Option<Vec<f64>> {
        let growing = self.slots.iter().filter(|&&id| !collapsed(id)).count();
        if growing == 0 {
            return None;
        }
        let width = self.extent() / growing as f64;
        let mut out = Vec::with_capacity(self.borders.len());
        let mut at = 0.0;
        out.push(at);
        for &id in &self.slots {
            if !collapsed(id) {
                at += width;
            }
            out.push(at);
        }
        if let Some(last) = out.last_mut() {
            *last = self.extent();
        }
        Some(out)
    }

    /// Check border count, pinned edges and monotonicity.
    pub fn validate(&self) -> SplitreelResult<()> {
        let expected = self.slots.len().max(1) + 1;
        if self.borders.len() != expected {
            return Err(SplitreelError::layout(format!(
                "{} borders for {} clips (expected {expected})",
                self.borders.len(),
                self.slots.len()
            )));
        }
        let first = self.borders[0].value;
        let last = self.borders[self.borders.len() - 1].value;
        if first.abs() > MONOTONIC_EPS || (last - self.extent()).abs() > MONOTONIC_EPS {
            return Err(SplitreelError::layout(format!(
                "outer borders must be pinned at 0 and {}, got {first} and {last}",
                self.extent()
            )));
        }
        if let Some(i) = self
            .borders
            .windows(2)
            .position(|w| w[1].value + MONOTONIC_EPS < w[0].value)
        {
            return Err(SplitreelError::layout(format!(
                "border {} ({}) is left of border {i} ({})",
                i + 1,
                self.borders[i + 1].value,
                self.borders[i].value
            )));
        }
        Ok(())
    }
}

/// Two-pass slot placement over `order.len()` cells.
///
/// Clips whose fixed index is in range claim that cell first; on a collision the earlier clip
/// wins and the later one is treated as unindexed. Unindexed clips then take the free cells
/// left to right in arrival order. Clips whose index lies past the end take the rightmost free
/// cells, ordered by index.
pub(crate) fn place_slots(
    order: &[ClipId],
    index_of: impl Fn(ClipId) -> Option<usize>,
) -> Vec<ClipId> {
    let n = order.len();
    let mut cells: Vec<Option<ClipId>> = vec![None; n];
    let mut rest = Vec::with_capacity(n);
    let mut overflow = Vec::new();
    for &id in order {
        match index_of(id) {
            Some(i) if i < n && cells[i].is_none() => cells[i] = Some(id),
            Some(i) if i >= n => overflow.push((i, id)),
            _ => rest.push(id),
        }
    }
    overflow.sort_by_key(|&(i, _)| i);

    let free: Vec<usize> = (0..n).filter(|&i| cells[i].is_none()).collect();
    let (front, back) = free.split_at(rest.len().min(free.len()));
    for (&i, id) in front.iter().zip(rest) {
        cells[i] = Some(id);
    }
    for (&i, (_, id)) in back.iter().zip(overflow) {
        cells[i] = Some(id);
    }

    cells.into_iter().flatten().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/partition/layout.rs"]
mod tests;
