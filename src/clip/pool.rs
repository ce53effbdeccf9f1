use crate::clip::clip::{Clip, ClipId};
use crate::clip::player::ClipPlayer;
use crate::foundation::error::{SplitreelError, SplitreelResult};

/// Fixed-capacity pool of reusable clips.
///
/// Every clip id lives in exactly one of the idle, active or stopped sets. Released clips sit in
/// the stopped set until [`ClipPool::reconcile`] merges them back into idle, so a frame's draw
/// pass always sees a stable active set.
#[derive(Debug)]
pub struct ClipPool {
    clips: Vec<Clip>,
    idle: Vec<ClipId>,
    active: Vec<ClipId>,
    stopped: Vec<ClipId>,
}

impl ClipPool {
    /// Create `capacity` clips, each with a player from `make_player`.
    pub fn new(
        capacity: usize,
        mut make_player: impl FnMut(ClipId) -> Box<dyn ClipPlayer>,
    ) -> SplitreelResult<Self> {
        if capacity == 0 {
            return Err(SplitreelError::config("clip pool capacity must be >= 1"));
        }
        let clips: Vec<Clip> = (0..capacity)
            .map(|i| Clip::new(ClipId(i), make_player(ClipId(i))))
            .collect();
        Ok(Self {
            idle: clips.iter().map(Clip::id).collect(),
            clips,
            active: Vec::with_capacity(capacity),
            stopped: Vec::with_capacity(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.clips.len()
    }

    /// Move one idle clip into the active set, or `None` when the pool is saturated.
    pub fn acquire(&mut self) -> Option<ClipId> {
        let id = self.idle.pop()?;
        self.active.push(id);
        Some(id)
    }

    /// Move an active clip into the stopped set. Returns `false` if it was not active.
    pub fn release(&mut self, id: ClipId) -> bool {
        let Some(pos) = self.active.iter().position(|&a| a == id) else {
            return false;
        };
        self.active.remove(pos);
        self.stopped.push(id);
        true
    }

    /// Merge stopped clips back into idle. Returns how many were recycled.
    pub fn reconcile(&mut self) -> usize {
        let n = self.stopped.len();
        for id in self.stopped.drain(..) {
            self.clips[id.0].reset();
            self.idle.push(id);
        }
        n
    }

    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.get(id.0)
    }

    pub fn get_mut(&mut self, id: ClipId) -> Option<&mut Clip> {
        self.clips.get_mut(id.0)
    }

    pub fn idle(&self) -> &[ClipId] {
        &self.idle
    }

    /// Active clips in acquisition order.
    pub fn active(&self) -> &[ClipId] {
        &self.active
    }

    pub fn stopped(&self) -> &[ClipId] {
        &self.stopped
    }

    /// Check that every clip is in exactly one set.
    pub fn validate(&self) -> SplitreelResult<()> {
        let mut seen = vec![0u8; self.clips.len()];
        for &id in self.idle.iter().chain(&self.active).chain(&self.stopped) {
            let slot = seen.get_mut(id.0).ok_or_else(|| {
                SplitreelError::layout(format!("pool holds unknown clip id {}", id.0))
            })?;
            *slot += 1;
        }
        if let Some(i) = seen.iter().position(|&n| n != 1) {
            return Err(SplitreelError::layout(format!(
                "clip {i} appears in {} pool sets (expected exactly 1)",
                seen[i]
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clip/pool.rs"]
mod tests;
