//! The composition engine: score dispatch plus the per-tick draw/update loop.

pub mod compositor;
pub mod dispatch;
