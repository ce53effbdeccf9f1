//! Pooled clips and the player interface that draws them.

#[allow(clippy::module_inception)]
pub mod clip;
pub mod player;
pub mod pool;
