//! Border model of the split-screen layout.
//!
//! - [`layout::Partition`] owns the geometry order of clips and the borders between them.
//! - [`tween::TweenScheduler`] animates border moves when clips arrive or depart.

pub mod border;
pub mod layout;
pub mod tween;
