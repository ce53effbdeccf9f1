//! Timeline driving: clocks and sessions.

pub mod clock;
#[allow(clippy::module_inception)]
pub mod session;
