//! Score data: the scripted timeline of clip starts and layout actions.

pub mod event;
pub mod schedule;
pub mod tempo;
