//! Frame sinks for capture mode.

pub mod png_sequence;
pub mod sink;
