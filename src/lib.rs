//! Splitreel is a generative split-screen video compositor.
//!
//! A scripted score starts clips at timeline times. Each clip takes one region of a column or row
//! partition of the canvas; when clips arrive or depart the borders between regions tween so the
//! layout grows and collapses smoothly.
//!
//! # Pipeline overview
//!
//! 1. **Load**: JSON score -> [`Score`] (time-ordered, malformed events skipped)
//! 2. **Dispatch**: due [`ScoreEvent`]s -> clip starts and orientation changes on a [`Compositor`]
//! 3. **Tick**: advance border tweens, draw every playing clip into its region, retire finished
//!    clips back into the [`ClipPool`]
//! 4. **Capture** (optional): frame-accurate timing via [`Clock`], frames handed to a
//!    [`FrameSink`] such as [`PngSequenceSink`]
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: one tick at a time, all state owned by the [`Compositor`].
//! - **Deterministic**: random slot choice is seeded from [`EngineConfig::seed`]; capture mode
//!   timing does not depend on wall-clock speed.
#![forbid(unsafe_code)]

mod clip;
mod config;
mod encode;
mod engine;
mod foundation;
mod partition;
mod render;
mod score;
mod session;

pub use clip::clip::{Clip, ClipId};
pub use clip::player::{ClipPlayer, SwatchPlayer, swatch_color};
pub use clip::pool::ClipPool;
pub use config::EngineConfig;
pub use encode::png_sequence::PngSequenceSink;
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use engine::compositor::{Compositor, LayoutSnapshot, SlotSnapshot, TickReport};
pub use engine::dispatch::DispatchReport;
pub use foundation::core::{Canvas, Fps, FrameNumber, Orientation, Rect, Region};
pub use foundation::error::{SplitreelError, SplitreelResult};
pub use partition::border::{Border, BorderTween, TweenKind};
pub use partition::layout::Partition;
pub use partition::tween::TweenScheduler;
pub use render::canvas::{FrameCanvas, FrameRGBA};
pub use score::event::{ActionData, ClipData, LayoutAction, ScoreEvent};
pub use score::schedule::{Score, ScoreCursor};
pub use score::tempo::{MusicTime, Tempo};
pub use session::clock::{Clock, PlaybackMode};
pub use session::session::{CaptureStats, Session, SessionOpts};
