//! trace-timeline: the timeline engine of a trace viewer.
//!
//! Maps trace time onto pixels, computes gridlines, turns pointer, wheel and
//! keyboard input into pan, zoom and area selection, and composites a stack
//! of pinned and scrolling track panels into backend-agnostic draw commands.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod overlay;
pub mod panel;
pub mod render;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
