//! Ellipsis truncation engine.
//!
//! `compute_display_text` is pure: the same source, width and config always
//! produce the same `DisplayText`. Hosts own the measurement oracle and the
//! line breaker; see `core-text` for the reference implementations.

pub mod config;
pub mod display;
pub mod engine;

pub use config::{Argb, ColorRange, HintPalette, TruncationConfig};
pub use display::{ColorSpan, DisplayText, IconMarker, Run};
pub use engine::{TruncateError, compute_display_text, expanded_display_text};
