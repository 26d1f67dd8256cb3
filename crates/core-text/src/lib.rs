//! Text primitives consumed by the truncation engine.
//!
//! The engine never lays out or measures text itself; it asks a [`Measure`]
//! oracle for the width of a run and a [`LineBreaker`] for line spans. This
//! crate defines both seams and ships reference implementations that work in
//! terminal cells (optionally scaled to pixels) so hosts without a real font
//! stack can still drive the engine.
//!
//! All offsets handed across the crate boundary are UTF-8 byte offsets that
//! sit on grapheme cluster boundaries.

pub mod measure;
pub mod segment;
pub mod width;
pub mod wrap;

pub use measure::{CellMeasure, Measure};
pub use segment::{Cluster, clusters};
pub use width::cluster_width;
pub use wrap::{GreedyBreaker, LineBreaker, LineSpan, TextLayout, WrapMode};

/// True for the characters a layout treats as hard line breaks.
#[inline]
pub fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Trim every trailing line break (`\n`, `\r`) from `text`.
pub fn trim_trailing_breaks(text: &str) -> &str {
    text.trim_end_matches(is_line_break)
}
