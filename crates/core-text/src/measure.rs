//! Measurement oracle.
//!
//! A `Measure` maps a text run to the width it occupies when drawn on a
//! single line. Implementations must be monotonic in the run (appending never
//! shrinks the width) and must not wrap.

use unicode_segmentation::UnicodeSegmentation;

use crate::width::cluster_width;

pub trait Measure {
    fn measure(&self, text: &str) -> f32;
}

impl<F> Measure for F
where
    F: Fn(&str) -> f32,
{
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Monospace measurement: every cell is `px_per_cell` wide.
///
/// With `px_per_cell == 1.0` widths are plain terminal columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasure {
    pub px_per_cell: f32,
}

impl CellMeasure {
    pub const fn new(px_per_cell: f32) -> Self {
        Self { px_per_cell }
    }

    pub const fn cells() -> Self {
        Self::new(1.0)
    }
}

impl Default for CellMeasure {
    fn default() -> Self {
        Self::cells()
    }
}

impl Measure for CellMeasure {
    fn measure(&self, text: &str) -> f32 {
        let cells: u32 = text
            .graphemes(true)
            .map(|g| u32::from(cluster_width(g)))
            .sum();
        cells as f32 * self.px_per_cell
    }
}
