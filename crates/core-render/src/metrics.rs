//! Inline icon placement.
//!
//! Font metrics follow the usual baseline convention: `ascent` is negative
//! (above the baseline), `descent` positive.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl FontMetrics {
    pub fn line_height(&self) -> f32 {
        self.descent - self.ascent
    }
}

/// Top of an icon of `icon_height` centered on the text line drawn at
/// `baseline_y`.
pub fn icon_offset_y(baseline_y: f32, metrics: FontMetrics, icon_height: f32) -> f32 {
    let top = baseline_y + metrics.ascent;
    let bottom = baseline_y + metrics.descent;
    (bottom + top) / 2.0 - icon_height / 2.0
}
