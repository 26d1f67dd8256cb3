//! Per-widget truncation configuration.
//!
//! Read-only during a computation pass. Field defaults mirror the stock
//! widget look: three lines, `...`, a single space before the icon, and a
//! pink hint tint.

use std::num::NonZeroUsize;

use crate::display::IconMarker;

/// Packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

pub const DEFAULT_MAX_LINES: usize = 3;
pub const DEFAULT_ELLIPSIS: &str = "...";
pub const DEFAULT_GAP: &str = " ";
pub const DEFAULT_HINT_COLOR: Argb = Argb(0xFFFF_98BE);
pub const DEFAULT_HINT_COLOR_PRESSED: Argb = Argb(0x5599_9999);
/// Icon advance in measurement units (cells for `CellMeasure::cells()`).
pub const DEFAULT_ICON_WIDTH: u32 = 2;

/// Highlight applied to a byte range of the truncated run.
///
/// Out of range values are clamped when the display text is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub start: usize,
    pub len: usize,
    pub color: Argb,
}

/// Tints for the expand / shrink affordances, normal and pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintPalette {
    pub expand: Argb,
    pub shrink: Argb,
    pub expand_pressed: Argb,
    pub shrink_pressed: Argb,
}

impl Default for HintPalette {
    fn default() -> Self {
        Self {
            expand: DEFAULT_HINT_COLOR,
            shrink: DEFAULT_HINT_COLOR,
            expand_pressed: DEFAULT_HINT_COLOR_PRESSED,
            shrink_pressed: DEFAULT_HINT_COLOR_PRESSED,
        }
    }
}

impl HintPalette {
    /// Foreground for the icon, plus a background while pressed.
    pub fn icon_colors(&self, icon: IconMarker, pressed: bool) -> (Argb, Option<Argb>) {
        let (fg, bg) = match icon {
            IconMarker::Expand => (self.expand, self.expand_pressed),
            IconMarker::Shrink => (self.shrink, self.shrink_pressed),
        };
        (fg, pressed.then_some(bg))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TruncationConfig {
    pub max_lines: NonZeroUsize,
    pub ellipsis: String,
    pub expand_gap: String,
    pub shrink_gap: String,
    pub show_expand_icon: bool,
    pub show_shrink_icon: bool,
    pub expand_icon_width: u32,
    pub special_color: Option<ColorRange>,
}

impl Default for TruncationConfig {
    fn default() -> Self {
        Self {
            max_lines: NonZeroUsize::new(DEFAULT_MAX_LINES).unwrap_or(NonZeroUsize::MIN),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            expand_gap: DEFAULT_GAP.to_string(),
            shrink_gap: DEFAULT_GAP.to_string(),
            show_expand_icon: true,
            show_shrink_icon: true,
            expand_icon_width: DEFAULT_ICON_WIDTH,
            special_color: None,
        }
    }
}

impl TruncationConfig {
    /// Set the line budget; zero is clamped to one.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = NonZeroUsize::new(max_lines).unwrap_or(NonZeroUsize::MIN);
        self
    }

    /// An empty ellipsis falls back to the default marker.
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        let ellipsis = ellipsis.into();
        self.ellipsis = if ellipsis.is_empty() {
            DEFAULT_ELLIPSIS.to_string()
        } else {
            ellipsis
        };
        self
    }

    pub fn with_expand_icon(mut self, show: bool, width: u32) -> Self {
        self.show_expand_icon = show;
        self.expand_icon_width = width;
        self
    }

    pub fn with_expand_gap(mut self, gap: impl Into<String>) -> Self {
        self.expand_gap = gap.into();
        self
    }

    pub fn with_shrink_hint(mut self, show: bool, gap: impl Into<String>) -> Self {
        self.show_shrink_icon = show;
        self.shrink_gap = gap.into();
        self
    }

    pub fn with_special_color(mut self, range: Option<ColorRange>) -> Self {
        self.special_color = range;
        self
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines.get()
    }

    /// Gap rendered before the expand icon, empty when the icon is hidden.
    pub fn active_expand_gap(&self) -> &str {
        if self.show_expand_icon {
            &self.expand_gap
        } else {
            ""
        }
    }

    /// Pixel width the icon takes from the last line.
    pub fn active_icon_width(&self) -> u32 {
        if self.show_expand_icon {
            self.expand_icon_width
        } else {
            0
        }
    }
}
