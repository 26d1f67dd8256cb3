//! Terminal mapping for hint colors.

use core_truncate::Argb;
use crossterm::style::Color;

/// Terminals have no alpha channel; it is dropped.
pub fn to_color(c: Argb) -> Color {
    Color::Rgb {
        r: c.red(),
        g: c.green(),
        b: c.blue(),
    }
}
