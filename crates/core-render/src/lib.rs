//! Terminal rendering of a computed `DisplayText`.
//!
//! Text runs print as is; color spans switch the foreground for their byte
//! range. The icon is drawn as a single glyph tinted with its hint color,
//! with the pressed color as background while the affordance is held.
//!
//! Invariants:
//! * Output text, with glyphs removed, equals `DisplayText::plain()`.
//! * Every color change is followed by a reset before the next plain segment.

pub mod metrics;
pub mod palette;

pub use metrics::{FontMetrics, icon_offset_y};
pub use palette::to_color;

use anyhow::Result;
use core_truncate::{ColorSpan, DisplayText, HintPalette, IconMarker, Run};
use crossterm::{
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::Write;
use tracing::trace;

pub const EXPAND_GLYPH: &str = "▾";
pub const SHRINK_GLYPH: &str = "▴";

pub fn glyph(icon: IconMarker) -> &'static str {
    match icon {
        IconMarker::Expand => EXPAND_GLYPH,
        IconMarker::Shrink => SHRINK_GLYPH,
    }
}

/// Styled output: color spans and tinted icon.
pub fn render<W: Write>(
    display: &DisplayText,
    palette: &HintPalette,
    pressed: bool,
    out: &mut W,
) -> Result<()> {
    let runs = display.runs().len();
    let spans = display.color_spans().len();
    trace!(target: "render", runs, spans, pressed, "render_display");
    let mut offset = 0usize;
    for run in display.runs() {
        match run {
            Run::Icon(icon) => {
                let (fg, bg) = palette.icon_colors(*icon, pressed);
                queue!(out, SetForegroundColor(to_color(fg)))?;
                if let Some(bg) = bg {
                    queue!(out, SetBackgroundColor(to_color(bg)))?;
                }
                queue!(out, Print(glyph(*icon)), ResetColor)?;
            }
            other => {
                let text = other.text();
                write_segments(out, text, offset, display.color_spans())?;
                offset += text.len();
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Unstyled output for pipes and `--no-color`.
pub fn render_plain<W: Write>(display: &DisplayText, out: &mut W) -> Result<()> {
    for run in display.runs() {
        match run {
            Run::Icon(icon) => out.write_all(glyph(*icon).as_bytes())?,
            other => out.write_all(other.text().as_bytes())?,
        }
    }
    out.flush()?;
    Ok(())
}

// `base` is the byte offset of `text` within the concatenated runs.
fn write_segments<W: Write>(
    out: &mut W,
    text: &str,
    base: usize,
    spans: &[ColorSpan],
) -> Result<()> {
    let end = base + text.len();
    let mut cursor = base;
    for span in spans {
        let s = span.range.start.max(cursor);
        let e = span.range.end.min(end);
        if s >= e {
            continue;
        }
        let before = text.get(cursor - base..s - base).unwrap_or("");
        let inside = text.get(s - base..e - base).unwrap_or("");
        queue!(
            out,
            Print(before),
            SetForegroundColor(to_color(span.color)),
            Print(inside),
            ResetColor
        )?;
        cursor = e;
    }
    let rest = text.get(cursor - base..).unwrap_or("");
    queue!(out, Print(rest))?;
    Ok(())
}
