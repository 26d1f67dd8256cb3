//! Truncation point search.
//!
//! Given a source text laid out at a width budget, find the byte offset at
//! which to cut so that the retained text, the ellipsis, the gap and the icon
//! all fit on the last visible line. The cut only ever moves by whole
//! grapheme clusters.
//!
//! Search outline:
//! 1. Lay out the source; nothing to do when it fits in `max_lines`.
//! 2. Estimate the cut by stepping back from the last visible line's end by
//!    as many clusters as the ellipsis and gap hold.
//! 3. Walk the estimate forward while there is slack, or backward while the
//!    tail does not fit. Lines are tens of clusters long, so a linear walk
//!    from a close estimate beats a bisection here.
//! 4. Drop trailing line breaks so the block never ends on a blank line.
//!
//! Every measured span is rounded half-up to whole pixels before it is
//! compared against the budget.

use core_text::segment::{boundaries, cluster_count};
use core_text::{LineBreaker, LineSpan, Measure, TextLayout, trim_trailing_breaks};
use thiserror::Error;
use tracing::debug;

use crate::config::TruncationConfig;
use crate::display::{ColorSpan, DisplayText, IconMarker, Run};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TruncateError {
    /// The width budget is not known yet. Show the source as is and retry
    /// once a layout pass reports a width.
    #[error("width budget unknown, truncation deferred until layout")]
    DeferredLayout,
}

#[inline]
fn px(width: f32) -> i32 {
    (width + 0.5) as i32
}

/// Compute what a shrunk widget shows for `source` at `width`.
pub fn compute_display_text<M, B>(
    source: &str,
    width: u32,
    config: &TruncationConfig,
    measure: &M,
    breaker: &B,
) -> Result<DisplayText, TruncateError>
where
    M: Measure + ?Sized,
    B: LineBreaker + ?Sized,
{
    if source.is_empty() {
        return Ok(DisplayText::verbatim(source));
    }
    if width == 0 {
        return Err(TruncateError::DeferredLayout);
    }

    let layout = breaker.break_lines(source, width);
    let max_lines = config.max_lines();
    if layout.line_count() <= max_lines {
        debug!(
            target: "truncate",
            line_count = layout.line_count(),
            max_lines,
            width,
            "fits"
        );
        return Ok(DisplayText::verbatim(source));
    }
    let Some(last) = layout.line(max_lines - 1) else {
        return Ok(DisplayText::verbatim(source));
    };

    let cut = find_cut(source, &layout, last, config, measure);
    let kept = fit_line_budget(&source[..cut], width, max_lines, breaker);
    debug!(
        target: "truncate",
        line_count = layout.line_count(),
        max_lines,
        width,
        line_start = last.start,
        line_end = last.end,
        cut,
        kept = kept.len(),
        "truncated"
    );
    Ok(shrunk(kept, config))
}

/// What an expanded widget shows: the whole source plus the shrink affordance.
pub fn expanded_display_text(source: &str, config: &TruncationConfig) -> DisplayText {
    let mut runs = Vec::new();
    if !source.is_empty() {
        runs.push(Run::Text(source.to_string()));
    }
    let spans = special_color_span(source, config).into_iter().collect();
    if config.show_shrink_icon {
        if !config.shrink_gap.is_empty() {
            runs.push(Run::Gap(config.shrink_gap.clone()));
        }
        runs.push(Run::Icon(IconMarker::Shrink));
    }
    DisplayText::from_parts(runs, spans, false)
}

fn find_cut<M: Measure + ?Sized>(
    source: &str,
    layout: &TextLayout,
    last: LineSpan,
    config: &TruncationConfig,
    measure: &M,
) -> usize {
    let bounds = boundaries(source);
    let index_of = |byte: usize| bounds.binary_search(&byte).unwrap_or_else(|i| i);
    let start_ix = index_of(last.start);
    let end_ix = index_of(last.end);

    let gap = config.active_expand_gap();
    let reserved = cluster_count(&config.ellipsis) + cluster_count(gap);
    let mut cut_ix = end_ix.saturating_sub(reserved);
    if cut_ix <= start_ix {
        // Line too short to hold the tail; accept the overflow risk.
        cut_ix = end_ix;
    }
    let cut = bounds[cut_ix];

    let remain = layout.width() as i32
        - px(measure.measure(&source[last.start..cut]))
        - config.active_icon_width() as i32;
    let tail = measure.measure(&format!("{}{}", config.ellipsis, gap));

    let revised_ix = if remain as f32 > tail {
        let mut offset = 0usize;
        let mut extra = 0i32;
        while remain as f32 > tail + extra as f32 {
            offset += 1;
            let Some(&to) = bounds.get(cut_ix + offset) else {
                break;
            };
            extra = px(measure.measure(&source[cut..to]));
        }
        // Back off the cluster that closed the slack. This also drops a
        // cluster that would have fit exactly.
        cut_ix + offset - 1
    } else {
        let mut offset = 0usize;
        let mut extra = 0i32;
        while ((remain + extra) as f32) < tail {
            offset += 1;
            match cut_ix.checked_sub(offset) {
                Some(from_ix) if from_ix > start_ix => {
                    extra = px(measure.measure(&source[bounds[from_ix]..cut]));
                }
                _ => break,
            }
        }
        cut_ix.saturating_sub(offset).max(start_ix)
    };

    let branch = if remain as f32 > tail { "extend" } else { "retract" };
    debug!(
        target: "truncate",
        remain,
        tail,
        estimate = cut,
        revised = bounds[revised_ix],
        branch,
        "cut_adjusted"
    );
    bounds[revised_ix]
}

/// Strip trailing line breaks once. While the block still lays out past the
/// line budget, cut it just before its last hard break. A break left at the
/// end after such a cut is kept: it holds a visible (blank) line.
fn fit_line_budget<'a, B: LineBreaker + ?Sized>(
    kept: &'a str,
    width: u32,
    max_lines: usize,
    breaker: &B,
) -> &'a str {
    let mut block = trim_trailing_breaks(kept);
    while breaker.break_lines(block, width).line_count() > max_lines {
        let Some(at) = block.rfind('\n') else {
            break;
        };
        block = &block[..at];
    }
    block
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn special_color_span(text: &str, config: &TruncationConfig) -> Option<ColorSpan> {
    let range = config.special_color?;
    let start = floor_char_boundary(text, range.start);
    let end = floor_char_boundary(text, range.start.saturating_add(range.len));
    (start < end).then(|| ColorSpan {
        range: start..end,
        color: range.color,
    })
}

fn shrunk(kept: &str, config: &TruncationConfig) -> DisplayText {
    let mut runs = Vec::with_capacity(4);
    if !kept.is_empty() {
        runs.push(Run::Text(kept.to_string()));
    }
    let spans = special_color_span(kept, config).into_iter().collect();
    runs.push(Run::Ellipsis(config.ellipsis.clone()));
    if config.show_expand_icon {
        if !config.expand_gap.is_empty() {
            runs.push(Run::Gap(config.expand_gap.clone()));
        }
        runs.push(Run::Icon(IconMarker::Expand));
    }
    DisplayText::from_parts(runs, spans, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Argb, ColorRange};
    use core_text::{CellMeasure, GreedyBreaker, WrapMode};

    fn cells(mode: WrapMode) -> GreedyBreaker<CellMeasure> {
        GreedyBreaker::new(CellMeasure::cells(), mode)
    }

    fn run(source: &str, width: u32, config: &TruncationConfig, mode: WrapMode) -> DisplayText {
        let breaker = cells(mode);
        compute_display_text(source, width, config, breaker.measure(), &breaker).unwrap()
    }

    fn one_line_no_icon() -> TruncationConfig {
        TruncationConfig::default()
            .with_max_lines(1)
            .with_expand_icon(false, 0)
    }

    #[test]
    fn empty_source_short_circuits_even_without_width() {
        let breaker = cells(WrapMode::Word);
        let out = compute_display_text(
            "",
            0,
            &TruncationConfig::default(),
            breaker.measure(),
            &breaker,
        );
        assert_eq!(out, Ok(DisplayText::verbatim("")));
    }

    #[test]
    fn zero_width_defers() {
        let breaker = cells(WrapMode::Word);
        let out = compute_display_text(
            "text",
            0,
            &TruncationConfig::default(),
            breaker.measure(),
            &breaker,
        );
        assert_eq!(out, Err(TruncateError::DeferredLayout));
    }

    #[test]
    fn retract_branch_reaches_exact_fit() {
        // Line "abcdefghij" at width 10: estimate keeps 7 clusters and the
        // remaining 3 cells hold "..." exactly.
        let out = run("abcdefghijklmn", 10, &one_line_no_icon(), WrapMode::Char);
        assert_eq!(out.plain(), "abcdefg...");
    }

    #[test]
    fn retract_branch_makes_room_for_gap_and_icon() {
        let cfg = TruncationConfig::default().with_max_lines(1);
        let out = run("abcdefghijklmn", 10, &cfg, WrapMode::Char);
        // 4 text + "..." + " " + 2-cell icon = 10
        assert_eq!(out.plain(), "abcd... ");
        assert_eq!(out.icon(), Some(IconMarker::Expand));
    }

    #[test]
    fn extend_branch_stops_one_cluster_short_of_exact_fit() {
        // "abcdefg漢" fills 9 of 10 cells. The estimate keeps "abcde", leaving
        // 5 cells of slack for the 3-cell tail. Walking forward, "fg" would
        // make the line exactly 10 wide, but the walk backs off one cluster
        // once the slack is consumed, so "g" is dropped.
        let out = run("abcdefg漢字", 10, &one_line_no_icon(), WrapMode::Char);
        assert_eq!(out.source_text(), "abcdef");
        assert_eq!(out.plain(), "abcdef...");
        assert_eq!(CellMeasure::cells().measure(&out.plain()), 9.0);
    }

    #[test]
    fn extend_branch_stops_at_source_end() {
        // The hidden line is the empty one after the trailing break. The walk
        // runs off the end of the source and the break is stripped.
        let cfg = one_line_no_icon();
        let out = run("abc\n", 10, &cfg, WrapMode::Char);
        assert_eq!(out.plain(), "abc...");
    }

    #[test]
    fn extension_past_a_hard_break_is_trimmed_back() {
        // The walk crosses into the hidden second line; the block is cut back
        // to the last hard break so it stays within one line.
        let out = run("abcdef\nxyz", 12, &one_line_no_icon(), WrapMode::Char);
        assert_eq!(out.plain(), "abcdef...");
    }

    #[test]
    fn extension_across_several_short_lines_is_trimmed_to_budget() {
        let out = run("ab\nc\nd\nefgh", 12, &one_line_no_icon(), WrapMode::Char);
        assert_eq!(out.plain(), "ab...");
    }

    #[test]
    fn degenerate_short_line_uses_line_end() {
        // Last visible line "ab\n" holds fewer clusters than "... " reserves.
        let cfg = TruncationConfig::default().with_max_lines(2);
        let out = run("0123456789ab\ncd\nef", 10, &cfg, WrapMode::Char);
        assert!(out.is_truncated());
        assert!(out.source_text().starts_with("0123456789"));
        assert!(!out.source_text().ends_with('\n'));
    }

    #[test]
    fn blank_lines_are_cut_back_to_the_line_budget() {
        let cfg = TruncationConfig::default().with_max_lines(2);
        let out = run("first\n\n\n\nlast", 20, &cfg, WrapMode::Word);
        assert!(out.is_truncated());
        assert_eq!(out.source_text(), "first\n");
        assert_eq!(out.plain(), "first\n... ");
    }

    #[test]
    fn cut_back_keeps_a_blank_last_line() {
        // The walk takes the whole source; cutting before the last break
        // leaves "x\n", which still fills both lines once "..." follows.
        let cfg = TruncationConfig::default()
            .with_max_lines(2)
            .with_expand_icon(false, 0);
        let out = run("x\n\nyyyy", 12, &cfg, WrapMode::Char);
        assert_eq!(out.source_text(), "x\n");
        assert_eq!(out.plain(), "x\n...");
        let relaid = cells(WrapMode::Char).break_lines(&out.plain(), 12);
        assert_eq!(relaid.line_count(), 2);
    }

    #[test]
    fn trailing_breaks_of_the_cut_are_stripped() {
        let out = run("abc\n\n\n", 10, &one_line_no_icon(), WrapMode::Char);
        assert_eq!(out.plain(), "abc...");
    }

    #[test]
    fn never_cuts_inside_a_cluster() {
        let source = "e\u{0301}e\u{0301}e\u{0301}e\u{0301}e\u{0301}e\u{0301}e\u{0301}";
        let out = run(source, 5, &one_line_no_icon(), WrapMode::Char);
        let kept = out.source_text();
        assert!(source.starts_with(kept));
        assert_eq!(kept.len() % "e\u{0301}".len(), 0);
        assert_eq!(out.plain(), "e\u{0301}e\u{0301}...");
    }

    #[test]
    fn color_span_clamped_to_retained_text() {
        let cfg = one_line_no_icon().with_special_color(Some(ColorRange {
            start: 0,
            len: 5,
            color: Argb(0xFF00_FF00),
        }));
        // width 6: "abc" + "..." fits exactly.
        let out = run("abcdefghij", 6, &cfg, WrapMode::Char);
        assert_eq!(out.source_text(), "abc");
        assert_eq!(out.color_spans().len(), 1);
        assert_eq!(out.color_spans()[0].range, 0..3);
    }

    #[test]
    fn color_span_past_text_is_dropped() {
        let cfg = one_line_no_icon().with_special_color(Some(ColorRange {
            start: 40,
            len: 5,
            color: Argb(0xFF00_FF00),
        }));
        let out = run("abcdefghij", 6, &cfg, WrapMode::Char);
        assert!(out.color_spans().is_empty());
    }

    #[test]
    fn color_span_snaps_to_char_boundaries() {
        let cfg = one_line_no_icon().with_special_color(Some(ColorRange {
            start: 1,
            len: 3,
            color: Argb(0xFF00_FF00),
        }));
        let text = "漢字漢字漢字";
        let out = expanded_display_text(text, &cfg);
        // start 1 floors to 0, end 4 floors to 3 (one full "漢").
        assert_eq!(out.color_spans()[0].range, 0..3);
    }

    #[test]
    fn expanded_appends_shrink_icon() {
        let cfg = TruncationConfig::default();
        let out = expanded_display_text("full text", &cfg);
        assert_eq!(
            out.runs(),
            &[
                Run::Text("full text".into()),
                Run::Gap(" ".into()),
                Run::Icon(IconMarker::Shrink),
            ]
        );
        assert!(!out.is_truncated());
        let hidden = expanded_display_text("full text", &cfg.with_shrink_hint(false, " "));
        assert_eq!(hidden, DisplayText::verbatim("full text"));
    }
}
