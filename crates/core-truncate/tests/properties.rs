//! Property-based tests for the truncation engine.
//!
//! Char wrapping over ASCII keeps every cluster one cell wide, which makes
//! the layout of the truncated block line up with the layout of the source.

use core_text::{CellMeasure, GreedyBreaker, LineBreaker, Measure, WrapMode};
use core_truncate::{DisplayText, TruncationConfig, compute_display_text};
use proptest::prelude::*;

const ICON: u32 = 2;

fn breaker() -> GreedyBreaker<CellMeasure> {
    GreedyBreaker::new(CellMeasure::cells(), WrapMode::Char)
}

fn config(max_lines: usize) -> TruncationConfig {
    TruncationConfig::default()
        .with_max_lines(max_lines)
        .with_expand_icon(true, ICON)
}

fn compute(source: &str, width: u32, max_lines: usize) -> DisplayText {
    let b = breaker();
    compute_display_text(source, width, &config(max_lines), b.measure(), &b)
        .expect("width is non-zero")
}

proptest! {
    #[test]
    fn fitting_text_is_verbatim(source in "[a-z \n]{1,200}", width in 12u32..60, slack in 0usize..3) {
        let max_lines = breaker().break_lines(&source, width).line_count() + slack;
        let out = compute(&source, width, max_lines);
        prop_assert_eq!(out, DisplayText::verbatim(&source));
    }

    #[test]
    fn truncated_text_respects_line_and_width_budget(source in "[a-z \n]{1,200}", width in 12u32..60, max_lines in 1usize..6) {
        let b = breaker();
        prop_assume!(b.break_lines(&source, width).line_count() > max_lines);
        let out = compute(&source, width, max_lines);
        prop_assert!(out.is_truncated());

        let plain = out.plain();
        let relaid = b.break_lines(&plain, width);
        prop_assert_eq!(relaid.line_count(), max_lines);
        let last = relaid.line_text(&plain, relaid.line_count() - 1).unwrap();
        let last_width = b.measure().measure(last) + ICON as f32;
        prop_assert!(last_width <= width as f32, "last line {:?} is {} wide", last, last_width);
    }

    #[test]
    fn retained_text_is_a_prefix_cut_before_any_break(source in "[a-z \n]{1,200}", width in 12u32..60, max_lines in 1usize..6) {
        let out = compute(&source, width, max_lines);
        let kept = out.source_text();
        prop_assert!(source.starts_with(kept));
        prop_assert!(kept.len() <= source.len());
        // A kept trailing break only survives a cut made just before the
        // following break.
        if out.is_truncated() && kept.ends_with('\n') {
            prop_assert_eq!(source.as_bytes()[kept.len()], b'\n');
        }
    }

    #[test]
    fn recomputation_is_idempotent(source in "[a-z \n]{0,200}", width in 1u32..80, max_lines in 1usize..6) {
        let first = compute(&source, width, max_lines);
        let second = compute(&source, width, max_lines);
        prop_assert_eq!(first, second);
    }
}
