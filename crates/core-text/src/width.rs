//! Grapheme cluster display width.
//!
//! `cluster_width` is the single authority for how many cells a cluster
//! occupies. `unicode_width` supplies the baseline; a small classifier widens
//! emoji compositions the baseline under-reports (ZWJ sequences, flags,
//! keycaps, skin tone modifiers) because under-estimating a width lets the
//! truncated line overflow its budget while over-estimating only leaves a
//! blank cell.
//!
//! Invariants:
//! - Input is exactly one extended grapheme cluster (callers segment first).
//! - Line breaks and other control clusters measure 0; they never occupy a
//!   cell in a laid out line.

use unicode_width::UnicodeWidthChar;

const ZWJ: char = '\u{200D}';
const VS16: char = '\u{FE0F}';
const KEYCAP: char = '\u{20E3}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClusterKind {
    Control,
    Ascii,
    Narrow,
    Wide,
    Emoji,
    /// Base character followed by combining marks; width follows the base.
    Combining { wide_base: bool },
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_skin_tone_modifier(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

// Emoji blocks plus the misc symbols / dingbats that carry legacy emoji.
fn is_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

#[inline]
fn char_cells(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

fn classify(egc: &str) -> ClusterKind {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return ClusterKind::Control;
    };

    if egc.chars().all(char::is_control) {
        return ClusterKind::Control;
    }

    if chars.as_str().is_empty() {
        if first.is_ascii() {
            return ClusterKind::Ascii;
        }
        if is_pictographic(first) || is_regional_indicator(first) {
            return ClusterKind::Emoji;
        }
        return if char_cells(first) == 2 {
            ClusterKind::Wide
        } else {
            ClusterKind::Narrow
        };
    }

    let mut pictographic = 0usize;
    let mut regional = 0usize;
    let mut zwj = false;
    let mut presentation = false;
    let mut skin = false;
    let mut keycap = false;
    let mut combining = false;
    let mut any_wide = false;
    for c in egc.chars() {
        pictographic += usize::from(is_pictographic(c));
        regional += usize::from(is_regional_indicator(c));
        zwj |= c == ZWJ;
        presentation |= c == VS16;
        skin |= is_skin_tone_modifier(c);
        keycap |= c == KEYCAP;
        combining |= is_combining_mark(c);
        any_wide |= char_cells(c) == 2;
    }

    if keycap || regional > 0 || skin || (zwj && pictographic > 0) {
        return ClusterKind::Emoji;
    }
    if pictographic > 0 && (presentation || !combining) {
        return ClusterKind::Emoji;
    }
    if combining {
        let wide_base = char_cells(first) == 2 || is_pictographic(first);
        return ClusterKind::Combining { wide_base };
    }
    if any_wide {
        ClusterKind::Wide
    } else {
        ClusterKind::Narrow
    }
}

/// Display width in cells of a single grapheme cluster.
#[inline]
pub fn cluster_width(egc: &str) -> u16 {
    match classify(egc) {
        ClusterKind::Control => 0,
        ClusterKind::Ascii | ClusterKind::Narrow => 1,
        ClusterKind::Wide | ClusterKind::Emoji => 2,
        ClusterKind::Combining { wide_base } => {
            if wide_base {
                2
            } else {
                1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_cjk() {
        assert_eq!(cluster_width("a"), 1);
        assert_eq!(cluster_width("界"), 2);
    }

    #[test]
    fn line_breaks_are_zero_width() {
        assert_eq!(cluster_width("\n"), 0);
        assert_eq!(cluster_width("\r\n"), 0);
        assert_eq!(cluster_width(""), 0);
    }

    #[test]
    fn combining_follows_base() {
        assert_eq!(cluster_width("e\u{0301}"), 1);
        assert_eq!(cluster_width("界\u{0301}"), 2);
    }

    #[test]
    fn emoji_compositions_are_wide() {
        assert_eq!(cluster_width("😀"), 2);
        assert_eq!(cluster_width("🇺🇸"), 2);
        assert_eq!(cluster_width("1️⃣"), 2);
        assert_eq!(cluster_width("👍🏻"), 2);
        assert_eq!(cluster_width("👨‍👩‍👧‍👦"), 2);
        assert_eq!(cluster_width("✈️"), 2);
    }

    #[test]
    fn lone_regional_indicator_widened() {
        assert_eq!(cluster_width("🇺"), 2);
    }
}
