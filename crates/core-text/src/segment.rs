//! Grapheme segmentation adapter.
//!
//! Contract:
//! - Clusters are in order, non-overlapping and cover the whole input.
//! - `start`/`end` are byte offsets into the input, so slicing the source at
//!   any cluster edge never splits a character.
//! - Does not log content.

use crate::width::cluster_width;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub start: usize, // inclusive
    pub end: usize,   // exclusive
    pub width: u16,
}

impl Cluster {
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    pub fn is_line_break(&self, text: &str) -> bool {
        self.as_str(text).chars().all(crate::is_line_break)
    }

    pub fn is_whitespace(&self, text: &str) -> bool {
        self.as_str(text).chars().all(char::is_whitespace)
    }
}

/// Segment `text` into grapheme clusters with widths.
pub fn clusters(text: &str) -> Vec<Cluster> {
    text.grapheme_indices(true)
        .map(|(start, g)| Cluster {
            start,
            end: start + g.len(),
            width: cluster_width(g),
        })
        .collect()
}

/// Every cluster boundary of `text`, including `0` and `text.len()`.
pub fn boundaries(text: &str) -> Vec<usize> {
    let mut out: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
    out.push(text.len());
    out
}

/// Number of grapheme clusters in `text`.
pub fn cluster_count(text: &str) -> usize {
    text.graphemes(true).count()
}
