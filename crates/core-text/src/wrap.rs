//! Line breaking.
//!
//! `LineBreaker` is the "lay out text into lines given a width" primitive.
//! `GreedyBreaker` is the reference implementation: first-fit greedy breaking
//! over grapheme clusters, measured through any [`Measure`].
//!
//! Line span conventions follow platform text layouts:
//! * `end` includes the line's hard break and any trailing whitespace.
//! * Trailing whitespace hangs past the width and never forces a wrap.
//! * A line always holds at least one cluster, even when that cluster alone
//!   is wider than the line.
//! * Text ending in a hard break (and empty text) has a final empty line.

use crate::measure::Measure;
use crate::segment::clusters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize, // inclusive byte offset
    pub end: usize,   // exclusive byte offset
}

impl LineSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result of one layout pass over a text at a fixed width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    width: u32,
    lines: Vec<LineSpan>,
}

impl TextLayout {
    pub fn new(width: u32, lines: Vec<LineSpan>) -> Self {
        debug_assert!(!lines.is_empty(), "a layout always has one line");
        Self { width, lines }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<LineSpan> {
        self.lines.get(idx).copied()
    }

    pub fn lines(&self) -> &[LineSpan] {
        &self.lines
    }

    /// Content of line `idx` in `text` (the text this layout was built from).
    pub fn line_text<'a>(&self, text: &'a str, idx: usize) -> Option<&'a str> {
        self.line(idx).map(|l| &text[l.start..l.end])
    }
}

pub trait LineBreaker {
    fn break_lines(&self, text: &str, width: u32) -> TextLayout;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Break after whitespace; fall back to cluster breaks inside words
    /// longer than the line.
    #[default]
    Word,
    /// Break at any cluster boundary.
    Char,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBreaker<M> {
    measure: M,
    mode: WrapMode,
}

impl<M: Measure> GreedyBreaker<M> {
    pub fn new(measure: M, mode: WrapMode) -> Self {
        Self { measure, mode }
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }

    pub fn mode(&self) -> WrapMode {
        self.mode
    }

    fn fits(&self, text: &str, width: u32) -> bool {
        self.measure.measure(text) <= width as f32
    }
}

impl<M: Measure> LineBreaker for GreedyBreaker<M> {
    fn break_lines(&self, text: &str, width: u32) -> TextLayout {
        let mut lines = Vec::new();
        let mut line_start = 0usize;
        // Byte offset just past the most recent whitespace run on this line.
        let mut break_after_space: Option<usize> = None;

        for cluster in clusters(text) {
            if cluster.is_line_break(text) {
                lines.push(LineSpan::new(line_start, cluster.end));
                line_start = cluster.end;
                break_after_space = None;
                continue;
            }
            if cluster.is_whitespace(text) {
                if self.mode == WrapMode::Word {
                    break_after_space = Some(cluster.end);
                }
                continue;
            }
            if cluster.start == line_start || self.fits(&text[line_start..cluster.end], width) {
                continue;
            }

            match break_after_space.take() {
                Some(at) if at > line_start => {
                    lines.push(LineSpan::new(line_start, at));
                    line_start = at;
                    // The word carried over may itself be wider than a line.
                    if cluster.start > line_start
                        && !self.fits(&text[line_start..cluster.end], width)
                    {
                        lines.push(LineSpan::new(line_start, cluster.start));
                        line_start = cluster.start;
                    }
                }
                _ => {
                    lines.push(LineSpan::new(line_start, cluster.start));
                    line_start = cluster.start;
                }
            }
        }

        lines.push(LineSpan::new(line_start, text.len()));
        TextLayout::new(width, lines)
    }
}
