//! Computed display text.
//!
//! A `DisplayText` is rebuilt from scratch on every pass. Runs are ordered;
//! color spans address byte ranges of the concatenated run text (icons
//! contribute no bytes).

use std::ops::Range;

use crate::config::Argb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconMarker {
    /// Affordance shown after the ellipsis of a truncated text.
    Expand,
    /// Affordance shown after the full text once expanded.
    Shrink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    /// Text taken from the source.
    Text(String),
    Ellipsis(String),
    Gap(String),
    /// Inline glyph drawn centered on the line's baseline.
    Icon(IconMarker),
}

impl Run {
    pub fn text(&self) -> &str {
        match self {
            Run::Text(s) | Run::Ellipsis(s) | Run::Gap(s) => s,
            Run::Icon(_) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSpan {
    pub range: Range<usize>,
    pub color: Argb,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayText {
    runs: Vec<Run>,
    spans: Vec<ColorSpan>,
    truncated: bool,
}

impl DisplayText {
    /// The source shown as is: one text run, nothing appended.
    pub fn verbatim(source: &str) -> Self {
        let runs = if source.is_empty() {
            Vec::new()
        } else {
            vec![Run::Text(source.to_string())]
        };
        Self {
            runs,
            spans: Vec::new(),
            truncated: false,
        }
    }

    pub(crate) fn from_parts(runs: Vec<Run>, spans: Vec<ColorSpan>, truncated: bool) -> Self {
        Self {
            runs,
            spans,
            truncated,
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn color_spans(&self) -> &[ColorSpan] {
        &self.spans
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// All run text concatenated; icons are omitted.
    pub fn plain(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    /// The part of the output taken from the source.
    pub fn source_text(&self) -> &str {
        self.runs
            .iter()
            .find_map(|r| match r {
                Run::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .unwrap_or("")
    }

    /// Byte length of the retained source text.
    pub fn source_len(&self) -> usize {
        self.source_text().len()
    }

    pub fn icon(&self) -> Option<IconMarker> {
        self.runs.iter().find_map(|r| match r {
            Run::Icon(icon) => Some(*icon),
            _ => None,
        })
    }

    pub fn ellipsis(&self) -> Option<&str> {
        self.runs.iter().find_map(|r| match r {
            Run::Ellipsis(s) => Some(s.as_str()),
            _ => None,
        })
    }
}
