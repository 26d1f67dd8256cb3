//! Width budget resolution.
//!
//! A widget learns its width from two places: the host's layout pass
//! (authoritative once it happens) and an optional "future width" hint that
//! recycled list rows supply before they are measured. The budget handed to
//! the engine is that width minus horizontal padding.
//!
//! Invariants:
//! * A zero measured width means "not measured yet", never "zero wide".
//! * Padding that swallows the whole width yields no budget rather than a
//!   zero budget, so callers defer instead of truncating to nothing.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: u32,
    pub right: u32,
}

impl Padding {
    pub const fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    pub const fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidthHints {
    pub measured: u32,
    pub future: u32,
    pub padding: Padding,
}

impl WidthHints {
    /// Width available for one line of text, if known.
    pub fn budget(&self) -> Option<u32> {
        let outer = if self.measured > 0 {
            self.measured
        } else {
            self.future
        };
        let inner = outer.saturating_sub(self.padding.horizontal());
        (inner > 0).then_some(inner)
    }
}
