//! Source location tracking (byte offsets).

use serde::Serialize;

/// Half-open byte range `[start, end)` into a source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const ZERO: Self = Self { start: 0, end: 0 };

    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Slice `source` with this span, or `""` when the span falls outside
    /// the text (synthesized nodes carry fabricated spans).
    #[must_use]
    pub fn slice(self, source: &str) -> &str {
        source.get(self.start as usize..self.end as usize).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_is_bounds_checked() {
        let span = Span::new(4, 8);
        assert_eq!(span.slice("abcdefghij"), "efgh");
        assert_eq!(span.slice("abc"), "");
        assert_eq!(Span::new(3, 2).slice("abcdef"), "");
    }
}
