//! Core types used throughout the project.

/// Language tag used by single-language (flat) translation tables.
pub const DEFAULT_LANGUAGE: &str = "default";

/// Fallback language used when nothing else is configured.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Result of resolving a single translation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// The key resolved to non-empty text in the active language.
    Found(String),
    /// The key has no translation (static strategy).
    NotFound,
    /// The key has no translation and a generated fallback string is used instead
    /// (dynamic strategy).
    Placeholder(String),
}

impl Lookup {
    /// Text that should be written into a target, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Found(text) | Self::Placeholder(text) => Some(text),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Counts produced by one `apply_all` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ApplySummary {
    /// Targets whose content was replaced with real translated text.
    pub applied: usize,
    /// Requests whose key had no translation (left untouched or given a placeholder).
    pub missing: usize,
}

impl ApplySummary {
    /// Total number of requests seen.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.applied + self.missing
    }
}

/// A byte range in a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Checks if another span lies entirely within this span.
    #[must_use]
    pub const fn encloses(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const fn span(start: usize, end: usize) -> SourceSpan {
        SourceSpan { start, end }
    }

    #[rstest]
    #[case::same(span(5, 10), span(5, 10), true)]
    #[case::inner(span(5, 10), span(6, 9), true)]
    #[case::touching_start(span(5, 10), span(5, 7), true)]
    #[case::starts_before(span(5, 10), span(4, 7), false)]
    #[case::ends_after(span(5, 10), span(7, 11), false)]
    #[case::disjoint(span(5, 10), span(11, 12), false)]
    #[gtest]
    fn test_encloses(#[case] outer: SourceSpan, #[case] inner: SourceSpan, #[case] expected: bool) {
        assert_that!(outer.encloses(inner), eq(expected));
    }

    #[rstest]
    #[gtest]
    fn lookup_text_for_each_variant() {
        expect_that!(Lookup::Found("Hello".to_string()).text(), some(eq("Hello")));
        expect_that!(Lookup::Placeholder("p".to_string()).text(), some(eq("p")));
        expect_that!(Lookup::NotFound.text(), none());
        expect_that!(Lookup::NotFound.is_found(), eq(false));
    }

    #[rstest]
    #[gtest]
    fn summary_total_adds_counts() {
        let summary = ApplySummary { applied: 2, missing: 3 };

        assert_that!(summary.total(), eq(5));
    }
}
