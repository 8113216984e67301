//! Free-text search over searchable columns.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

/// How search text is matched against cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Fuzzy subsequence match using nucleo-matcher.
    ///
    /// Matching rows keep their sort/insertion order; scores are only used
    /// as a pass/fail test.
    Fuzzy,
}

/// Compiled search text for one derivation pass.
pub(crate) enum TextMatcher {
    Substring(String),
    Fuzzy {
        pattern: Pattern,
        matcher: Box<Matcher>,
        buf: Vec<char>,
    },
}

impl TextMatcher {
    /// Compile search text. Empty text means "no text filter" and yields `None`.
    pub(crate) fn new(text: &str, mode: SearchMode) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(match mode {
            SearchMode::Substring => TextMatcher::Substring(text.to_lowercase()),
            SearchMode::Fuzzy => TextMatcher::Fuzzy {
                pattern: Pattern::new(
                    text,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                ),
                matcher: Box::new(Matcher::new(Config::DEFAULT)),
                buf: Vec::new(),
            },
        })
    }

    /// Test one haystack.
    pub(crate) fn matches(&mut self, haystack: &str) -> bool {
        match self {
            TextMatcher::Substring(needle) => haystack.to_lowercase().contains(needle.as_str()),
            TextMatcher::Fuzzy {
                pattern,
                matcher,
                buf,
            } => {
                let haystack = Utf32Str::new(haystack, buf);
                pattern.score(haystack, matcher).is_some()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_no_filter() {
        assert!(TextMatcher::new("", SearchMode::Substring).is_none());
        assert!(TextMatcher::new("", SearchMode::Fuzzy).is_none());
    }

    #[test]
    fn test_substring_case_insensitive() {
        let mut m = TextMatcher::new("SALE", SearchMode::Substring).unwrap();
        assert!(m.matches("Summer sale"));
        assert!(!m.matches("Clearance"));
    }

    #[test]
    fn test_fuzzy_subsequence() {
        let mut m = TextMatcher::new("smrs", SearchMode::Fuzzy).unwrap();
        assert!(m.matches("Summer sale"));
        let mut substring = TextMatcher::new("smrs", SearchMode::Substring).unwrap();
        assert!(!substring.matches("Summer sale"));
    }
}
