//! Quality gating and normalization of recognized region text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static LONG_NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline-run regex"));

/// Thresholds deciding whether a region's text is worth keeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityThresholds {
    /// Text must be strictly longer than this many characters.
    pub min_chars: usize,
    /// Text must contain strictly fewer than this many `"\n\n"` occurrences.
    pub max_blank_runs: usize,
    /// Text must contain at most this many `'|'` characters. Pipes beyond
    /// that almost always mean a table grid was misread as text.
    pub max_pipes: usize,
}

impl Default for QualityThresholds {
    #[inline]
    fn default() -> Self {
        Self {
            min_chars: 10,
            max_blank_runs: 5,
            max_pipes: 1,
        }
    }
}

impl QualityThresholds {
    /// Checks the raw (pre-cleaning) text of a region against the thresholds.
    #[must_use = "acceptance verdict is returned but not used"]
    pub fn accepts(&self, text: &str) -> bool {
        text.chars().count() > self.min_chars
            && text.matches("\n\n").count() < self.max_blank_runs
            && text.matches('|').count() <= self.max_pipes
    }
}

/// Normalizes an accepted region's text for assembly.
///
/// Three passes, in order: collapse every whitespace run to a single space,
/// replace underscores with periods (a common misread of trailing dots in
/// dot leaders and form fields), then delete runs of three or more newlines.
/// The last pass cannot match anything once whitespace has been collapsed;
/// it is kept so cleaning stays byte-compatible with the established output.
#[must_use = "cleaned text is returned but not used"]
pub fn clean(text: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(text, " ");
    let dotted = collapsed.replace('_', ".");
    LONG_NEWLINE_RUNS.replace_all(&dotted, "").into_owned()
}
