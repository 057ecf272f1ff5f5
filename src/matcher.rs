//! The KMP scan.
//!
//! The text cursor never moves backwards. On a mismatch the pattern cursor
//! falls back through the prefix table, and after a full match it falls back
//! the same way, so overlapping occurrences are found.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{KmpError, Result};
use crate::prefix::{build_prefix_table, PrefixTable};

/// Pointer positions after one recorded step of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub text: usize,
    pub pattern: usize,
}

/// How much of the pointer history a search keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TraceMode {
    /// One step after every successful symbol comparison and one at the end
    /// of every loop iteration.
    #[default]
    Full,
    /// One step at the end of every loop iteration.
    PerIteration,
    /// No trace.
    Off,
}

/// What an empty pattern means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyPatternPolicy {
    /// A zero-length match at every position `0..=n`.
    #[default]
    MatchEverywhere,
    /// Fail with [`KmpError::EmptyPattern`].
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub trace: TraceMode,
    pub empty_pattern: EmptyPatternPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub matches: Vec<usize>,
    pub trace: Vec<TraceStep>,
}

struct TraceRecorder {
    mode: TraceMode,
    steps: Vec<TraceStep>,
}

impl TraceRecorder {
    fn new(mode: TraceMode) -> Self {
        Self { mode, steps: Vec::new() }
    }

    fn on_advance(&mut self, text: usize, pattern: usize) {
        if self.mode == TraceMode::Full {
            self.steps.push(TraceStep { text, pattern });
        }
    }

    fn on_iteration_end(&mut self, text: usize, pattern: usize) {
        if self.mode != TraceMode::Off {
            self.steps.push(TraceStep { text, pattern });
        }
    }
}

/// Search with the default options: full trace, empty pattern matches everywhere.
pub fn search<T: PartialEq>(text: &[T], pattern: &[T], table: &PrefixTable) -> Result<SearchOutcome> {
    search_with(text, pattern, table, SearchOptions::default())
}

pub fn search_with<T: PartialEq>(
    text: &[T],
    pattern: &[T],
    table: &PrefixTable,
    options: SearchOptions,
) -> Result<SearchOutcome> {
    if table.len() != pattern.len() {
        return Err(KmpError::TableLengthMismatch {
            expected: pattern.len(),
            actual: table.len(),
        });
    }
    if pattern.is_empty() && options.empty_pattern == EmptyPatternPolicy::Reject {
        return Err(KmpError::EmptyPattern);
    }
    Ok(scan(text, pattern, table, options.trace))
}

/// Every start position of `pattern` in `text`, without a trace.
pub fn find_all<T: PartialEq>(text: &[T], pattern: &[T]) -> Vec<usize> {
    let table = build_prefix_table(pattern);
    scan(text, pattern, &table, TraceMode::Off).matches
}

// Callers guarantee `table.len() == pattern.len()`.
fn scan<T: PartialEq>(text: &[T], pattern: &[T], table: &PrefixTable, mode: TraceMode) -> SearchOutcome {
    let n = text.len();
    let m = pattern.len();

    if m == 0 {
        return SearchOutcome {
            matches: (0..=n).collect(),
            trace: Vec::new(),
        };
    }

    let mut recorder = TraceRecorder::new(mode);
    let mut matches = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < n {
        if pattern[j] == text[i] {
            i += 1;
            j += 1;
            recorder.on_advance(i, j);
        }

        if j == m {
            matches.push(i - j);
            j = table.fallback(j);
        } else if i < n && pattern[j] != text[i] {
            if j != 0 {
                j = table.fallback(j);
            } else {
                i += 1;
            }
        }

        recorder.on_iteration_end(i, j);
    }

    debug!(
        text_len = n,
        pattern_len = m,
        matches = matches.len(),
        trace_steps = recorder.steps.len(),
        "kmp scan finished"
    );

    SearchOutcome {
        matches,
        trace: recorder.steps,
    }
}

/// A pattern preprocessed once and applied to any number of texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmpMatcher<T> {
    pattern: Vec<T>,
    table: PrefixTable,
}

impl<T: PartialEq> KmpMatcher<T> {
    pub fn new(pattern: impl Into<Vec<T>>) -> Self {
        let pattern = pattern.into();
        let table = build_prefix_table(&pattern);
        KmpMatcher { pattern, table }
    }

    pub fn pattern(&self) -> &[T] {
        &self.pattern
    }

    pub fn table(&self) -> &PrefixTable {
        &self.table
    }

    pub fn find_all(&self, text: &[T]) -> Vec<usize> {
        scan(text, &self.pattern, &self.table, TraceMode::Off).matches
    }

    pub fn contains(&self, text: &[T]) -> bool {
        !self.find_all(text).is_empty()
    }

    pub fn search(&self, text: &[T], options: SearchOptions) -> Result<SearchOutcome> {
        search_with(text, &self.pattern, &self.table, options)
    }
}

impl From<&str> for KmpMatcher<char> {
    fn from(pattern: &str) -> Self {
        KmpMatcher::new(pattern.chars().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn matches_of(text: &str, pattern: &str) -> Vec<usize> {
        find_all(text.as_bytes(), pattern.as_bytes())
    }

    fn steps(pairs: &[(usize, usize)]) -> Vec<TraceStep> {
        pairs
            .iter()
            .map(|&(text, pattern)| TraceStep { text, pattern })
            .collect()
    }

    #[test]
    fn test_textbook_example() {
        assert_eq!(matches_of("ABABDABACDABABCABAB", "ABABCABAB"), vec![10]);
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(matches_of("AAAAA", "AA"), vec![0, 1, 2, 3]);
        assert_eq!(matches_of("ABABAB", "ABAB"), vec![0, 2]);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(matches_of("ABCDEF", "XYZ"), Vec::<usize>::new());
    }

    #[test]
    fn test_pattern_equal_to_text() {
        assert_eq!(matches_of("AAAA", "AAAA"), vec![0]);
    }

    #[test]
    fn test_pattern_longer_than_text() {
        assert!(matches_of("AB", "ABC").is_empty());
        assert!(matches_of("", "A").is_empty());
    }

    #[test]
    fn test_single_symbol_pattern() {
        assert_eq!(matches_of("the cat sat", "t"), vec![0, 6, 10]);
    }

    #[test]
    fn test_match_at_end_of_text() {
        assert_eq!(matches_of("XXAB", "AB"), vec![2]);
    }

    #[test]
    fn test_full_trace_shape() {
        let table = build_prefix_table(b"AB");
        let outcome = search(b"AAB", b"AB", &table).unwrap();
        assert_eq!(outcome.matches, vec![1]);
        assert_eq!(
            outcome.trace,
            steps(&[(1, 1), (1, 0), (2, 1), (2, 1), (3, 2), (3, 0)])
        );
    }

    #[test]
    fn test_full_trace_records_start_mismatch() {
        let table = build_prefix_table(b"A");
        let outcome = search(b"XA", b"A", &table).unwrap();
        assert_eq!(outcome.matches, vec![1]);
        assert_eq!(outcome.trace, steps(&[(1, 0), (2, 1), (2, 0)]));
    }

    #[test]
    fn test_per_iteration_trace_shape() {
        let table = build_prefix_table(b"AB");
        let options = SearchOptions {
            trace: TraceMode::PerIteration,
            ..SearchOptions::default()
        };
        let outcome = search_with(b"AAB", b"AB", &table, options).unwrap();
        assert_eq!(outcome.trace, steps(&[(1, 0), (2, 1), (3, 0)]));
    }

    #[test]
    fn test_trace_off() {
        let table = build_prefix_table(b"AB");
        let options = SearchOptions {
            trace: TraceMode::Off,
            ..SearchOptions::default()
        };
        let outcome = search_with(b"AAB", b"AB", &table, options).unwrap();
        assert_eq!(outcome.matches, vec![1]);
        assert!(outcome.trace.is_empty());
    }

    #[test]
    fn test_trace_ends_at_text_length() {
        let text = b"ABABDABACDABABCABAB";
        let table = build_prefix_table(b"ABABCABAB");
        let outcome = search(text, b"ABABCABAB", &table).unwrap();
        let last = outcome.trace.last().copied().unwrap();
        assert_eq!(last.text, text.len());
        assert!(outcome.trace.iter().all(|step| step.pattern <= 9));
    }

    #[test]
    fn test_table_length_mismatch() {
        let table = build_prefix_table(b"ABC");
        let err = search(b"ABCABC", b"AB", &table).unwrap_err();
        assert_eq!(err, KmpError::TableLengthMismatch { expected: 2, actual: 3 });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_empty_pattern_matches_everywhere() {
        let table = build_prefix_table::<u8>(&[]);
        let outcome = search(b"ABC", b"", &table).unwrap();
        assert_eq!(outcome.matches, vec![0, 1, 2, 3]);
        assert!(outcome.trace.is_empty());
        assert_eq!(find_all(b"", b""), vec![0]);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let table = build_prefix_table::<u8>(&[]);
        let options = SearchOptions {
            empty_pattern: EmptyPatternPolicy::Reject,
            ..SearchOptions::default()
        };
        assert_eq!(
            search_with(b"ABC", b"", &table, options),
            Err(KmpError::EmptyPattern)
        );
    }

    #[test]
    fn test_repeated_search_is_identical() {
        let table = build_prefix_table(b"ABA");
        let first = search(b"ABABABA", b"ABA", &table).unwrap();
        let second = search(b"ABABABA", b"ABA", &table).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.matches, vec![0, 2, 4]);
    }

    #[test]
    fn test_matcher_on_chars() {
        let matcher = KmpMatcher::from("the");
        let text: Vec<char> = "the cat sat on the mat with the bat".chars().collect();
        assert_eq!(matcher.find_all(&text), vec![0, 15, 28]);
        assert_eq!(matcher.table().as_slice(), &[0, 0, 0]);
        assert_eq!(matcher.pattern(), &['t', 'h', 'e']);
    }

    #[test]
    fn test_matcher_contains() {
        let matcher = KmpMatcher::from("hello");
        let hit: Vec<char> = "hello world".chars().collect();
        let miss: Vec<char> = "goodbye world".chars().collect();
        assert!(matcher.contains(&hit));
        assert!(!matcher.contains(&miss));
    }

    #[test]
    fn test_matcher_indices_count_chars_not_bytes() {
        let matcher = KmpMatcher::from("ß");
        let text: Vec<char> = "aßbß".chars().collect();
        assert_eq!(matcher.find_all(&text), vec![1, 3]);
    }

    #[test]
    fn test_matcher_search_with_integers() {
        let matcher = KmpMatcher::new(vec![1, 2, 1]);
        let outcome = matcher
            .search(&[1, 2, 1, 2, 1], SearchOptions::default())
            .unwrap();
        assert_eq!(outcome.matches, vec![0, 2]);
    }
}
