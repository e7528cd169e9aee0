//! Whole-document match scanning.
//!
//! The [`MatchFinder`] drives a [`TextAccessor`]'s "find next" primitives from offset 0 to the
//! end of the document and collects an ordered, non-overlapping [`MatchList`]. All positions
//! are **character offsets** (not byte offsets), half-open (`[start, end)`).
//!
//! Scanning is loop-safe:
//!
//! - a result that does not move the scan cursor forward (zero-width regex matches such as `.*`
//!   at end of input, or an accessor reporting the same position twice) forces the cursor one
//!   character ahead for regex searches, and terminates literal searches;
//! - a hard iteration cap ([`DEFAULT_MAX_SCAN_ITERATIONS`]) truncates the result instead of
//!   stalling the event loop;
//! - candidates outside `0..=len` are discarded and end the scan.
//!
//! Invalid regular expressions are a soft input error: [`MatchFinder::find_all`] returns an empty
//! list, [`MatchFinder::try_find_all`] reports the [`SearchError`].

use crate::document::TextAccessor;
use log::{debug, trace, warn};
use regex::{Regex, RegexBuilder};
use std::ops::Range;
use unicode_segmentation::GraphemeCursor;

/// Default cap on "find next" calls per scan.
pub const DEFAULT_MAX_SCAN_ITERATIONS: usize = 10_000;

/// What to search for and how.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchCriteria {
    /// The query text (literal text, or a regex pattern when `use_regex` is set).
    pub pattern: String,
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, treats `pattern` as a regular expression.
    pub use_regex: bool,
    /// If `true`, matches only whole words (bounded by non-word characters).
    pub whole_word: bool,
}

impl SearchCriteria {
    /// Create criteria for a case-insensitive literal search.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Set case sensitivity.
    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    /// Set regex mode.
    pub fn regex(mut self, value: bool) -> Self {
        self.use_regex = value;
        self
    }

    /// Set whole-word matching.
    pub fn whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    /// Returns `true` if the pattern is empty.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

/// A located occurrence of a search pattern, expressed as a half-open character range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
    /// The matched text.
    pub text: String,
}

impl SearchMatch {
    /// Create a new match.
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Returns the length of the match in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The match as a `Range`.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Search errors.
#[derive(Debug)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    InvalidRegex(regex::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegex(err) => write!(f, "Invalid regex: {}", err),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex(err) => Some(err),
        }
    }
}

#[derive(Debug)]
pub(crate) struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    pub(crate) fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    pub(crate) fn char_to_byte(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .cloned()
            .unwrap_or(self.text_len)
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }

    pub(crate) fn char_at(&self, text: &str, char_offset: usize) -> Option<char> {
        if char_offset >= self.char_count() {
            return None;
        }
        let start = self.char_to_byte[char_offset];
        let end = self.char_to_byte[char_offset + 1];
        text.get(start..end)?.chars().next()
    }
}

pub(crate) fn compile_search_regex(
    pattern: &str,
    regex: bool,
    case_sensitive: bool,
) -> Result<Regex, SearchError> {
    let pattern = if regex {
        pattern.to_string()
    } else {
        regex::escape(pattern)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .multi_line(true)
        .build()
        .map_err(SearchError::InvalidRegex)
}

pub(crate) fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_grapheme_boundary(text: &str, byte: usize) -> bool {
    GraphemeCursor::new(byte, text.len(), true)
        .is_boundary(text, 0)
        .unwrap_or(true)
}

/// `true` if `[start, end)` is non-empty, does not split a grapheme cluster, and is bounded by
/// non-word characters (or the text edges).
pub(crate) fn is_whole_word(text: &str, index: &CharIndex, start: usize, end: usize) -> bool {
    if start >= end {
        return false;
    }
    if !is_grapheme_boundary(text, index.char_to_byte(start))
        || !is_grapheme_boundary(text, index.char_to_byte(end))
    {
        return false;
    }

    let before = if start == 0 {
        None
    } else {
        index.char_at(text, start - 1)
    };
    let after = index.char_at(text, end);

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// The ordered result of one search, plus a cursor designating the current match.
///
/// Matches are in ascending `start` order and never overlap. The cursor is `None` exactly when
/// the list is empty; navigation wraps around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchList {
    matches: Vec<SearchMatch>,
    current: Option<usize>,
}

impl MatchList {
    /// Build a list whose current match is the first one (if any).
    pub fn new(matches: Vec<SearchMatch>) -> Self {
        let current = if matches.is_empty() { None } else { Some(0) };
        Self { matches, current }
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if there are no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// All matches, in document order.
    pub fn as_slice(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Iterate over matches in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, SearchMatch> {
        self.matches.iter()
    }

    /// Match at `index`.
    pub fn get(&self, index: usize) -> Option<&SearchMatch> {
        self.matches.get(index)
    }

    /// Index of the current match.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current match.
    pub fn current(&self) -> Option<&SearchMatch> {
        self.current.and_then(|idx| self.matches.get(idx))
    }

    /// Advance to the next match (wrapping) and return it.
    pub fn next(&mut self) -> Option<&SearchMatch> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        let idx = self.current.map_or(0, |i| (i + 1) % len);
        self.current = Some(idx);
        self.matches.get(idx)
    }

    /// Step back to the previous match (wrapping) and return it.
    pub fn previous(&mut self) -> Option<&SearchMatch> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        let idx = self.current.map_or(len - 1, |i| (i + len - 1) % len);
        self.current = Some(idx);
        self.matches.get(idx)
    }

    /// Make the first match starting at or after `offset` current (wrapping to the first match).
    pub fn select_from(&mut self, offset: usize) -> Option<&SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        let idx = self
            .matches
            .iter()
            .position(|m| m.start >= offset)
            .unwrap_or(0);
        self.current = Some(idx);
        self.matches.get(idx)
    }

    pub(crate) fn into_vec(self) -> Vec<SearchMatch> {
        self.matches
    }
}

impl<'a> IntoIterator for &'a MatchList {
    type Item = &'a SearchMatch;
    type IntoIter = std::slice::Iter<'a, SearchMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// Outcome of a single scan, with loop-guard bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Matches found, in document order.
    pub matches: Vec<SearchMatch>,
    /// Number of "find next" calls issued.
    pub iterations: usize,
    /// `true` if the scan stopped because the iteration cap was reached.
    pub truncated: bool,
}

/// Scans a whole document for every non-overlapping occurrence of some [`SearchCriteria`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFinder {
    max_iterations: usize,
}

impl Default for MatchFinder {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_SCAN_ITERATIONS,
        }
    }
}

impl MatchFinder {
    /// Create a finder with the default iteration cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder with a custom iteration cap (at least 1).
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self {
            max_iterations: max_iterations.max(1),
        }
    }

    /// The iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Find every match. Invalid patterns yield an empty list.
    pub fn find_all<D>(&self, criteria: &SearchCriteria, document: &D) -> MatchList
    where
        D: TextAccessor + ?Sized,
    {
        match self.try_find_all(criteria, document) {
            Ok(list) => list,
            Err(err) => {
                debug!("search for {:?} yielded no matches: {}", criteria.pattern, err);
                MatchList::default()
            }
        }
    }

    /// Find every match, reporting invalid patterns.
    pub fn try_find_all<D>(
        &self,
        criteria: &SearchCriteria,
        document: &D,
    ) -> Result<MatchList, SearchError>
    where
        D: TextAccessor + ?Sized,
    {
        self.scan(criteria, document)
            .map(|report| MatchList::new(report.matches))
    }

    /// Run a scan and return the matches with iteration bookkeeping.
    pub fn scan<D>(
        &self,
        criteria: &SearchCriteria,
        document: &D,
    ) -> Result<ScanReport, SearchError>
    where
        D: TextAccessor + ?Sized,
    {
        let mut report = ScanReport::default();
        if criteria.is_empty() {
            return Ok(report);
        }

        let len = document.len_chars();
        let mut cursor = 0usize;

        loop {
            if report.iterations >= self.max_iterations {
                warn!(
                    "search for {:?} hit the iteration cap ({}); result truncated at {} matches",
                    criteria.pattern,
                    self.max_iterations,
                    report.matches.len()
                );
                report.truncated = true;
                break;
            }
            report.iterations += 1;

            let found = if criteria.use_regex {
                document.find_next_regex(&criteria.pattern, cursor, criteria.case_sensitive)?
            } else {
                document.find_next(
                    &criteria.pattern,
                    cursor,
                    criteria.case_sensitive,
                    criteria.whole_word,
                )?
            };
            let Some(candidate) = found else {
                break;
            };

            if candidate.start > candidate.end || candidate.end > len {
                warn!(
                    "discarding out-of-range match {}..{} (document length {})",
                    candidate.start, candidate.end, len
                );
                break;
            }

            let advances = !candidate.is_empty() && candidate.start >= cursor;
            if !advances {
                if !criteria.use_regex {
                    trace!("literal scan stopped at non-advancing match {}", candidate.start);
                    break;
                }
                let next = candidate.start.max(cursor) + 1;
                if next > len {
                    break;
                }
                cursor = next;
                continue;
            }

            if criteria.use_regex
                && criteria.whole_word
                && !document.is_whole_word_at(candidate.range())
            {
                cursor = candidate.start + 1;
                continue;
            }

            cursor = candidate.end;
            report.matches.push(candidate);
        }

        trace!(
            "scan for {:?}: {} matches in {} iterations",
            criteria.pattern,
            report.matches.len(),
            report.iterations
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ranges: &[(usize, usize)]) -> MatchList {
        MatchList::new(
            ranges
                .iter()
                .map(|&(s, e)| SearchMatch::new(s, e, "x"))
                .collect(),
        )
    }

    #[test]
    fn test_char_index_roundtrip_with_multibyte() {
        let text = "a👋b";
        let index = CharIndex::new(text);
        assert_eq!(index.char_count(), 3);
        assert_eq!(index.char_to_byte(1), 1);
        assert_eq!(index.char_to_byte(2), 5);
        assert_eq!(index.byte_to_char(5), 2);
        assert_eq!(index.char_at(text, 1), Some('👋'));
        assert_eq!(index.char_at(text, 3), None);
    }

    #[test]
    fn test_whole_word_boundaries() {
        let text = "foo foobar _foo";
        let index = CharIndex::new(text);
        assert!(is_whole_word(text, &index, 0, 3));
        assert!(!is_whole_word(text, &index, 4, 7));
        assert!(!is_whole_word(text, &index, 12, 15));
        assert!(!is_whole_word(text, &index, 3, 3));
    }

    #[test]
    fn test_whole_word_does_not_split_graphemes() {
        let text = "cafe\u{301} cafe";
        let index = CharIndex::new(text);
        assert!(!is_whole_word(text, &index, 0, 4));
        assert!(is_whole_word(text, &index, 6, 10));
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let err = compile_search_regex("(unclosed", true, true).unwrap_err();
        assert!(err.to_string().starts_with("Invalid regex"));
    }

    #[test]
    fn test_literal_patterns_are_escaped() {
        let re = compile_search_regex("a.b", false, true).unwrap();
        assert!(re.is_match("a.b"));
        assert!(!re.is_match("axb"));
    }

    #[test]
    fn test_match_list_navigation_wraps() {
        let mut matches = list(&[(0, 1), (2, 3), (4, 5)]);
        assert_eq!(matches.current_index(), Some(0));
        assert_eq!(matches.next().map(|m| m.start), Some(2));
        assert_eq!(matches.next().map(|m| m.start), Some(4));
        assert_eq!(matches.next().map(|m| m.start), Some(0));
        assert_eq!(matches.previous().map(|m| m.start), Some(4));
    }

    #[test]
    fn test_empty_match_list() {
        let mut matches = MatchList::default();
        assert_eq!(matches.current_index(), None);
        assert!(matches.next().is_none());
        assert!(matches.previous().is_none());
        assert!(matches.current().is_none());
    }

    #[test]
    fn test_select_from_offset() {
        let mut matches = list(&[(0, 1), (5, 6), (9, 10)]);
        assert_eq!(matches.select_from(3).map(|m| m.start), Some(5));
        assert_eq!(matches.select_from(11).map(|m| m.start), Some(0));
    }

    #[test]
    fn test_finder_cap_is_at_least_one() {
        assert_eq!(MatchFinder::with_max_iterations(0).max_iterations(), 1);
        assert_eq!(MatchFinder::new().max_iterations(), DEFAULT_MAX_SCAN_ITERATIONS);
    }
}
