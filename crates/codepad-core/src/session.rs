//! Search session state: last criteria, match list and current-match cursor.

use crate::document::TextAccessor;
use crate::search::{MatchFinder, MatchList, SearchCriteria, SearchMatch};
use log::{debug, warn};

/// Stateful search over a document.
///
/// A session remembers the criteria of the last [`search`](Self::search) and the resulting
/// [`MatchList`]. Positions in the list are only meaningful for the document state they were
/// computed against; callers rescan after editing.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    finder: MatchFinder,
    criteria: SearchCriteria,
    matches: MatchList,
}

impl SearchSession {
    /// Create a session with the default iteration cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that scans with `finder`.
    pub fn with_finder(finder: MatchFinder) -> Self {
        Self {
            finder,
            ..Self::default()
        }
    }

    /// Create a session whose scans stop after `max_iterations` "find next" calls.
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self::with_finder(MatchFinder::with_max_iterations(max_iterations))
    }

    /// The finder used for scans.
    pub fn finder(&self) -> &MatchFinder {
        &self.finder
    }

    /// Replace the finder (takes effect on the next scan).
    pub fn set_finder(&mut self, finder: MatchFinder) {
        self.finder = finder;
    }

    /// Scan `document` for `criteria`, replacing the match list. Returns the match count.
    ///
    /// The first match (if any) becomes current. The criteria are recorded even when the pattern
    /// is empty or invalid.
    pub fn search<D>(&mut self, criteria: SearchCriteria, document: &D) -> usize
    where
        D: TextAccessor + ?Sized,
    {
        self.matches = self.finder.find_all(&criteria, document);
        debug!(
            "search {:?} (case_sensitive={}, regex={}, whole_word={}): {} matches",
            criteria.pattern,
            criteria.case_sensitive,
            criteria.use_regex,
            criteria.whole_word,
            self.matches.len()
        );
        self.criteria = criteria;
        self.matches.len()
    }

    /// Advance to the next match, wrapping.
    pub fn next(&mut self) -> Option<&SearchMatch> {
        self.matches.next()
    }

    /// Step back to the previous match, wrapping.
    pub fn previous(&mut self) -> Option<&SearchMatch> {
        self.matches.previous()
    }

    /// Make the first match at or after `offset` current, wrapping to the first match.
    pub fn select_from(&mut self, offset: usize) -> Option<&SearchMatch> {
        self.matches.select_from(offset)
    }

    /// The current match.
    pub fn current(&self) -> Option<&SearchMatch> {
        self.matches.current()
    }

    /// Replace the current match's range with `replacement`.
    ///
    /// Returns `false` if there is no current match or the document rejects the edit. The match
    /// list is left as is; its positions are stale afterwards.
    pub fn replace_current<D>(&mut self, document: &mut D, replacement: &str) -> bool
    where
        D: TextAccessor + ?Sized,
    {
        if document.is_read_only() {
            return false;
        }
        let Some(range) = self.matches.current().map(SearchMatch::range) else {
            return false;
        };

        match document.replace_range(range.clone(), replacement) {
            Ok(()) => true,
            Err(err) => {
                warn!("replace of {}..{} rejected: {}", range.start, range.end, err);
                false
            }
        }
    }

    /// Replace every match, last to first, and clear the match list.
    ///
    /// Returns the number of replacements performed (0 for a read-only document, in which case
    /// the list is kept).
    pub fn replace_all<D>(&mut self, document: &mut D, replacement: &str) -> usize
    where
        D: TextAccessor + ?Sized,
    {
        if document.is_read_only() || self.matches.is_empty() {
            return 0;
        }

        let matches = std::mem::take(&mut self.matches).into_vec();
        let mut replaced = 0;
        for m in matches.iter().rev() {
            match document.replace_range(m.range(), replacement) {
                Ok(()) => replaced += 1,
                Err(err) => warn!("replace of {}..{} rejected: {}", m.start, m.end, err),
            }
        }
        debug!("replaced {} of {} matches", replaced, matches.len());
        replaced
    }

    /// `true` if `criteria` differs from the last search or there are no matches to restore.
    pub fn needs_rescan(&self, criteria: &SearchCriteria) -> bool {
        *criteria != self.criteria || self.matches.is_empty()
    }

    /// Drop the matches, keeping the last criteria.
    pub fn clear(&mut self) {
        self.matches = MatchList::default();
    }

    /// Criteria of the last search.
    pub fn last_criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// The current match list.
    pub fn matches(&self) -> &MatchList {
        &self.matches
    }

    /// Index of the current match.
    pub fn current_index(&self) -> Option<usize> {
        self.matches.current_index()
    }

    /// Number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if the last search found anything (and it was not cleared since).
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}
