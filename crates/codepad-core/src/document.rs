//! Document access.
//!
//! The search and decoration machinery never touches a concrete buffer; it talks to the
//! [`TextAccessor`] trait (length, "find next" primitives, range replacement, read-only flag)
//! and, for line-oriented features, to [`LineAccessor`].
//!
//! [`Document`] is the reference implementation: a rope-backed, LF-normalized text buffer
//! addressed in **character offsets**, with per-line [`LineData`] that follows its line across
//! edits.

use crate::line_data::{LineData, shift_lines};
use crate::search::{CharIndex, SearchError, SearchMatch, compile_search_regex, is_whole_word};
use crate::theme::Color;
use regex::Regex;
use ropey::{Rope, RopeSlice};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

/// Document-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The document rejects edits.
    ReadOnly,
    /// Invalid character range.
    InvalidRange {
        /// Start offset.
        start: usize,
        /// End offset.
        end: usize,
    },
    /// Line index past the end of the document.
    InvalidLine(usize),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "Document is read-only"),
            Self::InvalidRange { start, end } => write!(f, "Invalid range: {}..{}", start, end),
            Self::InvalidLine(line) => write!(f, "Invalid line: {}", line),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Addressable text with "find next" primitives.
///
/// Offsets are character offsets. Implementations return matches starting at or after `from`;
/// they may return zero-width regex matches, which callers such as
/// [`MatchFinder`](crate::MatchFinder) must step over.
pub trait TextAccessor {
    /// Document length in characters.
    fn len_chars(&self) -> usize;

    /// Next literal occurrence of `pattern` at or after `from`.
    fn find_next(
        &self,
        pattern: &str,
        from: usize,
        case_sensitive: bool,
        whole_word: bool,
    ) -> Result<Option<SearchMatch>, SearchError>;

    /// Next regex match at or after `from`.
    fn find_next_regex(
        &self,
        pattern: &str,
        from: usize,
        case_sensitive: bool,
    ) -> Result<Option<SearchMatch>, SearchError>;

    /// Returns `true` if `range` is bounded by non-word characters or the document edges.
    ///
    /// Regex scans use it to constrain matches to whole words, with the same rule
    /// [`find_next`](Self::find_next) applies to literal patterns.
    fn is_whole_word_at(&self, range: Range<usize>) -> bool;

    /// Replace `range` with `text`.
    fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<(), DocumentError>;

    /// Returns `true` if edits are rejected.
    fn is_read_only(&self) -> bool;

    /// Allow or reject edits.
    fn set_read_only(&mut self, read_only: bool);
}

/// Line-addressable view of a document.
pub trait LineAccessor: TextAccessor {
    /// Number of logical lines (an empty document has one line).
    fn line_count(&self) -> usize;

    /// Character offset where `line` starts (document length if past the end).
    fn line_to_char(&self, line: usize) -> usize;

    /// Line containing `offset` (clamped to the document).
    fn char_to_line(&self, offset: usize) -> usize;

    /// Text of `line` without its line break.
    fn line_text(&self, line: usize) -> Option<String>;

    /// Text in `range` (clamped to the document).
    fn slice(&self, range: Range<usize>) -> String;

    /// Metadata attached to `line`, if the implementation stores any.
    fn line_data(&self, line: usize) -> Option<&LineData> {
        let _ = line;
        None
    }

    /// Character range of `line`, excluding its line break.
    fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let text = self.line_text(line)?;
        let start = self.line_to_char(line);
        Some(start..start + text.chars().count())
    }
}

/// The newline sequence a document was loaded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// CRLF if the text contains any `"\r\n"`, LF otherwise.
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Convert LF-normalized text to this line ending.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }
}

#[derive(Debug)]
struct FlatText {
    text: String,
    index: CharIndex,
}

impl FlatText {
    fn new(text: String) -> Self {
        let index = CharIndex::new(&text);
        Self { text, index }
    }

    fn to_match(&self, start_byte: usize, end_byte: usize) -> SearchMatch {
        SearchMatch {
            start: self.index.byte_to_char(start_byte),
            end: self.index.byte_to_char(end_byte),
            text: self.text[start_byte..end_byte].to_string(),
        }
    }
}

#[derive(Debug)]
struct CachedRegex {
    pattern: String,
    regex_mode: bool,
    case_sensitive: bool,
    regex: Regex,
}

/// Rope-backed reference document.
#[derive(Debug, Default)]
pub struct Document {
    rope: Rope,
    read_only: bool,
    line_ending: LineEnding,
    line_data: BTreeMap<usize, LineData>,
    flat: RefCell<Option<Arc<FlatText>>>,
    regex_cache: RefCell<Option<CachedRegex>>,
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

fn trailing_break_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    let last = line.char(len - 1);
    if last == '\n' && len >= 2 && line.char(len - 2) == '\r' {
        2
    } else if is_line_break(last) {
        1
    } else {
        0
    }
}

impl Document {
    /// Create a document; CRLF line endings are normalized to LF.
    pub fn new(text: &str) -> Self {
        let mut doc = Self::default();
        doc.set_text(text);
        doc
    }

    /// Create an empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the entire content. Line data is discarded.
    pub fn set_text(&mut self, text: &str) {
        self.line_ending = LineEnding::detect_in_text(text);
        self.rope = if self.line_ending == LineEnding::Crlf {
            Rope::from_str(&text.replace("\r\n", "\n"))
        } else {
            Rope::from_str(text)
        };
        self.line_data.clear();
        self.invalidate_caches();
    }

    /// The full (LF-normalized) text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The text converted back to the line ending it was loaded with.
    pub fn text_for_save(&self) -> String {
        self.line_ending.apply_to_text(&self.text())
    }

    /// Line ending detected at load time.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Mutable metadata for `line`.
    pub fn line_data_mut(&mut self, line: usize) -> Option<&mut LineData> {
        self.line_data.get_mut(&line)
    }

    /// Attach metadata to `line`. Returns `false` if the line does not exist.
    pub fn set_line_data(&mut self, line: usize, data: LineData) -> bool {
        if line >= self.rope.len_lines() {
            return false;
        }
        self.line_data.insert(line, data);
        true
    }

    /// Build and attach a [`LineData`] record. Returns `false` if the line does not exist.
    pub fn create_line_data(
        &mut self,
        line: usize,
        payload: Option<String>,
        bg_color: Option<Color>,
    ) -> bool {
        self.set_line_data(line, LineData::new(payload, bg_color))
    }

    /// Detach and return the metadata of `line`.
    pub fn remove_line_data(&mut self, line: usize) -> Option<LineData> {
        self.line_data.remove(&line)
    }

    /// Lines that carry metadata, ascending.
    pub fn lines_with_data(&self) -> impl Iterator<Item = (usize, &LineData)> {
        self.line_data.iter().map(|(line, data)| (*line, data))
    }

    fn invalidate_caches(&mut self) {
        self.flat.get_mut().take();
    }

    fn flat_text(&self) -> Arc<FlatText> {
        let mut flat = self.flat.borrow_mut();
        if let Some(existing) = flat.as_ref() {
            return Arc::clone(existing);
        }
        let built = Arc::new(FlatText::new(self.rope.to_string()));
        *flat = Some(Arc::clone(&built));
        built
    }

    fn regex_for(
        &self,
        pattern: &str,
        regex_mode: bool,
        case_sensitive: bool,
    ) -> Result<Regex, SearchError> {
        let mut cache = self.regex_cache.borrow_mut();
        if let Some(cached) = cache.as_ref() {
            if cached.pattern == pattern
                && cached.regex_mode == regex_mode
                && cached.case_sensitive == case_sensitive
            {
                return Ok(cached.regex.clone());
            }
        }

        let regex = compile_search_regex(pattern, regex_mode, case_sensitive)?;
        *cache = Some(CachedRegex {
            pattern: pattern.to_string(),
            regex_mode,
            case_sensitive,
            regex: regex.clone(),
        });
        Ok(regex)
    }
}

impl TextAccessor for Document {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn find_next(
        &self,
        pattern: &str,
        from: usize,
        case_sensitive: bool,
        whole_word: bool,
    ) -> Result<Option<SearchMatch>, SearchError> {
        if pattern.is_empty() {
            return Ok(None);
        }

        let re = self.regex_for(pattern, false, case_sensitive)?;
        let flat = self.flat_text();

        let mut start_char = from.min(flat.index.char_count());
        loop {
            let start_byte = flat.index.char_to_byte(start_char);
            let Some(m) = re.find_at(&flat.text, start_byte) else {
                return Ok(None);
            };

            let candidate = flat.to_match(m.start(), m.end());
            if whole_word
                && !is_whole_word(&flat.text, &flat.index, candidate.start, candidate.end)
            {
                start_char = candidate.start + 1;
                continue;
            }

            return Ok(Some(candidate));
        }
    }

    fn find_next_regex(
        &self,
        pattern: &str,
        from: usize,
        case_sensitive: bool,
    ) -> Result<Option<SearchMatch>, SearchError> {
        let re = self.regex_for(pattern, true, case_sensitive)?;
        let flat = self.flat_text();

        let start_byte = flat.index.char_to_byte(from);
        Ok(re
            .find_at(&flat.text, start_byte)
            .map(|m| flat.to_match(m.start(), m.end())))
    }

    fn is_whole_word_at(&self, range: Range<usize>) -> bool {
        let flat = self.flat_text();
        range.end <= flat.index.char_count()
            && is_whole_word(&flat.text, &flat.index, range.start, range.end)
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<(), DocumentError> {
        if self.read_only {
            return Err(DocumentError::ReadOnly);
        }
        let len = self.rope.len_chars();
        if range.start > range.end || range.end > len {
            return Err(DocumentError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }

        let start_line = self.rope.char_to_line(range.start);
        let removed = self.rope.char_to_line(range.end) - start_line;
        let lines_before = self.rope.len_lines();

        if range.start < range.end {
            self.rope.remove(range.clone());
        }
        if !text.is_empty() {
            self.rope.insert(range.start, text);
        }

        let inserted = (self.rope.len_lines() + removed).saturating_sub(lines_before);
        shift_lines(&mut self.line_data, start_line, removed, inserted);
        self.invalidate_caches();
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl LineAccessor for Document {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_to_char(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    fn char_to_line(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(line);
        let content = slice.len_chars() - trailing_break_len(slice);
        Some(slice.slice(..content).to_string())
    }

    fn line_data(&self, line: usize) -> Option<&LineData> {
        self.line_data.get(&line)
    }

    fn slice(&self, range: Range<usize>) -> String {
        let len = self.rope.len_chars();
        let end = range.end.min(len);
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }
}
