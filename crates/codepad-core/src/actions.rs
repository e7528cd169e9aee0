//! Line-level editor actions.
//!
//! Keyboard-shortcut behaviors (comment toggle, duplicate, move up/down, line-aware
//! copy/cut/paste, go-to-line) expressed as an [`EditorAction`] command and run by
//! [`execute`] against any [`LineAccessor`].
//!
//! Actions never touch the system clipboard: copy/cut hand back a [`ClipboardEntry`] and paste
//! takes one, so the host stays in charge of clipboard I/O.

use crate::document::{DocumentError, LineAccessor};
use codepad_lang::{CommentConfig, DEFAULT_LINE_COMMENT};
use log::trace;
use std::ops::Range;

/// A selection as anchor/head character offsets. `anchor == head` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    /// Fixed end of the selection.
    pub anchor: usize,
    /// Moving end of the selection (the caret).
    pub head: usize,
}

impl Selection {
    /// Create a selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a caret at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Returns `true` if nothing is selected.
    pub fn is_caret(&self) -> bool {
        self.anchor == self.head
    }

    /// Smaller offset.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Larger offset.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// `start()..end()`.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    fn clamped(self, len: usize) -> Self {
        Self::new(self.anchor.min(len), self.head.min(len))
    }

    fn map(self, f: impl Fn(usize) -> usize) -> Self {
        Self::new(f(self.anchor), f(self.head))
    }
}

/// Text exchanged with the host clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipboardEntry {
    /// Clipboard text.
    pub text: String,
    /// `true` if the text is a whole line taken without a selection (pasted as a new line).
    pub whole_line: bool,
}

impl ClipboardEntry {
    /// A regular (character-wise) entry.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            whole_line: false,
        }
    }

    /// A line-mode entry.
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            whole_line: true,
        }
    }
}

/// Line-level editor actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Comment or uncomment the caret line or every selected line.
    ToggleComment,
    /// Duplicate the selection, or the caret line when nothing is selected.
    DuplicateLine,
    /// Swap the caret line with the one above.
    MoveLineUp,
    /// Swap the caret line with the one below.
    MoveLineDown,
    /// Copy the selection, or the whole caret line when nothing is selected.
    CopyLine,
    /// Cut the selection, or the whole caret line (with its line break) when nothing is selected.
    CutLine,
    /// Paste a clipboard entry.
    Paste(ClipboardEntry),
    /// Put the caret at the end of a 1-based line.
    GoToLine(usize),
}

impl EditorAction {
    /// Returns `true` if the action modifies the document.
    pub fn is_editing(&self) -> bool {
        !matches!(self, Self::CopyLine | Self::GoToLine(_))
    }
}

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Selection after the action.
    pub selection: Selection,
    /// Entry to put on the clipboard (copy/cut).
    pub clipboard: Option<ClipboardEntry>,
    /// `true` if the document was modified.
    pub changed: bool,
}

impl ActionOutcome {
    fn unchanged(selection: Selection) -> Self {
        Self {
            selection,
            clipboard: None,
            changed: false,
        }
    }

    fn edited(selection: Selection) -> Self {
        Self {
            selection,
            clipboard: None,
            changed: true,
        }
    }
}

/// Action errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Editing action on a read-only document.
    ReadOnly,
    /// Go-to-line target outside `1..=line_count`.
    LineOutOfRange {
        /// Requested 1-based line.
        line: usize,
        /// Number of lines in the document.
        line_count: usize,
    },
    /// The document rejected an edit.
    Document(DocumentError),
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "Document is read-only"),
            Self::LineOutOfRange { line, line_count } => {
                write!(f, "Line {} out of range (1 - {})", line, line_count)
            }
            Self::Document(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Document(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DocumentError> for ActionError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::ReadOnly => Self::ReadOnly,
            other => Self::Document(other),
        }
    }
}

/// A pending replacement, in character offsets of the unedited document.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    range: Range<usize>,
    text: String,
}

impl Edit {
    fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            text: text.into(),
        }
    }

    fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            text: String::new(),
        }
    }

    /// Where `offset` ends up once this edit is applied.
    fn map_offset(&self, offset: usize) -> usize {
        let inserted = char_len(&self.text);
        if offset < self.range.start {
            offset
        } else if offset >= self.range.end {
            offset - (self.range.end - self.range.start) + inserted
        } else {
            self.range.start + inserted.min(offset - self.range.start)
        }
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn indent_len(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn char_tail(text: &str, skip: usize) -> &str {
    match text.char_indices().nth(skip) {
        Some((byte, _)) => &text[byte..],
        None => "",
    }
}

/// Apply non-overlapping `edits` last to first and map `selection` through them.
fn apply_edits<D>(
    doc: &mut D,
    mut edits: Vec<Edit>,
    selection: Selection,
) -> Result<Selection, ActionError>
where
    D: LineAccessor + ?Sized,
{
    edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));
    let mut selection = selection;
    for edit in &edits {
        doc.replace_range(edit.range.clone(), &edit.text)?;
        selection = selection.map(|offset| edit.map_offset(offset));
    }
    Ok(selection)
}

/// Lines touched by `selection` (inclusive).
fn selected_lines<D>(doc: &D, selection: Selection) -> Range<usize>
where
    D: LineAccessor + ?Sized,
{
    let first = doc.char_to_line(selection.start());
    let last = doc.char_to_line(selection.end());
    first..last + 1
}

/// Run `action` against `doc` with the given selection.
///
/// `comment` supplies the comment tokens for [`EditorAction::ToggleComment`]; an empty config
/// falls back to `#` line comments.
pub fn execute<D>(
    doc: &mut D,
    selection: Selection,
    action: &EditorAction,
    comment: &CommentConfig,
) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    let selection = selection.clamped(doc.len_chars());
    if action.is_editing() && doc.is_read_only() {
        return Err(ActionError::ReadOnly);
    }
    trace!("execute {:?} at {:?}", action, selection);

    match action {
        EditorAction::ToggleComment => toggle_comment(doc, selection, comment),
        EditorAction::DuplicateLine => duplicate(doc, selection),
        EditorAction::MoveLineUp => move_line(doc, selection, true),
        EditorAction::MoveLineDown => move_line(doc, selection, false),
        EditorAction::CopyLine => Ok(copy_line(doc, selection)),
        EditorAction::CutLine => cut_line(doc, selection),
        EditorAction::Paste(entry) => paste(doc, selection, entry),
        EditorAction::GoToLine(line) => go_to_line(doc, *line),
    }
}

fn toggle_comment<D>(
    doc: &mut D,
    selection: Selection,
    comment: &CommentConfig,
) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    if comment.has_line() {
        let token = comment.line.as_deref().unwrap_or(DEFAULT_LINE_COMMENT);
        return toggle_line_comment(doc, selection, token);
    }
    if let (true, Some(start), Some(end)) = (
        comment.has_block(),
        comment.block_start.as_deref(),
        comment.block_end.as_deref(),
    ) {
        let lines = selected_lines(doc, selection);
        if !selection.is_caret() && lines.len() == 1 {
            return toggle_inline_block(doc, selection, start, end);
        }
        return toggle_block_lines(doc, selection, start, end);
    }
    toggle_line_comment(doc, selection, DEFAULT_LINE_COMMENT)
}

/// `(line start offset, line text)` for every selected line.
fn collect_lines<D>(doc: &D, selection: Selection) -> Vec<(usize, String)>
where
    D: LineAccessor + ?Sized,
{
    selected_lines(doc, selection)
        .filter_map(|line| {
            let text = doc.line_text(line)?;
            Some((doc.line_to_char(line), text))
        })
        .collect()
}

/// The lines a toggle applies to: non-blank lines, or all of them if every line is blank.
fn toggle_targets(lines: Vec<(usize, String)>) -> Vec<(usize, String)> {
    if lines.iter().all(|(_, text)| text.trim().is_empty()) {
        return lines;
    }
    lines
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .collect()
}

fn toggle_line_comment<D>(
    doc: &mut D,
    selection: Selection,
    token: &str,
) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    let targets = toggle_targets(collect_lines(doc, selection));
    let all_commented = targets
        .iter()
        .all(|(_, text)| text.trim_start().starts_with(token));

    let token_len = char_len(token);
    let edits = targets
        .iter()
        .map(|(line_start, text)| {
            let indent = indent_len(text);
            let at = line_start + indent;
            if all_commented {
                let after = char_tail(text, indent + token_len);
                let space = usize::from(after.starts_with(' '));
                Edit::delete(at..at + token_len + space)
            } else {
                Edit::insert(at, format!("{} ", token))
            }
        })
        .collect();

    let selection = apply_edits(doc, edits, selection)?;
    Ok(ActionOutcome::edited(selection))
}

fn toggle_block_lines<D>(
    doc: &mut D,
    selection: Selection,
    start: &str,
    end: &str,
) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    let targets = toggle_targets(collect_lines(doc, selection));
    let is_wrapped = |text: &str| {
        let body = text.trim();
        body.len() >= start.len() + end.len() && body.starts_with(start) && body.ends_with(end)
    };
    let all_commented = targets.iter().all(|(_, text)| is_wrapped(text));

    let (start_len, end_len) = (char_len(start), char_len(end));
    let mut edits = Vec::with_capacity(targets.len() * 2);
    for (line_start, text) in &targets {
        let indent = indent_len(text);
        let content_end = line_start + char_len(text.trim_end());
        let open_at = line_start + indent;
        if all_commented {
            let body = char_tail(text, indent + start_len);
            let open_space =
                usize::from(body.starts_with(' ') && char_len(body.trim_end()) > end_len);
            let before_close = text.trim_end();
            let close_space =
                usize::from(before_close[..before_close.len() - end.len()].ends_with(' '));
            let close_start = content_end - end_len;
            // Keep the two deletions disjoint on lines like "<!-- -->".
            let close_space = if close_start - close_space < open_at + start_len + open_space {
                0
            } else {
                close_space
            };
            edits.push(Edit::delete(close_start - close_space..content_end));
            edits.push(Edit::delete(open_at..open_at + start_len + open_space));
        } else {
            edits.push(Edit::insert(content_end, format!(" {}", end)));
            edits.push(Edit::insert(open_at, format!("{} ", start)));
        }
    }

    let selection = apply_edits(doc, edits, selection)?;
    Ok(ActionOutcome::edited(selection))
}

fn toggle_inline_block<D>(
    doc: &mut D,
    selection: Selection,
    start: &str,
    end: &str,
) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    let range = selection.range();
    let (start_len, end_len) = (char_len(start), char_len(end));

    let surrounded = range.start >= start_len
        && doc.slice(range.start - start_len..range.start) == start
        && doc.slice(range.end..range.end + end_len) == end;
    if surrounded {
        let edits = vec![
            Edit::delete(range.end..range.end + end_len),
            Edit::delete(range.start - start_len..range.start),
        ];
        let selection = apply_edits(doc, edits, selection)?;
        return Ok(ActionOutcome::edited(selection));
    }

    let selected = doc.slice(range.clone());
    if char_len(&selected) >= start_len + end_len
        && selected.starts_with(start)
        && selected.ends_with(end)
    {
        let edits = vec![
            Edit::delete(range.end - end_len..range.end),
            Edit::delete(range.start..range.start + start_len),
        ];
        let selection = apply_edits(doc, edits, selection)?;
        return Ok(ActionOutcome::edited(selection));
    }

    doc.replace_range(range.end..range.end, end)?;
    doc.replace_range(range.start..range.start, start)?;
    let shifted = selection.map(|offset| offset + start_len);
    Ok(ActionOutcome::edited(shifted))
}

fn duplicate<D>(doc: &mut D, selection: Selection) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    if !selection.is_caret() {
        let text = doc.slice(selection.range());
        let at = selection.end();
        let copy_start = at + 1;
        let copy_end = copy_start + char_len(&text);
        doc.replace_range(at..at, &format!("\n{}", text))?;
        return Ok(ActionOutcome::edited(Selection::new(copy_start, copy_end)));
    }

    let line = doc.char_to_line(selection.head);
    let Some(range) = doc.line_range(line) else {
        return Ok(ActionOutcome::unchanged(selection));
    };
    let text = doc.slice(range.clone());
    doc.replace_range(range.end..range.end, &format!("\n{}", text))?;
    Ok(ActionOutcome::edited(selection))
}

fn move_line<D>(doc: &mut D, selection: Selection, up: bool) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    let line = doc.char_to_line(selection.head);
    let other = if up {
        match line.checked_sub(1) {
            Some(other) => other,
            None => return Ok(ActionOutcome::unchanged(selection)),
        }
    } else {
        if line + 1 >= doc.line_count() {
            return Ok(ActionOutcome::unchanged(selection));
        }
        line + 1
    };

    let (Some(current), Some(neighbour)) = (doc.line_range(line), doc.line_range(other)) else {
        return Ok(ActionOutcome::unchanged(selection));
    };
    let column = selection.head - current.start;
    let current_text = doc.slice(current.clone());
    let neighbour_text = doc.slice(neighbour.clone());

    let (span, swapped) = if up {
        (
            neighbour.start..current.end,
            format!("{}\n{}", current_text, neighbour_text),
        )
    } else {
        (
            current.start..neighbour.end,
            format!("{}\n{}", neighbour_text, current_text),
        )
    };
    doc.replace_range(span.clone(), &swapped)?;

    let moved_start = if up {
        span.start
    } else {
        span.start + char_len(&neighbour_text) + 1
    };
    let caret = moved_start + column.min(char_len(&current_text));
    Ok(ActionOutcome::edited(Selection::caret(caret)))
}

fn copy_line<D>(doc: &D, selection: Selection) -> ActionOutcome
where
    D: LineAccessor + ?Sized,
{
    let entry = if selection.is_caret() {
        let line = doc.char_to_line(selection.head);
        ClipboardEntry::line(doc.line_text(line).unwrap_or_default())
    } else {
        ClipboardEntry::text(doc.slice(selection.range()))
    };
    ActionOutcome {
        selection,
        clipboard: Some(entry),
        changed: false,
    }
}

fn cut_line<D>(doc: &mut D, selection: Selection) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    if !selection.is_caret() {
        let range = selection.range();
        let entry = ClipboardEntry::text(doc.slice(range.clone()));
        doc.replace_range(range.clone(), "")?;
        return Ok(ActionOutcome {
            selection: Selection::caret(range.start),
            clipboard: Some(entry),
            changed: true,
        });
    }

    let line = doc.char_to_line(selection.head);
    let Some(content) = doc.line_range(line) else {
        return Ok(ActionOutcome::unchanged(selection));
    };
    let entry = ClipboardEntry::line(doc.slice(content.clone()));

    let removed = if line + 1 < doc.line_count() {
        content.start..doc.line_to_char(line + 1)
    } else if line > 0 {
        // Last line: take the preceding line break instead.
        content.start - 1..content.end
    } else {
        content.clone()
    };
    doc.replace_range(removed, "")?;

    let caret_line = line.min(doc.line_count().saturating_sub(1));
    Ok(ActionOutcome {
        selection: Selection::caret(doc.line_to_char(caret_line)),
        clipboard: Some(entry),
        changed: true,
    })
}

fn paste<D>(
    doc: &mut D,
    selection: Selection,
    entry: &ClipboardEntry,
) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    if entry.whole_line && selection.is_caret() {
        let line = doc.char_to_line(selection.head);
        let at = doc.line_to_char(line);
        let text = if entry.text.ends_with('\n') {
            entry.text.clone()
        } else {
            format!("{}\n", entry.text)
        };
        doc.replace_range(at..at, &text)?;
        return Ok(ActionOutcome::edited(Selection::caret(
            selection.head + char_len(&text),
        )));
    }

    let range = selection.range();
    doc.replace_range(range.clone(), &entry.text)?;
    Ok(ActionOutcome::edited(Selection::caret(
        range.start + char_len(&entry.text),
    )))
}

fn go_to_line<D>(doc: &D, line: usize) -> Result<ActionOutcome, ActionError>
where
    D: LineAccessor + ?Sized,
{
    let line_count = doc.line_count();
    let out_of_range = ActionError::LineOutOfRange { line, line_count };
    if line == 0 || line > line_count {
        return Err(out_of_range);
    }
    let range = doc.line_range(line - 1).ok_or(out_of_range)?;
    Ok(ActionOutcome::unchanged(Selection::caret(range.end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_offset_mapping() {
        let insert = Edit::insert(3, "// ");
        assert_eq!(insert.map_offset(2), 2);
        assert_eq!(insert.map_offset(3), 6);

        let delete = Edit::delete(3..6);
        assert_eq!(delete.map_offset(4), 3);
        assert_eq!(delete.map_offset(7), 4);
    }

    #[test]
    fn test_selection_accessors() {
        let selection = Selection::new(9, 4);
        assert_eq!(selection.range(), 4..9);
        assert!(!selection.is_caret());
        assert!(Selection::caret(2).is_caret());
    }

    #[test]
    fn test_read_only_error_conversion() {
        assert_eq!(ActionError::from(DocumentError::ReadOnly), ActionError::ReadOnly);
        assert_eq!(
            ActionError::from(DocumentError::InvalidLine(3)),
            ActionError::Document(DocumentError::InvalidLine(3))
        );
    }

    #[test]
    fn test_char_tail_is_char_based() {
        assert_eq!(char_tail("é# x", 1), "# x");
        assert_eq!(char_tail("ab", 5), "");
    }
}
