//! Editor facade: the search-request protocol and every other highlight source, wired to a host.
//!
//! [`EditorFacade`] owns the [`SearchSession`], the [`DecorationCompositor`], the theme and
//! language registries and the editor selection. UI glue (search popup, shortcuts, mouse
//! handlers) calls into it; it answers through the [`EditorHost`] trait.
//!
//! Every public operation follows the same discipline: rebuild the affected layers completely,
//! then call [`DecorationCompositor::apply`] once.
//!
//! # Search protocol
//!
//! | Event                          | Effect                                                      |
//! |--------------------------------|-------------------------------------------------------------|
//! | empty pattern                  | criteria recorded, search layers cleared, `Idle`            |
//! | same criteria, matches present | highlights restored from the existing list (no scan)        |
//! | new criteria                   | `Searching`, scan, then `HasResults` or `NoResults`         |
//! | next / previous                | only in `HasResults`; current-match layer rebuilt           |
//! | close                          | search layers cleared, focus returned, `Idle`; matches kept |
//! | replace current / all          | edit, then always rescan with the last criteria             |

use crate::actions::{self, ActionError, ActionOutcome, EditorAction, Selection};
use crate::config::EditorConfig;
use crate::decorations::{DecorationCompositor, DecorationLayer, DecorationRange, HighlightSink};
use crate::document::{DocumentError, LineAccessor, TextAccessor};
use crate::line_data::{LineData, shift_lines};
use crate::search::{MatchFinder, SearchCriteria, SearchError, SearchMatch};
use crate::session::SearchSession;
use crate::theme::{Color, Theme, ThemeError, ThemeManager};
use codepad_lang::LanguageRegistry;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::ops::Range;

/// Host-side callbacks besides the highlight primitive.
///
/// All methods have no-op defaults so hosts implement only what they display.
pub trait EditorHost: HighlightSink {
    /// Move the caret/viewport so that `range` is visible (and selected).
    fn reveal(&mut self, range: Range<usize>) {
        let _ = range;
    }

    /// Return keyboard focus to the text surface.
    fn focus_editor(&mut self) {}

    /// Update the "current / total" match counter (`0 / 0` when there is nothing to show).
    fn show_match_count(&mut self, current: usize, total: usize) {
        let _ = (current, total);
    }

    /// A line was activated (double-clicked) in read-only mode.
    fn line_activated(&mut self, line: usize, payload: Option<&str>) {
        let _ = (line, payload);
    }
}

/// Search UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchState {
    /// No active search highlights.
    #[default]
    Idle,
    /// A scan is in progress.
    Searching,
    /// The last scan found matches and they are highlighted.
    HasResults,
    /// The last scan found nothing.
    NoResults,
}

/// Headless editor facade over a document `D` and a host `H`.
#[derive(Debug)]
pub struct EditorFacade<D, H> {
    document: D,
    host: H,
    session: SearchSession,
    compositor: DecorationCompositor,
    themes: ThemeManager,
    languages: LanguageRegistry,
    config: EditorConfig,
    state: SearchState,
    selection: Selection,
    hover: Option<usize>,
    line_highlights: BTreeMap<usize, Color>,
}

impl<D, H> EditorFacade<D, H>
where
    D: LineAccessor,
    H: EditorHost,
{
    /// Create a facade with the default configuration.
    pub fn new(document: D, host: H) -> Self {
        Self::with_config(document, host, EditorConfig::default())
    }

    /// Create a facade from a configuration.
    ///
    /// Unknown theme or language names are logged and ignored.
    pub fn with_config(mut document: D, host: H, mut config: EditorConfig) -> Self {
        config.sanitize();
        document.set_read_only(config.read_only);

        let mut themes = ThemeManager::new();
        if let Err(err) = themes.set_current(&config.theme_name) {
            warn!("{}; falling back to '{}'", err, themes.current().name);
            config.theme_name = themes.current().name.clone();
        }

        let mut languages = LanguageRegistry::with_builtin();
        if let Some(name) = config.language.as_deref() {
            if !languages.set_current(name) {
                warn!("unknown language '{}'; comment toggling uses '#'", name);
            }
        }

        let session = SearchSession::with_finder(MatchFinder::with_max_iterations(
            config.search.max_scan_iterations,
        ));

        let mut facade = Self {
            document,
            host,
            session,
            compositor: DecorationCompositor::new(),
            themes,
            languages,
            config,
            state: SearchState::Idle,
            selection: Selection::default(),
            hover: None,
            line_highlights: BTreeMap::new(),
        };
        facade.rebuild_current_line();
        facade.apply();
        facade
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// The document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable document access. Call [`notify_document_changed`](Self::notify_document_changed)
    /// after editing through it.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Split into document and host.
    pub fn into_parts(self) -> (D, H) {
        (self.document, self.host)
    }

    /// The search session.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// The decoration compositor.
    pub fn compositor(&self) -> &DecorationCompositor {
        &self.compositor
    }

    /// The active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current search state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    // ---------------------------------------------------------------------
    // Search protocol
    // ---------------------------------------------------------------------

    /// Search for `pattern` and highlight the matches. Returns the match count.
    pub fn search(
        &mut self,
        pattern: &str,
        case_sensitive: bool,
        use_regex: bool,
        whole_word: bool,
    ) -> usize {
        self.search_with(SearchCriteria {
            pattern: pattern.to_string(),
            case_sensitive,
            use_regex,
            whole_word,
        })
    }

    /// Search with prepared criteria. Returns the match count.
    pub fn search_with(&mut self, criteria: SearchCriteria) -> usize {
        if criteria.is_empty() {
            self.session.search(criteria, &self.document);
            self.clear_search_layers();
            self.apply();
            self.host.show_match_count(0, 0);
            self.transition(SearchState::Idle);
            return 0;
        }

        if !self.session.needs_rescan(&criteria) {
            return self.restore_search();
        }

        self.clear_search_layers();
        self.transition(SearchState::Searching);
        let count = self.session.search(criteria, &self.document);
        self.show_results();
        count
    }

    /// Reopen the search UI.
    ///
    /// Returns the last non-empty criteria (for prefilling the search box) after restoring their
    /// highlights: from the existing matches when there are any, by scanning otherwise.
    pub fn open_search(&mut self) -> Option<SearchCriteria> {
        let criteria = self.session.last_criteria().clone();
        if criteria.is_empty() {
            return None;
        }
        if self.session.has_matches() {
            self.restore_search();
        } else {
            self.search_with(criteria.clone());
        }
        Some(criteria)
    }

    /// Move to the next match. Only valid while there are results.
    pub fn next(&mut self) -> Option<SearchMatch> {
        if self.state != SearchState::HasResults {
            return None;
        }
        let found = self.session.next().cloned()?;
        self.show_current_match();
        Some(found)
    }

    /// Move to the previous match. Only valid while there are results.
    pub fn previous(&mut self) -> Option<SearchMatch> {
        if self.state != SearchState::HasResults {
            return None;
        }
        let found = self.session.previous().cloned()?;
        self.show_current_match();
        Some(found)
    }

    /// Close the search UI. Criteria and matches are kept for [`open_search`](Self::open_search).
    pub fn close_search(&mut self) {
        self.clear_search_layers();
        self.apply();
        self.host.focus_editor();
        self.transition(SearchState::Idle);
    }

    /// Replace the current match, then rescan.
    ///
    /// Returns `false` on a read-only document or when there is no current match. The match
    /// following the replaced text becomes current.
    pub fn replace_current(&mut self, replacement: &str) -> bool {
        if self.document.is_read_only() {
            return false;
        }
        let Some(start) = self.session.current().map(|m| m.start) else {
            return false;
        };
        let mut document = LineTracking::new(&mut self.document, &mut self.line_highlights);
        if !self.session.replace_current(&mut document, replacement) {
            return false;
        }
        self.rescan_after_edit(Some(start + replacement.chars().count()));
        true
    }

    /// Replace every match, then rescan. Returns the number of replacements.
    pub fn replace_all(&mut self, replacement: &str) -> usize {
        if self.document.is_read_only() {
            return 0;
        }
        let mut document = LineTracking::new(&mut self.document, &mut self.line_highlights);
        let replaced = self.session.replace_all(&mut document, replacement);
        self.rescan_after_edit(None);
        replaced
    }

    /// Drop the matches and their highlights.
    pub fn clear(&mut self) {
        self.session.clear();
        self.clear_search_layers();
        self.apply();
        self.host.show_match_count(0, 0);
        self.transition(SearchState::Idle);
    }

    /// Report an edit made outside the facade.
    ///
    /// Matches are invalidated (the next identical search rescans) and stale search highlights
    /// are removed. Line highlights are re-laid on the current text; those past the last line
    /// are dropped. Use [`notify_lines_changed`](Self::notify_lines_changed) when the edited
    /// lines are known so line highlights can follow them.
    pub fn notify_document_changed(&mut self) {
        self.session.clear();
        self.selection = self.clamp_selection(self.selection);
        self.hover = self.hover.filter(|line| *line < self.document.line_count());
        let had_search_highlights = self.has_search_layers();
        self.clear_search_layers();
        self.rebuild_line_highlights();
        self.rebuild_current_line();
        self.apply();
        if had_search_highlights {
            self.host.show_match_count(0, 0);
        }
        self.transition(SearchState::Idle);
    }

    /// Report an edit made outside the facade that started on `start_line`, removed `removed`
    /// line breaks and inserted `inserted` ones.
    ///
    /// Line highlights below the edit move with their lines; then behaves like
    /// [`notify_document_changed`](Self::notify_document_changed).
    pub fn notify_lines_changed(&mut self, start_line: usize, removed: usize, inserted: usize) {
        shift_lines(&mut self.line_highlights, start_line, removed, inserted);
        self.notify_document_changed();
    }

    // ---------------------------------------------------------------------
    // Raw decorations
    // ---------------------------------------------------------------------

    /// Append a decoration. Nothing is painted until [`apply`](Self::apply).
    ///
    /// Raw decorations are fixed character ranges. Edits made through the facade rebuild the
    /// custom layer from the line highlights of [`highlight_line`](Self::highlight_line), which
    /// drops raw custom decorations.
    pub fn add_decoration(
        &mut self,
        layer: DecorationLayer,
        range: impl Into<DecorationRange>,
        color: Color,
        full_line_width: bool,
    ) {
        self.compositor.add(layer, range, color, full_line_width);
    }

    /// Empty one layer. Nothing is painted until [`apply`](Self::apply).
    pub fn clear_layer(&mut self, layer: DecorationLayer) {
        if layer == DecorationLayer::Custom {
            self.line_highlights.clear();
        }
        self.compositor.clear_layer(layer);
    }

    /// Empty every layer. Nothing is painted until [`apply`](Self::apply).
    pub fn clear_all(&mut self) {
        self.line_highlights.clear();
        self.compositor.clear_all();
    }

    /// Hand the composed decorations to the host in one call.
    pub fn apply(&mut self) {
        self.compositor.apply(&mut self.host);
    }

    // ---------------------------------------------------------------------
    // Line highlights
    // ---------------------------------------------------------------------

    /// Move the caret/selection and refresh the current-line highlight.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = self.clamp_selection(selection);
        self.rebuild_current_line();
        self.apply();
    }

    /// Report the line under the mouse (`None` when the pointer leaves the editor).
    ///
    /// Only has an effect on read-only documents with hover highlighting enabled.
    pub fn hover_line(&mut self, line: Option<usize>) {
        if !self.document.is_read_only() || !self.config.hover_enabled {
            return;
        }
        let line = line.filter(|line| *line < self.document.line_count());
        if line == self.hover {
            return;
        }
        self.hover = line;
        self.rebuild_current_line();
        self.apply();
    }

    /// Paint `line` with `color` across the full width. Returns `false` for a missing line.
    ///
    /// The highlight stays on its line across edits made through the facade.
    pub fn highlight_line(&mut self, line: usize, color: Color) -> bool {
        let Some(range) = self.document.line_range(line) else {
            return false;
        };
        self.line_highlights.insert(line, color);
        self.compositor
            .add(DecorationLayer::Custom, range, color, true);
        self.apply();
        true
    }

    /// Lines painted by [`highlight_line`](Self::highlight_line), with their colors.
    pub fn line_highlights(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.line_highlights
            .iter()
            .map(|(line, color)| (*line, *color))
    }

    /// Clear one layer, or every layer with `None`, and repaint.
    pub fn clear_decorations(&mut self, layer: Option<DecorationLayer>) {
        match layer {
            Some(layer) => self.clear_layer(layer),
            None => self.clear_all(),
        }
        if matches!(layer, None | Some(DecorationLayer::CurrentLine)) {
            self.hover = None;
        }
        self.apply();
    }

    // ---------------------------------------------------------------------
    // Modes
    // ---------------------------------------------------------------------

    /// Returns `true` if the document rejects edits.
    pub fn is_read_only(&self) -> bool {
        self.document.is_read_only()
    }

    /// Switch between editable and read-only mode.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.document.set_read_only(read_only);
        self.config.read_only = read_only;
        self.hover = None;
        self.rebuild_current_line();
        self.apply();
    }

    /// Enable or disable hover highlighting (read-only mode).
    pub fn set_hover_enabled(&mut self, enabled: bool) {
        self.config.hover_enabled = enabled;
        if !enabled && self.hover.take().is_some() {
            self.rebuild_current_line();
            self.apply();
        }
    }

    /// Enable or disable the current-line highlight (editable mode).
    pub fn set_current_line_highlight_enabled(&mut self, enabled: bool) {
        self.config.current_line_highlight = enabled;
        self.rebuild_current_line();
        self.apply();
    }

    // ---------------------------------------------------------------------
    // Themes
    // ---------------------------------------------------------------------

    /// The current theme.
    pub fn theme(&self) -> &Theme {
        self.themes.current()
    }

    /// Registered theme names, sorted.
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.names()
    }

    /// Register (or replace) a theme.
    pub fn register_theme(&mut self, theme: Theme) {
        self.themes.register(theme);
    }

    /// Switch theme and re-color every highlight the facade owns, in one repaint.
    pub fn set_theme(&mut self, name: &str) -> Result<(), ThemeError> {
        self.themes.set_current(name)?;
        self.config.theme_name = name.to_string();
        self.rebuild_current_line();
        self.rebuild_search_layers();
        self.apply();
        debug!("theme switched to '{}'", name);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Languages
    // ---------------------------------------------------------------------

    /// The language registry.
    pub fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    /// Mutable language registry (for registering custom languages).
    pub fn languages_mut(&mut self) -> &mut LanguageRegistry {
        &mut self.languages
    }

    /// Select the active language. Returns `false` if it is not registered.
    pub fn set_language(&mut self, name: &str) -> bool {
        if !self.languages.set_current(name) {
            return false;
        }
        self.config.language = self.languages.current().map(|l| l.name.clone());
        true
    }

    /// Name of the active language.
    pub fn language(&self) -> Option<&str> {
        self.languages.current().map(|l| l.name.as_str())
    }

    // ---------------------------------------------------------------------
    // Line data & actions
    // ---------------------------------------------------------------------

    /// Metadata attached to `line`.
    pub fn line_data(&self, line: usize) -> Option<&LineData> {
        self.document.line_data(line)
    }

    /// Report a line activation (double-click) to the host. Read-only mode only.
    pub fn activate_line(&mut self, line: usize) -> bool {
        if !self.document.is_read_only() || line >= self.document.line_count() {
            return false;
        }
        let payload = self
            .document
            .line_data(line)
            .and_then(|data| data.payload.as_deref());
        self.host.line_activated(line, payload);
        true
    }

    /// Run a line action at the current selection.
    ///
    /// Edits invalidate the search; the resulting selection is revealed.
    pub fn execute(&mut self, action: EditorAction) -> Result<ActionOutcome, ActionError> {
        let comment = self.languages.current_comment();
        let mut document = LineTracking::new(&mut self.document, &mut self.line_highlights);
        let outcome = actions::execute(&mut document, self.selection, &action, &comment)?;

        if outcome.changed {
            self.session.clear();
            self.rebuild_line_highlights();
            if self.has_search_layers() {
                self.host.show_match_count(0, 0);
            }
            self.clear_search_layers();
            self.transition(SearchState::Idle);
        }
        self.selection = outcome.selection;
        self.host.reveal(self.selection.range());
        self.rebuild_current_line();
        self.apply();
        Ok(outcome)
    }

    /// Put the caret at the end of a 1-based line.
    pub fn go_to_line(&mut self, line: usize) -> Result<(), ActionError> {
        self.execute(EditorAction::GoToLine(line)).map(|_| ())
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn transition(&mut self, next: SearchState) {
        if self.state != next {
            debug!("search state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn clamp_selection(&self, selection: Selection) -> Selection {
        let len = self.document.len_chars();
        Selection::new(selection.anchor.min(len), selection.head.min(len))
    }

    fn has_search_layers(&self) -> bool {
        self.compositor
            .has_decorations(Some(DecorationLayer::SearchMatches))
            || self
                .compositor
                .has_decorations(Some(DecorationLayer::CurrentMatch))
    }

    fn clear_search_layers(&mut self) {
        self.compositor.clear_layer(DecorationLayer::SearchMatches);
        self.compositor.clear_layer(DecorationLayer::CurrentMatch);
    }

    /// Rebuild both search layers from the session, if they are currently shown.
    fn rebuild_search_layers(&mut self) {
        if !matches!(self.state, SearchState::HasResults) {
            return;
        }
        self.populate_search_layers();
    }

    fn populate_search_layers(&mut self) {
        self.clear_search_layers();
        let theme = self.themes.current();
        for m in self.session.matches() {
            self.compositor.add(
                DecorationLayer::SearchMatches,
                m.range(),
                theme.search_match,
                false,
            );
        }
        if let Some(current) = self.session.current() {
            self.compositor.add(
                DecorationLayer::CurrentMatch,
                current.range(),
                theme.current_match,
                false,
            );
        }
    }

    fn rebuild_current_match(&mut self) {
        self.compositor.clear_layer(DecorationLayer::CurrentMatch);
        if let Some(current) = self.session.current() {
            self.compositor.add(
                DecorationLayer::CurrentMatch,
                current.range(),
                self.themes.current().current_match,
                false,
            );
        }
    }

    /// Rebuild the custom layer from the line highlights on the current text.
    fn rebuild_line_highlights(&mut self) {
        self.compositor.clear_layer(DecorationLayer::Custom);
        let line_count = self.document.line_count();
        self.line_highlights.retain(|line, _| *line < line_count);
        for (&line, &color) in &self.line_highlights {
            if let Some(range) = self.document.line_range(line) {
                self.compositor
                    .add(DecorationLayer::Custom, range, color, true);
            }
        }
    }

    /// Current line when editable, hovered line when read-only.
    fn rebuild_current_line(&mut self) {
        self.compositor.clear_layer(DecorationLayer::CurrentLine);
        let theme = self.themes.current();

        let (line, color) = if self.document.is_read_only() {
            match self.hover {
                Some(line) if self.config.hover_enabled => (line, theme.hover_line),
                _ => return,
            }
        } else if self.config.current_line_highlight {
            (
                self.document.char_to_line(self.selection.head),
                theme.current_line,
            )
        } else {
            return;
        };

        if let Some(range) = self.document.line_range(line) {
            self.compositor
                .add(DecorationLayer::CurrentLine, range, color, true);
        }
    }

    /// Select the current match and ask the host to show it.
    fn reveal_current(&mut self) {
        let Some(range) = self.session.current().map(SearchMatch::range) else {
            return;
        };
        self.selection = Selection::new(range.start, range.end);
        self.host.reveal(range);
        self.rebuild_current_line();
    }

    fn report_position(&mut self) {
        let total = self.session.match_count();
        let current = self.session.current_index().map_or(0, |idx| idx + 1);
        self.host.show_match_count(current, total);
    }

    /// Paint the session's matches after a scan.
    fn show_results(&mut self) {
        if self.session.has_matches() {
            self.populate_search_layers();
            self.reveal_current();
            self.apply();
            self.report_position();
            self.transition(SearchState::HasResults);
        } else {
            self.clear_search_layers();
            self.apply();
            self.host.show_match_count(0, 0);
            self.transition(SearchState::NoResults);
        }
    }

    /// Repaint from the existing match list without scanning.
    fn restore_search(&mut self) -> usize {
        debug!(
            "restoring {} matches without rescanning",
            self.session.match_count()
        );
        self.show_results();
        self.session.match_count()
    }

    fn show_current_match(&mut self) {
        self.rebuild_current_match();
        self.reveal_current();
        self.apply();
        self.report_position();
    }

    fn rescan_after_edit(&mut self, resume_at: Option<usize>) {
        let criteria = self.session.last_criteria().clone();
        self.clear_search_layers();
        self.rebuild_line_highlights();
        if criteria.is_empty() {
            self.session.clear();
            self.rebuild_current_line();
            self.apply();
            self.host.show_match_count(0, 0);
            self.transition(SearchState::Idle);
            return;
        }

        self.transition(SearchState::Searching);
        self.session.search(criteria, &self.document);
        if let Some(offset) = resume_at {
            self.session.select_from(offset);
        }
        self.selection = self.clamp_selection(self.selection);
        self.rebuild_current_line();
        self.show_results();
    }
}

/// Document view used for facade edits: forwards everything and keeps line highlights on
/// their lines as each edit lands.
struct LineTracking<'a, D: ?Sized> {
    document: &'a mut D,
    lines: &'a mut BTreeMap<usize, Color>,
}

impl<'a, D: LineAccessor + ?Sized> LineTracking<'a, D> {
    fn new(document: &'a mut D, lines: &'a mut BTreeMap<usize, Color>) -> Self {
        Self { document, lines }
    }
}

impl<D: LineAccessor + ?Sized> TextAccessor for LineTracking<'_, D> {
    fn len_chars(&self) -> usize {
        self.document.len_chars()
    }

    fn find_next(
        &self,
        pattern: &str,
        from: usize,
        case_sensitive: bool,
        whole_word: bool,
    ) -> Result<Option<SearchMatch>, SearchError> {
        self.document
            .find_next(pattern, from, case_sensitive, whole_word)
    }

    fn find_next_regex(
        &self,
        pattern: &str,
        from: usize,
        case_sensitive: bool,
    ) -> Result<Option<SearchMatch>, SearchError> {
        self.document.find_next_regex(pattern, from, case_sensitive)
    }

    fn is_whole_word_at(&self, range: Range<usize>) -> bool {
        self.document.is_whole_word_at(range)
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<(), DocumentError> {
        let start_line = self.document.char_to_line(range.start);
        let removed = self.document.char_to_line(range.end) - start_line;
        let lines_before = self.document.line_count();

        self.document.replace_range(range, text)?;

        let inserted = (self.document.line_count() + removed).saturating_sub(lines_before);
        shift_lines(self.lines, start_line, removed, inserted);
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        self.document.is_read_only()
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.document.set_read_only(read_only);
    }
}

impl<D: LineAccessor + ?Sized> LineAccessor for LineTracking<'_, D> {
    fn line_count(&self) -> usize {
        self.document.line_count()
    }

    fn line_to_char(&self, line: usize) -> usize {
        self.document.line_to_char(line)
    }

    fn char_to_line(&self, offset: usize) -> usize {
        self.document.char_to_line(offset)
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.document.line_text(line)
    }

    fn slice(&self, range: Range<usize>) -> String {
        self.document.slice(range)
    }

    fn line_data(&self, line: usize) -> Option<&LineData> {
        self.document.line_data(line)
    }

    fn line_range(&self, line: usize) -> Option<Range<usize>> {
        self.document.line_range(line)
    }
}
