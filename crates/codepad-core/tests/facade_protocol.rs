use codepad_core::{
    Color, Decoration, DecorationLayer, Document, DocumentError, EditorAction, EditorConfig,
    EditorFacade, EditorHost, HighlightSink, LineAccessor, LineData, SearchCriteria, SearchError,
    SearchMatch, SearchState, TextAccessor, Theme,
};
use std::cell::Cell;
use std::ops::Range;

#[derive(Debug, Default)]
struct RecordingHost {
    applies: usize,
    highlights: Vec<Decoration>,
    revealed: Vec<Range<usize>>,
    counts: Vec<(usize, usize)>,
    focused: usize,
    activated: Vec<(usize, Option<String>)>,
}

impl HighlightSink for RecordingHost {
    fn set_highlights(&mut self, highlights: &[Decoration]) {
        self.applies += 1;
        self.highlights = highlights.to_vec();
    }
}

impl EditorHost for RecordingHost {
    fn reveal(&mut self, range: Range<usize>) {
        self.revealed.push(range);
    }

    fn focus_editor(&mut self) {
        self.focused += 1;
    }

    fn show_match_count(&mut self, current: usize, total: usize) {
        self.counts.push((current, total));
    }

    fn line_activated(&mut self, line: usize, payload: Option<&str>) {
        self.activated.push((line, payload.map(str::to_string)));
    }
}

/// Document wrapper that counts "find next" calls.
#[derive(Debug)]
struct CountingDocument {
    inner: Document,
    finds: Cell<usize>,
}

impl CountingDocument {
    fn new(text: &str) -> Self {
        Self {
            inner: Document::new(text),
            finds: Cell::new(0),
        }
    }
}

impl TextAccessor for CountingDocument {
    fn len_chars(&self) -> usize {
        self.inner.len_chars()
    }

    fn find_next(
        &self,
        pattern: &str,
        from: usize,
        case_sensitive: bool,
        whole_word: bool,
    ) -> Result<Option<SearchMatch>, SearchError> {
        self.finds.set(self.finds.get() + 1);
        self.inner
            .find_next(pattern, from, case_sensitive, whole_word)
    }

    fn find_next_regex(
        &self,
        pattern: &str,
        from: usize,
        case_sensitive: bool,
    ) -> Result<Option<SearchMatch>, SearchError> {
        self.finds.set(self.finds.get() + 1);
        self.inner.find_next_regex(pattern, from, case_sensitive)
    }

    fn is_whole_word_at(&self, range: Range<usize>) -> bool {
        self.inner.is_whole_word_at(range)
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<(), DocumentError> {
        self.inner.replace_range(range, text)
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.inner.set_read_only(read_only);
    }
}

impl LineAccessor for CountingDocument {
    fn line_count(&self) -> usize {
        self.inner.line_count()
    }

    fn line_to_char(&self, line: usize) -> usize {
        self.inner.line_to_char(line)
    }

    fn char_to_line(&self, offset: usize) -> usize {
        self.inner.char_to_line(offset)
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.inner.line_text(line)
    }

    fn slice(&self, range: Range<usize>) -> String {
        self.inner.slice(range)
    }
}

fn editor(text: &str) -> EditorFacade<Document, RecordingHost> {
    EditorFacade::new(Document::new(text), RecordingHost::default())
}

fn layer_ranges(
    facade: &EditorFacade<impl LineAccessor, RecordingHost>,
    layer: DecorationLayer,
) -> Vec<Range<usize>> {
    facade
        .compositor()
        .layer(layer)
        .iter()
        .map(|d| d.range.start..d.range.end)
        .collect()
}

#[test]
fn test_search_populates_layers_in_one_apply() {
    let mut ed = editor("hello world\nhello python\ntest");
    let before = ed.host().applies;

    assert_eq!(ed.search("hello", false, false, false), 2);
    assert_eq!(ed.host().applies, before + 1);
    assert_eq!(ed.state(), SearchState::HasResults);
    assert_eq!(
        layer_ranges(&ed, DecorationLayer::SearchMatches),
        vec![0..5, 12..17]
    );
    assert_eq!(layer_ranges(&ed, DecorationLayer::CurrentMatch), vec![0..5]);
    assert_eq!(ed.host().revealed.last(), Some(&(0..5)));
    assert_eq!(ed.host().counts.last(), Some(&(1, 2)));
    assert_eq!(ed.host().highlights, ed.compositor().composed());
}

#[test]
fn test_empty_pattern_clears_search_layers() {
    let mut ed = editor("abc abc");
    ed.search("abc", false, false, false);

    assert_eq!(ed.search("", false, false, false), 0);
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::SearchMatches)));
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::CurrentMatch)));
    assert_eq!(ed.state(), SearchState::Idle);
    assert_eq!(ed.host().counts.last(), Some(&(0, 0)));
    assert!(ed.session().last_criteria().is_empty());
    assert_eq!(ed.open_search(), None);
}

#[test]
fn test_identical_search_restores_without_scanning() {
    let doc = CountingDocument::new("ab ab ab");
    let mut ed = EditorFacade::new(doc, RecordingHost::default());

    assert_eq!(ed.search("ab", false, false, false), 3);
    let scanned = ed.document().finds.get();
    assert!(scanned > 0);

    ed.next();
    assert_eq!(ed.search("ab", false, false, false), 3);
    assert_eq!(ed.document().finds.get(), scanned);
    assert_eq!(ed.state(), SearchState::HasResults);
    // The restored highlight keeps the navigated position.
    assert_eq!(layer_ranges(&ed, DecorationLayer::CurrentMatch), vec![3..5]);
    assert_eq!(ed.host().counts.last(), Some(&(2, 3)));

    ed.search("ab", true, false, false);
    assert!(ed.document().finds.get() > scanned);
}

#[test]
fn test_next_and_previous_only_touch_current_match() {
    let mut ed = editor("x x x");
    ed.search("x", false, false, false);
    let matches_before = layer_ranges(&ed, DecorationLayer::SearchMatches);
    let applies = ed.host().applies;

    assert_eq!(ed.next().map(|m| m.start), Some(2));
    assert_eq!(layer_ranges(&ed, DecorationLayer::CurrentMatch), vec![2..3]);
    assert_eq!(layer_ranges(&ed, DecorationLayer::SearchMatches), matches_before);
    assert_eq!(ed.host().applies, applies + 1);
    assert_eq!(ed.host().counts.last(), Some(&(2, 3)));

    assert_eq!(ed.previous().map(|m| m.start), Some(0));
    assert_eq!(ed.previous().map(|m| m.start), Some(4));
    assert_eq!(ed.host().counts.last(), Some(&(3, 3)));
    assert_eq!(ed.selection().range(), 4..5);
}

#[test]
fn test_close_and_reopen_restores_without_rescan() {
    let doc = CountingDocument::new("foo bar foo");
    let mut ed = EditorFacade::new(doc, RecordingHost::default());
    ed.search("foo", true, false, true);
    ed.next();

    ed.close_search();
    assert_eq!(ed.state(), SearchState::Idle);
    assert_eq!(ed.host().focused, 1);
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::SearchMatches)));
    assert!(ed.session().has_matches());

    let scanned = ed.document().finds.get();
    let criteria = ed.open_search().expect("last criteria");
    assert_eq!(
        criteria,
        SearchCriteria::new("foo").case_sensitive(true).whole_word(true)
    );
    assert_eq!(ed.document().finds.get(), scanned);
    assert_eq!(ed.state(), SearchState::HasResults);
    assert_eq!(layer_ranges(&ed, DecorationLayer::CurrentMatch), vec![8..11]);
}

#[test]
fn test_reopen_after_clear_rescans() {
    let doc = CountingDocument::new("foo foo");
    let mut ed = EditorFacade::new(doc, RecordingHost::default());
    ed.search("foo", false, false, false);
    ed.clear();
    assert_eq!(ed.state(), SearchState::Idle);
    assert!(!ed.session().has_matches());

    let scanned = ed.document().finds.get();
    assert!(ed.open_search().is_some());
    assert!(ed.document().finds.get() > scanned);
    assert_eq!(ed.session().match_count(), 2);
}

#[test]
fn test_no_results_and_invalid_regex() {
    let mut ed = editor("abc");
    assert_eq!(ed.search("zzz", false, false, false), 0);
    assert_eq!(ed.state(), SearchState::NoResults);
    assert_eq!(ed.host().counts.last(), Some(&(0, 0)));

    ed.search("a", false, false, false);
    assert_eq!(ed.search("(oops", false, true, false), 0);
    assert_eq!(ed.state(), SearchState::NoResults);
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::SearchMatches)));
}

#[test]
fn test_pathological_regex_completes() {
    let mut ed = editor("abc");
    let count = ed.search(".*", false, true, false);
    assert!(count >= 1 && count <= 3);
}

#[test]
fn test_replace_current_forces_rescan() {
    let doc = CountingDocument::new("cat cat cat");
    let mut ed = EditorFacade::new(doc, RecordingHost::default());
    ed.search("cat", false, false, false);
    ed.next();

    let scanned = ed.document().finds.get();
    assert!(ed.replace_current("dog"));
    assert!(ed.document().finds.get() > scanned);
    assert_eq!(ed.document().inner.text(), "cat dog cat");
    assert_eq!(ed.session().match_count(), 2);
    // The match after the replaced one becomes current.
    assert_eq!(layer_ranges(&ed, DecorationLayer::CurrentMatch), vec![8..11]);
    assert_eq!(ed.host().counts.last(), Some(&(2, 2)));
}

#[test]
fn test_replace_all_rescans_and_reports_count() {
    let mut ed = editor("aXaXa");
    ed.search("a", true, false, false);

    assert_eq!(ed.replace_all("bb"), 3);
    assert_eq!(ed.document().text(), "bbXbbXbb");
    assert_eq!(ed.session().match_count(), 0);
    assert_eq!(ed.state(), SearchState::NoResults);
    assert_eq!(ed.host().counts.last(), Some(&(0, 0)));
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::SearchMatches)));
}

#[test]
fn test_replace_all_with_pattern_in_replacement() {
    let mut ed = editor("a-a");
    ed.search("a", false, false, false);
    assert_eq!(ed.replace_all("aa"), 2);
    assert_eq!(ed.document().text(), "aa-aa");
    assert_eq!(ed.session().match_count(), 4);
    assert_eq!(ed.state(), SearchState::HasResults);
}

#[test]
fn test_read_only_replace_is_noop() {
    let config = EditorConfig {
        read_only: true,
        ..EditorConfig::default()
    };
    let mut ed = EditorFacade::with_config(Document::new("aaa"), RecordingHost::default(), config);
    ed.search("a", false, false, false);

    assert!(!ed.replace_current("b"));
    assert_eq!(ed.replace_all("b"), 0);
    assert_eq!(ed.document().text(), "aaa");
    assert_eq!(ed.session().match_count(), 3);
}

#[test]
fn test_notify_document_changed_invalidates_matches() {
    let mut ed = editor("one one");
    ed.search("one", false, false, false);

    ed.document_mut().replace_range(0..3, "two").unwrap();
    ed.notify_document_changed();
    assert!(!ed.session().has_matches());
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::SearchMatches)));
    assert_eq!(ed.state(), SearchState::Idle);

    assert_eq!(ed.search("one", false, false, false), 1);
    assert_eq!(layer_ranges(&ed, DecorationLayer::SearchMatches), vec![4..7]);
}

#[test]
fn test_theme_switch_recolors_in_one_apply() {
    let mut ed = editor("ab ab");
    ed.search("ab", false, false, false);
    let applies = ed.host().applies;

    ed.set_theme("dark").unwrap();
    assert_eq!(ed.host().applies, applies + 1);

    let dark = Theme::dark();
    let layer = ed.compositor().layer(DecorationLayer::SearchMatches);
    assert!(layer.iter().all(|d| d.color == dark.search_match));
    let current = ed.compositor().layer(DecorationLayer::CurrentMatch);
    assert_eq!(current[0].color, dark.current_match);
    let line = ed.compositor().layer(DecorationLayer::CurrentLine);
    assert_eq!(line[0].color, dark.current_line);
}

#[test]
fn test_unknown_theme_is_rejected() {
    let mut ed = editor("x");
    let applies = ed.host().applies;
    assert!(ed.set_theme("solarized").is_err());
    assert_eq!(ed.theme().name, "light");
    assert_eq!(ed.host().applies, applies);
}

#[test]
fn test_custom_theme_registration() {
    let mut ed = editor("x");
    let mut theme = Theme::light();
    theme.name = "paper".to_string();
    theme.current_line = Color::rgb(250, 240, 220);
    ed.register_theme(theme);

    ed.set_theme("paper").unwrap();
    assert_eq!(ed.theme_names(), vec!["dark", "light", "paper"]);
    let line = ed.compositor().layer(DecorationLayer::CurrentLine);
    assert_eq!(line[0].color, Color::rgb(250, 240, 220));
}

#[test]
fn test_current_line_follows_selection() {
    let mut ed = editor("first\nsecond\nthird");
    assert_eq!(layer_ranges(&ed, DecorationLayer::CurrentLine), vec![0..5]);

    ed.set_selection(codepad_core::Selection::caret(8));
    let line = ed.compositor().layer(DecorationLayer::CurrentLine);
    assert_eq!(line.len(), 1);
    assert_eq!(line[0].range.start..line[0].range.end, 6..12);
    assert!(line[0].full_line_width);

    ed.set_current_line_highlight_enabled(false);
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::CurrentLine)));
}

#[test]
fn test_hover_only_in_read_only_mode() {
    let mut ed = editor("a\nb\nc");
    ed.hover_line(Some(1));
    // Editable: the layer shows the caret line, not the hovered one.
    assert_eq!(layer_ranges(&ed, DecorationLayer::CurrentLine), vec![0..1]);

    ed.set_read_only(true);
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::CurrentLine)));

    ed.hover_line(Some(1));
    let line = ed.compositor().layer(DecorationLayer::CurrentLine);
    assert_eq!(line[0].range.start..line[0].range.end, 2..3);
    assert_eq!(line[0].color, Theme::light().hover_line);

    let applies = ed.host().applies;
    ed.hover_line(Some(1));
    assert_eq!(ed.host().applies, applies);

    ed.hover_line(None);
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::CurrentLine)));

    ed.hover_line(Some(2));
    ed.set_hover_enabled(false);
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::CurrentLine)));
    ed.hover_line(Some(0));
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::CurrentLine)));
}

#[test]
fn test_highlight_line_and_clear_decorations() {
    let mut ed = editor("a\nbb\nc");
    let red = Color::rgb(255, 0, 0);

    assert!(ed.highlight_line(1, red));
    assert!(!ed.highlight_line(9, red));
    assert_eq!(layer_ranges(&ed, DecorationLayer::Custom), vec![2..4]);
    assert_eq!(ed.host().highlights[0].color, red);

    ed.search("b", false, false, false);
    ed.clear_decorations(Some(DecorationLayer::Custom));
    assert!(!ed.compositor().has_decorations(Some(DecorationLayer::Custom)));
    assert!(ed.compositor().has_decorations(Some(DecorationLayer::SearchMatches)));

    ed.clear_decorations(None);
    assert!(!ed.compositor().has_decorations(None));
    assert!(ed.host().highlights.is_empty());
}

fn painted(facade: &EditorFacade<Document, RecordingHost>, color: Color) -> Vec<Range<usize>> {
    facade
        .host()
        .highlights
        .iter()
        .filter(|d| d.color == color)
        .map(|d| d.range.start..d.range.end)
        .collect()
}

#[test]
fn test_line_highlight_follows_line_actions() {
    let red = Color::rgb(255, 0, 0);

    let mut ed = editor("a\nb\nc");
    assert!(ed.highlight_line(2, red));
    ed.execute(EditorAction::CutLine).unwrap();
    assert_eq!(ed.document().text(), "b\nc");
    assert_eq!(ed.line_highlights().collect::<Vec<_>>(), vec![(1, red)]);
    assert_eq!(painted(&ed, red), vec![2..3]);

    let mut ed = editor("a\nb\nc");
    assert!(ed.highlight_line(2, red));
    ed.execute(EditorAction::DuplicateLine).unwrap();
    assert_eq!(ed.document().text(), "a\na\nb\nc");
    assert_eq!(painted(&ed, red), vec![6..7]);
    assert_eq!(ed.document().slice(6..7), "c");
}

#[test]
fn test_line_highlight_follows_replace_all() {
    let red = Color::rgb(255, 0, 0);
    let mut ed = editor("a\nb\nc");
    assert!(ed.highlight_line(2, red));

    ed.search("b", false, false, false);
    assert_eq!(ed.replace_all("1\n2"), 1);
    assert_eq!(ed.document().text(), "a\n1\n2\nc");
    assert_eq!(painted(&ed, red), vec![6..7]);
    assert_eq!(layer_ranges(&ed, DecorationLayer::Custom), vec![6..7]);
}

#[test]
fn test_external_edits_never_paint_past_the_document() {
    let red = Color::rgb(255, 0, 0);
    let mut ed = editor("a\nb\nc");
    assert!(ed.highlight_line(2, red));

    ed.document_mut().replace_range(0..0, "z\n").unwrap();
    ed.notify_lines_changed(0, 0, 1);
    assert_eq!(painted(&ed, red), vec![6..7]);

    ed.document_mut().set_text("x");
    ed.notify_document_changed();
    assert!(painted(&ed, red).is_empty());
    assert_eq!(ed.line_highlights().count(), 0);
    let len = ed.document().len_chars();
    assert!(ed.host().highlights.iter().all(|d| d.range.end <= len));
}

#[test]
fn test_raw_decorations_are_batched_until_apply() {
    let mut ed = editor("abc");
    let applies = ed.host().applies;

    ed.clear_all();
    ed.add_decoration(DecorationLayer::CurrentMatch, 0..1, Color::rgb(9, 9, 9), false);
    ed.add_decoration(DecorationLayer::Custom, 1..2, Color::rgb(8, 8, 8), false);
    ed.clear_layer(DecorationLayer::Custom);
    assert_eq!(ed.host().applies, applies);

    ed.apply();
    assert_eq!(ed.host().applies, applies + 1);
    assert_eq!(ed.host().highlights.len(), 1);
}

#[test]
fn test_activate_line_reports_payload_in_read_only_mode() {
    let mut doc = Document::new("row one\nrow two");
    let mut data = LineData::new(Some("{\"id\": 2}".to_string()), None);
    data.add_tag("selected");
    assert!(doc.set_line_data(1, data));

    let mut ed = EditorFacade::new(doc, RecordingHost::default());
    assert!(!ed.activate_line(1));

    ed.set_read_only(true);
    assert!(ed.activate_line(1));
    assert!(ed.activate_line(0));
    assert!(!ed.activate_line(5));
    assert_eq!(
        ed.host().activated,
        vec![(1, Some("{\"id\": 2}".to_string())), (0, None)]
    );
    assert!(ed.line_data(1).is_some_and(|d| d.has_tag("selected")));
}

#[test]
fn test_config_applies_to_facade() {
    let config = EditorConfig::from_json_sanitized(
        r#"{"theme_name": "dark", "language": "rust", "search": {"max_scan_iterations": 2}}"#,
    )
    .unwrap();
    let mut ed =
        EditorFacade::with_config(Document::new("a a a a"), RecordingHost::default(), config);

    assert_eq!(ed.theme().name, "dark");
    assert_eq!(ed.language(), Some("rust"));
    assert_eq!(ed.search("a", false, false, false), 2);
}
