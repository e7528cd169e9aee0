use codepad_core::{Decoration, Document, EditorFacade, EditorHost, HighlightSink, SearchState};
use std::ops::Range;

/// Prints every call the editor makes to its host.
struct PrintingHost;

impl HighlightSink for PrintingHost {
    fn set_highlights(&mut self, highlights: &[Decoration]) {
        println!("highlights: {} ranges", highlights.len());
    }
}

impl EditorHost for PrintingHost {
    fn reveal(&mut self, range: Range<usize>) {
        println!("reveal {:?}", range);
    }

    fn show_match_count(&mut self, current: usize, total: usize) {
        println!("match {}/{}", current, total);
    }
}

fn main() {
    env_logger::init();

    let text = "hello world\nhello python\ntest";
    let mut editor = EditorFacade::new(Document::new(text), PrintingHost);

    // Case-insensitive literal search, then step through the matches.
    assert_eq!(editor.search("HELLO", false, false, false), 2);
    assert_eq!(editor.state(), SearchState::HasResults);
    editor.next();
    editor.next();

    // Closing and reopening restores the highlights without rescanning.
    editor.close_search();
    let criteria = editor.open_search().unwrap();
    assert_eq!(criteria.pattern, "HELLO");

    assert_eq!(editor.replace_all("bye"), 2);
    assert_eq!(editor.document().text(), "bye world\nbye python\ntest");
    assert_eq!(editor.state(), SearchState::NoResults);
}
