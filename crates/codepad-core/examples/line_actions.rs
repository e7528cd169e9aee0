use codepad_core::{
    ClipboardEntry, Decoration, Document, EditorAction, EditorFacade, EditorHost, HighlightSink,
    Selection,
};

struct Host;

impl HighlightSink for Host {
    fn set_highlights(&mut self, _highlights: &[Decoration]) {}
}

impl EditorHost for Host {}

fn main() {
    let text = "fn main() {\n    println!(\"hi\");\n}";
    let mut editor = EditorFacade::new(Document::new(text), Host);
    editor.set_language("rust");

    // Toggle a line comment on the caret line.
    editor.set_selection(Selection::caret(16));
    editor.execute(EditorAction::ToggleComment).unwrap();
    assert_eq!(
        editor.document().text(),
        "fn main() {\n    // println!(\"hi\");\n}"
    );

    // Cut the line and paste it back above the first line.
    let cut = editor.execute(EditorAction::CutLine).unwrap();
    let entry = cut.clipboard.unwrap_or_else(|| ClipboardEntry::text(""));
    editor.go_to_line(1).unwrap();
    editor.execute(EditorAction::Paste(entry)).unwrap();
    assert_eq!(
        editor.document().text(),
        "    // println!(\"hi\");\nfn main() {\n}"
    );

    editor.execute(EditorAction::MoveLineDown).unwrap();
    println!("{}", editor.document().text());
}
