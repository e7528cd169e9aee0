#![warn(missing_docs)]
//! Codepad Core - Headless Search & Highlight Kernel for an Embeddable Code Editor
//!
//! # Overview
//!
//! `codepad-core` holds everything with logic inside a code-editor widget, while the host GUI
//! toolkit keeps glyph rendering, widgets, dialogs, shortcut wiring and the system clipboard.
//! The host talks to the core through a small trait surface ([`TextAccessor`], [`HighlightSink`],
//! [`EditorHost`]) and receives every highlight as one flat, priority-ordered list.
//!
//! # Core Features
//!
//! - **Loop-safe search**: literal, case-insensitive, whole-word and regex scans that step over
//!   zero-width matches and stop at a configurable iteration cap
//! - **Search session**: current-match navigation, replace-current and reverse-order replace-all
//! - **Layered decorations**: fixed priority layers flattened into one atomic repaint
//! - **Search protocol**: restore-without-rescan vs. rescan decisions under rapid UI input
//! - **Line features**: per-line metadata, hover/current-line highlight, comment toggle,
//!   duplicate/move/copy/cut/paste of lines, go-to-line
//! - **Themes**: built-in light/dark palettes plus custom themes
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditorFacade (search protocol, themes)     │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  SearchSession       │  DecorationCompositor│  ← State
//! ├──────────────────────┼──────────────────────┤
//! │  MatchFinder         │  Line actions        │  ← Algorithms
//! ├──────────────────────┴──────────────────────┤
//! │  TextAccessor / LineAccessor (Document)     │  ← Text access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Searching a document
//!
//! ```rust
//! use codepad_core::{Document, SearchCriteria, SearchSession};
//!
//! let doc = Document::new("hello world\nhello python\ntest");
//! let mut session = SearchSession::new();
//!
//! assert_eq!(session.search(SearchCriteria::new("hello"), &doc), 2);
//! assert_eq!(session.next().map(|m| m.start), Some(12));
//! ```
//!
//! ## Driving a host through the facade
//!
//! ```rust
//! use codepad_core::{
//!     Decoration, DecorationLayer, Document, EditorFacade, EditorHost, HighlightSink,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     highlights: Vec<Decoration>,
//! }
//!
//! impl HighlightSink for Host {
//!     fn set_highlights(&mut self, highlights: &[Decoration]) {
//!         self.highlights = highlights.to_vec();
//!     }
//! }
//!
//! impl EditorHost for Host {}
//!
//! let mut editor = EditorFacade::new(Document::new("a b a"), Host::default());
//! assert_eq!(editor.search("a", false, false, false), 2);
//! assert_eq!(editor.compositor().layer_len(DecorationLayer::SearchMatches), 2);
//!
//! editor.search("", false, false, false);
//! assert!(!editor.compositor().has_decorations(Some(DecorationLayer::SearchMatches)));
//! ```
//!
//! # Module Description
//!
//! - [`document`] - text access traits and the rope-backed reference [`Document`]
//! - [`search`] - criteria, matches and the loop-safe [`MatchFinder`]
//! - [`session`] - stateful [`SearchSession`]
//! - [`decorations`] - highlight layers and the [`DecorationCompositor`]
//! - [`facade`] - [`EditorFacade`] and the [`EditorHost`] callbacks
//! - [`actions`] - line-level [`EditorAction`]s
//! - [`theme`] - colors and the [`ThemeManager`]
//! - [`line_data`] - per-line metadata
//! - [`config`] - serde-backed [`EditorConfig`]
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade (`debug!` for state
//! transitions, `warn!` for truncated scans and rejected edits). Install any logger in the host.

pub mod actions;
pub mod config;
pub mod decorations;
pub mod document;
pub mod facade;
pub mod line_data;
pub mod search;
pub mod session;
pub mod theme;

pub use actions::{ActionError, ActionOutcome, ClipboardEntry, EditorAction, Selection};
pub use codepad_lang::{CommentConfig, Language, LanguageRegistry};
pub use config::{ConfigError, EditorConfig, SearchConfig};
pub use decorations::{
    Decoration, DecorationCompositor, DecorationLayer, DecorationRange, HighlightSink,
};
pub use document::{Document, DocumentError, LineAccessor, LineEnding, TextAccessor};
pub use facade::{EditorFacade, EditorHost, SearchState};
pub use line_data::LineData;
pub use search::{
    DEFAULT_MAX_SCAN_ITERATIONS, MatchFinder, MatchList, ScanReport, SearchCriteria, SearchError,
    SearchMatch,
};
pub use session::SearchSession;
pub use theme::{Color, Theme, ThemeError, ThemeManager};
