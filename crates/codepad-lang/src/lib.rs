#![warn(missing_docs)]
//! `codepad-lang` - data-driven language configuration helpers for `codepad-core`.
//!
//! This crate intentionally stays lightweight and does **not** ship any tokenizer or grammar.
//! It describes languages by name, file extension and comment tokens, which is all the editor
//! kernel needs to implement comment toggling and language selection in a UI-agnostic way.

use std::collections::BTreeMap;

/// Comment token used when a language is unknown or has no line/block tokens configured.
pub const DEFAULT_LINE_COMMENT: &str = "#";

/// Comment tokens/config for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports only block comments.
    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            line: None,
            block_start: Some(start.into()),
            block_end: Some(end.into()),
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.as_deref().is_some_and(|s| !s.is_empty())
            && self.block_end.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// A registered language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Lowercase language identifier (e.g. `python`).
    pub name: String,
    /// File extensions without the leading dot (e.g. `py`, `pyw`).
    pub extensions: Vec<String>,
    /// Comment tokens for this language.
    pub comment: CommentConfig,
}

impl Language {
    /// Create a language entry.
    pub fn new(name: impl Into<String>, comment: CommentConfig) -> Self {
        Self {
            name: name.into().to_lowercase(),
            extensions: Vec::new(),
            comment,
        }
    }

    /// Attach file extensions (a leading `.` is stripped, matching is case-insensitive).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

/// Registry of known languages plus the currently selected one.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: BTreeMap<String, Language>,
    current: Option<String>,
}

impl LanguageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with the built-in comment table.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();

        let hash = [
            ("python", &["py", "pyw"][..]),
            ("ruby", &["rb"][..]),
            ("bash", &["sh", "bash"][..]),
            ("shell", &[][..]),
            ("perl", &["pl", "pm"][..]),
            ("yaml", &["yml", "yaml"][..]),
        ];
        for (name, exts) in hash {
            registry.register(Language::new(name, CommentConfig::line("#")).with_extensions(exts));
        }

        let c_like = [
            ("javascript", &["js", "mjs"][..]),
            ("typescript", &["ts", "tsx"][..]),
            ("java", &["java"][..]),
            ("c", &["c", "h"][..]),
            ("cpp", &["cpp", "cc", "hpp"][..]),
            ("csharp", &["cs"][..]),
            ("go", &["go"][..]),
            ("rust", &["rs"][..]),
            ("swift", &["swift"][..]),
            ("kotlin", &["kt", "kts"][..]),
            ("php", &["php"][..]),
        ];
        for (name, exts) in c_like {
            registry.register(
                Language::new(name, CommentConfig::line_and_block("//", "/*", "*/"))
                    .with_extensions(exts),
            );
        }

        registry.register(Language::new("sql", CommentConfig::line("--")).with_extensions(["sql"]));
        registry.register(Language::new("lua", CommentConfig::line("--")).with_extensions(["lua"]));

        for (name, exts) in [("html", &["html", "htm"][..]), ("xml", &["xml"][..])] {
            registry.register(
                Language::new(name, CommentConfig::block("<!--", "-->")).with_extensions(exts),
            );
        }

        registry
    }

    /// Register (or replace) a language.
    pub fn register(&mut self, language: Language) {
        self.languages.insert(language.name.clone(), language);
    }

    /// Look up a language by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Language> {
        self.languages.get(&name.to_lowercase())
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Find the language registered for a file extension (with or without the leading dot).
    pub fn for_extension(&self, ext: &str) -> Option<&Language> {
        let ext = normalize_extension(ext);
        self.languages
            .values()
            .find(|lang| lang.extensions.iter().any(|e| *e == ext))
    }

    /// Comment config for `name`, falling back to a `#` line comment for unknown languages.
    pub fn comment_for(&self, name: Option<&str>) -> CommentConfig {
        name.and_then(|n| self.get(n))
            .map(|lang| lang.comment.clone())
            .filter(|c| c.has_line() || c.has_block())
            .unwrap_or_else(|| CommentConfig::line(DEFAULT_LINE_COMMENT))
    }

    /// Select the current language. Returns `false` (and leaves the selection unchanged) if
    /// the language is not registered.
    pub fn set_current(&mut self, name: &str) -> bool {
        match self.get(name) {
            Some(lang) => {
                self.current = Some(lang.name.clone());
                true
            }
            None => false,
        }
    }

    /// Clear the current language selection.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// The currently selected language, if any.
    pub fn current(&self) -> Option<&Language> {
        self.current.as_deref().and_then(|name| self.get(name))
    }

    /// Comment config of the current language (see [`LanguageRegistry::comment_for`]).
    pub fn current_comment(&self) -> CommentConfig {
        self.comment_for(self.current.as_deref())
    }

    /// Registered language names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_comment_tokens() {
        let registry = LanguageRegistry::with_builtin();
        assert_eq!(registry.comment_for(Some("python")).line.as_deref(), Some("#"));
        assert_eq!(registry.comment_for(Some("Rust")).line.as_deref(), Some("//"));
        assert_eq!(registry.comment_for(Some("sql")).line.as_deref(), Some("--"));

        let html = registry.comment_for(Some("html"));
        assert!(!html.has_line());
        assert!(html.has_block());
    }

    #[test]
    fn test_unknown_language_falls_back_to_hash() {
        let registry = LanguageRegistry::with_builtin();
        assert_eq!(registry.comment_for(Some("cobol")), CommentConfig::line("#"));
        assert_eq!(registry.comment_for(None), CommentConfig::line("#"));
    }

    #[test]
    fn test_extension_lookup() {
        let registry = LanguageRegistry::with_builtin();
        assert_eq!(registry.for_extension(".PY").map(|l| l.name.as_str()), Some("python"));
        assert_eq!(registry.for_extension("rs").map(|l| l.name.as_str()), Some("rust"));
        assert!(registry.for_extension("unknown").is_none());
    }

    #[test]
    fn test_current_language_selection() {
        let mut registry = LanguageRegistry::with_builtin();
        assert!(registry.current().is_none());
        assert!(!registry.set_current("brainfuck"));
        assert!(registry.current().is_none());

        assert!(registry.set_current("Lua"));
        assert_eq!(registry.current().map(|l| l.name.as_str()), Some("lua"));
        assert_eq!(registry.current_comment().line.as_deref(), Some("--"));

        registry.clear_current();
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_custom_registration_overrides() {
        let mut registry = LanguageRegistry::new();
        registry.register(Language::new("python", CommentConfig::line(";")));
        assert_eq!(registry.comment_for(Some("python")).line.as_deref(), Some(";"));
        assert_eq!(registry.names(), vec!["python"]);
    }
}
