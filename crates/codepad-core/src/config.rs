//! Editor configuration.
//!
//! [`EditorConfig`] is plain data with serde support. Every field has a default, so partial JSON
//! documents deserialize; [`EditorConfig::sanitize`] clamps hand-edited values back into range.

use crate::search::DEFAULT_MAX_SCAN_ITERATIONS;
use serde::{Deserialize, Serialize};

/// Search-related settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Cap on "find next" calls per whole-document scan.
    pub max_scan_iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_scan_iterations: DEFAULT_MAX_SCAN_ITERATIONS,
        }
    }
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tab width in spaces.
    pub tab_width: usize,
    /// Soft-wrap long lines.
    pub line_wrap: bool,
    /// Font family name.
    pub font_family: String,
    /// Font size in points.
    pub font_size: f32,
    /// Reject edits.
    pub read_only: bool,
    /// Highlight the hovered line in read-only mode.
    pub hover_enabled: bool,
    /// Highlight the caret line in editable mode.
    pub current_line_highlight: bool,
    /// Name of the active theme.
    pub theme_name: String,
    /// Active language (drives comment toggling); `None` uses the `#` fallback.
    pub language: Option<String>,
    /// Search settings.
    pub search: SearchConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            line_wrap: false,
            font_family: "Courier New".to_string(),
            font_size: 10.0,
            read_only: false,
            hover_enabled: true,
            current_line_highlight: true,
            theme_name: "light".to_string(),
            language: None,
            search: SearchConfig::default(),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Invalid editor configuration: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl EditorConfig {
    /// Minimum tab width.
    pub const MIN_TAB_WIDTH: usize = 1;
    /// Maximum tab width.
    pub const MAX_TAB_WIDTH: usize = 16;
    /// Minimum font size.
    pub const MIN_FONT_SIZE: f32 = 6.0;
    /// Maximum font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Minimum scan iteration cap.
    pub const MIN_SCAN_ITERATIONS: usize = 1;
    /// Maximum scan iteration cap.
    pub const MAX_SCAN_ITERATIONS: usize = 1_000_000;

    /// Clamp values to valid ranges.
    pub fn sanitize(&mut self) {
        self.tab_width = self
            .tab_width
            .clamp(Self::MIN_TAB_WIDTH, Self::MAX_TAB_WIDTH);

        if self.font_size.is_nan() {
            self.font_size = Self::default().font_size;
        }
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        if self.font_family.trim().is_empty() {
            self.font_family = Self::default().font_family;
        }
        if self.theme_name.trim().is_empty() {
            self.theme_name = Self::default().theme_name;
        }
        if self.language.as_deref().is_some_and(|l| l.trim().is_empty()) {
            self.language = None;
        }

        self.search.max_scan_iterations = self
            .search
            .max_scan_iterations
            .clamp(Self::MIN_SCAN_ITERATIONS, Self::MAX_SCAN_ITERATIONS);
    }

    /// Deserialize from JSON, then [`sanitize`](Self::sanitize).
    pub fn from_json_sanitized(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
