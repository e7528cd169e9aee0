//! Color themes.
//!
//! A [`Theme`] carries every color the editor core hands to the host: highlight colors for the
//! decoration layers, gutter colors, and token colors for an external syntax highlighter.
//! [`ThemeManager`] holds the built-in `light`/`dark` themes plus any custom ones.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Theme definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name (registry key).
    pub name: String,
    /// Editor background.
    pub background: Color,
    /// Default text color.
    pub text: Color,
    /// Current line highlight.
    pub current_line: Color,
    /// Hovered line highlight (read-only mode).
    pub hover_line: Color,
    /// Line number text.
    pub line_number: Color,
    /// Line number gutter background.
    pub line_number_bg: Color,
    /// Selection background.
    pub selection: Color,
    /// Search match highlight.
    pub search_match: Color,
    /// Current search match highlight.
    pub current_match: Color,
    /// Comment tokens.
    pub comment: Color,
    /// Keyword tokens.
    pub keyword: Color,
    /// String literals.
    pub string: Color,
    /// Number literals.
    pub number: Color,
    /// Function names.
    pub function: Color,
    /// Operators.
    pub operator: Color,
}

impl Theme {
    /// Built-in light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::rgb(255, 255, 255),
            text: Color::rgb(0, 0, 0),
            current_line: Color::rgb(245, 245, 245),
            hover_line: Color::rgb(230, 230, 250),
            line_number: Color::rgb(100, 100, 100),
            line_number_bg: Color::rgb(240, 240, 240),
            selection: Color::rgb(173, 214, 255),
            search_match: Color::rgba(255, 255, 0, 100),
            current_match: Color::rgba(255, 165, 0, 150),
            comment: Color::rgb(0, 128, 0),
            keyword: Color::rgb(0, 0, 255),
            string: Color::rgb(163, 21, 21),
            number: Color::rgb(176, 96, 0),
            function: Color::rgb(0, 128, 128),
            operator: Color::rgb(128, 128, 128),
        }
    }

    /// Built-in dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color::rgb(30, 30, 30),
            text: Color::rgb(212, 212, 212),
            current_line: Color::rgb(45, 45, 45),
            hover_line: Color::rgb(55, 55, 70),
            line_number: Color::rgb(150, 150, 150),
            line_number_bg: Color::rgb(40, 40, 40),
            selection: Color::rgb(58, 91, 138),
            search_match: Color::rgba(100, 100, 0, 100),
            current_match: Color::rgba(180, 100, 0, 150),
            comment: Color::rgb(106, 153, 85),
            keyword: Color::rgb(86, 156, 214),
            string: Color::rgb(206, 145, 120),
            number: Color::rgb(181, 206, 168),
            function: Color::rgb(78, 201, 176),
            operator: Color::rgb(180, 180, 180),
        }
    }
}

/// Theme errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// No theme with this name is registered.
    UnknownTheme(String),
}

impl std::fmt::Display for ThemeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTheme(name) => write!(f, "Theme '{}' not found", name),
        }
    }
}

impl std::error::Error for ThemeError {}

/// Registry of themes with a current selection.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    themes: BTreeMap<String, Theme>,
    current: String,
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeManager {
    /// Create a manager with the built-in themes; `light` is current.
    pub fn new() -> Self {
        let mut themes = BTreeMap::new();
        for theme in [Theme::light(), Theme::dark()] {
            themes.insert(theme.name.clone(), theme);
        }
        Self {
            themes,
            current: "light".to_string(),
        }
    }

    /// Register (or replace) a theme.
    pub fn register(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), theme);
    }

    /// Look up a theme by name.
    pub fn get(&self, name: &str) -> Result<&Theme, ThemeError> {
        self.themes
            .get(name)
            .ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))
    }

    /// Make `name` the current theme.
    pub fn set_current(&mut self, name: &str) -> Result<(), ThemeError> {
        self.get(name)?;
        self.current = name.to_string();
        Ok(())
    }

    /// The current theme.
    pub fn current(&self) -> &Theme {
        // `current` always names a registered theme: it is only assigned after a lookup, and
        // registration never removes entries.
        &self.themes[&self.current]
    }

    /// Registered theme names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes() {
        let manager = ThemeManager::new();
        assert_eq!(manager.names(), vec!["dark", "light"]);
        assert_eq!(manager.current().name, "light");
    }

    #[test]
    fn test_switch_and_unknown_theme() {
        let mut manager = ThemeManager::new();
        manager.set_current("dark").unwrap();
        assert_eq!(manager.current().background, Color::rgb(30, 30, 30));

        let err = manager.set_current("solarized").unwrap_err();
        assert_eq!(err, ThemeError::UnknownTheme("solarized".to_string()));
        assert_eq!(manager.current().name, "dark");
    }

    #[test]
    fn test_register_custom_theme() {
        let mut manager = ThemeManager::new();
        let mut theme = Theme::dark();
        theme.name = "midnight".to_string();
        theme.search_match = Color::rgba(0, 0, 255, 80);
        manager.register(theme);

        manager.set_current("midnight").unwrap();
        assert_eq!(manager.current().search_match, Color::rgba(0, 0, 255, 80));
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(color, Color::rgb(1, 2, 3));
    }
}
