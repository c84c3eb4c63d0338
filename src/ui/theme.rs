//! Theme management and ANSI escape sequence generation.
//!
//! Two built-in Catppuccin themes ship with the plugin; any other palette can
//! be loaded from a TOML file given by the `theme_file` option.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! favorite_fg = "#f9e2af"
//! error_fg = "#f38ba8"
//! accent_fg = "#a6e3a1"
//! ```

use crate::domain::error::{PaperfeedError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: footer, journal and date columns, subtitles.
    pub text_dim: String,

    pub border: String,

    /// Frame of the picker query and date entry boxes.
    pub input_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// The favorite star.
    pub favorite_fg: String,
    pub error_fg: String,
    /// Current page marker, checked boxes and success notices.
    pub accent_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `catppuccin-mocha`, `catppuccin-latte`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PaperfeedError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| PaperfeedError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| PaperfeedError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: "#cdd6f4".into(),
                header_bg: None,
                selection_fg: "#1e1e2e".into(),
                selection_bg: "#89b4fa".into(),
                text_normal: "#cdd6f4".into(),
                text_dim: "#6c7086".into(),
                border: "#45475a".into(),
                input_border: "#f5c2e7".into(),
                match_highlight_fg: "#1e1e2e".into(),
                match_highlight_bg: "#f9e2af".into(),
                empty_state_fg: "#89b4fa".into(),
                favorite_fg: "#f9e2af".into(),
                error_fg: "#f38ba8".into(),
                accent_fg: "#a6e3a1".into(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::from_name("catppuccin-mocha").unwrap().name, "catppuccin-mocha");
        assert_eq!(Theme::from_name("catppuccin-latte").unwrap().name, "catppuccin-latte");
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn default_is_mocha() {
        assert_eq!(Theme::default(), Theme::from_name("catppuccin-mocha").unwrap());
    }

    #[test]
    fn fg_formats_truecolor_escape() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("bogus"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn from_file_reads_custom_palette() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mocha = include_str!("../../themes/catppuccin-mocha.toml");
        write!(file, "{}", mocha.replace("catppuccin-mocha", "custom")).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = 3").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(PaperfeedError::Theme(_))));
    }
}
