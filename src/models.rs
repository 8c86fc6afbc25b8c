//! Data models for the playground.
//!
//! This module contains the core data structures shared by the editor,
//! the compositor and the snapshot store: the three-field source bundle,
//! the closed set of field identifiers, and the display preferences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlaygroundError;

// ============================================================================
// Default Content
// ============================================================================

pub const DEFAULT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>CodeCraft Project</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <h1>Welcome to CodeCraft</h1>
  <p>Start coding your project here!</p>
  <script src="script.js"></script>
</body>
</html>"#;

pub const DEFAULT_CSS: &str = r#"body {
  font-family: Arial, sans-serif;
  line-height: 1.6;
  color: #333;
  max-width: 800px;
  margin: 0 auto;
  padding: 20px;
}

h1 {
  color: #2c3e50;
}"#;

pub const DEFAULT_JS: &str = r#"document.addEventListener('DOMContentLoaded', (event) => {
  console.log('DOM fully loaded and parsed');
  // Your JavaScript code here
});"#;

// ============================================================================
// Fields
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[default]
    Html,
    Css,
    Js,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Html, Field::Css, Field::Js];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Html => "html",
            Field::Css => "css",
            Field::Js => "js",
        }
    }

    /// Tab label shown in the editor.
    pub fn label(self) -> &'static str {
        match self {
            Field::Html => "HTML",
            Field::Css => "CSS",
            Field::Js => "JavaScript",
        }
    }

    pub fn default_text(self) -> &'static str {
        match self {
            Field::Html => DEFAULT_HTML,
            Field::Css => DEFAULT_CSS,
            Field::Js => DEFAULT_JS,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Field {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Field::Html),
            "css" => Ok(Field::Css),
            "js" => Ok(Field::Js),
            other => Err(PlaygroundError::UnknownField(other.to_string())),
        }
    }
}

// ============================================================================
// Source Bundle
// ============================================================================

/// The html/css/js record being edited. Serializes as
/// `{"html": .., "css": .., "js": ..}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceBundle {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl SourceBundle {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Html => &self.html,
            Field::Css => &self.css,
            Field::Js => &self.js,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Html => &mut self.html,
            Field::Css => &mut self.css,
            Field::Js => &mut self.js,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for SourceBundle {
    fn default() -> Self {
        Self::new(DEFAULT_HTML, DEFAULT_CSS, DEFAULT_JS)
    }
}

// ============================================================================
// Display Preferences
// ============================================================================

/// Font size in pixels, kept within `MIN..=MAX` and moved in steps of `STEP`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FontSize(u8);

impl FontSize {
    pub const MIN: u8 = 10;
    pub const MAX: u8 = 24;
    pub const STEP: u8 = 2;
    pub const DEFAULT: FontSize = FontSize(14);

    /// Clamp an arbitrary pixel value into range.
    pub fn clamped(px: u32) -> Self {
        let px = px.clamp(Self::MIN as u32, Self::MAX as u32);
        FontSize(px as u8)
    }

    pub fn px(self) -> u8 {
        self.0
    }

    pub fn larger(self) -> Self {
        FontSize(self.0.saturating_add(Self::STEP).min(Self::MAX))
    }

    pub fn smaller(self) -> Self {
        FontSize(self.0.saturating_sub(Self::STEP).max(Self::MIN))
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Code,
    Output,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DisplayPreferences {
    pub active_field: Field,
    pub editor_font_size: FontSize,
    pub preview_font_size: FontSize,
    pub display_mode: DisplayMode,
}
