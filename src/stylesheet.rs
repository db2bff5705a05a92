//! Stylesheet system for bubble colors
//!
//! Territory circles are colored by the sign of their change. The palette
//! maps symbolic tokens (`positive-stroke`, `negative-fill`, ...) to concrete
//! CSS values and can be replaced with a TOML file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Token name -> CSS value, kept sorted so output is stable
    pub colors: BTreeMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette: hollow dark outlines for growth, solid red for decline
const DEFAULT_PALETTE: &str = r##"
[colors]
positive-stroke = "rgba(0, 0, 0, .8)"
positive-fill = "rgba(255, 255, 255, 0)"
negative-stroke = "#ee4444"
negative-fill = "#ee4444"

label = "#333333"
font-family = "sans-serif"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a symbolic color token with fallback to default palette
    ///
    /// Fallback order:
    /// 1. Check this stylesheet for exact token
    /// 2. Check default palette for exact token
    /// 3. Use a dark gray
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        "#333333".to_string()
    }

    /// Stroke and fill for a territory of the given sign
    pub fn territory_colors(&self, is_positive: bool) -> (String, String) {
        let sign = if is_positive { "positive" } else { "negative" };
        (
            self.resolve_or_default(&format!("{}-stroke", sign)),
            self.resolve_or_default(&format!("{}-fill", sign)),
        )
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert!(stylesheet.colors.contains_key("positive-stroke"));
        assert!(stylesheet.colors.contains_key("negative-fill"));
        assert!(stylesheet.colors.contains_key("font-family"));
    }

    #[test]
    fn test_territory_colors_by_sign() {
        let stylesheet = Stylesheet::default();
        assert_eq!(
            stylesheet.territory_colors(true),
            (
                "rgba(0, 0, 0, .8)".to_string(),
                "rgba(255, 255, 255, 0)".to_string()
            )
        );
        assert_eq!(
            stylesheet.territory_colors(false),
            ("#ee4444".to_string(), "#ee4444".to_string())
        );
    }

    #[test]
    fn test_resolve_missing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("nonexistent"), None);
        assert_eq!(stylesheet.resolve_or_default("nonexistent"), "#333333");
    }

    #[test]
    fn test_partial_stylesheet_falls_back_to_defaults() {
        let stylesheet = Stylesheet::from_str(
            r##"
[colors]
negative-fill = "#aa0000"
"##,
        )
        .expect("Should parse");
        assert_eq!(
            stylesheet.territory_colors(false),
            ("#ee4444".to_string(), "#aa0000".to_string())
        );
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Print"
description = "Grayscale for print"

[colors]
negative-fill = "#555555"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Print".to_string()));
        assert_eq!(stylesheet.description, Some("Grayscale for print".to_string()));
        assert_eq!(stylesheet.resolve("negative-fill"), Some("#555555"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Stylesheet::from_str(invalid);
        assert!(result.is_err());
    }
}
