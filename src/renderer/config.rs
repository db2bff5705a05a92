//! Configuration for SVG rendering

use serde::Deserialize;

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Padding around the container in the viewBox, leaving room for label rings
    pub viewbox_padding: f64,

    /// Whether to include XML declaration and standalone attributes
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names and element ids (e.g., "sb-" for "sb-region")
    pub class_prefix: Option<String>,

    /// Decimal places kept in coordinates
    pub precision: usize,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 24.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("sb-".to_string()),
            precision: 2,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewBox padding
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set the coordinate precision
    pub fn with_precision(mut self, digits: usize) -> Self {
        self.precision = digits;
        self
    }
}
