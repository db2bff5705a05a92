//! Aggregate configuration loaded from a TOML file
//!
//! Every table and field is optional:
//!
//! ```toml
//! [layout]
//! quad_ratio = 0.7
//!
//! [simulation]
//! velocity_decay = 0.2
//!
//! [interaction]
//! hover_close_delay_ms = 500
//!
//! [svg]
//! class_prefix = "bubbles-"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::layout::LayoutConfig;
use crate::renderer::SvgConfig;
use crate::simulation::{InteractionConfig, SimulationConfig};

/// Configuration for every stage of the pipeline
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub layout: LayoutConfig,
    pub simulation: SimulationConfig,
    pub interaction: InteractionConfig,
    pub svg: SvgConfig,
}

impl FieldConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn with_svg(mut self, svg: SvgConfig) -> Self {
        self.svg = svg;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = FieldConfig::from_toml_str("").expect("Should parse");
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = FieldConfig::from_toml_str(
            r#"
[simulation]
velocity_decay = 0.2

[interaction]
hover_close_delay_ms = 500

[layout]
collision_padding_range = [5.0, 8.0]
"#,
        )
        .expect("Should parse");
        assert_eq!(config.simulation.velocity_decay, 0.2);
        assert_eq!(config.simulation.alpha, 1.0);
        assert_eq!(config.interaction.hover_close_delay_ms, 500);
        assert_eq!(config.layout.collision_padding_range, (5.0, 8.0));
        assert_eq!(config.svg, SvgConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = FieldConfig::from_toml_str("[simulation]\nalpha = \"hot\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = FieldConfig::from_file(Path::new("/nonexistent/bubbles.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
