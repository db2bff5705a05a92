//! Spend Bubbles - packed-circle layout of regional spending changes
//!
//! This library turns a dataset of per-territory spending differences into a
//! two-level bubble chart: territories are packed inside their region, regions
//! are packed inside the container, and a force simulation then keeps region
//! bubbles apart, inside the container and settling toward the bottom edge.
//!
//! # Example
//!
//! ```rust
//! use spend_bubbles::{render, Dataset};
//!
//! let dataset = Dataset::from_json_str(r#"[
//!     {"territory_id": 1, "territory_name": "Alpha", "region_id": 10, "region_name": "North",
//!      "categories": [{"category": "Общественное питание", "diff": 120.0, "diffPercent": 4.0,
//!                      "years": [[2023, 3000.0], [2024, 3120.0]]}]}
//! ]"#).unwrap();
//!
//! let svg = render(&dataset).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("North"));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod host;
pub mod layout;
pub mod renderer;
pub mod simulation;
pub mod stylesheet;

pub use config::FieldConfig;
pub use data::{Category, Dataset, Measure, ValueExtent};
pub use error::{ConfigError, DatasetError};
pub use host::{HostState, LayoutHost, PointerEvent};
pub use layout::{BubbleLayout, LayoutConfig, LayoutError};
pub use renderer::{render_svg, render_svg_with_stylesheet, SvgConfig};
pub use simulation::{Frame, Simulation, SimulationConfig, TooltipEvent};

use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::{Stylesheet, StylesheetError};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error loading the dataset
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Error loading configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error loading the stylesheet
    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Configuration of every pipeline stage
    pub field: FieldConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    pub category: Category,
    pub measure: Measure,
    pub width: f64,
    pub height: f64,
    /// Simulation ticks to run before the snapshot
    pub ticks: usize,
    /// Debug mode: dump region positions to stderr
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            stylesheet: Stylesheet::default(),
            category: Category::default(),
            measure: Measure::default(),
            width: 800.0,
            height: 600.0,
            ticks: 300,
            debug: false,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stage configuration
    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Set the category and measure
    pub fn with_selection(mut self, category: Category, measure: Measure) -> Self {
        self.category = category;
        self.measure = measure;
        self
    }

    /// Set the container size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of simulation ticks
    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render a dataset to SVG with default configuration
pub fn render(dataset: &Dataset) -> Result<String, RenderError> {
    render_with_config(dataset, &RenderConfig::default())
}

/// Render a dataset to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use spend_bubbles::{render_with_config, Category, Dataset, Measure, RenderConfig};
///
/// let dataset = Dataset::from_json_str(r#"[
///     {"territory_id": "1", "territory_name": "A", "region_id": "r", "region_name": "R",
///      "categories": [{"category": "Транспорт", "diff": -5.0, "diffPercent": -1.0}]}
/// ]"#).unwrap();
///
/// let config = RenderConfig::new()
///     .with_selection(Category::Transport, Measure::Percent)
///     .with_size(400.0, 300.0)
///     .with_ticks(10);
///
/// let svg = render_with_config(&dataset, &config).unwrap();
/// assert!(svg.contains("sb-negative"));
/// ```
pub fn render_with_config(dataset: &Dataset, config: &RenderConfig) -> Result<String, RenderError> {
    let frame = simulate(dataset, config)?;
    Ok(render_svg_with_stylesheet(
        &frame,
        &config.field.svg,
        &config.stylesheet,
    ))
}

/// Run the simulation for `config.ticks` ticks and return the final frame
pub fn simulate(dataset: &Dataset, config: &RenderConfig) -> Result<Frame, RenderError> {
    let mut host = LayoutHost::new(dataset.clone(), config.field.clone());
    host.set_selection(config.category, config.measure);
    host.resize(config.width, config.height);

    match host.state() {
        HostState::Idle => {
            return Err(LayoutError::degenerate(config.width, config.height).into());
        }
        HostState::Empty { error } => return Err(error.clone().into()),
        HostState::Ready { .. } => {}
    }

    let mut frame = host.frame();
    for _ in 0..config.ticks {
        frame = host.tick();
    }

    if config.debug {
        eprintln!("=== Layout Debug ===");
        if let Some(extent) = host.extent() {
            eprintln!(
                "values {}{} .. {}{}",
                extent.min,
                config.measure.unit(),
                extent.max,
                config.measure.unit()
            );
        }
        for region in &frame.regions {
            eprintln!(
                "[{}] {} x={:.1} y={:.1} r={:.1}",
                region.region_id, region.label, region.x, region.y, region.radius
            );
            for t in frame.territories_of(region.node) {
                let sign = if t.is_positive { '+' } else { '-' };
                eprintln!(
                    "  [{}] {} {} r={:.1}",
                    t.territory_id, t.territory_name, sign, t.radius
                );
            }
        }
        eprintln!("====================");
    }

    Ok(frame)
}
