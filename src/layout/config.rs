//! Configuration for packing and derived scales

use serde::Deserialize;

/// Configuration options for the initial circle packing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Side of the packing square as a fraction of the container's longer dimension
    pub quad_ratio: f64,

    /// Padding between region circles and around them
    pub root_padding: f64,

    /// Padding between territory circles and around them inside a region
    pub region_padding: f64,

    /// Output range of the label ring scale (px)
    pub label_ring_range: (f64, f64),

    /// Output range of the label font scale (em)
    pub label_font_range: (f64, f64),

    /// Input domain of the collision padding scale (container's longer dimension)
    pub collision_padding_domain: (f64, f64),

    /// Output range of the collision padding scale (px)
    pub collision_padding_range: (f64, f64),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            quad_ratio: 0.7,
            root_padding: 24.0,
            region_padding: 4.0,
            label_ring_range: (8.0, 21.0),
            label_font_range: (0.6, 3.0),
            collision_padding_domain: (320.0, 2500.0),
            collision_padding_range: (9.0, 12.0),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the packing square ratio
    pub fn with_quad_ratio(mut self, ratio: f64) -> Self {
        self.quad_ratio = ratio;
        self
    }

    /// Set the root and region paddings
    pub fn with_padding(mut self, root: f64, region: f64) -> Self {
        self.root_padding = root;
        self.region_padding = region;
        self
    }

    /// Set the collision padding output range
    pub fn with_collision_padding(mut self, min: f64, max: f64) -> Self {
        self.collision_padding_range = (min, max);
        self
    }
}
