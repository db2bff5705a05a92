//! Configuration for the force simulation and pointer interaction

use std::time::Duration;

use serde::Deserialize;

/// Configuration options for the force simulation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Initial energy of the simulation
    pub alpha: f64,

    /// Below this alpha the simulation reports itself stopped
    pub alpha_min: f64,

    /// Rate at which alpha approaches its target each tick (0 keeps alpha constant)
    pub alpha_decay: f64,

    /// Fraction of velocity removed each tick (0 keeps velocity indefinitely)
    pub velocity_decay: f64,

    /// Strength of the pull toward the container's bottom edge
    pub center_strength: f64,

    /// Fraction of an overlap resolved per collision pass
    pub collision_strength: f64,

    /// Collision passes per tick
    pub collision_iterations: usize,

    /// Width of the soft band along the container edges
    pub cushion_width: f64,

    /// Strength of the push inside the cushion band
    pub cushion_strength: f64,

    /// Alpha target while a drag is in progress
    pub reheat_target: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            alpha_min: 0.001,
            alpha_decay: 0.0,
            velocity_decay: 0.0,
            center_strength: 0.0001,
            collision_strength: 1.0,
            collision_iterations: 1,
            cushion_width: 24.0,
            cushion_strength: 0.1,
            reheat_target: 0.3,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alpha decay rate
    pub fn with_alpha_decay(mut self, decay: f64) -> Self {
        self.alpha_decay = decay;
        self
    }

    /// Set the velocity decay
    pub fn with_velocity_decay(mut self, decay: f64) -> Self {
        self.velocity_decay = decay;
        self
    }

    /// Set the cushion band width and strength
    pub fn with_cushion(mut self, width: f64, strength: f64) -> Self {
        self.cushion_width = width;
        self.cushion_strength = strength;
        self
    }
}

/// Configuration options for drag, click and hover handling
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Velocity multiplier applied on click
    pub boost_factor: f64,

    /// Largest velocity component a click may produce
    pub max_velocity: f64,

    /// Delay between leaving a territory and closing its tooltip (ms)
    pub hover_close_delay_ms: u64,

    /// Gap between pointer and tooltip (px)
    pub tooltip_offset: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            boost_factor: 3.0,
            max_velocity: 10.0,
            hover_close_delay_ms: 1000,
            tooltip_offset: 8.0,
        }
    }
}

impl InteractionConfig {
    pub fn hover_close_delay(&self) -> Duration {
        Duration::from_millis(self.hover_close_delay_ms)
    }

    /// Set the click boost factor and velocity cap
    pub fn with_boost(mut self, factor: f64, max_velocity: f64) -> Self {
        self.boost_factor = factor;
        self.max_velocity = max_velocity;
        self
    }

    /// Set the tooltip close delay
    pub fn with_hover_close_delay(mut self, delay: Duration) -> Self {
        self.hover_close_delay_ms = delay.as_millis() as u64;
        self
    }
}
