//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur while building a bubble layout
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A record has no entry for the active category
    #[error("territory '{territory_id}' has no data for category '{category}'")]
    MissingCategoryData {
        territory_id: String,
        category: String,
    },

    /// Nothing with a positive value to pack
    #[error("no territory has a positive value to pack")]
    EmptyDataset,

    /// The container has no drawable area
    #[error("degenerate container {width}x{height}")]
    DegenerateContainer { width: f64, height: f64 },

    /// The enclosing circle could not be extended to cover a circle
    #[error("failed to compute enclosing circle for {circles} circles")]
    EnclosureFailed { circles: usize },
}

impl LayoutError {
    /// Create a missing category error
    pub fn missing_category(territory_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self::MissingCategoryData {
            territory_id: territory_id.into(),
            category: category.into(),
        }
    }

    /// Create a degenerate container error
    pub fn degenerate(width: f64, height: f64) -> Self {
        Self::DegenerateContainer { width, height }
    }

    /// Whether the host should treat this as "nothing to draw" rather than a failure
    pub fn is_empty_layout(&self) -> bool {
        matches!(self, Self::EmptyDataset | Self::DegenerateContainer { .. })
    }
}
