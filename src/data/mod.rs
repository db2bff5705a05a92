//! Dataset model, projection onto a category/measure, and grouping by region

pub mod dataset;
pub mod grouper;
pub mod projector;

pub use dataset::{CategoryEntry, Dataset, TerritoryRecord, YearValue};
pub use grouper::{group, RegionGroup};
pub use projector::{project, project_record, Category, Measure, Territory, ValueExtent};
