//! Layout engine: initial circle packing and the scales derived from it
//!
//! This module takes grouped territories and a container size and produces a
//! [`BubbleLayout`]: packed geometry for every region and territory plus the
//! scales the simulation and renderer need.

pub mod config;
pub mod enclose;
pub mod error;
pub mod pack;
pub mod random;
pub mod scale;
pub mod types;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use pack::{pack, pack_siblings};
pub use scale::LinearScale;
pub use types::*;

use tracing::debug;

use crate::data::{group, project, Category, Dataset, Measure, RegionGroup, ValueExtent};

/// Scales recomputed on every rebuild
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    /// Region value to label ring offset (px)
    pub label_ring: LinearScale,
    /// Region value to label font size (em)
    pub label_font: LinearScale,
    /// Padding added to every region radius for collision
    pub collision_padding: f64,
}

impl Scales {
    pub fn new(max_region_value: f64, width: f64, height: f64, config: &LayoutConfig) -> Self {
        let domain = (0.0, max_region_value);
        Self {
            label_ring: LinearScale::new(domain, config.label_ring_range),
            label_font: LinearScale::new(domain, config.label_font_range),
            collision_padding: LinearScale::new(
                config.collision_padding_domain,
                config.collision_padding_range,
            )
            .clamped()
            .apply(width.max(height)),
        }
    }
}

/// Everything derived from one (dataset, category, measure, container) input
#[derive(Debug, Clone)]
pub struct BubbleLayout {
    pub category: Category,
    pub measure: Measure,
    pub groups: Vec<RegionGroup>,
    pub packed: PackedLayout,
    pub scales: Scales,
    /// Range of territory values, for legend captions
    pub extent: Option<ValueExtent>,
}

impl BubbleLayout {
    /// Project, group and pack a dataset for the given selection and container
    pub fn build(
        dataset: &Dataset,
        category: Category,
        measure: Measure,
        width: f64,
        height: f64,
        config: &LayoutConfig,
    ) -> Result<Self, LayoutError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(LayoutError::degenerate(width, height));
        }

        let territories = project(dataset, category, measure);
        let extent = ValueExtent::of(&territories);
        let groups = group(territories);
        let packed = pack(&groups, width, height, config)?;

        let max_region_value = packed.regions().map(|r| r.value).fold(0.0, f64::max);
        let scales = Scales::new(max_region_value, width, height, config);

        debug!(
            category = category.slug(),
            ?measure,
            width,
            height,
            regions = groups.len(),
            collision_padding = scales.collision_padding,
            "built bubble layout"
        );

        Ok(Self {
            category,
            measure,
            groups,
            packed,
            scales,
            extent,
        })
    }

    /// Region group behind a packed node
    pub fn group_of(&self, node: &PackedNode) -> Option<&RegionGroup> {
        match node.kind {
            NodeKind::Region { group } | NodeKind::Territory { group, .. } => self.groups.get(group),
            NodeKind::Root => None,
        }
    }

    /// Territory behind a packed leaf
    pub fn territory_of(&self, node: &PackedNode) -> Option<&crate::data::Territory> {
        match node.kind {
            NodeKind::Territory { group, member } => self.groups.get(group)?.members.get(member),
            _ => None,
        }
    }

    /// Find a territory node by its dataset id
    pub fn find_territory(&self, territory_id: &str) -> Option<NodeId> {
        self.packed
            .territories()
            .find(|n| {
                self.territory_of(n)
                    .is_some_and(|t| t.territory_id == territory_id)
            })
            .map(|n| n.id)
    }

    /// Find a region node by its dataset id
    pub fn find_region(&self, region_id: &str) -> Option<NodeId> {
        self.packed
            .regions()
            .find(|n| self.group_of(n).is_some_and(|g| g.region_id == region_id))
            .map(|n| n.id)
    }
}
