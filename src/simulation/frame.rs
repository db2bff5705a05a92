//! Per-tick snapshots handed to the renderer

use serde::Serialize;

use super::Simulation;
use crate::layout::{NodeId, Point};

/// One region bubble in a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionFrame {
    pub node: NodeId,
    pub region_id: String,
    /// Region name shown on the label ring
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Radius of the invisible ring the label follows
    pub label_radius: f64,
    /// Label font size (em)
    pub font_size_em: f64,
}

/// One territory circle in a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerritoryFrame {
    pub node: NodeId,
    /// Owning region node
    pub region: NodeId,
    pub territory_id: String,
    pub territory_name: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Position relative to the owning region's center
    pub offset: Point,
    pub is_positive: bool,
}

/// Positions of every region and territory after one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Rebuild generation that produced this frame
    pub generation: u64,
    /// Ticks run by the producing simulation
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    pub regions: Vec<RegionFrame>,
    pub territories: Vec<TerritoryFrame>,
}

impl Frame {
    /// A frame with nothing to draw
    pub fn empty(generation: u64, width: f64, height: f64) -> Self {
        Self {
            generation,
            tick: 0,
            width,
            height,
            regions: Vec::new(),
            territories: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn region(&self, node: NodeId) -> Option<&RegionFrame> {
        self.regions.iter().find(|r| r.node == node)
    }

    pub fn territory(&self, node: NodeId) -> Option<&TerritoryFrame> {
        self.territories.iter().find(|t| t.node == node)
    }

    /// Territories drawn inside `region`, in pack order
    pub fn territories_of(&self, region: NodeId) -> impl Iterator<Item = &TerritoryFrame> {
        self.territories.iter().filter(move |t| t.region == region)
    }

    pub(super) fn capture(sim: &Simulation, generation: u64) -> Self {
        let layout = sim.layout();
        let packed = &layout.packed;
        let scales = &layout.scales;

        let mut regions = Vec::with_capacity(sim.nodes().len());
        let mut territories = Vec::new();

        for node in sim.nodes() {
            let packed_region = packed.node(node.id);
            let (region_id, label) = layout
                .group_of(packed_region)
                .map(|g| (g.region_id.clone(), g.region_name.clone()))
                .unwrap_or_default();

            regions.push(RegionFrame {
                node: node.id,
                region_id,
                label,
                x: node.x,
                y: node.y,
                radius: node.r,
                label_radius: node.r + scales.label_ring.apply(packed_region.value) / 2.0,
                font_size_em: scales.label_font.apply(packed_region.value),
            });

            for &child in &packed_region.children {
                let leaf = packed.node(child);
                let Some(territory) = layout.territory_of(leaf) else {
                    continue;
                };
                let offset = packed.offset_from_parent(child);
                territories.push(TerritoryFrame {
                    node: child,
                    region: node.id,
                    territory_id: territory.territory_id.clone(),
                    territory_name: territory.territory_name.clone(),
                    x: node.x + offset.x,
                    y: node.y + offset.y,
                    radius: leaf.r,
                    offset,
                    is_positive: territory.is_positive,
                });
            }
        }

        Self {
            generation,
            tick: sim.ticks(),
            width: packed.width,
            height: packed.height,
            regions,
            territories,
        }
    }
}
