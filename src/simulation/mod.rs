//! Force simulation over region bubbles
//!
//! A [`Simulation`] is built from one [`BubbleLayout`] and owns the region
//! nodes for its whole life. Each [`Simulation::tick`] applies collision,
//! the centering bias and wall containment, in that order, then integrates
//! velocities into positions. Territories have no state of their own: their
//! position is always their region's position plus a fixed pack-time offset.

pub mod config;
pub mod forces;
pub mod frame;
pub mod interaction;

pub use config::{InteractionConfig, SimulationConfig};
pub use forces::{CenterY, Collide, Force, Walls};
pub use frame::{Frame, RegionFrame, TerritoryFrame};
pub use interaction::{
    HoverTracker, InteractionController, TextDirection, TooltipDetail, TooltipEvent,
    TooltipPlacement,
};

use tracing::trace;

use crate::layout::{BubbleLayout, NodeId, Point};

/// A region bubble with simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationNode {
    /// Region node in the packed layout
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Pinned x; when set the node ignores integration along x
    pub fx: Option<f64>,
    /// Pinned y; when set the node ignores integration along y
    pub fy: Option<f64>,
    pub r: f64,
}

impl SimulationNode {
    pub fn new(id: NodeId, x: f64, y: f64, r: f64) -> Self {
        Self {
            id,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            fx: None,
            fy: None,
            r,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }
}

/// Territory attached to a region node by a fixed offset
#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    node: NodeId,
    region_index: usize,
    offset: Point,
}

/// Tick-driven relaxation of region bubbles
#[derive(Debug, Clone)]
pub struct Simulation {
    layout: BubbleLayout,
    nodes: Vec<SimulationNode>,
    anchors: Vec<Anchor>,
    collide: Collide,
    center: CenterY,
    walls: Walls,
    alpha: f64,
    alpha_min: f64,
    alpha_decay: f64,
    alpha_target: f64,
    velocity_decay: f64,
    stopped: bool,
    ticks: u64,
}

impl Simulation {
    /// Start a simulation from the packed positions of `layout`
    pub fn new(layout: BubbleLayout, config: &SimulationConfig) -> Self {
        let packed = &layout.packed;
        let nodes: Vec<SimulationNode> = packed
            .regions()
            .map(|r| SimulationNode::new(r.id, r.x, r.y, r.r))
            .collect();

        let anchors = nodes
            .iter()
            .enumerate()
            .flat_map(|(region_index, region)| {
                packed.node(region.id).children.iter().map(move |&child| Anchor {
                    node: child,
                    region_index,
                    offset: packed.offset_from_parent(child),
                })
            })
            .collect();

        let collide = Collide::new(
            &nodes,
            layout.scales.collision_padding,
            config.collision_strength,
            config.collision_iterations,
        );
        let center = CenterY {
            target: packed.height,
            strength: config.center_strength,
        };
        let walls = Walls::new(
            packed.width,
            packed.height,
            config.cushion_width,
            config.cushion_strength,
        );

        Self {
            nodes,
            anchors,
            collide,
            center,
            walls,
            alpha: config.alpha,
            alpha_min: config.alpha_min,
            alpha_decay: config.alpha_decay,
            alpha_target: 0.0,
            velocity_decay: config.velocity_decay,
            stopped: false,
            ticks: 0,
            layout,
        }
    }

    /// Advance the simulation by exactly one tick
    pub fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

        self.collide.apply(&mut self.nodes, self.alpha);
        self.center.apply(&mut self.nodes, self.alpha);
        self.walls.apply(&mut self.nodes, self.alpha);

        let keep = 1.0 - self.velocity_decay;
        for node in &mut self.nodes {
            match node.fx {
                Some(fx) => {
                    node.x = fx;
                    node.vx = 0.0;
                }
                None => {
                    node.vx *= keep;
                    node.x += node.vx;
                }
            }
            match node.fy {
                Some(fy) => {
                    node.y = fy;
                    node.vy = 0.0;
                }
                None => {
                    node.vy *= keep;
                    node.y += node.vy;
                }
            }
        }
        self.ticks += 1;
    }

    /// Timer-driven step: tick unless stopped, stop once alpha has cooled.
    ///
    /// Returns whether a tick ran.
    pub fn step(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        self.tick();
        if self.alpha < self.alpha_min {
            trace!(alpha = self.alpha, ticks = self.ticks, "simulation cooled");
            self.stopped = true;
        }
        true
    }

    /// Run `n` ticks regardless of alpha
    pub fn run(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Resume timer-driven stepping
    pub fn restart(&mut self) {
        self.stopped = false;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn set_alpha_target(&mut self, target: f64) {
        self.alpha_target = target;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn layout(&self) -> &BubbleLayout {
        &self.layout
    }

    pub fn nodes(&self) -> &[SimulationNode] {
        &self.nodes
    }

    /// Simulation node of a region id
    pub fn node(&self, region: NodeId) -> Option<&SimulationNode> {
        self.nodes.iter().find(|n| n.id == region)
    }

    fn node_mut(&mut self, region: NodeId) -> Option<&mut SimulationNode> {
        self.nodes.iter_mut().find(|n| n.id == region)
    }

    /// Collision radius (radius plus padding) of the region at `index`
    pub fn collision_radius(&self, index: usize) -> f64 {
        self.collide.radius(index)
    }

    /// Region owning `node`, if it belongs to this simulation
    pub fn region_of(&self, node: NodeId) -> Option<NodeId> {
        self.layout.packed.region_of(node)
    }

    /// Fix a region at a position; returns false for unknown regions
    pub fn pin(&mut self, region: NodeId, x: f64, y: f64) -> bool {
        match self.node_mut(region) {
            Some(node) => {
                node.fx = Some(x);
                node.fy = Some(y);
                true
            }
            None => false,
        }
    }

    /// Release a pinned region; returns false for unknown regions
    pub fn unpin(&mut self, region: NodeId) -> bool {
        match self.node_mut(region) {
            Some(node) => {
                node.fx = None;
                node.fy = None;
                true
            }
            None => false,
        }
    }

    /// Multiply every region's velocity by `factor`, capping each component at `max`
    pub fn boost_velocities(&mut self, factor: f64, max: f64) {
        for node in &mut self.nodes {
            node.vx = (node.vx * factor).clamp(-max, max);
            node.vy = (node.vy * factor).clamp(-max, max);
        }
    }

    /// Current position of a territory (region position plus fixed offset)
    pub fn territory_position(&self, node: NodeId) -> Option<Point> {
        let anchor = self.anchors.iter().find(|a| a.node == node)?;
        let region = &self.nodes[anchor.region_index];
        Some(Point::new(
            region.x + anchor.offset.x,
            region.y + anchor.offset.y,
        ))
    }

    /// Snapshot of every region and territory for rendering
    pub fn frame(&self, generation: u64) -> Frame {
        Frame::capture(self, generation)
    }
}
