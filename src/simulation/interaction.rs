//! Pointer interaction: dragging, click boost and hover tooltips
//!
//! Interaction never moves nodes directly. Drags pin and unpin region nodes,
//! clicks scale velocities, and the simulation does the rest on its next tick.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::config::InteractionConfig;
use super::Simulation;
use crate::data::Territory;
use crate::layout::{NodeId, Point};

/// Drag and click handling for one simulation
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: InteractionConfig,
    reheat_target: f64,
    /// Regions currently being dragged, in start order
    dragging: Vec<NodeId>,
}

impl InteractionController {
    pub fn new(config: InteractionConfig, reheat_target: f64) -> Self {
        Self {
            config,
            reheat_target,
            dragging: Vec::new(),
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn active_drags(&self) -> usize {
        self.dragging.len()
    }

    pub fn is_dragging(&self, region: NodeId) -> bool {
        self.dragging.contains(&region)
    }

    /// Forget every drag in progress
    pub fn reset(&mut self) {
        self.dragging.clear();
    }

    /// Start dragging `node` (a region, or a territory acting for its region).
    ///
    /// Returns false when the node is unknown to the simulation.
    pub fn drag_start(&mut self, sim: &mut Simulation, node: NodeId) -> bool {
        let Some(region) = sim.region_of(node) else {
            return false;
        };
        let Some(position) = sim.node(region).map(|n| n.position()) else {
            return false;
        };

        if self.dragging.is_empty() {
            sim.set_alpha_target(self.reheat_target);
            sim.restart();
        }
        if !self.dragging.contains(&region) {
            self.dragging.push(region);
        }
        sim.pin(region, position.x, position.y);
        debug!(region = region.0, x = position.x, y = position.y, "drag started");
        true
    }

    /// Move the pin of a dragged region to the pointer
    pub fn drag_move(&mut self, sim: &mut Simulation, node: NodeId, x: f64, y: f64) -> bool {
        match sim.region_of(node) {
            Some(region) if self.dragging.contains(&region) => sim.pin(region, x, y),
            _ => false,
        }
    }

    /// Release a dragged region; the last release lets the simulation cool
    pub fn drag_end(&mut self, sim: &mut Simulation, node: NodeId) -> bool {
        let Some(region) = sim.region_of(node) else {
            return false;
        };
        let Some(index) = self.dragging.iter().position(|&r| r == region) else {
            return false;
        };
        self.dragging.remove(index);

        if self.dragging.is_empty() {
            sim.set_alpha_target(0.0);
        }
        sim.unpin(region);
        debug!(region = region.0, remaining = self.dragging.len(), "drag ended");
        true
    }

    /// Shake every region: scale its velocity, capped per component
    pub fn click(&self, sim: &mut Simulation) {
        sim.boost_velocities(self.config.boost_factor, self.config.max_velocity);
    }
}

/// Everything a tooltip shows about one territory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipDetail {
    pub region_name: String,
    pub territory_name: String,
    /// Currency difference, negative when spending fell
    pub diff: f64,
    /// Percent difference, negative when spending fell
    pub diff_percent: f64,
    pub prior_label: Option<String>,
    pub prior_value: Option<f64>,
    pub current_label: Option<String>,
    pub current_value: Option<f64>,
    pub is_positive: bool,
}

impl TooltipDetail {
    pub fn from_territory(territory: &Territory) -> Self {
        let signed = |v: f64| {
            if territory.is_positive {
                v.abs()
            } else {
                -v.abs()
            }
        };
        let entry = territory.entry();
        let year = |i: usize| entry.and_then(|e| e.years.get(i));

        Self {
            region_name: territory.region_name.clone(),
            territory_name: territory.territory_name.clone(),
            diff: signed(entry.map_or(0.0, |e| e.diff)),
            diff_percent: signed(entry.map_or(0.0, |e| e.diff_percent)),
            prior_label: year(0).map(|y| y.0.clone()),
            prior_value: entry.and_then(|e| e.prior_value()),
            current_label: year(1).map(|y| y.0.clone()),
            current_value: entry.and_then(|e| e.current_value()),
            is_positive: territory.is_positive,
        }
    }
}

/// Tooltip lifecycle notifications for the host UI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TooltipEvent {
    Open {
        node: NodeId,
        detail: TooltipDetail,
        pointer: Point,
    },
    Move {
        pointer: Point,
    },
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HoverState {
    Closed,
    Open { node: NodeId },
    /// Left the territory; the tooltip closes once `at` is reached
    Closing { node: NodeId, at: Duration },
}

/// Delayed tooltip closing.
///
/// Time is supplied by the caller as a monotonic offset, so the tracker never
/// reads a clock itself.
#[derive(Debug, Clone)]
pub struct HoverTracker {
    delay: Duration,
    state: HoverState,
}

impl HoverTracker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: HoverState::Closed,
        }
    }

    /// Territory under the pointer or awaiting close
    pub fn active(&self) -> Option<NodeId> {
        match self.state {
            HoverState::Closed => None,
            HoverState::Open { node } | HoverState::Closing { node, .. } => Some(node),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state != HoverState::Closed
    }

    /// Pointer entered a territory; cancels any pending close
    pub fn enter(&mut self, node: NodeId, detail: TooltipDetail, pointer: Point) -> TooltipEvent {
        self.state = HoverState::Open { node };
        TooltipEvent::Open {
            node,
            detail,
            pointer,
        }
    }

    /// Pointer moved while a tooltip is shown
    pub fn moved(&mut self, pointer: Point) -> Option<TooltipEvent> {
        match self.state {
            HoverState::Open { .. } => Some(TooltipEvent::Move { pointer }),
            _ => None,
        }
    }

    /// Pointer left the territory at `now`; the close fires from [`poll`](Self::poll)
    pub fn leave(&mut self, now: Duration) {
        if let HoverState::Open { node } = self.state {
            self.state = HoverState::Closing {
                node,
                at: now + self.delay,
            };
        }
    }

    /// Emit the close once its delay has elapsed
    pub fn poll(&mut self, now: Duration) -> Option<TooltipEvent> {
        match self.state {
            HoverState::Closing { at, .. } if now >= at => {
                self.state = HoverState::Closed;
                Some(TooltipEvent::Close)
            }
            _ => None,
        }
    }

    /// Close on the next poll regardless of time, if anything is shown
    pub fn invalidate(&mut self) {
        if let Some(node) = self.active() {
            self.state = HoverState::Closing {
                node,
                at: Duration::ZERO,
            };
        }
    }
}

/// Writing direction for tooltip text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// Where to draw a tooltip so it stays toward the container's center
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
    pub direction: TextDirection,
}

impl TooltipPlacement {
    /// Place a `content` sized box next to `pointer`.
    ///
    /// On the left half the box opens to the right of the pointer, on the
    /// right half to the left; likewise below or above by vertical half.
    pub fn place(pointer: Point, content: (f64, f64), container: (f64, f64), offset: f64) -> Self {
        let (content_w, content_h) = content;
        let (width, height) = container;
        let on_left = pointer.x < width / 2.0;
        let on_top = pointer.y < height / 2.0;

        Self {
            left: if on_left {
                pointer.x + offset
            } else {
                pointer.x - content_w - offset
            },
            top: if on_top {
                pointer.y + offset
            } else {
                pointer.y - content_h - offset
            },
            direction: if on_left {
                TextDirection::Ltr
            } else {
                TextDirection::Rtl
            },
        }
    }
}
