//! Forces acting on region nodes
//!
//! Each force reads current positions and velocities and adds velocity deltas.
//! Positions are only changed by the integration step of the simulation.

use super::SimulationNode;
use crate::layout::random::Lcg;

/// A velocity-producing force applied once per tick
pub trait Force {
    fn apply(&mut self, nodes: &mut [SimulationNode], alpha: f64);
}

/// Pairwise overlap removal with a per-node collision radius
#[derive(Debug, Clone)]
pub struct Collide {
    radii: Vec<f64>,
    strength: f64,
    iterations: usize,
    random: Lcg,
}

impl Collide {
    /// `padding` is added to every node radius
    pub fn new(nodes: &[SimulationNode], padding: f64, strength: f64, iterations: usize) -> Self {
        Self {
            radii: nodes.iter().map(|n| n.r + padding).collect(),
            strength,
            iterations,
            random: Lcg::new(),
        }
    }

    pub fn radius(&self, index: usize) -> f64 {
        self.radii[index]
    }
}

impl Force for Collide {
    fn apply(&mut self, nodes: &mut [SimulationNode], _alpha: f64) {
        let n = nodes.len().min(self.radii.len());
        for _ in 0..self.iterations {
            for i in 0..n {
                let ri = self.radii[i];
                let ri2 = ri * ri;
                // Predicted position of i, fixed for this pass
                let xi = nodes[i].x + nodes[i].vx;
                let yi = nodes[i].y + nodes[i].vy;

                for j in (i + 1)..n {
                    let rj = self.radii[j];
                    let r = ri + rj;
                    let mut x = xi - nodes[j].x - nodes[j].vx;
                    let mut y = yi - nodes[j].y - nodes[j].vy;
                    let mut l = x * x + y * y;
                    if l >= r * r {
                        continue;
                    }
                    if x == 0.0 {
                        x = self.random.jiggle();
                        l += x * x;
                    }
                    if y == 0.0 {
                        y = self.random.jiggle();
                        l += y * y;
                    }
                    let len = l.sqrt();
                    let k = (r - len) / len * self.strength;
                    x *= k;
                    y *= k;

                    let rj2 = rj * rj;
                    let share = rj2 / (ri2 + rj2);
                    nodes[i].vx += x * share;
                    nodes[i].vy += y * share;
                    nodes[j].vx -= x * (1.0 - share);
                    nodes[j].vy -= y * (1.0 - share);
                }
            }
        }
    }
}

/// Weak pull of every node's y toward a target line
#[derive(Debug, Clone, Copy)]
pub struct CenterY {
    pub target: f64,
    pub strength: f64,
}

impl Force for CenterY {
    fn apply(&mut self, nodes: &mut [SimulationNode], alpha: f64) {
        for node in nodes {
            node.vy += (self.target - node.y) * self.strength * alpha;
        }
    }
}

/// Containment inside a rectangle with a soft cushion along the edges
#[derive(Debug, Clone)]
pub struct Walls {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub cushion_width: f64,
    pub cushion_strength: f64,
}

impl Walls {
    pub fn new(width: f64, height: f64, cushion_width: f64, cushion_strength: f64) -> Self {
        Self {
            x0: 0.0,
            x1: width,
            y0: 0.0,
            y1: height,
            cushion_width,
            cushion_strength,
        }
    }

    /// Velocity after containment along one axis
    fn limit(&self, pos: f64, velocity: f64, r: f64, min: f64, max: f64, alpha: f64) -> f64 {
        let (lo, hi) = ordered(min + r, max - r);
        let mut v = velocity;

        if self.cushion_width > 0.0 {
            let (inner_lo, inner_hi) = ordered(lo + self.cushion_width, hi - self.cushion_width);
            let push = self.cushion_strength * alpha;
            if pos < inner_lo {
                v += (inner_lo - pos).min(self.cushion_width) * push;
            } else if pos > inner_hi {
                v -= (pos - inner_hi).min(self.cushion_width) * push;
            }
        }

        // Never let the next position leave the radius-adjusted extent
        if pos + v < lo {
            v = lo - pos;
        } else if pos + v > hi {
            v = hi - pos;
        }
        v
    }
}

/// An interval, collapsed to its midpoint when its bounds cross
fn ordered(lo: f64, hi: f64) -> (f64, f64) {
    if lo > hi {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

impl Force for Walls {
    fn apply(&mut self, nodes: &mut [SimulationNode], alpha: f64) {
        for node in nodes {
            node.vx = self.limit(node.x, node.vx, node.r, self.x0, self.x1, alpha);
            node.vy = self.limit(node.y, node.vy, node.r, self.y0, self.y1, alpha);
        }
    }
}
