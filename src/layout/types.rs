//! Core types for the layout engine

use serde::Serialize;

/// A 2D point in container coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A circle with center and radius
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check if `other` lies entirely inside this circle, within `tolerance`
    pub fn contains(&self, other: &Circle, tolerance: f64) -> bool {
        self.center().distance(other.center()) + other.r <= self.r + tolerance
    }

    /// Check if the interiors of two circles overlap
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center().distance(other.center()) < self.r + other.r
    }
}

/// Index of a node within one packing run
///
/// Ids are only meaningful for the layout that produced them; a rebuild
/// produces a fresh id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// Depth of a node in the region/territory hierarchy
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Synthetic root enclosing every region
    Root,
    /// A region; `group` indexes the grouped input
    Region { group: usize },
    /// A territory; `group` and `member` index the grouped input
    Territory { group: usize, member: usize },
}

/// Geometry assigned by the packer
#[derive(Debug, Clone, PartialEq)]
pub struct PackedNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Aggregate value (own value for territories, sum of members otherwise)
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl PackedNode {
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.r)
    }

    pub fn is_region(&self) -> bool {
        matches!(self.kind, NodeKind::Region { .. })
    }

    pub fn is_territory(&self) -> bool {
        matches!(self.kind, NodeKind::Territory { .. })
    }
}

/// Result of packing: an arena of nodes rooted at `NodeId(0)`
#[derive(Debug, Clone)]
pub struct PackedLayout {
    pub nodes: Vec<PackedNode>,
    /// Container the layout was centered in
    pub width: f64,
    pub height: f64,
}

impl PackedLayout {
    pub fn root(&self) -> &PackedNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &PackedNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&PackedNode> {
        self.nodes.get(id.0)
    }

    /// Region nodes in input group order
    pub fn regions(&self) -> impl Iterator<Item = &PackedNode> {
        self.root().children.iter().map(|&id| self.node(id))
    }

    /// Territory nodes in group and member order
    pub fn territories(&self) -> impl Iterator<Item = &PackedNode> {
        self.regions()
            .flat_map(|region| region.children.iter().map(|&id| self.node(id)))
    }

    /// Fixed offset of a territory from its region's center
    pub fn offset_from_parent(&self, id: NodeId) -> Point {
        let node = self.node(id);
        match node.parent {
            Some(parent) => {
                let p = self.node(parent);
                Point::new(node.x - p.x, node.y - p.y)
            }
            None => Point::default(),
        }
    }

    /// Region that owns a node (itself for regions)
    pub fn region_of(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        match node.kind {
            NodeKind::Root => None,
            NodeKind::Region { .. } => Some(id),
            NodeKind::Territory { .. } => node.parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contains() {
        let outer = Circle::new(0.0, 0.0, 10.0);
        assert!(outer.contains(&Circle::new(3.0, 4.0, 5.0), 0.0));
        assert!(!outer.contains(&Circle::new(3.0, 4.0, 5.1), 0.0));
        assert!(outer.contains(&Circle::new(3.0, 4.0, 5.1), 0.2));
    }

    #[test]
    fn test_circle_overlaps() {
        let a = Circle::new(0.0, 0.0, 5.0);
        assert!(a.overlaps(&Circle::new(9.0, 0.0, 5.0)));
        assert!(!a.overlaps(&Circle::new(10.0, 0.0, 5.0)));
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
