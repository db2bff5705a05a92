//! Two-level enclosure circle packing of regions and their territories
//!
//! Leaf radii are proportional to the square root of their value, siblings are
//! placed tangent to each other along a front chain, and every parent becomes
//! the smallest circle enclosing its children. The tree is then scaled into the
//! packing square and centered in the container.

use tracing::trace;

use super::config::LayoutConfig;
use super::enclose::enclose;
use super::error::LayoutError;
use super::random::Lcg;
use super::types::{Circle, NodeId, NodeKind, PackedLayout, PackedNode};
use crate::data::RegionGroup;

/// Pack region groups into a container of `width` x `height`.
///
/// Node ids are assigned root first, then each region followed by its
/// territories, in group and member order.
pub fn pack(
    groups: &[RegionGroup],
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> Result<PackedLayout, LayoutError> {
    if !(width > 0.0 && height > 0.0) {
        return Err(LayoutError::degenerate(width, height));
    }
    if !groups.iter().any(|g| g.value() > 0.0) {
        return Err(LayoutError::EmptyDataset);
    }

    let mut nodes = build_tree(groups);
    let quad = width.max(height) * config.quad_ratio;
    let mut random = Lcg::new();

    // Unpadded pass fixes the relative scale, the padded pass reuses it so
    // paddings come out close to their nominal size in pixels.
    for node in nodes.iter_mut().filter(|n| n.children.is_empty()) {
        node.r = node.value.max(0.0).sqrt();
    }
    pack_levels(&mut nodes, |_| 0.0, &mut random)?;

    let k = nodes[0].r / quad;
    pack_levels(
        &mut nodes,
        |kind| match kind {
            NodeKind::Root => config.root_padding * k,
            _ => config.region_padding * k,
        },
        &mut random,
    )?;

    let scale = quad / (2.0 * nodes[0].r);
    let (x_offset, y_offset) = ((width - quad) / 2.0, (height - quad) / 2.0);
    nodes[0].x = quad / 2.0 + x_offset;
    nodes[0].y = quad / 2.0 + y_offset;
    translate_children(&mut nodes, scale);

    trace!(
        regions = groups.len(),
        root_r = nodes[0].r,
        quad,
        "packed layout"
    );

    Ok(PackedLayout {
        nodes,
        width,
        height,
    })
}

fn build_tree(groups: &[RegionGroup]) -> Vec<PackedNode> {
    let mut nodes = vec![PackedNode {
        id: NodeId(0),
        kind: NodeKind::Root,
        value: 0.0,
        x: 0.0,
        y: 0.0,
        r: 0.0,
        parent: None,
        children: Vec::new(),
    }];

    for (g, group) in groups.iter().enumerate() {
        let region_id = NodeId(nodes.len());
        nodes[0].children.push(region_id);
        nodes[0].value += group.value();
        nodes.push(PackedNode {
            id: region_id,
            kind: NodeKind::Region { group: g },
            value: group.value(),
            x: 0.0,
            y: 0.0,
            r: 0.0,
            parent: Some(NodeId(0)),
            children: Vec::new(),
        });

        for (m, member) in group.members.iter().enumerate() {
            let id = NodeId(nodes.len());
            nodes[region_id.0].children.push(id);
            nodes.push(PackedNode {
                id,
                kind: NodeKind::Territory {
                    group: g,
                    member: m,
                },
                value: member.value,
                x: 0.0,
                y: 0.0,
                r: 0.0,
                parent: Some(region_id),
                children: Vec::new(),
            });
        }
    }
    nodes
}

/// Pack every internal node's children, deepest level first
fn pack_levels(
    nodes: &mut [PackedNode],
    padding: impl Fn(&NodeKind) -> f64,
    random: &mut Lcg,
) -> Result<(), LayoutError> {
    let regions = nodes[0].children.clone();
    for region in regions {
        let pad = padding(&nodes[region.0].kind);
        pack_children(nodes, region, pad, random)?;
    }
    let pad = padding(&nodes[0].kind);
    pack_children(nodes, NodeId(0), pad, random)
}

fn pack_children(
    nodes: &mut [PackedNode],
    parent: NodeId,
    pad: f64,
    random: &mut Lcg,
) -> Result<(), LayoutError> {
    let children = nodes[parent.0].children.clone();
    if children.is_empty() {
        return Ok(());
    }

    let mut circles: Vec<Circle> = children
        .iter()
        .map(|id| Circle::new(0.0, 0.0, nodes[id.0].r + pad))
        .collect();
    let enclosing = pack_siblings(&mut circles, random)?;

    for (id, circle) in children.iter().zip(&circles) {
        let node = &mut nodes[id.0];
        node.x = circle.x;
        node.y = circle.y;
    }
    nodes[parent.0].r = enclosing + pad;
    Ok(())
}

/// Turn child coordinates relative to their parent into absolute ones
fn translate_children(nodes: &mut [PackedNode], scale: f64) {
    nodes[0].r *= scale;
    let regions = nodes[0].children.clone();
    let (root_x, root_y) = (nodes[0].x, nodes[0].y);
    for region in regions {
        let node = &mut nodes[region.0];
        node.r *= scale;
        node.x = root_x + scale * node.x;
        node.y = root_y + scale * node.y;
        let (rx, ry) = (node.x, node.y);

        let territories = node.children.clone();
        for territory in territories {
            let leaf = &mut nodes[territory.0];
            leaf.r *= scale;
            leaf.x = rx + scale * leaf.x;
            leaf.y = ry + scale * leaf.y;
        }
    }
}

/// Place circles tangent to one another without overlap.
///
/// Positions are written into `circles`, centered on the smallest enclosing
/// circle, whose radius is returned.
pub fn pack_siblings(circles: &mut [Circle], random: &mut Lcg) -> Result<f64, LayoutError> {
    let n = circles.len();
    if n == 0 {
        return Ok(0.0);
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return Ok(circles[0].r);
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return Ok(circles[0].r + circles[1].r);
    }

    place(circles[1], circles[0], &mut circles[2]);

    // Front chain as a circular doubly linked list over circle indices
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    let (mut a, mut b) = (0usize, 1usize);
    next[0] = 1;
    prev[2] = 1;
    next[1] = 2;
    prev[0] = 2;
    next[2] = 0;
    prev[1] = 0;

    let mut i = 3;
    'pack: while i < n {
        place(circles[a], circles[b], &mut circles[i]);
        let c = i;

        // Walk the chain in both directions looking for the closest intersection
        let (mut j, mut k) = (next[b], prev[a]);
        let (mut sj, mut sk) = (circles[b].r, circles[a].r);
        loop {
            if sj <= sk {
                if intersects(&circles[j], &circles[c]) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(&circles[k], &circles[c]) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        // Insert c between a and b
        prev[c] = a;
        next[c] = b;
        prev[b] = c;
        next[a] = c;
        b = c;

        // Next pair is the one whose weighted midpoint is closest to the origin
        let mut best = score(circles, a, next[a]);
        let mut node = next[c];
        while node != b {
            let s = score(circles, node, next[node]);
            if s < best {
                a = node;
                best = s;
            }
            node = next[node];
        }
        b = next[a];
        i += 1;
    }

    let mut chain = vec![circles[b]];
    let mut node = next[b];
    while node != b {
        chain.push(circles[node]);
        node = next[node];
    }
    let e = enclose(&chain, random)?;

    for circle in circles.iter_mut() {
        circle.x -= e.x;
        circle.y -= e.y;
    }
    Ok(e.r)
}

/// Position `c` tangent to both `a` and `b`
fn place(b: Circle, a: Circle, c: &mut Circle) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 > 0.0 {
        let a2 = (a.r + c.r) * (a.r + c.r);
        let b2 = (b.r + c.r) * (b.r + c.r);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
}

fn intersects(a: &Circle, b: &Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn score(circles: &[Circle], node: usize, next: usize) -> f64 {
    let (a, b) = (&circles[node], &circles[next]);
    let ab = a.r + b.r;
    if ab == 0.0 {
        return a.x * a.x + a.y * a.y;
    }
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}
