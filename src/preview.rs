//! Pointer classification and insertion previews.
//!
//! [`classify_pointer`] turns a pointer position into a [`PointerZone`]. It is
//! read-only: a [`PreviewNode`] is only a proposal until
//! [`PreviewNode::commit`] applies it to a tree.
//!
//! Zones around each node, by distance from its centre:
//!
//! ```text
//! [0, rotation_ring_radius)                     rotation affordance
//! [rotation_ring_radius, preview_ring_radius)   insertion preview
//! [preview_ring_radius, ..)                     nothing
//! ```
//!
//! The rotation zone of any node wins over every preview.

use crate::config::EditorConfig;
use crate::error::Result;
use crate::hit_test::{find_nearest_in_ring, find_node_at};
use crate::tree::{BstTree, NodeId, Side};

/// Whether a preview proposes a new child or a new parent for its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewRole {
    Child,
    Parent,
}

/// A proposed, not yet committed node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewNode {
    pub anchor: NodeId,
    pub side: Side,
    pub role: PreviewRole,
    pub value: i32,
    pub position: (f32, f32),
    /// Position of the anchor, the other end of the preview edge.
    pub anchor_position: (f32, f32),
}

impl PreviewNode {
    /// Apply the proposal, returning the new snapshot and the new node's id.
    pub fn commit(&self, tree: &BstTree) -> Result<(BstTree, NodeId)> {
        match self.role {
            PreviewRole::Child => tree.insert_as_child(self.anchor, self.side, self.value, self.position),
            PreviewRole::Parent => {
                tree.insert_as_parent(self.anchor, self.side, self.value, self.position)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerZone {
    /// The pointer is inside this node's rotation ring.
    Rotation(NodeId),
    Preview(PreviewNode),
    Empty,
}

impl PointerZone {
    pub fn preview(&self) -> Option<&PreviewNode> {
        match self {
            PointerZone::Preview(preview) => Some(preview),
            _ => None,
        }
    }

    pub fn rotation_target(&self) -> Option<NodeId> {
        match self {
            PointerZone::Rotation(id) => Some(*id),
            _ => None,
        }
    }
}

/// Classify a pointer position against the current tree.
pub fn classify_pointer(tree: &BstTree, x: f32, y: f32, config: &EditorConfig) -> PointerZone {
    if let Some(id) = find_node_at(x, y, tree.nodes(), config.rotation_ring_radius) {
        return PointerZone::Rotation(id);
    }

    let Some((anchor_id, _)) = find_nearest_in_ring(
        x,
        y,
        tree.nodes(),
        config.rotation_ring_radius,
        config.preview_ring_radius,
    ) else {
        return PointerZone::Empty;
    };
    let Some(anchor) = tree.get(anchor_id) else {
        return PointerZone::Empty;
    };

    let dx = x - anchor.position.0;
    let dy = y - anchor.position.1;
    let side = if dx < 0.0 { Side::Left } else { Side::Right };
    let role = if dy > 0.0 { PreviewRole::Child } else { PreviewRole::Parent };

    let blocked = match role {
        PreviewRole::Child => anchor.child(side).is_some(),
        PreviewRole::Parent => tree.find_parent(anchor_id).is_some(),
    };
    if blocked {
        return PointerZone::Empty;
    }

    let Some(value) = default_value(tree, anchor.value, side) else {
        return PointerZone::Empty;
    };

    let vertical = match role {
        PreviewRole::Child => 1.0,
        PreviewRole::Parent => -1.0,
    };
    let position = (
        anchor.position.0 + side.sign() * config.preview_offset,
        anchor.position.1 + vertical * config.preview_offset,
    );

    PointerZone::Preview(PreviewNode {
        anchor: anchor_id,
        side,
        role,
        value,
        position,
        anchor_position: anchor.position,
    })
}

/// Suggested value for a node placed on `side` of a node holding `anchor`.
///
/// Left: the midpoint between `anchor` and the largest smaller value, or half
/// of `anchor` when nothing is smaller. Right: the midpoint towards the
/// smallest larger value, or one and a half times `anchor`. Returns `None`
/// when the candidate is not positive (left fallback only) or already present.
pub fn default_value(tree: &BstTree, anchor: i32, side: Side) -> Option<i32> {
    let values = || tree.nodes().map(|n| n.value);
    let candidate = match side {
        Side::Left => match values().filter(|&v| v < anchor).max() {
            Some(below) => midpoint(anchor, below),
            None => {
                let half = (f64::from(anchor) * 0.5).floor() as i32;
                if half <= 0 {
                    return None;
                }
                half
            }
        },
        Side::Right => match values().filter(|&v| v > anchor).min() {
            Some(above) => midpoint(anchor, above),
            None => (f64::from(anchor) * 1.5).floor() as i32,
        },
    };

    if tree.contains_value(candidate) {
        None
    } else {
        Some(candidate)
    }
}

fn midpoint(a: i32, b: i32) -> i32 {
    (i64::from(a) + i64::from(b)).div_euclid(2) as i32
}
