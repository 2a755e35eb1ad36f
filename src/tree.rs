//! The binary-search-tree model.
//!
//! [`BstTree`] is an arena of [`TreeNode`]s keyed by [`NodeId`]. Child
//! relations are ids, never embedded copies, and there is no stored parent
//! pointer: [`BstTree::find_parent`] scans the arena.
//!
//! Every mutating operation takes `&self` and returns a fresh snapshot (a new
//! arena generation). A failed operation returns an [`EditError`] and leaves
//! the previous snapshot untouched, so an edit is either applied completely or
//! not at all.

use crate::error::{EditError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque node identity. Ids are positive and never reused within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(i32);

impl NodeId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw id as exchanged with Slint callbacks.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Convert a raw callback id, treating non-positive values as "no node".
    pub fn from_raw(raw: i32) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal sign of this side: -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Direction of a single rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Left,
    Right,
}

impl RotationDirection {
    /// The side of the rotated node that holds the pivot.
    ///
    /// A left rotation promotes the right child and vice versa.
    pub fn pivot_side(self) -> Side {
        match self {
            RotationDirection::Left => Side::Right,
            RotationDirection::Right => Side::Left,
        }
    }

    /// The side of the pivot whose subtree changes parent.
    pub fn inner_side(self) -> Side {
        self.pivot_side().opposite()
    }

    pub fn inverse(self) -> Self {
        match self {
            RotationDirection::Left => RotationDirection::Right,
            RotationDirection::Right => RotationDirection::Left,
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationDirection::Left => write!(f, "left"),
            RotationDirection::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub value: i32,
    pub position: (f32, f32),
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl TreeNode {
    fn new(id: NodeId, value: i32, position: (f32, f32)) -> Self {
        Self { id, value, position, left: None, right: None }
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Iterate over the present children, left first.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }
}

/// An immutable snapshot of the tree.
///
/// Cloning is a full copy of the arena; snapshots never share mutable state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BstTree {
    nodes: BTreeMap<NodeId, TreeNode>,
    root: Option<NodeId>,
    next_id: i32,
    generation: u64,
}

impl BstTree {
    pub fn new() -> Self {
        Self::default()
    }

    // === Queries ===

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    /// Look up a node, reporting a lookup failure as an error.
    pub fn node(&self, id: NodeId) -> Result<&TreeNode> {
        self.nodes.get(&id).ok_or(EditError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Incremented by every successful edit.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn contains_value(&self, value: i32) -> bool {
        self.nodes.values().any(|n| n.value == value)
    }

    /// Find the parent of `id` and the side `id` occupies.
    ///
    /// Linear scan; the arena keeps no back references.
    pub fn find_parent(&self, id: NodeId) -> Option<(NodeId, Side)> {
        self.nodes.values().find_map(|n| {
            if n.left == Some(id) {
                Some((n.id, Side::Left))
            } else if n.right == Some(id) {
                Some((n.id, Side::Right))
            } else {
                None
            }
        })
    }

    /// Ids of `id` and all its descendants, preorder.
    pub fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            out.push(current);
            if let Some(right) = node.right {
                stack.push(right);
            }
            if let Some(left) = node.left {
                stack.push(left);
            }
        }
        out
    }

    /// Values in in-order sequence starting from the root.
    pub fn in_order_values(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes.get(&id).and_then(|n| n.left);
            }
            let Some(id) = stack.pop() else { break };
            if let Some(node) = self.nodes.get(&id) {
                out.push(node.value);
                current = node.right;
            }
        }
        out
    }

    /// Whether every parent/child edge satisfies the ordering rule.
    pub fn edges_ordered(&self) -> bool {
        self.nodes.values().all(|n| {
            let left_ok = n
                .left
                .and_then(|id| self.nodes.get(&id))
                .map_or(true, |l| l.value < n.value);
            let right_ok = n
                .right
                .and_then(|id| self.nodes.get(&id))
                .map_or(true, |r| n.value < r.value);
            left_ok && right_ok
        })
    }

    /// Whether the in-order sequence is strictly increasing and covers every node.
    pub fn is_valid_bst(&self) -> bool {
        let values = self.in_order_values();
        values.len() == self.nodes.len() && values.windows(2).all(|w| w[0] < w[1])
    }

    /// Number of levels; an empty tree has height 0.
    pub fn height(&self) -> usize {
        fn depth(tree: &BstTree, id: Option<NodeId>) -> usize {
            match id.and_then(|id| tree.nodes.get(&id)) {
                Some(n) => 1 + depth(tree, n.left).max(depth(tree, n.right)),
                None => 0,
            }
        }
        depth(self, self.root)
    }

    // === Structural edits ===

    /// Create the first node of an empty tree.
    pub fn with_root(&self, value: i32, position: (f32, f32)) -> Result<(BstTree, NodeId)> {
        if !self.is_empty() {
            return Err(EditError::TreeNotEmpty);
        }
        let mut next = self.clone();
        let id = next.allocate_id();
        next.nodes.insert(id, TreeNode::new(id, value, position));
        next.root = Some(id);
        next.generation += 1;
        Ok((next, id))
    }

    /// Attach a new node in the empty `side` slot of `parent`.
    pub fn insert_as_child(
        &self,
        parent: NodeId,
        side: Side,
        value: i32,
        position: (f32, f32),
    ) -> Result<(BstTree, NodeId)> {
        let anchor = self.node(parent)?;
        if anchor.child(side).is_some() {
            return Err(EditError::SlotOccupied { parent, side });
        }
        self.check_value(anchor, side, value)?;

        let mut next = self.clone();
        let id = next.allocate_id();
        next.nodes.insert(id, TreeNode::new(id, value, position));
        next.node_mut(parent)?.set_child(side, Some(id));
        next.generation += 1;
        Ok((next, id))
    }

    /// Insert a new node above `existing`, which must currently be the root.
    ///
    /// With `side == Left` the new node is smaller and `existing` becomes its
    /// right child; `Right` is the mirror image.
    pub fn insert_as_parent(
        &self,
        existing: NodeId,
        side: Side,
        value: i32,
        position: (f32, f32),
    ) -> Result<(BstTree, NodeId)> {
        let anchor = self.node(existing)?;
        if self.find_parent(existing).is_some() {
            return Err(EditError::AlreadyHasParent(existing));
        }
        self.check_value(anchor, side, value)?;

        let mut next = self.clone();
        let id = next.allocate_id();
        let mut node = TreeNode::new(id, value, position);
        node.set_child(side.opposite(), Some(existing));
        next.nodes.insert(id, node);
        if next.root == Some(existing) || next.root.is_none() {
            next.root = Some(id);
        }
        next.generation += 1;
        Ok((next, id))
    }

    /// Remove a node without children and clear its parent's slot.
    pub fn delete_leaf(&self, id: NodeId) -> Result<BstTree> {
        let node = self.node(id)?;
        if !node.is_leaf() {
            return Err(EditError::NotALeaf(id));
        }
        let parent = self.find_parent(id);

        let mut next = self.clone();
        next.nodes.remove(&id);
        match parent {
            Some((parent, side)) => next.node_mut(parent)?.set_child(side, None),
            None => {
                if next.root == Some(id) {
                    next.root = None;
                }
            }
        }
        next.generation += 1;
        Ok(next)
    }

    /// Single rotation of `id` in `direction`.
    ///
    /// The in-order sequence is preserved, so values are not re-checked.
    pub fn rotate(&self, id: NodeId, direction: RotationDirection) -> Result<BstTree> {
        let node = self.node(id)?;
        let side = direction.pivot_side();
        let inner = direction.inner_side();
        let pivot_id = node
            .child(side)
            .ok_or(EditError::MissingRotationChild { node: id, direction })?;
        let grandchild = self.node(pivot_id)?.child(inner);
        let parent = self.find_parent(id);

        let mut next = self.clone();
        next.node_mut(id)?.set_child(side, grandchild);
        next.node_mut(pivot_id)?.set_child(inner, Some(id));
        match parent {
            Some((parent, parent_side)) => {
                next.node_mut(parent)?.set_child(parent_side, Some(pivot_id));
            }
            None => next.root = Some(pivot_id),
        }
        next.generation += 1;
        Ok(next)
    }

    // === Positional edits ===

    /// Move `id` and its whole subtree by `(dx, dy)`.
    pub fn translate_subtree(&self, id: NodeId, dx: f32, dy: f32) -> Result<BstTree> {
        self.node(id)?;
        let mut next = self.clone();
        for member in self.subtree_ids(id) {
            let node = next.node_mut(member)?;
            node.position = (node.position.0 + dx, node.position.1 + dy);
        }
        next.generation += 1;
        Ok(next)
    }

    /// Replace the positions of the given nodes.
    pub fn with_positions<I>(&self, positions: I) -> Result<BstTree>
    where
        I: IntoIterator<Item = (NodeId, (f32, f32))>,
    {
        let mut next = self.clone();
        for (id, position) in positions {
            next.node_mut(id)?.position = position;
        }
        next.generation += 1;
        Ok(next)
    }

    // === Internals ===

    fn node_mut(&mut self, id: NodeId) -> Result<&mut TreeNode> {
        self.nodes.get_mut(&id).ok_or(EditError::NodeNotFound(id))
    }

    fn allocate_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    fn check_value(&self, anchor: &TreeNode, side: Side, value: i32) -> Result<()> {
        let ordered = match side {
            Side::Left => value < anchor.value,
            Side::Right => value > anchor.value,
        };
        if !ordered {
            return Err(EditError::OrderViolation {
                anchor: anchor.id,
                anchor_value: anchor.value,
                side,
                value,
            });
        }
        if self.contains_value(value) {
            return Err(EditError::DuplicateValue(value));
        }
        Ok(())
    }
}
