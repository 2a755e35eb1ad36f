//! Editing session state.
//!
//! [`EditorSession`] is the single owner of the committed [`BstTree`] and of
//! all ephemeral editing state: the pointer zone (preview or rotation hover),
//! the rotation animator and the active drag. Every gesture reads the current
//! snapshot and replaces it wholesale; rejected gestures are logged and leave
//! the snapshot as it was.

use crate::animation::{RotationAnimator, RotationPhase};
use crate::config::EditorConfig;
use crate::error::{EditError, Result};
use crate::hit_test::find_node_at;
use crate::links::{project_links, EdgeDrawInstruction};
use crate::preview::{classify_pointer, PointerZone, PreviewNode};
use crate::render::{Frame, NodeDrawInstruction};
use crate::tree::{BstTree, NodeId, RotationDirection};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    tree: BstTree,
    zone: PointerZone,
    animator: RotationAnimator,
    dragged: Option<NodeId>,
    rng: SmallRng,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// A session whose root values are reproducible.
    pub fn with_seed(config: EditorConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: EditorConfig, rng: SmallRng) -> Self {
        Self {
            animator: RotationAnimator::new(&config),
            config,
            tree: BstTree::new(),
            zone: PointerZone::Empty,
            dragged: None,
            rng,
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditorConfig) {
        self.animator.apply_config(&config);
        self.config = config;
    }

    pub fn tree(&self) -> &BstTree {
        &self.tree
    }

    /// Replace the whole tree. Refused while a rotation is in flight.
    pub fn load_tree(&mut self, tree: BstTree) -> Result<()> {
        if self.animator.is_animating() {
            return Err(EditError::AnimationInProgress);
        }
        self.tree = tree;
        self.zone = PointerZone::Empty;
        self.dragged = None;
        Ok(())
    }

    pub fn zone(&self) -> &PointerZone {
        &self.zone
    }

    pub fn preview(&self) -> Option<&PreviewNode> {
        self.zone.preview()
    }

    pub fn rotation_hover(&self) -> Option<NodeId> {
        self.zone.rotation_target()
    }

    pub fn animator(&self) -> &RotationAnimator {
        &self.animator
    }

    pub fn phase(&self) -> RotationPhase {
        self.animator.phase()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn dragged_node(&self) -> Option<NodeId> {
        self.dragged
    }

    // === Pointer gestures ===

    /// Recompute the pointer zone. No previews are offered during a rotation.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.dragged.is_some() {
            return;
        }
        let zone = classify_pointer(&self.tree, x, y, &self.config);
        self.zone = match zone {
            PointerZone::Preview(_) if self.is_animating() => PointerZone::Empty,
            zone => zone,
        };
    }

    /// Commit the preview under the pointer, or create the root of an empty tree.
    ///
    /// Returns the id of the created node.
    pub fn primary_click(&mut self, x: f32, y: f32) -> Option<NodeId> {
        if self.is_animating() {
            debug!("click ignored while a rotation is in flight");
            return None;
        }
        self.pointer_moved(x, y);

        if let PointerZone::Preview(preview) = self.zone {
            self.zone = PointerZone::Empty;
            return self.commit(preview.commit(&self.tree), "insert");
        }

        if self.tree.is_empty() {
            let value = self.random_root_value();
            return self.commit(self.tree.with_root(value, (x, y)), "create root");
        }

        None
    }

    /// Delete the leaf at `target`, or under the pointer when no target is given.
    ///
    /// Returns whether a node was removed.
    pub fn secondary_click(&mut self, x: f32, y: f32, target: Option<NodeId>) -> bool {
        if self.is_animating() {
            debug!("delete ignored while a rotation is in flight");
            return false;
        }
        let Some(id) = target.or_else(|| find_node_at(x, y, self.tree.nodes(), self.config.node_radius)) else {
            return false;
        };
        match self.tree.delete_leaf(id) {
            Ok(next) => {
                self.tree = next;
                self.zone = PointerZone::Empty;
                true
            }
            Err(err) => {
                debug!(%err, "delete rejected");
                false
            }
        }
    }

    pub fn drag_start(&mut self, id: NodeId) -> bool {
        if self.is_animating() {
            debug!(node = %id, "drag ignored while a rotation is in flight");
            return false;
        }
        if !self.tree.contains(id) {
            debug!(err = %EditError::NodeNotFound(id), "drag rejected");
            return false;
        }
        self.dragged = Some(id);
        self.zone = PointerZone::Empty;
        true
    }

    /// Move the dragged node and its whole subtree.
    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        let Some(id) = self.dragged else {
            return;
        };
        match self.tree.translate_subtree(id, dx, dy) {
            Ok(next) => self.tree = next,
            Err(err) => {
                debug!(%err, "drag cancelled");
                self.dragged = None;
            }
        }
    }

    pub fn drag_end(&mut self) {
        self.dragged = None;
    }

    // === Rotation ===

    pub fn request_rotation(&mut self, id: NodeId, direction: RotationDirection) -> Result<()> {
        if let Some(dragged) = self.dragged {
            debug!(node = %id, "rotation ignored while dragging");
            return Err(EditError::DragInProgress(dragged));
        }
        self.animator
            .request_rotation(&self.tree, id, direction)
            .inspect_err(|err| debug!(%err, "rotation rejected"))
    }

    /// Advance the rotation by one tick; returns the phase afterwards.
    pub fn tick(&mut self) -> RotationPhase {
        if let Some(next) = self.animator.tick(&self.tree) {
            self.tree = next;
        }
        self.animator.phase()
    }

    // === Output ===

    pub fn edges(&self) -> Vec<EdgeDrawInstruction> {
        project_links(&self.tree, self.zone.preview(), &self.animator)
    }

    pub fn frame(&self) -> Frame {
        let hover = self.rotation_hover();
        Frame {
            nodes: self
                .tree
                .nodes()
                .map(|n| NodeDrawInstruction {
                    id: n.id,
                    position: n.position,
                    value: n.value,
                    highlighted: hover == Some(n.id),
                })
                .collect(),
            edges: self.edges(),
        }
    }

    // === Internals ===

    fn commit(&mut self, result: Result<(BstTree, NodeId)>, gesture: &'static str) -> Option<NodeId> {
        match result {
            Ok((next, id)) => {
                debug!(node = %id, gesture, "node created");
                self.tree = next;
                Some(id)
            }
            Err(err) => {
                debug!(%err, gesture, "edit rejected");
                None
            }
        }
    }

    fn random_root_value(&mut self) -> i32 {
        let range = self.config.root_value_range.clone();
        if range.is_empty() {
            return *range.start();
        }
        self.rng.random_range(range)
    }
}
