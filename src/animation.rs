//! Two-phase rotation animation.
//!
//! A rotation request moves the [`RotationAnimator`] through
//!
//! ```text
//! Idle -> NodesMoving -> LinksAnimating -> Idle
//! ```
//!
//! During `NodesMoving` a [`PositionSimulation`] pulls the rotated node and its
//! pivot towards their post-rotation positions while the tree keeps its old
//! structure. On convergence every node is snapped onto its target and the
//! structural rotation is applied exactly once. `LinksAnimating` then advances
//! the three [`AnimatedLink`]s (delete, create, reparent) until they complete.
//!
//! At most one rotation is in flight; further requests are rejected with
//! [`EditError::AnimationInProgress`] until the animator is idle again.

use crate::config::{EditorConfig, SimulationParams};
use crate::error::{EditError, Result};
use crate::path::lerp_point;
use crate::simulation::{PositionSimulation, SimulationStatus};
use crate::tree::{BstTree, NodeId, RotationDirection, TreeNode};
use std::collections::BTreeMap;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPhase {
    #[default]
    Idle,
    NodesMoving,
    LinksAnimating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedLinkKind {
    /// The new edge from the pivot down to the demoted node; grows.
    Create,
    /// The old edge from the demoted node to the pivot; retracts.
    Delete,
    /// The inner grandchild's edge; swings from the pivot to the demoted node.
    Reparent,
}

/// An edge whose endpoints are interpolated by `progress`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedLink {
    pub id: u32,
    pub kind: AnimatedLinkKind,
    pub source_start: (f32, f32),
    pub source_end: (f32, f32),
    pub target_start: (f32, f32),
    pub target_end: (f32, f32),
    /// In `[0, 1]`, never decreasing.
    pub progress: f32,
}

impl AnimatedLink {
    fn new(id: u32, kind: AnimatedLinkKind, source: ((f32, f32), (f32, f32)), target: ((f32, f32), (f32, f32))) -> Self {
        Self {
            id,
            kind,
            source_start: source.0,
            source_end: source.1,
            target_start: target.0,
            target_end: target.1,
            progress: 0.0,
        }
    }

    /// The endpoints to draw at the current progress.
    pub fn endpoints(&self) -> ((f32, f32), (f32, f32)) {
        let t = self.progress;
        match self.kind {
            AnimatedLinkKind::Create => {
                (self.source_start, lerp_point(self.source_start, self.target_end, t))
            }
            AnimatedLinkKind::Delete => {
                (self.source_start, lerp_point(self.target_start, self.source_start, t))
            }
            AnimatedLinkKind::Reparent => {
                (lerp_point(self.source_start, self.source_end, t), self.target_start)
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    fn advance(&mut self, step: f32) {
        self.progress = (self.progress + step).min(1.0);
    }
}

/// The rotation currently in flight.
#[derive(Debug, Clone)]
struct ActiveRotation {
    node: NodeId,
    pivot: NodeId,
    grandchild: Option<NodeId>,
    direction: RotationDirection,
    simulation: PositionSimulation,
    links: Vec<AnimatedLink>,
    /// Positions at request time, restored if the rotation is abandoned.
    start: Vec<(NodeId, (f32, f32))>,
}

impl ActiveRotation {
    /// Fail if the tree no longer has `pivot` as the rotation child of `node`.
    fn verify(&self, tree: &BstTree) -> Result<()> {
        let node = tree.node(self.node)?;
        tree.node(self.pivot)?;
        if node.child(self.direction.pivot_side()) != Some(self.pivot) {
            return Err(EditError::MissingRotationChild { node: self.node, direction: self.direction });
        }
        Ok(())
    }
}

/// Drives a rotation from request to completion.
#[derive(Debug, Clone)]
pub struct RotationAnimator {
    phase: RotationPhase,
    active: Option<ActiveRotation>,
    rotation_offset: f32,
    link_progress_step: f32,
    simulation: SimulationParams,
    carry_subtrees: bool,
    next_link_id: u32,
}

impl Default for RotationAnimator {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl RotationAnimator {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            phase: RotationPhase::Idle,
            active: None,
            rotation_offset: config.rotation_offset,
            link_progress_step: sanitize_step(config.link_progress_step),
            simulation: config.simulation,
            carry_subtrees: config.carry_subtrees,
            next_link_id: 1,
        }
    }

    /// Adopt new settings. Takes effect from the next rotation.
    pub fn apply_config(&mut self, config: &EditorConfig) {
        self.rotation_offset = config.rotation_offset;
        self.link_progress_step = sanitize_step(config.link_progress_step);
        self.simulation = config.simulation;
        self.carry_subtrees = config.carry_subtrees;
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase != RotationPhase::Idle
    }

    /// The node being rotated and the direction, if a rotation is in flight.
    pub fn rotation(&self) -> Option<(NodeId, RotationDirection)> {
        self.active.as_ref().map(|a| (a.node, a.direction))
    }

    /// All animated links of the active rotation, including ones not yet shown.
    pub fn links(&self) -> &[AnimatedLink] {
        self.active.as_ref().map_or(&[], |a| a.links.as_slice())
    }

    /// Links to render. Empty until the nodes have finished moving.
    pub fn visible_links(&self) -> &[AnimatedLink] {
        match self.phase {
            RotationPhase::LinksAnimating => self.links(),
            _ => &[],
        }
    }

    /// Committed `(parent, child)` edges drawn by an animated link instead.
    pub fn superseded_edges(&self) -> Vec<(NodeId, NodeId)> {
        match (&self.active, self.phase) {
            (Some(active), RotationPhase::LinksAnimating) => {
                let mut edges = vec![(active.pivot, active.node)];
                if let Some(grandchild) = active.grandchild {
                    edges.push((active.node, grandchild));
                }
                edges
            }
            _ => Vec::new(),
        }
    }

    /// Start rotating `id` in `direction` on the committed `tree`.
    ///
    /// The tree itself is not modified here; the structural rotation happens
    /// in [`tick`](Self::tick) once the nodes have converged.
    pub fn request_rotation(&mut self, tree: &BstTree, id: NodeId, direction: RotationDirection) -> Result<()> {
        if self.is_animating() {
            return Err(EditError::AnimationInProgress);
        }
        if tree.is_empty() {
            return Err(EditError::EmptyTree);
        }

        let node = tree.node(id)?;
        let pivot_id = node
            .child(direction.pivot_side())
            .ok_or(EditError::MissingRotationChild { node: id, direction })?;
        let pivot = tree.node(pivot_id)?;
        let grandchild = pivot.child(direction.inner_side());

        let targets = self.plan_targets(tree, node, pivot, grandchild, direction);
        let target_of = |id: NodeId| targets.get(&id).copied().unwrap_or_default();

        let node_target = target_of(id);
        let pivot_target = target_of(pivot_id);
        let mut links = vec![
            self.link(AnimatedLinkKind::Delete, (node_target, node_target), (pivot_target, pivot_target)),
            self.link(AnimatedLinkKind::Create, (pivot_target, pivot_target), (node_target, node_target)),
        ];
        if let Some(grandchild) = grandchild {
            let fixed = target_of(grandchild);
            links.push(self.link(AnimatedLinkKind::Reparent, (pivot_target, node_target), (fixed, fixed)));
        }

        let simulation = PositionSimulation::new(
            tree.nodes().map(|n| (n.id, n.position, target_of(n.id))),
            self.simulation,
        );

        debug!(node = %id, pivot = %pivot_id, %direction, "rotation started");
        self.active = Some(ActiveRotation {
            node: id,
            pivot: pivot_id,
            grandchild,
            direction,
            simulation,
            links,
            start: tree.nodes().map(|n| (n.id, n.position)).collect(),
        });
        self.phase = RotationPhase::NodesMoving;
        Ok(())
    }

    /// Advance the animation by one tick against the committed `tree`.
    ///
    /// Returns the next snapshot when positions or structure changed. If the
    /// rotated nodes can no longer be found the rotation is abandoned: the
    /// animator returns to idle and the returned snapshot puts every node that
    /// still exists back where it was when the rotation was requested.
    pub fn tick(&mut self, tree: &BstTree) -> Option<BstTree> {
        let result = match self.phase {
            RotationPhase::Idle => return None,
            RotationPhase::NodesMoving => self.tick_nodes(tree),
            RotationPhase::LinksAnimating => {
                self.tick_links();
                return None;
            }
        };

        match result {
            Ok(next) => next,
            Err(err) => {
                debug!(%err, "rotation aborted");
                let restored = self.active.take().and_then(|active| {
                    let start = active.start.into_iter().filter(|(id, _)| tree.contains(*id));
                    tree.with_positions(start).ok()
                });
                self.reset();
                restored
            }
        }
    }

    fn tick_nodes(&mut self, tree: &BstTree) -> Result<Option<BstTree>> {
        let Some(active) = self.active.as_mut() else {
            self.phase = RotationPhase::Idle;
            return Ok(None);
        };
        active.verify(tree)?;

        match active.simulation.tick() {
            SimulationStatus::Running => {
                trace!(alpha = active.simulation.alpha(), "nodes moving");
                Ok(Some(tree.with_positions(active.simulation.positions())?))
            }
            SimulationStatus::Converged => {
                active.simulation.snap_to_targets();
                let settled = tree.with_positions(active.simulation.targets())?;
                let rotated = settled.rotate(active.node, active.direction)?;
                debug!(
                    node = %active.node,
                    pivot = %active.pivot,
                    ticks = active.simulation.ticks(),
                    "rotation committed"
                );
                self.phase = RotationPhase::LinksAnimating;
                Ok(Some(rotated))
            }
        }
    }

    fn tick_links(&mut self) {
        let step = self.link_progress_step;
        let Some(active) = self.active.as_mut() else {
            self.phase = RotationPhase::Idle;
            return;
        };
        for link in &mut active.links {
            link.advance(step);
        }
        if active.links.iter().all(AnimatedLink::is_complete) {
            debug!(node = %active.node, "rotation finished");
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.active = None;
        self.phase = RotationPhase::Idle;
    }

    fn link(&mut self, kind: AnimatedLinkKind, source: ((f32, f32), (f32, f32)), target: ((f32, f32), (f32, f32))) -> AnimatedLink {
        let id = self.next_link_id;
        self.next_link_id += 1;
        AnimatedLink::new(id, kind, source, target)
    }

    /// Target position for every node of the tree.
    ///
    /// The rotated node moves diagonally down, away from the pivot's side; the
    /// pivot takes the rotated node's place. Everything else stays, unless
    /// subtrees are carried along with their post-rotation parent.
    fn plan_targets(
        &self,
        tree: &BstTree,
        node: &TreeNode,
        pivot: &TreeNode,
        grandchild: Option<NodeId>,
        direction: RotationDirection,
    ) -> BTreeMap<NodeId, (f32, f32)> {
        let mut targets: BTreeMap<NodeId, (f32, f32)> =
            tree.nodes().map(|n| (n.id, n.position)).collect();

        let horizontal = direction.inner_side().sign() * self.rotation_offset;
        let node_delta = (horizontal, self.rotation_offset);
        let pivot_delta = (node.position.0 - pivot.position.0, node.position.1 - pivot.position.1);

        let mut shift = |id: NodeId, delta: (f32, f32)| {
            if let Some(target) = targets.get_mut(&id) {
                *target = (target.0 + delta.0, target.1 + delta.1);
            }
        };

        shift(node.id, node_delta);
        shift(pivot.id, pivot_delta);

        if self.carry_subtrees {
            let kept = node.child(direction.inner_side());
            let outer = pivot.child(direction.pivot_side());
            for root in kept.into_iter().chain(grandchild) {
                for id in tree.subtree_ids(root) {
                    shift(id, node_delta);
                }
            }
            for root in outer {
                for id in tree.subtree_ids(root) {
                    shift(id, pivot_delta);
                }
            }
        }

        targets
    }
}

/// Link progress per tick, falling back to the default for values that would
/// never complete.
fn sanitize_step(step: f32) -> f32 {
    if step.is_finite() && step > 0.0 {
        step.min(1.0)
    } else {
        EditorConfig::default().link_progress_step
    }
}
