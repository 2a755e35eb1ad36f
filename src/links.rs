//! Edge projection for rendering.
//!
//! Edges are never stored. [`project_links`] derives them on demand from the
//! committed tree, the live preview and the rotation animator, so the drawn
//! edge set always matches the model.
//!
//! # Example
//!
//! ```ignore
//! use slint_bst_editor::{project_links, BstTree, RotationAnimator};
//!
//! let edges = project_links(&tree, preview.as_ref(), &animator);
//! for edge in &edges {
//!     println!("{:?}: {}", edge.style, edge.path_commands());
//! }
//! ```

use crate::animation::{AnimatedLinkKind, RotationAnimator};
use crate::path::{generate_dashed_line_path, generate_line_path};
use crate::preview::PreviewNode;
use crate::tree::{BstTree, NodeId, Side};
use slint::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Structural,
    Preview,
}

/// A derived edge between two nodes (or a node and the preview).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub kind: LinkKind,
    pub from: NodeId,
    /// `None` for the preview edge, whose target is not a node yet.
    pub to: Option<NodeId>,
    pub source: (f32, f32),
    pub target: (f32, f32),
}

/// Visual style of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    Structural,
    Preview,
    AnimatedCreate,
    AnimatedDelete,
    AnimatedReparent,
}

impl EdgeStyle {
    pub fn color(self) -> Color {
        match self {
            EdgeStyle::Structural => Color::from_rgb_u8(200, 200, 200),
            EdgeStyle::Preview => Color::from_rgb_u8(100, 180, 255),
            EdgeStyle::AnimatedCreate => Color::from_rgb_u8(52, 211, 153),
            EdgeStyle::AnimatedDelete => Color::from_rgb_u8(255, 107, 107),
            EdgeStyle::AnimatedReparent => Color::from_rgb_u8(255, 230, 109),
        }
    }

    pub fn dash(self) -> Option<DashPattern> {
        match self {
            EdgeStyle::Preview | EdgeStyle::AnimatedDelete => Some(DashPattern::default()),
            _ => None,
        }
    }
}

impl From<AnimatedLinkKind> for EdgeStyle {
    fn from(kind: AnimatedLinkKind) -> Self {
        match kind {
            AnimatedLinkKind::Create => EdgeStyle::AnimatedCreate,
            AnimatedLinkKind::Delete => EdgeStyle::AnimatedDelete,
            AnimatedLinkKind::Reparent => EdgeStyle::AnimatedReparent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash: f32,
    pub gap: f32,
}

impl Default for DashPattern {
    fn default() -> Self {
        Self { dash: 5.0, gap: 5.0 }
    }
}

/// One edge for the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDrawInstruction {
    pub source: (f32, f32),
    pub target: (f32, f32),
    pub style: EdgeStyle,
    pub dash: Option<DashPattern>,
}

impl EdgeDrawInstruction {
    pub fn new(source: (f32, f32), target: (f32, f32), style: EdgeStyle) -> Self {
        Self { source, target, style, dash: style.dash() }
    }

    /// SVG path commands suitable for a Slint `Path`.
    pub fn path_commands(&self) -> String {
        match self.dash {
            Some(pattern) => generate_dashed_line_path(self.source, self.target, pattern.dash, pattern.gap),
            None => generate_line_path(self.source, self.target),
        }
    }
}

impl From<Link> for EdgeDrawInstruction {
    fn from(link: Link) -> Self {
        let style = match link.kind {
            LinkKind::Structural => EdgeStyle::Structural,
            LinkKind::Preview => EdgeStyle::Preview,
        };
        Self::new(link.source, link.target, style)
    }
}

/// One structural link per parent/child relation, left child first.
pub fn structural_links(tree: &BstTree) -> Vec<Link> {
    let mut links = Vec::with_capacity(tree.len().saturating_sub(1));
    for node in tree.nodes() {
        for side in [Side::Left, Side::Right] {
            let Some(child) = node.child(side).and_then(|id| tree.get(id)) else {
                continue;
            };
            links.push(Link {
                kind: LinkKind::Structural,
                from: node.id,
                to: Some(child.id),
                source: node.position,
                target: child.position,
            });
        }
    }
    links
}

/// The preview edge from the anchor to the proposed node.
pub fn preview_link(preview: &PreviewNode) -> Link {
    Link {
        kind: LinkKind::Preview,
        from: preview.anchor,
        to: None,
        source: preview.anchor_position,
        target: preview.position,
    }
}

/// Every edge to draw this frame.
///
/// Structural edges come first, then the preview edge, then the rotation's
/// animated edges. Animated edges only appear once the nodes have stopped
/// moving; while they play, the committed edges they stand in for are left out.
pub fn project_links(
    tree: &BstTree,
    preview: Option<&PreviewNode>,
    animator: &RotationAnimator,
) -> Vec<EdgeDrawInstruction> {
    let superseded = animator.superseded_edges();

    let mut edges: Vec<EdgeDrawInstruction> = structural_links(tree)
        .into_iter()
        .filter(|link| {
            link.to
                .map_or(true, |to| !superseded.contains(&(link.from, to)))
        })
        .map(EdgeDrawInstruction::from)
        .collect();

    if let Some(preview) = preview {
        edges.push(preview_link(preview).into());
    }

    edges.extend(animator.visible_links().iter().map(|link| {
        let (source, target) = link.endpoints();
        EdgeDrawInstruction::new(source, target, link.kind.into())
    }));

    edges
}
