//! # Slint BST Editor Library
//!
//! An interactive binary-search-tree editor for Slint. Nodes are added and
//! removed with the pointer, dragged around with their subtrees, and rotated
//! left or right with an animated rearrangement.
//!
//! ## Features
//!
//! - **Immutable Tree Model** - Every edit returns a new [`BstTree`]; each inserted node is ordered against the node it attaches to
//! - **Preview-Driven Insertion** - Hovering near a node proposes a child or parent with a legal value
//! - **Animated Rotations** - Nodes glide to their new places, then edges morph into the new shape
//! - **Derived Edges** - Edges are projected from the model each frame, never stored
//! - **Model Binding** - Frames mirror into application-owned `VecModel`s
//!
//! ## Core Types
//!
//! - [`BstTree`] - The arena-backed tree and its edit operations
//! - [`EditorSession`] - Pointer gestures, preview state and rotation state in one place
//! - [`RotationAnimator`] - The two-phase rotation state machine (nodes moving, then links animating)
//! - [`TreeEditorController`] - Slint-facing controller with callback factories
//!
//! ## Rust Helpers
//!
//! - [`classify_pointer`] - Resolve the pointer into rotation, preview or empty zones
//! - [`project_links`] - Derive the edges to draw for the current frame
//! - [`generate_line_path`] - SVG path commands for straight edges
//! - [`find_node_at`] - Hit-test nodes at screen coordinates

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod links;
pub mod path;
pub mod preview;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod simulation;
pub mod tree;

pub use animation::{AnimatedLink, AnimatedLinkKind, RotationAnimator, RotationPhase};
pub use config::{EditorConfig, SimulationParams};
pub use controller::TreeEditorController;
pub use error::{EditError, Result};
pub use hit_test::{find_nearest_in_ring, find_node_at, NodePosition, SimpleNodePosition};
pub use links::{
    preview_link, project_links, structural_links, DashPattern, EdgeDrawInstruction, EdgeStyle, Link, LinkKind,
};
pub use path::{generate_dashed_line_path, generate_line_path};
pub use preview::{classify_pointer, default_value, PointerZone, PreviewNode, PreviewRole};
pub use render::{Frame, FrameModels, NodeDrawInstruction};
pub use scheduler::AnimationScheduler;
pub use session::EditorSession;
pub use simulation::{PositionSimulation, SimulationStatus};
pub use tree::{BstTree, NodeId, RotationDirection, Side, TreeNode};
