//! Error taxonomy for tree edits.
//!
//! Every fallible operation in the crate reports one of these. None of them is
//! fatal: the session layer logs the error and keeps the previous snapshot, so
//! an invalid gesture simply produces no visible change.

use crate::tree::{NodeId, RotationDirection, Side};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A referenced node is not part of the current snapshot.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("{side} child slot of node {parent} is already occupied")]
    SlotOccupied { parent: NodeId, side: Side },

    #[error("node {0} already has a parent")]
    AlreadyHasParent(NodeId),

    #[error("node {0} has children and cannot be deleted")]
    NotALeaf(NodeId),

    #[error("node {node} has no child to rotate {direction} around")]
    MissingRotationChild { node: NodeId, direction: RotationDirection },

    /// Values must be unique across the whole tree.
    #[error("value {0} already exists in the tree")]
    DuplicateValue(i32),

    #[error("value {value} cannot sit on the {side} of node {anchor} (value {anchor_value})")]
    OrderViolation {
        anchor: NodeId,
        anchor_value: i32,
        side: Side,
        value: i32,
    },

    #[error("a rotation is already in progress")]
    AnimationInProgress,

    #[error("node {0} is being dragged")]
    DragInProgress(NodeId),

    #[error("the tree is empty")]
    EmptyTree,

    #[error("the tree already has a root")]
    TreeNotEmpty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_node() {
        let err = EditError::SlotOccupied { parent: NodeId::new(3), side: Side::Left };
        assert_eq!(err.to_string(), "left child slot of node 3 is already occupied");

        let err = EditError::MissingRotationChild {
            node: NodeId::new(7),
            direction: RotationDirection::Right,
        };
        assert_eq!(err.to_string(), "node 7 has no child to rotate right around");
        assert_eq!(EditError::DragInProgress(NodeId::new(2)).to_string(), "node 2 is being dragged");
    }
}
