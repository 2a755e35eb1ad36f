//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint::{Color, SharedString};
use slint_bst_editor::{BstTree, NodeId, Side};

/// Row type mirrored from node draw instructions, as a UI would declare it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub id: i32,
    pub x: f32,
    pub y: f32,
    pub value: i32,
    pub highlighted: bool,
}

/// Row type mirrored from edge draw instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub path_commands: SharedString,
    pub color: Color,
    pub dashed: bool,
}

/// Route `tracing` output through the test writer. Honors `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a tree by inserting values in order, each placed by plain BST descent.
///
/// Positions are laid out by depth so that nodes never overlap.
pub fn build_tree(values: &[i32]) -> BstTree {
    let mut tree = BstTree::new();
    for &value in values {
        tree = insert_value(&tree, value);
    }
    tree
}

/// Insert `value` at its BST leaf position. Duplicates are ignored.
pub fn insert_value(tree: &BstTree, value: i32) -> BstTree {
    let Some(mut current) = tree.root() else {
        let (next, _) = tree.with_root(value, (400.0, 60.0)).unwrap();
        return next;
    };
    let mut depth = 1;
    loop {
        let node = tree.get(current).unwrap();
        if node.value == value {
            return tree.clone();
        }
        let side = if value < node.value { Side::Left } else { Side::Right };
        match node.child(side) {
            Some(child) => {
                current = child;
                depth += 1;
            }
            None => {
                let spread = 200.0 / depth as f32;
                let position = (node.position.0 + side.sign() * spread, node.position.1 + 80.0);
                let (next, _) = tree.insert_as_child(current, side, value, position).unwrap();
                return next;
            }
        }
    }
}

/// Find the id of the node holding `value`.
pub fn id_of(tree: &BstTree, value: i32) -> NodeId {
    tree.nodes()
        .find(|n| n.value == value)
        .map(|n| n.id)
        .unwrap_or_else(|| panic!("no node holds {value}"))
}
