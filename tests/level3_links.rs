//! Level 3: Link Projection Tests
//!
//! Edges are derived from the model: one per parent/child pair, plus the
//! preview edge and the animated edges of a rotation.

mod common;

use common::harness::TreeTestHarness;
use common::{build_tree, id_of};
use slint_bst_editor::{project_links, EdgeStyle, RotationAnimator, RotationDirection, RotationPhase};

#[test]
fn test_one_edge_per_parent_child_pair() {
    let tree = build_tree(&[50, 30, 70, 20, 40, 60, 80]);
    let harness = TreeTestHarness::with_tree(tree.clone());
    assert_eq!(harness.node_count(), 7);
    assert_eq!(harness.edge_count(), 6);
    assert_eq!(harness.dashed_edge_count(), 0);
}

#[test]
fn test_edge_paths_connect_node_centres() {
    let harness = TreeTestHarness::with_tree(build_tree(&[50, 30]));
    assert_eq!(harness.edge_paths(), vec!["M 400 60 L 200 140".to_string()]);
}

#[test]
fn test_preview_edge_comes_and_goes() {
    let harness = TreeTestHarness::with_tree(build_tree(&[50]));
    harness.hover(440.0, 120.0);
    assert_eq!(harness.edge_count(), 1);
    assert_eq!(harness.dashed_edge_count(), 1);
    assert!(harness.edge_paths()[0].starts_with("M 400 60 L "));

    harness.hover(900.0, 900.0);
    assert_eq!(harness.edge_count(), 0);
}

#[test]
fn test_insert_and_delete_keep_edges_in_sync() {
    let harness = TreeTestHarness::with_tree(build_tree(&[50, 30]));
    let created = harness.click(440.0, 120.0).unwrap();
    assert_eq!(harness.edge_count(), 2);

    assert!(harness.delete(created));
    assert_eq!(harness.edge_count(), 1);
}

#[test]
fn test_structural_edges_use_structural_style() {
    let tree = build_tree(&[50, 30, 70]);
    let edges = project_links(&tree, None, &RotationAnimator::default());
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|e| e.style == EdgeStyle::Structural && e.dash.is_none()));
}

#[test]
fn test_rotation_swaps_committed_edges_for_animated_ones() {
    let harness = TreeTestHarness::with_tree(build_tree(&[50, 30, 70, 20, 40]));
    let root = harness.root().unwrap();
    assert!(harness.rotate(root, RotationDirection::Right));

    // While nodes move the old structure is still drawn.
    harness.ctrl.tick();
    assert_eq!(harness.edge_count(), 4);
    assert!(harness.ctrl.frame().edges.iter().all(|e| e.style == EdgeStyle::Structural));

    harness.tick_until(RotationPhase::LinksAnimating);
    let styles: Vec<EdgeStyle> = harness.ctrl.frame().edges.iter().map(|e| e.style).collect();
    // 30-20 and 50-70 stay; 30-50 and 50-40 are drawn by animated links.
    assert_eq!(styles.iter().filter(|s| **s == EdgeStyle::Structural).count(), 2);
    assert!(styles.contains(&EdgeStyle::AnimatedDelete));
    assert!(styles.contains(&EdgeStyle::AnimatedCreate));
    assert!(styles.contains(&EdgeStyle::AnimatedReparent));
    assert_eq!(harness.edge_count(), 5);

    harness.run_rotation_to_completion();
    let edges = harness.ctrl.frame().edges;
    assert_eq!(edges.len(), 4);
    assert!(edges.iter().all(|e| e.style == EdgeStyle::Structural));
}

#[test]
fn test_edges_after_rotation_follow_new_structure() {
    let harness = TreeTestHarness::with_tree(build_tree(&[50, 30, 70, 20, 40]));
    let root = harness.root().unwrap();
    harness.rotate(root, RotationDirection::Right);
    harness.run_rotation_to_completion();

    let tree = harness.tree();
    let thirty = tree.get(id_of(&tree, 30)).unwrap();
    let fifty = tree.get(id_of(&tree, 50)).unwrap();
    let forty = tree.get(id_of(&tree, 40)).unwrap();
    let expected = [
        format!("M {} {} L {} {}", thirty.position.0, thirty.position.1, fifty.position.0, fifty.position.1),
        format!("M {} {} L {} {}", fifty.position.0, fifty.position.1, forty.position.0, forty.position.1),
    ];
    let paths = harness.edge_paths();
    for path in &expected {
        assert!(paths.contains(path), "missing {path} in {paths:?}");
    }
}
