//! Test harness for the tree editor.
//!
//! Mirrors how an application wires the controller to its models, with
//! helper methods for simulating user interactions.

#![allow(dead_code)]

use super::{init_logging, EdgeRow, NodeRow};
use slint::{Model, VecModel};
use slint_bst_editor::{
    BstTree, EditorConfig, EditorSession, NodeId, RotationDirection, RotationPhase, TreeEditorController,
};
use std::rc::Rc;

/// Upper bound on ticks for a single rotation in tests.
pub const MAX_ROTATION_TICKS: usize = 2_000;

/// Initialize the testing backend for this thread.
/// With init_no_event_loop(), each test thread can have its own backend instance.
/// Uses thread_local to ensure each thread only initializes once.
fn init_testing_backend() {
    use std::cell::Cell;
    thread_local! {
        static INITIALIZED: Cell<bool> = const { Cell::new(false) };
    }

    INITIALIZED.with(|init| {
        if !init.get() {
            i_slint_backend_testing::init_no_event_loop();
            init.set(true);
        }
    });
}

/// Test harness for the tree editor.
///
/// Owns a controller whose frames are mirrored into `nodes` and `edges`.
pub struct TreeTestHarness {
    pub ctrl: TreeEditorController,
    pub nodes: Rc<VecModel<NodeRow>>,
    pub edges: Rc<VecModel<EdgeRow>>,
}

impl TreeTestHarness {
    /// Create a harness with an empty tree and a fixed seed.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        init_testing_backend();
        init_logging();
        let ctrl = TreeEditorController::with_session(EditorSession::with_seed(config, 7));

        let nodes = Rc::new(VecModel::<NodeRow>::default());
        let edges = Rc::new(VecModel::<EdgeRow>::default());
        ctrl.bind_models(
            nodes.clone(),
            |n| NodeRow {
                id: n.id.get(),
                x: n.position.0,
                y: n.position.1,
                value: n.value,
                highlighted: n.highlighted,
            },
            edges.clone(),
            |e, path| EdgeRow {
                path_commands: path,
                color: e.style.color(),
                dashed: e.dash.is_some(),
            },
        );

        Self { ctrl, nodes, edges }
    }

    /// Create a harness preloaded with `tree`.
    pub fn with_tree(tree: BstTree) -> Self {
        let harness = Self::new();
        harness.ctrl.session().borrow_mut().load_tree(tree).unwrap();
        harness.ctrl.refresh();
        harness
    }

    // === Interactions ===

    pub fn hover(&self, x: f32, y: f32) {
        self.ctrl.handle_pointer_move(x, y);
    }

    /// Primary click at a point; returns the created node, if any.
    pub fn click(&self, x: f32, y: f32) -> Option<NodeId> {
        NodeId::from_raw(self.ctrl.handle_primary_click(x, y))
    }

    /// Secondary click on a node's centre.
    pub fn delete(&self, id: NodeId) -> bool {
        let (x, y) = self.position(id);
        self.ctrl.handle_secondary_click(x, y, id.get())
    }

    /// Full drag gesture split into `steps` equal moves.
    pub fn drag(&self, id: NodeId, dx: f32, dy: f32, steps: usize) -> bool {
        if !self.ctrl.handle_drag_start(id.get()) {
            return false;
        }
        for _ in 0..steps {
            self.ctrl.handle_drag(dx / steps as f32, dy / steps as f32);
        }
        self.ctrl.handle_drag_end(id.get());
        true
    }

    pub fn rotate(&self, id: NodeId, direction: RotationDirection) -> bool {
        self.ctrl.handle_rotate(id.get(), direction)
    }

    /// Tick until idle. Returns the number of ticks spent in each phase.
    pub fn run_rotation_to_completion(&self) -> (usize, usize) {
        let mut moving = 0;
        let mut linking = 0;
        for _ in 0..MAX_ROTATION_TICKS {
            match self.ctrl.phase() {
                RotationPhase::Idle => return (moving, linking),
                RotationPhase::NodesMoving => moving += 1,
                RotationPhase::LinksAnimating => linking += 1,
            }
            self.ctrl.tick();
        }
        panic!("rotation did not finish within {MAX_ROTATION_TICKS} ticks");
    }

    /// Let mock time pass one tick interval at a time until the timer-driven
    /// rotation is idle again. Returns the number of intervals that elapsed.
    pub fn run_rotation_on_timer(&self) -> usize {
        let interval = self.ctrl.session().borrow().config().tick_interval.as_millis() as u64;
        for elapsed in 0..MAX_ROTATION_TICKS {
            if self.ctrl.phase() == RotationPhase::Idle {
                return elapsed;
            }
            i_slint_backend_testing::mock_elapsed_time(std::time::Duration::from_millis(interval));
        }
        panic!("timer-driven rotation did not finish within {MAX_ROTATION_TICKS} intervals");
    }

    /// Tick until the given phase is reached.
    pub fn tick_until(&self, phase: RotationPhase) -> usize {
        for ticks in 0..MAX_ROTATION_TICKS {
            if self.ctrl.phase() == phase {
                return ticks;
            }
            self.ctrl.tick();
        }
        panic!("phase {phase:?} not reached within {MAX_ROTATION_TICKS} ticks");
    }

    // === Queries ===

    pub fn tree(&self) -> BstTree {
        self.ctrl.session().borrow().tree().clone()
    }

    pub fn position(&self, id: NodeId) -> (f32, f32) {
        self.tree().get(id).map(|n| n.position).unwrap_or_else(|| panic!("node {id} missing"))
    }

    pub fn value(&self, id: NodeId) -> i32 {
        self.tree().get(id).map(|n| n.value).unwrap_or_else(|| panic!("node {id} missing"))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree().root()
    }

    pub fn node_row(&self, id: NodeId) -> Option<NodeRow> {
        self.nodes.iter().find(|row| row.id == id.get())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.row_count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.row_count()
    }

    pub fn edge_paths(&self) -> Vec<String> {
        self.edges.iter().map(|row| row.path_commands.to_string()).collect()
    }

    pub fn dashed_edge_count(&self) -> usize {
        self.edges.iter().filter(|row| row.dashed).count()
    }
}
