//! High-level controller wiring pointer input to the editing session.
//!
//! The [`TreeEditorController`] owns the [`EditorSession`], the animation
//! scheduler and the bound output models, and hands out ready-made callbacks
//! for the Slint UI.
//!
//! # Example
//!
//! ```ignore
//! use slint_bst_editor::TreeEditorController;
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = TreeEditorController::new();
//!
//!     let nodes = Rc::new(VecModel::<NodeData>::default());
//!     let edges = Rc::new(VecModel::<EdgeData>::default());
//!     ctrl.bind_models(
//!         nodes.clone(),
//!         |n| NodeData { id: n.id.get(), x: n.position.0, y: n.position.1, value: n.value, highlighted: n.highlighted },
//!         edges.clone(),
//!         |e, path| EdgeData { path_commands: path, color: e.style.color() },
//!     );
//!     window.set_nodes(ModelRc::from(nodes));
//!     window.set_edges(ModelRc::from(edges));
//!
//!     window.on_pointer_moved(ctrl.pointer_move_callback());
//!     window.on_primary_click(ctrl.primary_click_callback());
//!     window.on_secondary_click(ctrl.secondary_click_callback());
//!     window.on_node_drag_started(ctrl.drag_started_callback());
//!     window.on_node_dragged(ctrl.drag_moved_callback());
//!     window.on_node_drag_ended(ctrl.drag_ended_callback());
//!     window.on_rotate_left(ctrl.rotate_left_callback());
//!     window.on_rotate_right(ctrl.rotate_right_callback());
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::animation::RotationPhase;
use crate::config::EditorConfig;
use crate::links::EdgeDrawInstruction;
use crate::render::{Frame, FrameModels, NodeDrawInstruction};
use crate::scheduler::AnimationScheduler;
use crate::session::EditorSession;
use crate::tree::{NodeId, RotationDirection};
use slint::{SharedString, VecModel};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Controller that maps pointer events onto the editing session.
///
/// Every handler leaves the bound models in sync with the session. Rotations
/// are driven by an internal scheduler ticking at the configured interval;
/// [`tick`](Self::tick) advances them by hand instead (useful in tests).
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct TreeEditorController {
    session: Rc<RefCell<EditorSession>>,
    models: Rc<RefCell<FrameModels>>,
    scheduler: Rc<AnimationScheduler>,
}

impl Default for TreeEditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TreeEditorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeEditorController")
            .field("phase", &self.phase())
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl TreeEditorController {
    /// Create a new controller with default settings.
    pub fn new() -> Self {
        Self::with_session(EditorSession::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_session(EditorSession::new(config))
    }

    pub fn with_session(session: EditorSession) -> Self {
        Self {
            session: Rc::new(RefCell::new(session)),
            models: Rc::new(RefCell::new(FrameModels::new())),
            scheduler: Rc::new(AnimationScheduler::new()),
        }
    }

    /// Get access to the session.
    pub fn session(&self) -> Rc<RefCell<EditorSession>> {
        self.session.clone()
    }

    pub fn config(&self) -> EditorConfig {
        self.session.borrow().config().clone()
    }

    pub fn set_config(&self, config: EditorConfig) {
        self.session.borrow_mut().set_config(config);
    }

    pub fn phase(&self) -> RotationPhase {
        self.session.borrow().phase()
    }

    pub fn is_animating(&self) -> bool {
        self.session.borrow().is_animating()
    }

    /// Whether the scheduler is currently ticking a rotation.
    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn frame(&self) -> Frame {
        self.session.borrow().frame()
    }

    /// Bind Slint models that mirror every frame.
    ///
    /// See [`FrameModels::bind`]. The models are filled immediately.
    pub fn bind_models<NP, EP, FN, FE>(&self, nodes: Rc<VecModel<NP>>, node_row: FN, edges: Rc<VecModel<EP>>, edge_row: FE)
    where
        NP: Clone + 'static,
        EP: Clone + 'static,
        FN: Fn(&NodeDrawInstruction) -> NP + 'static,
        FE: Fn(&EdgeDrawInstruction, SharedString) -> EP + 'static,
    {
        self.models.borrow_mut().bind(nodes, node_row, edges, edge_row);
        self.refresh();
    }

    /// Push the current frame to the bound models.
    pub fn refresh(&self) {
        sync(&self.session, &self.models);
    }

    // === Direct handlers ===

    pub fn handle_pointer_move(&self, x: f32, y: f32) {
        self.session.borrow_mut().pointer_moved(x, y);
        self.refresh();
    }

    /// Handle a primary click. Returns the raw id of a created node, or 0.
    pub fn handle_primary_click(&self, x: f32, y: f32) -> i32 {
        let created = self.session.borrow_mut().primary_click(x, y);
        self.refresh();
        created.map_or(0, NodeId::get)
    }

    /// Handle a secondary click. `node_id <= 0` means "whatever is under the pointer".
    pub fn handle_secondary_click(&self, x: f32, y: f32, node_id: i32) -> bool {
        let removed = self
            .session
            .borrow_mut()
            .secondary_click(x, y, NodeId::from_raw(node_id));
        self.refresh();
        removed
    }

    pub fn handle_drag_start(&self, node_id: i32) -> bool {
        let Some(id) = NodeId::from_raw(node_id) else {
            return false;
        };
        let started = self.session.borrow_mut().drag_start(id);
        self.refresh();
        started
    }

    pub fn handle_drag(&self, dx: f32, dy: f32) {
        self.session.borrow_mut().drag_by(dx, dy);
        self.refresh();
    }

    pub fn handle_drag_end(&self, _node_id: i32) {
        self.session.borrow_mut().drag_end();
        self.refresh();
    }

    /// Get the raw ID of the node currently being dragged (0 if none).
    pub fn dragged_node_id(&self) -> i32 {
        self.session.borrow().dragged_node().map_or(0, NodeId::get)
    }

    /// Start rotating a node. Returns whether the rotation was accepted.
    ///
    /// Accepted rotations start the scheduler, which stops itself once the
    /// session is idle again.
    pub fn handle_rotate(&self, node_id: i32, direction: RotationDirection) -> bool {
        let Some(id) = NodeId::from_raw(node_id) else {
            return false;
        };
        if self.session.borrow_mut().request_rotation(id, direction).is_err() {
            return false;
        }

        let interval = self.session.borrow().config().tick_interval;
        let session = Rc::downgrade(&self.session);
        let models = Rc::downgrade(&self.models);
        let scheduler = Rc::downgrade(&self.scheduler);
        self.scheduler.start(interval, move || scheduled_tick(&session, &models, &scheduler));
        self.refresh();
        true
    }

    /// Advance an in-flight rotation by one tick and sync the models.
    pub fn tick(&self) -> RotationPhase {
        let phase = self.session.borrow_mut().tick();
        self.refresh();
        if phase == RotationPhase::Idle {
            self.scheduler.stop();
        }
        phase
    }

    /// Stop ticking. An in-flight rotation stays where it is until ticked again.
    pub fn shutdown(&self) {
        self.scheduler.stop();
    }

    // === Callback factories ===

    pub fn pointer_move_callback(&self) -> impl Fn(f32, f32) {
        let ctrl = self.clone();
        move |x, y| ctrl.handle_pointer_move(x, y)
    }

    pub fn primary_click_callback(&self) -> impl Fn(f32, f32) {
        let ctrl = self.clone();
        move |x, y| {
            ctrl.handle_primary_click(x, y);
        }
    }

    pub fn secondary_click_callback(&self) -> impl Fn(f32, f32, i32) {
        let ctrl = self.clone();
        move |x, y, node_id| {
            ctrl.handle_secondary_click(x, y, node_id);
        }
    }

    pub fn drag_started_callback(&self) -> impl Fn(i32) {
        let ctrl = self.clone();
        move |node_id| {
            ctrl.handle_drag_start(node_id);
        }
    }

    pub fn drag_moved_callback(&self) -> impl Fn(f32, f32) {
        let ctrl = self.clone();
        move |dx, dy| ctrl.handle_drag(dx, dy)
    }

    pub fn drag_ended_callback(&self) -> impl Fn(i32) {
        let ctrl = self.clone();
        move |node_id| ctrl.handle_drag_end(node_id)
    }

    pub fn rotate_left_callback(&self) -> impl Fn(i32) {
        let ctrl = self.clone();
        move |node_id| {
            ctrl.handle_rotate(node_id, RotationDirection::Left);
        }
    }

    pub fn rotate_right_callback(&self) -> impl Fn(i32) {
        let ctrl = self.clone();
        move |node_id| {
            ctrl.handle_rotate(node_id, RotationDirection::Right);
        }
    }
}

fn sync(session: &RefCell<EditorSession>, models: &RefCell<FrameModels>) {
    let models = models.borrow();
    if models.is_bound() {
        models.sync(&session.borrow().frame());
    }
}

/// Timer body. Holds only weak references so a dropped controller is never touched.
fn scheduled_tick(
    session: &Weak<RefCell<EditorSession>>,
    models: &Weak<RefCell<FrameModels>>,
    scheduler: &Weak<AnimationScheduler>,
) {
    let stop = || {
        if let Some(scheduler) = scheduler.upgrade() {
            scheduler.stop();
        }
    };
    let (Some(session), Some(models)) = (session.upgrade(), models.upgrade()) else {
        stop();
        return;
    };
    let phase = session.borrow_mut().tick();
    sync(&session, &models);
    if phase == RotationPhase::Idle {
        stop();
    }
}
