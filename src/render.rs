//! Frame output for the rendering surface.
//!
//! A [`Frame`] is the complete list of draw instructions for one repaint.
//! [`FrameModels`] mirrors frames into application-owned Slint `VecModel`s so
//! the UI can bind to them directly.
//!
//! # Example
//!
//! ```ignore
//! let models = FrameModels::new();
//! let nodes = Rc::new(VecModel::<NodeData>::default());
//! let edges = Rc::new(VecModel::<EdgeData>::default());
//! models.bind(
//!     nodes.clone(),
//!     |n| NodeData { id: n.id.get(), x: n.position.0, y: n.position.1, value: n.value, highlighted: n.highlighted },
//!     edges.clone(),
//!     |e, path| EdgeData { path_commands: path, color: e.style.color() },
//! );
//! window.set_nodes(ModelRc::from(nodes));
//! window.set_edges(ModelRc::from(edges));
//! ```

use crate::links::EdgeDrawInstruction;
use crate::tree::NodeId;
use slint::{Model, SharedString, VecModel};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDrawInstruction {
    pub id: NodeId,
    pub position: (f32, f32),
    pub value: i32,
    /// The pointer is inside this node's rotation ring.
    pub highlighted: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub nodes: Vec<NodeDrawInstruction>,
    pub edges: Vec<EdgeDrawInstruction>,
}

/// Internal trait for syncing frames to Slint models.
trait FrameSyncer {
    fn sync(&self, frame: &Frame);
}

struct ConcreteFrameSyncer<NP, EP, FN, FE> {
    nodes: Rc<VecModel<NP>>,
    edges: Rc<VecModel<EP>>,
    node_row: FN,
    edge_row: FE,
}

impl<NP, EP, FN, FE> FrameSyncer for ConcreteFrameSyncer<NP, EP, FN, FE>
where
    NP: Clone + 'static,
    EP: Clone + 'static,
    FN: Fn(&NodeDrawInstruction) -> NP,
    FE: Fn(&EdgeDrawInstruction, SharedString) -> EP,
{
    fn sync(&self, frame: &Frame) {
        sync_rows(&self.nodes, frame.nodes.iter().map(&self.node_row));
        sync_rows(
            &self.edges,
            frame
                .edges
                .iter()
                .map(|edge| (self.edge_row)(edge, SharedString::from(edge.path_commands()))),
        );
    }
}

/// Update existing rows in place, append new ones and drop the excess.
fn sync_rows<P, I>(model: &VecModel<P>, rows: I)
where
    P: Clone + 'static,
    I: Iterator<Item = P>,
{
    let mut count = 0;
    for (i, row) in rows.enumerate() {
        if i < model.row_count() {
            model.set_row_data(i, row);
        } else {
            model.push(row);
        }
        count = i + 1;
    }
    while model.row_count() > count {
        model.remove(model.row_count() - 1);
    }
}

/// Optional binding of frames to Slint models.
#[derive(Default)]
pub struct FrameModels {
    syncer: Option<Box<dyn FrameSyncer>>,
}

impl std::fmt::Debug for FrameModels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameModels").field("bound", &self.is_bound()).finish()
    }
}

impl FrameModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind node and edge models with row constructors.
    ///
    /// The edge constructor also receives the edge's SVG path commands.
    pub fn bind<NP, EP, FN, FE>(&mut self, nodes: Rc<VecModel<NP>>, node_row: FN, edges: Rc<VecModel<EP>>, edge_row: FE)
    where
        NP: Clone + 'static,
        EP: Clone + 'static,
        FN: Fn(&NodeDrawInstruction) -> NP + 'static,
        FE: Fn(&EdgeDrawInstruction, SharedString) -> EP + 'static,
    {
        self.syncer = Some(Box::new(ConcreteFrameSyncer { nodes, edges, node_row, edge_row }));
    }

    pub fn unbind(&mut self) {
        self.syncer = None;
    }

    pub fn is_bound(&self) -> bool {
        self.syncer.is_some()
    }

    pub fn sync(&self, frame: &Frame) {
        if let Some(syncer) = &self.syncer {
            syncer.sync(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::EdgeStyle;

    fn frame(nodes: usize, edges: usize) -> Frame {
        Frame {
            nodes: (0..nodes)
                .map(|i| NodeDrawInstruction {
                    id: NodeId::new(i as i32 + 1),
                    position: (i as f32 * 10.0, 0.0),
                    value: i as i32,
                    highlighted: false,
                })
                .collect(),
            edges: (0..edges)
                .map(|i| EdgeDrawInstruction::new((0.0, 0.0), (i as f32, 1.0), EdgeStyle::Structural))
                .collect(),
        }
    }

    #[test]
    fn test_unbound_sync_is_noop() {
        let models = FrameModels::new();
        assert!(!models.is_bound());
        models.sync(&frame(2, 1));
    }

    #[test]
    fn test_sync_grows_and_shrinks_models() {
        let nodes: Rc<VecModel<i32>> = Rc::new(VecModel::default());
        let edges: Rc<VecModel<SharedString>> = Rc::new(VecModel::default());
        let mut models = FrameModels::new();
        models.bind(nodes.clone(), |n| n.value, edges.clone(), |_, path| path);

        models.sync(&frame(3, 2));
        assert_eq!(nodes.row_count(), 3);
        assert_eq!(edges.row_count(), 2);
        assert_eq!(edges.row_data(1).unwrap().as_str(), "M 0 0 L 1 1");

        models.sync(&frame(1, 0));
        assert_eq!(nodes.row_count(), 1);
        assert_eq!(edges.row_count(), 0);
        assert_eq!(nodes.row_data(0), Some(0));
    }

    #[test]
    fn test_unbind_stops_syncing() {
        let nodes: Rc<VecModel<i32>> = Rc::new(VecModel::default());
        let edges: Rc<VecModel<SharedString>> = Rc::new(VecModel::default());
        let mut models = FrameModels::new();
        models.bind(nodes.clone(), |n| n.value, edges, |_, path| path);
        models.unbind();
        models.sync(&frame(2, 0));
        assert_eq!(nodes.row_count(), 0);
    }
}
