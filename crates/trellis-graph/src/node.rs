use trellis_engine::coords::{Matrix2D, Vec2};
use trellis_engine::paint::{Color, Style};
use trellis_engine::render::Surface;
use trellis_engine::scene::{Behavior, EventCtx, NodeId, RectShape, Scene, SceneNode};

use crate::eval::Inputs;
use crate::socket::{NodeSocket, SocketDirection};
use crate::value::Value;

pub const NODE_SIZE: Vec2 = Vec2::new(140.0, 80.0);

const TITLE_SIZE: f32 = 13.0;
const TITLE_PADDING: f32 = 8.0;

/// What a graph node computes.
///
/// Sockets are declared once through [`register`](Self::register), right
/// after the node joins its graph. [`evaluate`](Self::evaluate) is pulled on
/// demand for one output at a time; nothing is cached.
pub trait NodeOperation: 'static {
    fn title(&self) -> String;

    fn register(&self, sockets: &mut SocketRegistry<'_>);

    /// Value of output `output` (index in registration order).
    fn evaluate(&self, inputs: &Inputs<'_>, output: usize) -> Option<Value>;
}

/// Collects the sockets an operation declares.
pub struct SocketRegistry<'a> {
    scene: &'a mut Scene,
    owner: NodeId,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
}

impl SocketRegistry<'_> {
    pub fn input(&mut self, kind: &str, name: &str) -> NodeId {
        let id = NodeSocket::spawn(self.scene, self.owner, SocketDirection::Input, kind, name);
        self.inputs.push(id);
        id
    }

    pub fn output(&mut self, kind: &str, name: &str) -> NodeId {
        let id = NodeSocket::spawn(self.scene, self.owner, SocketDirection::Output, kind, name);
        self.outputs.push(id);
        id
    }
}

/// A box with input sockets on its left edge and outputs on its right edge.
pub struct GraphNode {
    pub title: String,
    pub size: Vec2,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    operation: Box<dyn NodeOperation>,
}

impl GraphNode {
    pub fn new<O: NodeOperation>(operation: O) -> Self {
        Self {
            title: operation.title(),
            size: NODE_SIZE,
            inputs: Vec::new(),
            outputs: Vec::new(),
            operation: Box::new(operation),
        }
    }

    /// Scene node carrying this graph node: a draggable titled box.
    pub fn into_scene_node(self) -> SceneNode {
        let style = Style::filled(Color::rgb(0.16, 0.17, 0.2)).with_stroke(Some(Color::rgb(0.4, 0.4, 0.45)), 1.0);
        SceneNode::new()
            .with_name(self.title.clone())
            .with_shape(RectShape::centered(self.size, style))
            .draggable(true)
            .with_behavior(self)
    }

    #[inline]
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    #[inline]
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    #[inline]
    pub fn operation(&self) -> &dyn NodeOperation {
        self.operation.as_ref()
    }

    /// Every socket, inputs first.
    pub fn sockets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inputs.iter().chain(&self.outputs).copied()
    }

    /// Runs the operation's socket registration. `id` is this node's id.
    pub(crate) fn register_sockets(&mut self, scene: &mut Scene, id: NodeId) {
        let mut registry = SocketRegistry { scene, owner: id, inputs: Vec::new(), outputs: Vec::new() };
        self.operation.register(&mut registry);
        self.inputs = registry.inputs;
        self.outputs = registry.outputs;
    }

    /// Socket positions in the container's space, for a node at `local`.
    fn layout(&self, local: &Matrix2D) -> Vec<(NodeId, Vec2)> {
        let half = self.size * 0.5;
        let column = |ids: &[NodeId], x: f32| -> Vec<(NodeId, Vec2)> {
            let step = self.size.y / (ids.len() + 1) as f32;
            ids.iter()
                .enumerate()
                .map(|(i, id)| (*id, local.transform_point(Vec2::new(x, -half.y + step * (i + 1) as f32))))
                .collect()
        };
        let mut out = column(&self.inputs, -half.x);
        out.extend(column(&self.outputs, half.x));
        out
    }
}

impl Behavior for GraphNode {
    /// Pins the sockets to the box edges, following drags in the same frame.
    fn on_update(&mut self, ctx: &mut EventCtx<'_>) {
        let Some(node) = ctx.node() else {
            return;
        };
        let local = Matrix2D::compose(
            node.position.x,
            node.position.y,
            node.scale.x,
            node.scale.y,
            node.origin.x,
            node.origin.y,
            node.rotation,
        );
        for (socket, position) in self.layout(&local) {
            if let Some(s) = ctx.scene.get_mut(socket) {
                s.position = position;
            }
        }
    }

    fn paint(&self, _node: &SceneNode, surface: &mut dyn Surface) {
        let half = self.size * 0.5;
        surface.set_fill_color(Color::WHITE);
        surface.fill_text(
            &self.title,
            Vec2::new(-half.x + TITLE_PADDING, -half.y + TITLE_PADDING + TITLE_SIZE),
            TITLE_SIZE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeGraph;
    use crate::operations::{Arithmetic, ArithmeticOp};
    use trellis_engine::input::PointerState;
    use trellis_engine::viewport::Viewport;

    #[test]
    fn registration_spawns_sockets_next_to_the_node() {
        let mut scene = Scene::new();
        let root = scene.root();
        let graph = NodeGraph::new(&mut scene, root).unwrap();
        let id = graph.add_node(&mut scene, Arithmetic::new(ArithmeticOp::Add)).unwrap();

        let node = scene.behavior::<GraphNode>(id).unwrap();
        assert_eq!(node.inputs().len(), 2);
        assert_eq!(node.outputs().len(), 1);
        for socket in node.sockets() {
            assert_eq!(scene.parent(socket), Some(graph.container()));
            assert_eq!(scene.behavior::<NodeSocket>(socket).unwrap().owner, id);
        }
    }

    #[test]
    fn sockets_are_laid_out_on_the_edges() {
        let mut scene = Scene::new();
        let root = scene.root();
        let graph = NodeGraph::new(&mut scene, root).unwrap();
        let id = graph.add_node(&mut scene, Arithmetic::new(ArithmeticOp::Add)).unwrap();
        scene.get_mut(id).unwrap().position = Vec2::new(100.0, 100.0);

        let pointer = PointerState::new();
        let viewport = Viewport::new();
        scene.with_behavior(id, |b, scene| {
            b.on_update(&mut EventCtx { scene, id, pointer: &pointer, viewport: &viewport });
        });

        let node = scene.behavior::<GraphNode>(id).unwrap();
        let (inputs, outputs) = (node.inputs().to_vec(), node.outputs().to_vec());
        let pos = |s: NodeId| scene.get(s).unwrap().position;

        let half = NODE_SIZE * 0.5;
        assert_eq!(pos(inputs[0]).x, 100.0 - half.x);
        assert_eq!(pos(inputs[1]).x, 100.0 - half.x);
        assert!(pos(inputs[0]).y < pos(inputs[1]).y);
        assert_eq!(pos(outputs[0]), Vec2::new(100.0 + half.x, 100.0));
    }
}
