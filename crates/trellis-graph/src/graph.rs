use trellis_engine::coords::Vec2;
use trellis_engine::scene::{AsAny, NodeId, Scene, SceneError, SceneNode};

use crate::connector::destroy_connector;
use crate::error::GraphError;
use crate::node::{GraphNode, NodeOperation};
use crate::socket::{connect_to, NodeSocket};

/// Horizontal gap between a new node and the right-most existing child.
pub const NODE_SPACING: f32 = 200.0;

/// A graph editor: one container node holding graph nodes, their sockets and
/// the connectors between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeGraph {
    container: NodeId,
}

impl NodeGraph {
    /// Creates the container under `parent`.
    pub fn new(scene: &mut Scene, parent: NodeId) -> Result<Self, SceneError> {
        let container = scene.add(parent, SceneNode::new().with_name("node-graph"))?;
        Ok(Self { container })
    }

    /// Wraps an existing container node.
    pub fn from_container(container: NodeId) -> Self {
        Self { container }
    }

    #[inline]
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Where the next node goes: right of every child, halfway down.
    pub fn next_position(&self, scene: &Scene) -> Vec2 {
        let max = scene
            .children(self.container)
            .iter()
            .filter_map(|c| scene.get(*c))
            .fold(Vec2::zero(), |max, n| max.max(n.position));
        Vec2::new(max.x + NODE_SPACING, max.y / 2.0)
    }

    /// Adds a node running `operation`, then registers its sockets.
    pub fn add_node<O: NodeOperation>(&self, scene: &mut Scene, operation: O) -> Result<NodeId, SceneError> {
        let position = self.next_position(scene);
        let mut node = GraphNode::new(operation).into_scene_node();
        node.position = position;
        let id = scene.add(self.container, node)?;

        scene.with_behavior(id, |behavior, scene| {
            if let Some(node) = behavior.as_any_mut().downcast_mut::<GraphNode>() {
                node.register_sockets(scene, id);
            }
        });
        log::debug!("graph node {id:?} added at {position:?}");
        Ok(id)
    }

    /// Removes a node with its sockets and every connector touching them.
    pub fn remove_node(&self, scene: &mut Scene, id: NodeId) {
        let Some(sockets) = scene.behavior::<GraphNode>(id).map(|n| n.sockets().collect::<Vec<_>>()) else {
            return;
        };
        for socket in sockets {
            if let Some(connector) = scene.behavior::<NodeSocket>(socket).and_then(NodeSocket::connector) {
                destroy_connector(scene, connector);
            }
            scene.remove(socket);
        }
        scene.remove(id);
        log::debug!("graph node {id:?} removed");
    }

    /// Graph nodes in the container, in child order.
    pub fn nodes(&self, scene: &Scene) -> Vec<NodeId> {
        scene
            .children(self.container)
            .iter()
            .copied()
            .filter(|c| scene.behavior::<GraphNode>(*c).is_some())
            .collect()
    }

    /// Same as [`connect_to`].
    pub fn connect(&self, scene: &mut Scene, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        connect_to(scene, a, b)
    }
}
