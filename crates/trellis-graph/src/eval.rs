use trellis_engine::scene::{NodeId, Scene};

use crate::connector::NodeConnector;
use crate::node::GraphNode;
use crate::socket::{NodeSocket, SocketDirection};
use crate::value::Value;

/// Longest socket chain followed by [`get_value`]. Deeper pulls yield `None`.
pub const MAX_EVAL_DEPTH: usize = 256;

/// Pulls the current value of a socket.
///
/// An input resolves through its connector to the upstream output; an output
/// asks its node's operation. Unconnected inputs and unknown ids give `None`.
pub fn get_value(scene: &Scene, socket: NodeId) -> Option<Value> {
    value_at(scene, socket, 0)
}

fn value_at(scene: &Scene, socket: NodeId, depth: usize) -> Option<Value> {
    if depth > MAX_EVAL_DEPTH {
        log::warn!("evaluation of {socket:?} exceeded depth {MAX_EVAL_DEPTH}");
        return None;
    }

    let s = scene.behavior::<NodeSocket>(socket)?;
    match s.direction {
        SocketDirection::Input => {
            let upstream = scene.behavior::<NodeConnector>(s.connector()?)?.output?;
            value_at(scene, upstream, depth + 1)
        }
        SocketDirection::Output => {
            let node = scene.behavior::<GraphNode>(s.owner)?;
            let index = node.outputs().iter().position(|o| *o == socket)?;
            let inputs = Inputs { scene, sockets: node.inputs(), depth };
            node.operation().evaluate(&inputs, index)
        }
    }
}

/// Input values of a node being evaluated, pulled lazily.
pub struct Inputs<'a> {
    scene: &'a Scene,
    sockets: &'a [NodeId],
    depth: usize,
}

impl Inputs<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.sockets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sockets.is_empty()
    }

    /// Value arriving at input `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        value_at(self.scene, *self.sockets.get(index)?, self.depth + 1)
    }

    pub fn number(&self, index: usize) -> Option<f64> {
        self.get(index)?.as_number()
    }
}
