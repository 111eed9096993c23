//! Node graph editor built on the Trellis scene graph.
//!
//! Graph nodes ([`GraphNode`]) expose typed, directional sockets
//! ([`NodeSocket`]) that are joined by curved connectors ([`NodeConnector`]),
//! either programmatically through [`connect_to`] or by dragging from one
//! socket onto another. Values are pulled on demand with [`get_value`].

mod connector;
mod error;
mod eval;
mod graph;
mod node;
mod socket;
mod value;

pub mod operations;

pub use connector::{destroy_connector, NodeConnector, CONNECTOR_LAYER};
pub use error::GraphError;
pub use eval::{get_value, Inputs, MAX_EVAL_DEPTH};
pub use graph::{NodeGraph, NODE_SPACING};
pub use node::{GraphNode, NodeOperation, SocketRegistry, NODE_SIZE};
pub use socket::{attach_connector, connect_to, NodeSocket, SocketDirection, SOCKET_LAYER, SOCKET_RADIUS};
pub use value::{kinds, Value};
