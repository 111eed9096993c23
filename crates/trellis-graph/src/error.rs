use trellis_engine::scene::NodeId;

use crate::socket::SocketDirection;

/// Why two sockets cannot be connected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("node {0:?} is not a socket")]
    NotASocket(NodeId),

    #[error("sockets {a:?} and {b:?} are both {direction:?}")]
    SameDirection { a: NodeId, b: NodeId, direction: SocketDirection },

    #[error("cannot feed a `{output_kind}` output into a `{input_kind}` input")]
    TypeMismatch { output_kind: String, input_kind: String },

    #[error("connecting {output:?} to {input:?} would create a cycle")]
    Cycle { output: NodeId, input: NodeId },
}
