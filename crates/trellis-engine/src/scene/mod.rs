//! Scene tree.
//!
//! Responsibilities:
//! - own every node in an arena addressed by [`NodeId`]
//! - keep parent/children/depth consistent and notify behaviors on attach/detach
//! - derive local, world and inverse-world matrices
//! - world-space hit tests used by the frame pipeline
//!
//! Nodes are composed rather than subclassed: an optional [`Shape`] gives the
//! outline and paint routine, an optional [`Behavior`] reacts to lifecycle and
//! pointer events.

mod behavior;
mod embed;
mod error;
mod id;
mod node;
mod tree;

pub mod shapes;

pub use behavior::{drag_by, AsAny, Behavior, EventCtx};
pub use embed::{Embedded, NativeElement};
pub use error::SceneError;
pub use id::NodeId;
pub use node::SceneNode;
pub use shapes::{CircleShape, ImageShape, RectShape, Shape};
pub use tree::Scene;
