//! Coordinate and geometry types shared by the scene, viewport and pipeline.
//!
//! Canonical space conventions:
//! - origin top-left
//! - +X right, +Y down
//! - positive rotation turns +X towards +Y
//!
//! Three frames are in play: a node's local space, world space (after node
//! matrices) and surface space (after the viewport matrix).

mod box2;
mod matrix;
mod vec2;

pub use box2::Box2;
pub use matrix::Matrix2D;
pub use vec2::Vec2;
