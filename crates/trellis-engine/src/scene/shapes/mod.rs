//! Shape components.
//!
//! A shape gives a node its outline: the containment test used by hit-testing,
//! the path used when the node acts as a mask, and the paint routine.

mod circle;
mod image;
mod rect;

pub use circle::CircleShape;
pub use image::ImageShape;
pub use rect::RectShape;

use crate::coords::{Box2, Vec2};
use crate::render::Surface;

/// Geometry plus paint routine, in the owning node's local space.
pub trait Shape: 'static {
    /// Point-in-shape test in local coordinates.
    fn contains(&self, point: Vec2) -> bool;

    /// Local-space bounds.
    fn bounds(&self) -> Box2;

    /// Appends the outline to the surface's current path.
    fn trace(&self, surface: &mut dyn Surface);

    /// Applies fill/stroke settings. Called right before [`draw`](Self::draw).
    fn style(&self, _surface: &mut dyn Surface) {}

    /// Paints the shape. The node transform is already applied.
    fn draw(&self, surface: &mut dyn Surface);
}
