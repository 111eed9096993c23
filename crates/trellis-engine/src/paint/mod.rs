//! Paint model shared by shapes and surfaces.
//!
//! Geometry types remain in `coords`.

mod color;
mod style;

pub use color::Color;
pub use style::Style;
