//! Trellis engine crate.
//!
//! A 2D scene-graph renderer: an arena-backed node tree with affine
//! transforms, a camera viewport, double-buffered pointer input and a frame
//! pipeline that hit-tests, dispatches pointer events, drags and paints onto
//! an abstract [`Surface`](render::Surface).

pub mod coords;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod viewport;
