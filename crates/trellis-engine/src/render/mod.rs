//! Drawing surface contract and the frame pipeline.
//!
//! - [`Surface`] is the imperative 2D paint API the pipeline draws through.
//! - [`DrawList`] records surface calls; tests and headless hosts use it.
//! - [`Renderer`] runs one frame: gather, sort, dispatch, update, paint.
//!
//! Convention: logical pixels, top-left origin, +Y down.

mod cmd;
mod key;
mod list;
mod pipeline;
mod surface;

pub use cmd::DrawCmd;
pub use key::PaintKey;
pub use list::{DrawItem, DrawList};
pub use pipeline::{world_delta, Renderer, RendererConfig};
pub use surface::{ImageId, Surface};
