//! Camera transform between world space and surface space, plus the pointer
//! gestures (pan, zoom, rotate) that drive it.

mod controls;
mod view;

pub use controls::ViewportControls;
pub use view::Viewport;
