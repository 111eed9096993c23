//! Pointer input.
//!
//! Public API is platform-agnostic. The capture layer ([`PointerCapture`],
//! fed from [`platform`] translators) writes into a [`PointerState`], whose
//! [`sync`](PointerState::sync) publishes one stable snapshot per frame.

mod button;
mod capture;
mod pointer;
mod types;

pub mod platform;

pub use button::ButtonState;
pub use capture::{CaptureConfig, PointerCapture};
pub use pointer::PointerState;
pub use types::{InputEvent, MouseButton, MouseButtonState, MouseWheelDelta};
