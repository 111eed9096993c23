//! Host event translators.

pub mod winit;
