use ::winit::dpi::PhysicalPosition;
use ::winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use ::winit::window::Window;

use crate::input::{InputEvent, MouseButton, MouseButtonState, MouseWheelDelta};

/// Translates a winit `WindowEvent` into a pointer [`InputEvent`], in logical
/// pixels of `window`.
pub fn translate_window_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    translate_event(event, window.scale_factor())
}

/// Same as [`translate_window_event`] with an explicit scale factor.
///
/// Keyboard, IME and unknown buttons give `None`. Double clicks are not
/// reported by winit; [`PointerCapture`](crate::input::PointerCapture)
/// synthesizes them. Wheel deltas are flipped so positive scrolls down.
pub fn translate_event(event: &WindowEvent, scale_factor: f64) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),
        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical(*position, scale_factor);
            Some(InputEvent::PointerMoved { x, y })
        }
        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: pointer_button(*button)?,
            state: match state {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            },
        }),
        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match *delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x: -x, y: -y },
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = logical(p, scale_factor);
                    MouseWheelDelta::Pixel { x: -x, y: -y }
                }
            };
            Some(InputEvent::MouseWheel { delta })
        }
        _ => None,
    }
}

fn logical(pos: PhysicalPosition<f64>, scale_factor: f64) -> (f32, f32) {
    let p = pos.to_logical::<f64>(scale_factor);
    (p.x as f32, p.y as f32)
}

fn pointer_button(b: WinitMouseButton) -> Option<MouseButton> {
    Some(match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(_) => return None,
    })
}
