/// Pointer button identifier.
///
/// The five buttons a pointer snapshot tracks, in the order used to index
/// per-button state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

impl MouseButton {
    /// Number of buttons tracked per pointer.
    pub const COUNT: usize = 5;

    pub const ALL: [MouseButton; Self::COUNT] = [
        MouseButton::Left,
        MouseButton::Middle,
        MouseButton::Right,
        MouseButton::Back,
        MouseButton::Forward,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Mouse wheel delta.
///
/// `Line` corresponds to "scroll lines" style input; `Pixel` is high precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Pixels per wheel line when collapsing line deltas into a scalar.
    pub const LINE_HEIGHT: f32 = 100.0;

    /// Vertical amount in pixels, positive when scrolling down.
    #[inline]
    pub fn vertical_pixels(self) -> f32 {
        match self {
            MouseWheelDelta::Line { y, .. } => y * Self::LINE_HEIGHT,
            MouseWheelDelta::Pixel { y, .. } => y,
        }
    }
}

/// Platform-agnostic pointer events.
///
/// The capture layer translates window-system events into these; coordinates
/// are logical pixels in window space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerButton { button: MouseButton, state: MouseButtonState },
    MouseWheel { delta: MouseWheelDelta },
    DoubleClick { button: MouseButton },
    /// Pointer left the window surface.
    PointerLeft,
    /// Window focus change.
    Focused(bool),
}
