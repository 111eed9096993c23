use std::time::{Duration, Instant};

use crate::coords::Vec2;

use super::pointer::PointerState;
use super::types::{InputEvent, MouseButton, MouseButtonState};

/// Capture settings.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Surface origin in window coordinates. Positions are re-based onto it.
    pub surface_origin: Vec2,
    /// Maximum time between two presses of one button to count as a double click.
    pub double_click_interval: Duration,
    /// Maximum pointer travel between those presses, in logical pixels.
    pub double_click_distance: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            surface_origin: Vec2::zero(),
            double_click_interval: Duration::from_millis(300),
            double_click_distance: 4.0,
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct LastPress {
    button: MouseButton,
    at: Instant,
    position: Vec2,
}

/// Input-capture adapter feeding a [`PointerState`].
///
/// One capture is created per surface. It normalizes host quirks before they
/// reach the pointer: window coordinates are re-based onto the surface, and
/// double clicks are synthesized from press timing because not every host
/// reports them. After [`dispose`](Self::dispose) every held button is
/// released and further input is dropped.
#[derive(Debug)]
pub struct PointerCapture {
    config: CaptureConfig,
    last_position: Vec2,
    last_press: Option<LastPress>,
    held: [bool; MouseButton::COUNT],
    disposed: bool,
}

impl PointerCapture {
    pub fn new(config: CaptureConfig) -> Self {
        log::debug!("pointer capture created (origin = {:?})", config.surface_origin);
        Self {
            config,
            last_position: Vec2::zero(),
            last_press: None,
            held: [false; MouseButton::COUNT],
            disposed: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Moves the surface origin, e.g. after the host re-laid out the surface.
    pub fn set_surface_origin(&mut self, origin: Vec2) {
        self.config.surface_origin = origin;
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Forwards `ev` into `pointer`, timestamped now.
    pub fn handle(&mut self, pointer: &mut PointerState, ev: InputEvent) {
        self.handle_at(pointer, ev, Instant::now());
    }

    /// Forwards `ev` into `pointer` as if it arrived at `now`.
    pub fn handle_at(&mut self, pointer: &mut PointerState, ev: InputEvent, now: Instant) {
        if self.disposed {
            return;
        }

        match ev {
            InputEvent::PointerMoved { x, y } => {
                let local = Vec2::new(x, y) - self.config.surface_origin;
                self.last_position = local;
                pointer.apply_event(InputEvent::PointerMoved { x: local.x, y: local.y });
            }

            InputEvent::PointerButton { button, state } => {
                self.held[button.index()] = state == MouseButtonState::Pressed;
                pointer.apply_event(ev);

                if state == MouseButtonState::Pressed {
                    if self.is_double_click(button, now) {
                        self.last_press = None;
                        log::trace!("double click synthesized for {button:?}");
                        pointer.apply_event(InputEvent::DoubleClick { button });
                    } else {
                        self.last_press = Some(LastPress { button, at: now, position: self.last_position });
                    }
                }
            }

            InputEvent::Focused(false) => {
                self.held = [false; MouseButton::COUNT];
                self.last_press = None;
                pointer.apply_event(ev);
            }

            _ => pointer.apply_event(ev),
        }
    }

    fn is_double_click(&self, button: MouseButton, now: Instant) -> bool {
        match self.last_press {
            Some(last) => {
                last.button == button
                    && now.saturating_duration_since(last.at) <= self.config.double_click_interval
                    && last.position.distance(self.last_position) <= self.config.double_click_distance
            }
            None => false,
        }
    }

    /// Stops capturing. Buttons still held are released into `pointer`.
    pub fn dispose(&mut self, pointer: &mut PointerState) {
        if self.disposed {
            return;
        }
        for button in MouseButton::ALL {
            if self.held[button.index()] {
                pointer.apply_event(InputEvent::PointerButton { button, state: MouseButtonState::Released });
            }
        }
        self.held = [false; MouseButton::COUNT];
        self.disposed = true;
        log::debug!("pointer capture disposed");
    }
}

impl Default for PointerCapture {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press() -> InputEvent {
        InputEvent::PointerButton { button: MouseButton::Left, state: MouseButtonState::Pressed }
    }

    fn release() -> InputEvent {
        InputEvent::PointerButton { button: MouseButton::Left, state: MouseButtonState::Released }
    }

    #[test]
    fn positions_are_rebased_onto_surface() {
        let mut pointer = PointerState::new();
        let mut cap = PointerCapture::new(CaptureConfig {
            surface_origin: Vec2::new(100.0, 50.0),
            ..CaptureConfig::default()
        });
        cap.handle(&mut pointer, InputEvent::PointerMoved { x: 130.0, y: 60.0 });
        pointer.sync();
        assert_eq!(pointer.position(), Vec2::new(30.0, 10.0));
    }

    #[test]
    fn two_quick_presses_make_a_double_click() {
        let mut pointer = PointerState::new();
        let mut cap = PointerCapture::default();
        let t0 = Instant::now();

        cap.handle_at(&mut pointer, press(), t0);
        cap.handle_at(&mut pointer, release(), t0 + Duration::from_millis(50));
        pointer.sync();
        assert!(!pointer.button_double_clicked(MouseButton::Left));

        cap.handle_at(&mut pointer, press(), t0 + Duration::from_millis(150));
        pointer.sync();
        assert!(pointer.button_double_clicked(MouseButton::Left));
    }

    #[test]
    fn slow_presses_are_not_a_double_click() {
        let mut pointer = PointerState::new();
        let mut cap = PointerCapture::default();
        let t0 = Instant::now();

        cap.handle_at(&mut pointer, press(), t0);
        cap.handle_at(&mut pointer, release(), t0 + Duration::from_millis(50));
        cap.handle_at(&mut pointer, press(), t0 + Duration::from_millis(900));
        pointer.sync();
        assert!(!pointer.button_double_clicked(MouseButton::Left));
    }

    #[test]
    fn dispose_releases_and_stops_capturing() {
        let mut pointer = PointerState::new();
        let mut cap = PointerCapture::default();
        cap.handle(&mut pointer, press());
        pointer.sync();
        assert!(pointer.button_pressed(MouseButton::Left));

        cap.dispose(&mut pointer);
        cap.handle(&mut pointer, InputEvent::PointerMoved { x: 40.0, y: 40.0 });
        pointer.sync();
        assert!(cap.is_disposed());
        assert!(!pointer.button_pressed(MouseButton::Left));
        assert!(pointer.button_just_released(MouseButton::Left));
        assert_eq!(pointer.position(), Vec2::zero());
    }
}
