use crate::coords::Vec2;

use super::button::ButtonState;
use super::types::{InputEvent, MouseButton, MouseButtonState};

/// Accumulators written by the capture layer between frames.
#[derive(Debug, Clone, Default)]
struct RawPointer {
    position: Vec2,
    delta: Vec2,
    position_updated: bool,
    /// Set by a move, cleared when the pointer leaves the surface.
    on_surface: bool,
    wheel: f32,
    wheel_updated: bool,
    buttons: [ButtonState; MouseButton::COUNT],
    double_clicked: [bool; MouseButton::COUNT],
}

/// Double-buffered pointer state.
///
/// Input arrives through [`apply_event`](Self::apply_event) at any time and
/// lands in private accumulators. Once per frame [`sync`](Self::sync) turns
/// them into the stable snapshot read by every query method, so all consumers
/// in a frame see the same values regardless of when host events fired.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    raw: RawPointer,

    position: Vec2,
    delta: Vec2,
    on_surface: bool,
    wheel: f32,
    buttons: [ButtonState; MouseButton::COUNT],
    double_clicked: [bool; MouseButton::COUNT],
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── raw side (capture layer) ──────────────────────────────────────────

    /// Applies a platform-agnostic event to the raw accumulators.
    ///
    /// Nothing is visible to snapshot readers until the next [`sync`](Self::sync).
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::PointerMoved { x, y } => {
                let next = Vec2::new(x, y);
                self.raw.delta += next - self.raw.position;
                self.raw.position = next;
                self.raw.on_surface = true;
                self.raw.position_updated = true;
            }

            InputEvent::PointerButton { button, state } => {
                self.raw.buttons[button.index()].update(state);
            }

            InputEvent::MouseWheel { delta } => {
                self.raw.wheel += delta.vertical_pixels();
                self.raw.wheel_updated = true;
            }

            InputEvent::DoubleClick { button } => {
                self.raw.double_clicked[button.index()] = true;
            }

            InputEvent::PointerLeft => {
                self.raw.on_surface = false;
                self.raw.position_updated = true;
            }

            InputEvent::Focused(focused) => {
                if !focused {
                    // Focus loss: release everything so no button stays stuck.
                    // Buttons already up keep their pending release edge.
                    for b in self.raw.buttons.iter_mut().filter(|b| b.pressed) {
                        b.update(MouseButtonState::Released);
                    }
                }
            }
        }
    }

    /// Publishes the raw accumulators as this frame's snapshot.
    ///
    /// Must run exactly once per frame, before anything reads the snapshot.
    pub fn sync(&mut self) {
        for i in 0..MouseButton::COUNT {
            let raw = &mut self.raw.buttons[i];
            let published = self.buttons[i];

            // An edge already reported last frame must not fire again just
            // because no newer raw event replaced it.
            if raw.just_pressed && published.just_pressed {
                raw.just_pressed = false;
            }
            if raw.just_released && published.just_released {
                raw.just_released = false;
            }

            self.buttons[i] = *raw;
        }

        self.double_clicked = self.raw.double_clicked;
        self.raw.double_clicked = [false; MouseButton::COUNT];

        if self.raw.wheel_updated {
            self.wheel = self.raw.wheel;
            self.raw.wheel = 0.0;
            self.raw.wheel_updated = false;
        } else {
            self.wheel = 0.0;
        }

        if self.raw.position_updated {
            self.position = self.raw.position;
            self.on_surface = self.raw.on_surface;
            self.delta = self.raw.delta;
            self.raw.delta = Vec2::zero();
            self.raw.position_updated = false;
        } else {
            self.delta = Vec2::zero();
        }
    }

    // ── snapshot queries ──────────────────────────────────────────────────

    /// Pointer position in surface space.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the pointer is over the surface: false until the first move
    /// and after it leaves. Off-surface pointers hit nothing.
    #[inline]
    pub fn on_surface(&self) -> bool {
        self.on_surface
    }

    /// Movement since the previous snapshot.
    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Wheel movement since the previous snapshot, positive when scrolling down.
    #[inline]
    pub fn wheel(&self) -> f32 {
        self.wheel
    }

    #[inline]
    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.index()]
    }

    #[inline]
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].pressed
    }

    #[inline]
    pub fn button_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].just_pressed
    }

    #[inline]
    pub fn button_just_released(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].just_released
    }

    #[inline]
    pub fn button_double_clicked(&self, button: MouseButton) -> bool {
        self.double_clicked[button.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn press(p: &mut PointerState, button: MouseButton) {
        p.apply_event(InputEvent::PointerButton { button, state: MouseButtonState::Pressed });
    }

    fn release(p: &mut PointerState, button: MouseButton) {
        p.apply_event(InputEvent::PointerButton { button, state: MouseButtonState::Released });
    }

    // ── buttons ───────────────────────────────────────────────────────────

    #[test]
    fn press_edge_is_reported_for_one_sync_only() {
        let mut p = PointerState::new();
        press(&mut p, MouseButton::Left);

        p.sync();
        assert!(p.button_just_pressed(MouseButton::Left));
        assert!(p.button_pressed(MouseButton::Left));

        p.sync();
        assert!(!p.button_just_pressed(MouseButton::Left));
        assert!(p.button_pressed(MouseButton::Left));
    }

    #[test]
    fn release_edge_is_reported_for_one_sync_only() {
        let mut p = PointerState::new();
        press(&mut p, MouseButton::Right);
        p.sync();
        release(&mut p, MouseButton::Right);

        p.sync();
        assert!(p.button_just_released(MouseButton::Right));
        assert!(!p.button_pressed(MouseButton::Right));

        p.sync();
        assert!(!p.button_just_released(MouseButton::Right));
    }

    #[test]
    fn nothing_is_visible_before_sync() {
        let mut p = PointerState::new();
        press(&mut p, MouseButton::Left);
        p.apply_event(InputEvent::PointerMoved { x: 5.0, y: 6.0 });
        assert!(!p.button_pressed(MouseButton::Left));
        assert_eq!(p.position(), Vec2::zero());
    }

    #[test]
    fn focus_loss_releases_held_buttons() {
        let mut p = PointerState::new();
        press(&mut p, MouseButton::Middle);
        p.sync();
        p.apply_event(InputEvent::Focused(false));
        p.sync();
        assert!(!p.button_pressed(MouseButton::Middle));
        assert!(p.button_just_released(MouseButton::Middle));
    }

    #[test]
    fn release_then_focus_loss_keeps_release_edge() {
        let mut p = PointerState::new();
        press(&mut p, MouseButton::Left);
        p.sync();
        release(&mut p, MouseButton::Left);
        p.apply_event(InputEvent::Focused(false));
        p.sync();
        assert!(!p.button_pressed(MouseButton::Left));
        assert!(p.button_just_released(MouseButton::Left));
    }

    #[test]
    fn focus_loss_leaves_idle_buttons_alone() {
        let mut p = PointerState::new();
        p.apply_event(InputEvent::Focused(false));
        p.sync();
        assert!(!p.button_just_released(MouseButton::Right));
    }

    // ── position / wheel / double click ───────────────────────────────────

    #[test]
    fn delta_accumulates_between_syncs_and_resets() {
        let mut p = PointerState::new();
        p.apply_event(InputEvent::PointerMoved { x: 10.0, y: 10.0 });
        p.sync();
        p.apply_event(InputEvent::PointerMoved { x: 12.0, y: 11.0 });
        p.apply_event(InputEvent::PointerMoved { x: 15.0, y: 14.0 });
        p.sync();
        assert_eq!(p.position(), Vec2::new(15.0, 14.0));
        assert_eq!(p.delta(), Vec2::new(5.0, 4.0));

        p.sync();
        assert_eq!(p.position(), Vec2::new(15.0, 14.0));
        assert_eq!(p.delta(), Vec2::zero());
    }

    #[test]
    fn leaving_the_surface_is_published_until_the_next_move() {
        let mut p = PointerState::new();
        p.sync();
        assert!(!p.on_surface());

        p.apply_event(InputEvent::PointerMoved { x: 10.0, y: 10.0 });
        p.sync();
        assert!(p.on_surface());

        p.apply_event(InputEvent::PointerLeft);
        p.sync();
        assert!(!p.on_surface());
        assert_eq!(p.position(), Vec2::new(10.0, 10.0));
        assert_eq!(p.delta(), Vec2::zero());

        p.sync();
        assert!(!p.on_surface());

        p.apply_event(InputEvent::PointerMoved { x: 300.0, y: 40.0 });
        p.sync();
        assert!(p.on_surface());
        assert_eq!(p.position(), Vec2::new(300.0, 40.0));
    }

    #[test]
    fn wheel_is_published_once() {
        let mut p = PointerState::new();
        p.apply_event(InputEvent::MouseWheel { delta: MouseWheelDelta::Pixel { x: 0.0, y: 30.0 } });
        p.apply_event(InputEvent::MouseWheel { delta: MouseWheelDelta::Pixel { x: 0.0, y: 10.0 } });
        p.sync();
        assert_eq!(p.wheel(), 40.0);
        p.sync();
        assert_eq!(p.wheel(), 0.0);
    }

    #[test]
    fn double_click_is_copied_then_cleared() {
        let mut p = PointerState::new();
        p.apply_event(InputEvent::DoubleClick { button: MouseButton::Left });
        p.sync();
        assert!(p.button_double_clicked(MouseButton::Left));
        p.sync();
        assert!(!p.button_double_clicked(MouseButton::Left));
    }
}
