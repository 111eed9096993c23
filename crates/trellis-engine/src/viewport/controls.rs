use crate::coords::Vec2;
use crate::input::{MouseButton, PointerState};

use super::Viewport;

/// Pointer gestures driving a [`Viewport`]: wheel zoom, pan and rotate.
///
/// Runs once per frame after the pointer snapshot is synced. Rotation takes
/// over while both `drag_button` and `rotate_button` are held; otherwise
/// holding `drag_button` pans.
#[derive(Debug, Clone)]
pub struct ViewportControls {
    pub drag_button: MouseButton,
    /// Held together with `drag_button` to rotate.
    pub rotate_button: MouseButton,

    pub allow_drag: bool,
    pub allow_scale: bool,
    pub allow_rotation: bool,

    /// Scale change per wheel pixel, relative to the current scale.
    pub zoom_speed: f32,
    /// Nudge the camera towards the pointer while zooming.
    pub move_on_scale: bool,

    rotation_point: Option<Vec2>,
    rotation_initial: f32,
}

impl Default for ViewportControls {
    fn default() -> Self {
        Self {
            drag_button: MouseButton::Right,
            rotate_button: MouseButton::Left,
            allow_drag: true,
            allow_scale: true,
            allow_rotation: true,
            zoom_speed: 0.001,
            move_on_scale: false,
            rotation_point: None,
            rotation_initial: 0.0,
        }
    }
}

impl ViewportControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pivot of the rotate gesture in progress, in surface space.
    #[inline]
    pub fn rotation_point(&self) -> Option<Vec2> {
        self.rotation_point
    }

    pub fn update(&mut self, viewport: &mut Viewport, pointer: &PointerState, surface_size: Vec2) {
        let wheel = pointer.wheel();
        if self.allow_scale && wheel != 0.0 {
            self.zoom(viewport, pointer.position(), wheel, surface_size);
        }

        let rotating = self.allow_rotation
            && pointer.button_pressed(self.drag_button)
            && pointer.button_pressed(self.rotate_button);

        if rotating {
            let p = pointer.position();
            match self.rotation_point {
                None => {
                    self.rotation_point = Some(p);
                    self.rotation_initial = viewport.rotation();
                    log::debug!("viewport rotate start at {p:?}");
                }
                Some(pivot) => {
                    viewport.set_rotation(self.rotation_initial + (p - pivot).angle());
                }
            }
            return;
        }

        if self.rotation_point.take().is_some() {
            log::debug!("viewport rotate end");
        }

        if self.allow_drag && pointer.button_pressed(self.drag_button) {
            let delta = pointer.delta();
            if delta != Vec2::zero() {
                viewport.set_position(viewport.position() + delta);
            }
        }
    }

    fn zoom(&self, viewport: &mut Viewport, pointer: Vec2, wheel: f32, surface_size: Vec2) {
        let scale = viewport.scale();
        viewport.set_scale(scale - wheel * self.zoom_speed * scale);

        if self.move_on_scale && surface_size.x > 0.0 && surface_size.y > 0.0 {
            let half = surface_size * 0.5;
            let mut position = viewport.position();
            position.x += (pointer.x - half.x) / half.x * wheel;
            position.y += (pointer.y - half.y) / half.y * wheel;
            viewport.set_position(position);
        }

        log::trace!("viewport zoom {:.4}", viewport.scale());
    }
}
