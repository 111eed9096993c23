use crate::coords::{Matrix2D, Vec2};
use crate::scene::{NodeId, Scene};

/// Camera transform mapping world space to surface space.
///
/// `matrix = translate(position) · rotate(rotation) · scale(scale, scale)`.
/// Setters mark the matrix dirty; [`refresh`](Self::refresh) rebuilds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    position: Vec2,
    scale: f32,
    rotation: f32,

    matrix: Matrix2D,
    inverse: Matrix2D,
    dirty: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            position: Vec2::zero(),
            scale: 1.0,
            rotation: 0.0,
            matrix: Matrix2D::IDENTITY,
            inverse: Matrix2D::IDENTITY,
            dirty: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.dirty = true;
    }

    /// Uniform zoom factor. Zero is a caller error.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.dirty = true;
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.dirty = true;
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// World → surface. Current as of the last [`refresh`](Self::refresh).
    #[inline]
    pub fn matrix(&self) -> &Matrix2D {
        &self.matrix
    }

    /// Surface → world.
    #[inline]
    pub fn inverse_matrix(&self) -> &Matrix2D {
        &self.inverse
    }

    /// Rebuilds the matrices if any attribute changed.
    pub fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        self.matrix = Matrix2D::translation(self.position.x, self.position.y)
            * Matrix2D::rotation(self.rotation)
            * Matrix2D::scaling(self.scale, self.scale);
        self.inverse = self.matrix.inverse();
        self.dirty = false;
    }

    /// Moves the camera so `id` lands in the middle of the surface.
    ///
    /// One-shot; uses the node's last computed world matrix and ignores
    /// viewport rotation. Unknown ids are ignored.
    pub fn center_on(&mut self, scene: &Scene, id: NodeId, surface_size: Vec2) {
        let Some(world) = scene.world_position(id) else {
            return;
        };
        self.set_position(world * -self.scale + surface_size * 0.5);
    }

    #[inline]
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        self.inverse.transform_point(p)
    }

    #[inline]
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        self.matrix.transform_point(p)
    }
}
