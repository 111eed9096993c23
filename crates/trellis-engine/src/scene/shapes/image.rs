use crate::coords::{Box2, Vec2};
use crate::render::{ImageId, Surface};

use super::Shape;

/// Host image stretched over a local box. Hit-tests as its box.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageShape {
    pub image: ImageId,
    pub bounds: Box2,
}

impl ImageShape {
    /// Image of `size` centred on the local origin.
    #[inline]
    pub fn centered(image: ImageId, size: Vec2) -> Self {
        Self { image, bounds: Box2::from_center_size(Vec2::zero(), size) }
    }
}

impl Shape for ImageShape {
    fn contains(&self, point: Vec2) -> bool {
        self.bounds.contains_point(point)
    }

    fn bounds(&self) -> Box2 {
        self.bounds
    }

    fn trace(&self, surface: &mut dyn Surface) {
        surface.rect(self.bounds.min, self.bounds.size());
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_image(self.image, self.bounds.min, self.bounds.size());
    }
}
