use crate::coords::{Box2, Vec2};
use crate::paint::Style;
use crate::render::Surface;

use super::Shape;

/// Axis-aligned box in local space.
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub bounds: Box2,
    pub style: Style,
}

impl RectShape {
    #[inline]
    pub fn new(bounds: Box2, style: Style) -> Self {
        Self { bounds, style }
    }

    /// Box of `size` centred on the local origin.
    #[inline]
    pub fn centered(size: Vec2, style: Style) -> Self {
        Self::new(Box2::from_center_size(Vec2::zero(), size), style)
    }
}

impl Shape for RectShape {
    fn contains(&self, point: Vec2) -> bool {
        self.bounds.contains_point(point)
    }

    fn bounds(&self) -> Box2 {
        self.bounds
    }

    fn trace(&self, surface: &mut dyn Surface) {
        surface.rect(self.bounds.min, self.bounds.size());
    }

    fn style(&self, surface: &mut dyn Surface) {
        self.style.apply(surface);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        self.trace(surface);
        self.style.paint_path(surface);
    }
}
