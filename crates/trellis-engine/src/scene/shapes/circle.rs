use core::f32::consts::TAU;

use crate::coords::{Box2, Vec2};
use crate::paint::Style;
use crate::render::Surface;

use super::Shape;

/// Circle centred on the local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub radius: f32,
    pub style: Style,
}

impl CircleShape {
    #[inline]
    pub fn new(radius: f32, style: Style) -> Self {
        Self { radius, style }
    }
}

impl Shape for CircleShape {
    fn contains(&self, point: Vec2) -> bool {
        point.length_squared() <= self.radius * self.radius
    }

    fn bounds(&self) -> Box2 {
        Box2::from_center_size(Vec2::zero(), Vec2::splat(self.radius * 2.0))
    }

    fn trace(&self, surface: &mut dyn Surface) {
        surface.arc(Vec2::zero(), self.radius, 0.0, TAU);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_radial() {
        let c = CircleShape::new(10.0, Style::default());
        assert!(c.contains(Vec2::new(6.0, 8.0)));
        assert!(!c.contains(Vec2::new(8.0, 8.0)));
    }
}
