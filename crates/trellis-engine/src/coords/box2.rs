use super::Vec2;

/// Axis-aligned box stored as a `min`/`max` corner pair.
///
/// The default box is empty (`min = +∞`, `max = −∞`) so that expanding it by
/// points yields exactly their bounds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Box2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Box2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Box2 {
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub const fn empty() -> Self {
        Self {
            min: Vec2::splat(f32::INFINITY),
            max: Vec2::splat(f32::NEG_INFINITY),
        }
    }

    /// Box of size `size` centred on `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Replaces the box with the bounds of `points`. No points gives an empty box.
    pub fn set_from_points(&mut self, points: &[Vec2]) -> &mut Self {
        *self = Self::empty();
        for &p in points {
            self.expand_by_point(p);
        }
        self
    }

    pub fn from_points(points: &[Vec2]) -> Self {
        let mut b = Self::empty();
        b.set_from_points(points);
        b
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        if self.is_empty() {
            Vec2::zero()
        } else {
            (self.min + self.max) * 0.5
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        if self.is_empty() {
            Vec2::zero()
        } else {
            self.max - self.min
        }
    }

    pub fn expand_by_point(&mut self, p: Vec2) -> &mut Self {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
        self
    }

    /// Grows the box by `amount` on every side.
    pub fn expand_by_scalar(&mut self, amount: f32) -> &mut Self {
        self.min -= Vec2::splat(amount);
        self.max += Vec2::splat(amount);
        self
    }

    /// Closed containment: points on the edge are inside.
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn contains_box(&self, other: &Box2) -> bool {
        self.min.x <= other.min.x
            && other.max.x <= self.max.x
            && self.min.y <= other.min.y
            && other.max.y <= self.max.y
    }

    #[inline]
    pub fn intersects_box(&self, other: &Box2) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y)
    }

    /// Overlap of both boxes. Disjoint boxes produce an empty box.
    pub fn intersect(&self, other: &Box2) -> Box2 {
        Box2::new(self.min.max(other.min), self.max.min(other.max))
    }

    pub fn union(&self, other: &Box2) -> Box2 {
        Box2::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn translate(&mut self, offset: Vec2) -> &mut Self {
        self.min += offset;
        self.max += offset;
        self
    }

    /// Nearest point inside the box.
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.max(self.min).min(self.max)
    }

    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        self.clamp_point(p).distance(p)
    }
}
