use core::ops::Mul;

use super::Vec2;

/// 2D affine transform stored as `[a, b, c, d, e, f]`.
///
/// Same layout as a canvas `setTransform(a, b, c, d, e, f)` call:
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
///
/// Products read right to left: in `A · B`, `B` is applied to points first.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix2D {
    pub m: [f32; 6],
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2D {
    pub const IDENTITY: Self = Self { m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0] };

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { m: [a, b, c, d, e, f] }
    }

    #[inline]
    pub const fn translation(x: f32, y: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    #[inline]
    pub const fn scaling(x: f32, y: f32) -> Self {
        Self::new(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    #[inline]
    pub fn rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Builds `translate(p) · rotate(angle) · scale(s) · translate(-o)`.
    ///
    /// The origin is applied first so it behaves as the pivot for both
    /// rotation and scale.
    pub fn compose(px: f32, py: f32, sx: f32, sy: f32, ox: f32, oy: f32, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let a = cos * sx;
        let b = sin * sx;
        let c = -sin * sy;
        let d = cos * sy;
        Self::new(a, b, c, d, px - (a * ox + c * oy), py - (b * ox + d * oy))
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        let [a, b, c, d, ..] = self.m;
        a * d - b * c
    }

    /// `self = self · other`.
    pub fn multiply(&mut self, other: &Matrix2D) -> &mut Self {
        let [a0, b0, c0, d0, e0, f0] = self.m;
        let [a1, b1, c1, d1, e1, f1] = other.m;
        self.m = [
            a0 * a1 + c0 * b1,
            b0 * a1 + d0 * b1,
            a0 * c1 + c0 * d1,
            b0 * c1 + d0 * d1,
            a0 * e1 + c0 * f1 + e0,
            b0 * e1 + d0 * f1 + f0,
        ];
        self
    }

    /// `self = other · self`.
    pub fn premultiply(&mut self, other: &Matrix2D) -> &mut Self {
        let mut out = *other;
        out.multiply(self);
        *self = out;
        self
    }

    /// `self = self · translate(x, y)`.
    pub fn translate(&mut self, x: f32, y: f32) -> &mut Self {
        self.multiply(&Self::translation(x, y))
    }

    /// `self = self · rotate(angle)`.
    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        self.multiply(&Self::rotation(angle))
    }

    /// `self = self · scale(x, y)`.
    pub fn scale(&mut self, x: f32, y: f32) -> &mut Self {
        self.multiply(&Self::scaling(x, y))
    }

    /// Inverse transform.
    ///
    /// A zero determinant yields non-finite components; callers must not
    /// build degenerate transforms. Use [`try_inverse`](Self::try_inverse) to
    /// check instead.
    pub fn inverse(&self) -> Matrix2D {
        let [a, b, c, d, e, f] = self.m;
        let inv = 1.0 / self.determinant();
        Self::new(
            d * inv,
            -b * inv,
            -c * inv,
            a * inv,
            (c * f - d * e) * inv,
            (b * e - a * f) * inv,
        )
    }

    pub fn try_inverse(&self) -> Option<Matrix2D> {
        if self.determinant() == 0.0 {
            None
        } else {
            Some(self.inverse())
        }
    }

    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let [a, b, c, d, e, f] = self.m;
        Vec2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Maps `p` through the inverse of this transform.
    #[inline]
    pub fn inverse_transform_point(&self, p: Vec2) -> Vec2 {
        self.inverse().transform_point(p)
    }

    /// Translation component.
    #[inline]
    pub fn translation_part(&self) -> Vec2 {
        Vec2::new(self.m[4], self.m[5])
    }

    pub fn approx_eq(&self, other: &Matrix2D, epsilon: f32) -> bool {
        self.m.iter().zip(other.m.iter()).all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Mul for Matrix2D {
    type Output = Matrix2D;
    #[inline]
    fn mul(mut self, rhs: Matrix2D) -> Matrix2D {
        self.multiply(&rhs);
        self
    }
}
