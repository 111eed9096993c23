use crate::coords::{Matrix2D, Vec2};
use crate::paint::Color;

/// Handle to an image owned by the host surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Imperative 2D drawing surface.
///
/// Mirrors the canvas model: a current transform and a current path, plus a
/// save/restore stack for both transform and clip. Transforms use the same
/// six-value layout as [`Matrix2D`].
///
/// Implementations wrap a host API (a canvas context, a vector rasterizer,
/// a GPU path renderer). [`DrawList`](super::DrawList) records the calls
/// instead, which is what tests and headless tools use.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> Vec2;

    /// Clears every pixel, ignoring transform and clip.
    fn clear(&mut self);

    /// Pushes transform, clip and style state.
    fn save(&mut self);

    /// Pops the state pushed by the matching [`save`](Self::save).
    fn restore(&mut self);

    /// Replaces the current transform.
    fn set_transform(&mut self, m: &Matrix2D);

    /// Multiplies the current transform by `m` (`m` applies first).
    fn transform(&mut self, m: &Matrix2D);

    // ── paths ─────────────────────────────────────────────────────────────

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    fn bezier_curve_to(&mut self, c1: Vec2, c2: Vec2, to: Vec2);
    fn rect(&mut self, min: Vec2, size: Vec2);
    /// Circular arc around `center`, angles in radians, clockwise in +Y-down space.
    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);

    /// Intersects the clip region with the current path.
    fn clip(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    // ── style ─────────────────────────────────────────────────────────────

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);

    // ── images ────────────────────────────────────────────────────────────

    /// Blits `image` scaled into the box at `min` with `size`, under the
    /// current transform and clip.
    fn draw_image(&mut self, image: ImageId, min: Vec2, size: Vec2);

    // ── text ──────────────────────────────────────────────────────────────

    /// Draws `text` with its baseline-left at `origin`.
    fn fill_text(&mut self, text: &str, origin: Vec2, size: f32);

    /// Advance width of `text` at `size`.
    fn measure_text(&self, text: &str, size: f32) -> f32;
}
