use crate::coords::{Matrix2D, Vec2};
use crate::paint::Color;

use super::{DrawCmd, ImageId, Surface};

/// A recorded command plus the surface state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// Current transform when the command was recorded.
    pub transform: Matrix2D,
    /// Number of clip regions active when the command was recorded.
    pub clip_depth: u32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct State {
    transform: Matrix2D,
    clip_depth: u32,
}

impl Default for State {
    fn default() -> Self {
        Self { transform: Matrix2D::IDENTITY, clip_depth: 0 }
    }
}

/// Recording [`Surface`].
///
/// Every call is appended in order. `transform()` is recorded as the
/// resulting absolute `SetTransform`, so each item carries the full matrix it
/// applies under without replaying the stream.
///
/// Performance characteristics:
/// - recording is O(1) per call
/// - `clear_recording()` keeps allocated capacity for reuse across frames
#[derive(Debug)]
pub struct DrawList {
    items: Vec<DrawItem>,
    size: Vec2,

    state: State,
    /// Saved states; `save`/`restore` calls must be balanced.
    stack: Vec<State>,

    /// Advance per character used by `measure_text`, as a fraction of the font size.
    pub glyph_advance: f32,
}

impl DrawList {
    pub fn new(size: Vec2) -> Self {
        Self {
            items: Vec::new(),
            size,
            state: State::default(),
            stack: Vec::new(),
            glyph_advance: 0.6,
        }
    }

    /// Drops recorded items and resets the state stack.
    pub fn clear_recording(&mut self) {
        self.items.clear();
        self.state = State::default();
        self.stack.clear();
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Items in recording order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Commands in recording order, without state.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCmd> {
        self.items.iter().map(|i| &i.cmd)
    }

    /// Current save/restore nesting.
    #[inline]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Current transform.
    #[inline]
    pub fn current_transform(&self) -> Matrix2D {
        self.state.transform
    }

    #[inline]
    fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem {
            cmd,
            transform: self.state.transform,
            clip_depth: self.state.clip_depth,
        });
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new(Vec2::new(800.0, 600.0))
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.push(DrawCmd::Clear);
    }

    fn save(&mut self) {
        self.stack.push(self.state);
        self.push(DrawCmd::Save);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => log::warn!("DrawList::restore without matching save"),
        }
        self.push(DrawCmd::Restore);
    }

    fn set_transform(&mut self, m: &Matrix2D) {
        self.state.transform = *m;
        self.push(DrawCmd::SetTransform(*m));
    }

    fn transform(&mut self, m: &Matrix2D) {
        let mut next = self.state.transform;
        next.multiply(m);
        self.set_transform(&next);
    }

    fn begin_path(&mut self) {
        self.push(DrawCmd::BeginPath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.push(DrawCmd::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.push(DrawCmd::LineTo(p));
    }

    fn bezier_curve_to(&mut self, c1: Vec2, c2: Vec2, to: Vec2) {
        self.push(DrawCmd::BezierCurveTo { c1, c2, to });
    }

    fn rect(&mut self, min: Vec2, size: Vec2) {
        self.push(DrawCmd::Rect { min, size });
    }

    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.push(DrawCmd::Arc { center, radius, start, end });
    }

    fn close_path(&mut self) {
        self.push(DrawCmd::ClosePath);
    }

    fn clip(&mut self) {
        self.state.clip_depth += 1;
        self.push(DrawCmd::Clip);
    }

    fn fill(&mut self) {
        self.push(DrawCmd::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCmd::Stroke);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push(DrawCmd::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.push(DrawCmd::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.push(DrawCmd::LineWidth(width));
    }

    fn fill_text(&mut self, text: &str, origin: Vec2, size: f32) {
        self.push(DrawCmd::Text { text: text.to_owned(), origin, size });
    }

    fn draw_image(&mut self, image: ImageId, min: Vec2, size: Vec2) {
        self.push(DrawCmd::Image { image, min, size });
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.glyph_advance
    }
}
