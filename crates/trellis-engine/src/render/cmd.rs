use crate::coords::{Matrix2D, Vec2};
use crate::paint::Color;

use super::ImageId;

/// One recorded [`Surface`](super::Surface) call.
///
/// Extending the surface contract:
/// - add the method to `Surface`
/// - add a matching variant here
/// - record it in `DrawList`'s `Surface` impl
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    Save,
    Restore,
    SetTransform(Matrix2D),
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    BezierCurveTo { c1: Vec2, c2: Vec2, to: Vec2 },
    Rect { min: Vec2, size: Vec2 },
    Arc { center: Vec2, radius: f32, start: f32, end: f32 },
    ClosePath,
    Clip,
    Fill,
    Stroke,
    FillColor(Color),
    StrokeColor(Color),
    LineWidth(f32),
    Image { image: ImageId, min: Vec2, size: Vec2 },
    Text { text: String, origin: Vec2, size: f32 },
}

impl DrawCmd {
    /// Whether the command puts pixels on the surface.
    #[inline]
    pub fn is_paint(&self) -> bool {
        matches!(self, DrawCmd::Fill | DrawCmd::Stroke | DrawCmd::Image { .. } | DrawCmd::Text { .. })
    }
}
