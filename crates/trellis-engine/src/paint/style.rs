use crate::render::Surface;

use super::Color;

/// Fill and stroke settings applied by a shape before it draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// `None` = no fill.
    pub fill: Option<Color>,
    /// `None` = no stroke.
    pub stroke: Option<Color>,
    pub line_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: Some(Color::BLACK),
            line_width: 1.0,
        }
    }
}

impl Style {
    #[inline]
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), stroke: None, line_width: 1.0 }
    }

    #[inline]
    pub fn stroked(color: Color, line_width: f32) -> Self {
        Self { fill: None, stroke: Some(color), line_width }
    }

    #[inline]
    pub fn with_fill(mut self, color: Option<Color>) -> Self {
        self.fill = color;
        self
    }

    #[inline]
    pub fn with_stroke(mut self, color: Option<Color>, line_width: f32) -> Self {
        self.stroke = color;
        self.line_width = line_width;
        self
    }

    /// Pushes colors and line width to the surface.
    pub fn apply(&self, surface: &mut dyn Surface) {
        if let Some(fill) = self.fill {
            surface.set_fill_color(fill);
        }
        if let Some(stroke) = self.stroke {
            surface.set_stroke_color(stroke);
            surface.set_line_width(self.line_width);
        }
    }

    /// Fills and/or strokes the current path.
    pub fn paint_path(&self, surface: &mut dyn Surface) {
        if self.fill.is_some() {
            surface.fill();
        }
        if self.stroke.is_some() {
            surface.stroke();
        }
    }
}
