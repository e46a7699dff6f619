use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// Stroke drawn inside the outer edge of a shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radius: f32,
    pub fill: Color,
    pub border: Option<Border>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Color,
    pub border: Option<Border>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text block in logical pixels.
    pub origin: Vec2,
    /// Wrapping width in logical pixels. `None` = single line.
    pub max_width: Option<f32>,
}

/// Renderer-agnostic draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Circle(CircleCmd),
    Text(TextCmd),
}

impl DrawCmd {
    /// Conservative bounds of the command; text reports its origin only.
    pub fn bounds(&self) -> Rect {
        match self {
            DrawCmd::Rect(c) => c.rect,
            DrawCmd::RoundedRect(c) => c.rect,
            DrawCmd::Circle(c) => Rect::new(
                c.center.x - c.radius,
                c.center.y - c.radius,
                c.radius * 2.0,
                c.radius * 2.0,
            ),
            DrawCmd::Text(c) => Rect::new(c.origin.x, c.origin.y, 0.0, 0.0),
        }
    }
}
