use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::Color;

use crate::element::{Drawable, Element, ElementBase};
use crate::painter::Painter;
use crate::theme;

/// Soft shadow drawn under a panel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shadow {
    pub offset: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Static background with optional text lines. Ignores input.
pub struct UiPanel {
    base: ElementBase,
    rect: Rect,
    background: Color,
    radius: f32,
    shadow: Option<Shadow>,
    lines: Vec<(String, Color)>,
    font_size: f32,
    padding: f32,
    line_gap: f32,
}

impl UiPanel {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            base: ElementBase::new(name),
            rect,
            background: theme::PANEL,
            radius: 0.0,
            shadow: None,
            lines: Vec::new(),
            font_size: theme::FONT_SIZE_SMALL,
            padding: 8.0,
            line_gap: 4.0,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn line(mut self, text: impl Into<String>, color: Color) -> Self {
        self.lines.push((text.into(), color));
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn set_lines(&mut self, lines: impl IntoIterator<Item = (String, Color)>) {
        self.lines = lines.into_iter().collect();
    }

    pub fn lines(&self) -> &[(String, Color)] {
        &self.lines
    }
}

impl Drawable for UiPanel {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn draw(&self, painter: &mut Painter<'_>) {
        if let Some(shadow) = self.shadow {
            let r = self.rect.translate(shadow.offset.x, shadow.offset.y);
            painter.fill_rounded_rect(r, shadow.radius, shadow.color, None);
        }
        painter.fill_rounded_rect(self.rect, self.radius, self.background, None);

        let mut origin = self.rect.origin + Vec2::new(self.padding, self.padding);
        for (text, color) in &self.lines {
            painter.text(text.clone(), self.font_size, *color, origin);
            origin.y += self.font_size + self.line_gap;
        }
    }
}

impl Element for UiPanel {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}
