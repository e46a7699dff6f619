use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::Color;
use easel_engine::scene::{Border, DrawList, ZIndex};
use easel_engine::text::{FontId, FontSystem};

/// Drawing surface handed to elements and draw hooks.
///
/// Wraps the frame's `DrawList`. Everything drawn goes onto the current
/// layer, in call order.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    font: Option<FontId>,
    layer: ZIndex,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, fonts: &'a FontSystem, font: Option<FontId>) -> Self {
        Self { draw_list, fonts, font, layer: ZIndex::CONTENT }
    }

    #[inline]
    pub fn layer(&self) -> ZIndex {
        self.layer
    }

    pub fn set_layer(&mut self, layer: ZIndex) {
        self.layer = layer;
    }

    /// Default font, if one was loaded.
    #[inline]
    pub fn font(&self) -> Option<FontId> {
        self.font
    }

    #[inline]
    pub fn fonts(&self) -> &FontSystem {
        self.fonts
    }

    /// Size of `text` in the default font. Zero without a font.
    pub fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        match self.font {
            Some(font) => self.fonts.measure_text(text, font, size, None),
            None => Vec2::zero(),
        }
    }

    // ── shapes ────────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw_list.push_rect(self.layer, rect, color);
    }

    /// `radius = 0.0` gives sharp corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, fill: Color, border: Option<Border>) {
        self.draw_list.push_rounded_rect(self.layer, rect, radius, fill, border);
    }

    /// Outline only.
    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Color) {
        self.draw_list.push_rounded_rect(
            self.layer,
            rect,
            radius,
            Color::TRANSPARENT,
            Some(Border::new(width, color)),
        );
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color, border: Option<Border>) {
        self.draw_list.push_circle(self.layer, center, radius, fill, border);
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Text with its top-left at `origin`. Skipped without a font.
    pub fn text(&mut self, text: impl Into<String>, size: f32, color: Color, origin: Vec2) {
        let Some(font) = self.font else {
            return;
        };
        self.draw_list.push_text(self.layer, text, font, size, color, origin, None);
    }

    /// Text centered inside `rect`.
    pub fn text_centered(&mut self, text: &str, size: f32, color: Color, rect: Rect) {
        let extent = self.measure_text(text, size);
        let origin = rect.centered(extent).origin;
        self.text(text, size, color, origin);
    }
}
