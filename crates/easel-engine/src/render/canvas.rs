use std::collections::HashMap;

use fontdue::layout::GlyphRasterConfig;

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{Border, CircleCmd, DrawCmd, DrawList, RoundedRectCmd, TextCmd};
use crate::text::{FontSystem, PlacedGlyph};

use super::coverage;

struct GlyphBitmap {
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

/// RGBA8 framebuffer in physical pixels.
///
/// Pixels are stored straight-alpha, row-major, top-left origin. Shapes
/// are composited source-over.
pub struct Canvas {
    width: u32,
    height: u32,
    scale: f32,
    pixels: Vec<[u8; 4]>,
    glyphs: HashMap<GlyphRasterConfig, GlyphBitmap>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
            pixels: vec![[0, 0, 0, 0]; width as usize * height as usize],
            glyphs: HashMap::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the logical-to-physical scale. Invalid factors fall back to 1.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        // Cached glyphs were rasterized at the old physical size.
        self.glyphs.clear();
    }

    /// Resizes the buffer. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0, 0]; width as usize * height as usize];
    }

    /// Raw RGBA8 bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel at physical coordinates, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[y as usize * self.width as usize + x as usize];
        Some(Color::rgba(r, g, b, a))
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill([color.r, color.g, color.b, color.a]);
    }

    /// Paints every item of `list` back-to-front.
    pub fn render(&mut self, list: &mut DrawList, fonts: &FontSystem) {
        for item in list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Rect(c) => self.fill_rect(c.rect, c.color),
                DrawCmd::RoundedRect(c) => self.fill_rounded_rect(c),
                DrawCmd::Circle(c) => self.fill_circle(c),
                DrawCmd::Text(c) => self.draw_text(c, fonts),
            }
        }
    }

    /// Fills an axis-aligned rectangle given in logical pixels.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !rect.is_finite() || color.a == 0 {
            return;
        }
        let r = self.to_physical(rect.normalized());
        let (x1, y1) = (r.origin.x + r.size.x, r.origin.y + r.size.y);
        let Some((px0, py0, px1, py1)) = self.pixel_bounds(r) else {
            return;
        };
        for py in py0..py1 {
            let cy = coverage::span(py as f32, r.origin.y, y1);
            for px in px0..px1 {
                let cx = coverage::span(px as f32, r.origin.x, x1);
                self.blend(px, py, color, cx * cy);
            }
        }
    }

    fn fill_rounded_rect(&mut self, cmd: &RoundedRectCmd) {
        if !cmd.rect.is_finite() || !cmd.radius.is_finite() {
            return;
        }
        let r = self.to_physical(cmd.rect.normalized());
        let center = r.center();
        let half = Vec2::new(r.size.x * 0.5, r.size.y * 0.5);
        let radius = cmd.radius * self.scale;
        self.fill_shape(r, cmd.fill, cmd.border, |p| {
            coverage::rounded_box_sdf(p - center, half, radius)
        });
    }

    fn fill_circle(&mut self, cmd: &CircleCmd) {
        if !cmd.center.is_finite() || !cmd.radius.is_finite() || cmd.radius <= 0.0 {
            return;
        }
        let center = cmd.center * self.scale;
        let radius = cmd.radius * self.scale;
        let bounds = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.fill_shape(bounds, cmd.fill, cmd.border, |p| p.distance(center) - radius);
    }

    /// Paints an SDF shape: border color over the full shape, fill over the
    /// shape shrunk by the border width.
    fn fill_shape(
        &mut self,
        bounds: Rect,
        fill: Color,
        border: Option<Border>,
        sdf: impl Fn(Vec2) -> f32,
    ) {
        let Some((px0, py0, px1, py1)) = self.pixel_bounds(bounds.inset(-1.0)) else {
            return;
        };
        let stroke = border
            .filter(|b| b.width.is_finite() && b.width > 0.0)
            .map(|b| (b.width * self.scale, b.color));

        for py in py0..py1 {
            for px in px0..px1 {
                let d = sdf(Vec2::new(px as f32 + 0.5, py as f32 + 0.5));
                match stroke {
                    Some((width, color)) => {
                        self.blend(px, py, color, coverage::from_distance(d));
                        self.blend(px, py, fill, coverage::from_distance(d + width));
                    }
                    None => self.blend(px, py, fill, coverage::from_distance(d)),
                }
            }
        }
    }

    fn draw_text(&mut self, cmd: &TextCmd, fonts: &FontSystem) {
        if cmd.text.is_empty() || !cmd.origin.is_finite() || !(cmd.size > 0.0) {
            return;
        }
        let size = cmd.size * self.scale;
        let max_width = cmd.max_width.map(|w| w * self.scale);
        let origin = cmd.origin * self.scale;

        for glyph in fonts.layout(&cmd.text, cmd.font, size, max_width) {
            self.cache_glyph(&glyph, fonts);
            let Canvas { width, height, pixels, glyphs, .. } = self;
            let Some(bitmap) = glyphs.get(&glyph.key) else {
                continue;
            };
            let x0 = (origin.x + glyph.x).round() as i64;
            let y0 = (origin.y + glyph.y).round() as i64;

            for gy in 0..bitmap.height {
                for gx in 0..bitmap.width {
                    let a = bitmap.coverage[gy * bitmap.width + gx];
                    if a == 0 {
                        continue;
                    }
                    let (px, py) = (x0 + gx as i64, y0 + gy as i64);
                    if px < 0 || py < 0 || px >= i64::from(*width) || py >= i64::from(*height) {
                        continue;
                    }
                    let idx = py as usize * *width as usize + px as usize;
                    blend_pixel(&mut pixels[idx], cmd.color, f32::from(a) / 255.0);
                }
            }
        }
    }

    fn cache_glyph(&mut self, glyph: &PlacedGlyph, fonts: &FontSystem) {
        if self.glyphs.contains_key(&glyph.key) {
            return;
        }
        if let Some((width, height, coverage)) = fonts.rasterize(glyph) {
            self.glyphs.insert(glyph.key, GlyphBitmap { width, height, coverage });
        }
    }

    fn to_physical(&self, r: Rect) -> Rect {
        Rect::new(
            r.origin.x * self.scale,
            r.origin.y * self.scale,
            r.size.x * self.scale,
            r.size.y * self.scale,
        )
    }

    /// Pixel range `[x0, x1) x [y0, y1)` touched by `r`, clipped to the canvas.
    fn pixel_bounds(&self, r: Rect) -> Option<(u32, u32, u32, u32)> {
        let full = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let clipped = r.intersect(full)?;
        let x0 = clipped.origin.x.floor() as u32;
        let y0 = clipped.origin.y.floor() as u32;
        let x1 = ((clipped.origin.x + clipped.size.x).ceil() as u32).min(self.width);
        let y1 = ((clipped.origin.y + clipped.size.y).ceil() as u32).min(self.height);
        Some((x0, y0, x1, y1))
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, src: Color, cov: f32) {
        let idx = y as usize * self.width as usize + x as usize;
        blend_pixel(&mut self.pixels[idx], src, cov);
    }
}

/// Source-over composite of `src` scaled by `cov` onto a straight-alpha pixel.
fn blend_pixel(dst: &mut [u8; 4], src: Color, cov: f32) {
    let sa = f32::from(src.a) / 255.0 * cov;
    if sa <= 0.0 {
        return;
    }
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }
    let mix = |s: u8, d: u8| {
        let v = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    *dst = [
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ];
}
