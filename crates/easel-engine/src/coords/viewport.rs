/// Drawable area of a window.
///
/// `width`/`height` are logical pixels; `scale_factor` maps them to the physical
/// pixels the rasterizer writes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height, scale_factor: 1.0 }
    }

    #[inline]
    pub const fn with_scale(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
            && self.scale_factor > 0.0
    }

    /// Size in physical pixels, rounded up so the whole logical area is covered.
    pub fn physical_size(self) -> (u32, u32) {
        let w = (self.width * self.scale_factor).ceil().max(1.0) as u32;
        let h = (self.height * self.scale_factor).ceil().max(1.0) as u32;
        (w, h)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
