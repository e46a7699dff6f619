/// Z-layer of a draw item. Higher layers paint over lower ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// Backdrop layer for background fills and shadows.
    pub const BACKGROUND: ZIndex = ZIndex(-100);
    pub const CONTENT: ZIndex = ZIndex(0);
    /// UI chrome (panels, buttons) sits above simulation content.
    pub const UI: ZIndex = ZIndex(100);
    pub const OVERLAY: ZIndex = ZIndex(200);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn above(self, n: i32) -> Self {
        Self(self.0 + n)
    }
}
