//! Per-pixel coverage helpers. All distances are in physical pixels.

use crate::coords::Vec2;

/// Signed distance from `p` to a rounded box centered at the origin.
///
/// Negative inside. `radius` is clamped to the box half-extent.
pub fn rounded_box_sdf(p: Vec2, half: Vec2, radius: f32) -> f32 {
    let r = radius.clamp(0.0, half.x.min(half.y));
    let qx = p.x.abs() - half.x + r;
    let qy = p.y.abs() - half.y + r;
    let outside = Vec2::new(qx.max(0.0), qy.max(0.0));
    let outside_len = (outside.x * outside.x + outside.y * outside.y).sqrt();
    outside_len + qx.max(qy).min(0.0) - r
}

/// Anti-aliased coverage for a signed distance evaluated at a pixel center.
#[inline]
pub fn from_distance(d: f32) -> f32 {
    (0.5 - d).clamp(0.0, 1.0)
}

/// Overlap of the pixel span `[p, p + 1)` with `[lo, hi)`.
#[inline]
pub fn span(p: f32, lo: f32, hi: f32) -> f32 {
    ((p + 1.0).min(hi) - p.max(lo)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdf_sign() {
        let half = Vec2::new(10.0, 5.0);
        assert!(rounded_box_sdf(Vec2::zero(), half, 2.0) < 0.0);
        assert!(rounded_box_sdf(Vec2::new(11.0, 0.0), half, 2.0) > 0.0);
        assert!((rounded_box_sdf(Vec2::new(10.0, 0.0), half, 2.0)).abs() < 1e-4);
    }

    #[test]
    fn rounded_corner_is_outside() {
        // Corner point of the bounding box lies outside the rounded shape.
        let d = rounded_box_sdf(Vec2::new(10.0, 5.0), Vec2::new(10.0, 5.0), 4.0);
        assert!(d > 1.0);
    }

    #[test]
    fn span_overlap() {
        assert_eq!(span(3.0, 0.0, 10.0), 1.0);
        assert_eq!(span(3.0, 3.5, 10.0), 0.5);
        assert_eq!(span(3.0, 5.0, 10.0), 0.0);
    }
}
