//! Pure dimension math for width variants.

/// Height of a variant scaled to `target_width`, preserving aspect ratio.
///
/// Never returns 0, so very wide images still produce a 1px-high variant.
///
/// ```text
/// 1600x1200 → 800  → 800x600
/// 1000x333  → 190  → 190x63
/// ```
pub fn scaled_height(original: (u32, u32), target_width: u32) -> u32 {
    let (w, h) = original;
    if w == 0 {
        return h.max(1);
    }
    let height = (target_width as f64 * h as f64 / w as f64).round() as u32;
    height.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_scales_proportionally() {
        assert_eq!(scaled_height((1600, 1200), 800), 600);
    }

    #[test]
    fn portrait_scales_proportionally() {
        assert_eq!(scaled_height((800, 1000), 390), 488);
    }

    #[test]
    fn rounds_to_nearest_pixel() {
        assert_eq!(scaled_height((1000, 333), 190), 63);
    }

    #[test]
    fn upscaling_is_allowed() {
        assert_eq!(scaled_height((100, 50), 800), 400);
    }

    #[test]
    fn never_zero() {
        assert_eq!(scaled_height((10000, 1), 190), 1);
        assert_eq!(scaled_height((0, 0), 190), 1);
    }
}
