//! Error mask inspection

use imgcmp_core::{ERROR_MASK_FAIL, ERROR_MASK_OK, ImageAccess, TextureLevel};

/// Pixel counts of an error mask by color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskSummary {
    pub ok: usize,
    pub failed: usize,
    /// Anything neither green nor red
    pub other: usize,
}

/// Count green, red and other pixels across every slice of `mask`
pub fn summarize_mask(mask: &TextureLevel) -> MaskSummary {
    let access = mask.access();
    let mut summary = MaskSummary::default();

    for z in 0..access.depth() {
        for y in 0..access.height() {
            for x in 0..access.width() {
                match access.get_pixel(x, y, z) {
                    c if c == ERROR_MASK_OK => summary.ok += 1,
                    c if c == ERROR_MASK_FAIL => summary.failed += 1,
                    _ => summary.other += 1,
                }
            }
        }
    }

    summary
}

/// Coordinates of red pixels in slice 0, in raster order
pub fn failed_pixels(mask: &TextureLevel) -> Vec<(usize, usize)> {
    let access = mask.access();
    let mut out = Vec::new();

    for y in 0..access.height() {
        for x in 0..access.width() {
            if access.get_pixel(x, y, 0) == ERROR_MASK_FAIL {
                out.push((x, y));
            }
        }
    }

    out
}
