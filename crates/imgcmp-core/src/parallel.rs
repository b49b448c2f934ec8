//! Row-parallel comparison driver
//!
//! Rows have no data dependency on each other, so each row's mismatch bitmap
//! is computed on the rayon pool and the error mask is painted afterwards.
//! Verdict and mask are identical to the sequential driver.

use crate::bilinear::{ERROR_MASK_FAIL, ERROR_MASK_OK, check_view_extents, pixel_matches};
use crate::buffer::{ImageAccess, PixelBufferAccess};
use crate::report::CompareReport;
use crate::rgba::Rgba;
use crate::view::Rgba8View;
use multiversion::multiversion;
use rayon::prelude::*;

/// Mark mismatching pixels of row `y`
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
fn compare_row<'a>(
    reference: &Rgba8View<'a>,
    result: &Rgba8View<'a>,
    threshold: Rgba,
    y: usize,
    mismatches: &mut [bool],
) {
    for (x, mismatch) in mismatches.iter_mut().enumerate() {
        *mismatch = !pixel_matches(reference, result, threshold, x, y);
    }
}

/// Parallel counterpart of
/// [`bilinear_compare_rgba8_report`](crate::bilinear_compare_rgba8_report)
pub fn bilinear_compare_rgba8_parallel(
    reference: &Rgba8View<'_>,
    result: &Rgba8View<'_>,
    error_mask: &mut PixelBufferAccess<'_>,
    threshold: Rgba,
) -> CompareReport {
    check_view_extents(reference, result, error_mask);

    let width = reference.width();
    let height = reference.height();
    let mut mismatches = vec![false; width * height];

    if width > 0 {
        mismatches
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| compare_row(reference, result, threshold, y, row));
    }

    error_mask.clear(ERROR_MASK_OK);

    let mut report = CompareReport::new(width * height);
    for (i, _) in mismatches.iter().enumerate().filter(|(_, m)| **m) {
        report.record_mismatch();
        error_mask.set_pixel(ERROR_MASK_FAIL, i % width, i / width, 0);
    }

    report
}
