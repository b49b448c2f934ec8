//! Bilinear-sampling image comparison
//!
//! A result pixel is accepted when it is within threshold of some pixel in the
//! 3x3 neighborhood of the other image, or of a bilinear sample of the other
//! image at one of 28 fixed sub-pixel positions around it. Both directions are
//! tried, so displacement in either image is tolerated.
//!
//! Sampling is done in 8-bit fixed point with exact integer rounding. The
//! sample positions are a fixed table. Together these make verdicts
//! bit-identical across runs and implementations.

use crate::buffer::{ConstPixelBufferAccess, ImageAccess, PixelBufferAccess};
use crate::format::TextureFormat;
use crate::options::CompareOptions;
use crate::parallel;
use crate::report::CompareReport;
use crate::rgba::{Rgba, compare_threshold, in_bounds, in_range};
use crate::view::Rgba8View;
use crate::{Error, Result};
use tracing::debug;

/// Fractional bits of the fixed-point sample coordinates
pub const NUM_SUBPIXEL_BITS: u32 = 8;

/// Error mask color for accepted pixels
///
/// Normalized masks store this as full green. An UNSIGNED_INT8 mask stores
/// the raw channel values `[0, 1, 0, 1]`.
pub const ERROR_MASK_OK: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Error mask color for rejected pixels
pub const ERROR_MASK_FAIL: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Sub-pixel sample positions, relative to one pixel up and left of the
/// compared pixel. Each entry is `(u, v)` in fixed point, in `[0, 512)`.
pub static SAMPLE_OFFSETS: [[i32; 2]; 28] = [
    [226, 186],
    [335, 235],
    [279, 334],
    [178, 272],
    [112, 202],
    [306, 117],
    [396, 299],
    [206, 382],
    [146, 96],
    [423, 155],
    [361, 412],
    [84, 339],
    [48, 130],
    [367, 43],
    [455, 367],
    [105, 439],
    [83, 46],
    [217, 24],
    [461, 71],
    [450, 459],
    [239, 469],
    [67, 267],
    [459, 255],
    [13, 416],
    [10, 192],
    [141, 502],
    [503, 304],
    [380, 506],
];

// Indices into the clamped [x-1, x, x+1] / [y-1, y, y+1] coordinates
const NEIGHBORHOOD: [(usize, usize); 9] = [
    (1, 1),
    (0, 1),
    (2, 1),
    (0, 0),
    (1, 0),
    (2, 0),
    (0, 2),
    (1, 2),
    (2, 2),
];

/// Bilinearly interpolate one 8-bit channel
///
/// `fx1`, `fy1` are the fractional position in `[0, 256]`. `p00` is the
/// sample at `(x0, y0)`, `p10` at `(x1, y0)`, `p01` at `(x0, y1)` and `p11` at
/// `(x1, y1)`. Rounds half up.
#[inline]
pub fn interpolate_channel(fx1: u32, fy1: u32, p00: u8, p01: u8, p10: u8, p11: u8) -> u8 {
    let one = 1u32 << NUM_SUBPIXEL_BITS;
    debug_assert!(fx1 <= one && fy1 <= one);

    let fx0 = one - fx1;
    let fy0 = one - fy1;
    let half = 1u32 << (NUM_SUBPIXEL_BITS * 2 - 1);
    let sum = fx0 * fy0 * p00 as u32
        + fx1 * fy0 * p10 as u32
        + fx0 * fy1 * p01 as u32
        + fx1 * fy1 * p11 as u32;
    let rounded = (sum + half) >> (NUM_SUBPIXEL_BITS * 2);

    assert!(
        in_range(rounded as i32, 0, 0xff),
        "interpolated channel out of range: {rounded}"
    );
    rounded as u8
}

/// Bilinearly sample `view` at fixed-point `(u, v)`
///
/// Both `(u >> 8, v >> 8)` and its right and lower neighbors must be inside
/// the view.
#[inline]
pub fn bilinear_sample_rgba8(view: &Rgba8View<'_>, u: i32, v: i32) -> Rgba {
    assert!(u >= 0 && v >= 0, "negative sample position ({u}, {v})");
    let x0 = (u >> NUM_SUBPIXEL_BITS) as usize;
    let y0 = (v >> NUM_SUBPIXEL_BITS) as usize;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    assert!(x1 < view.width(), "sample column {x1} out of range");
    assert!(y1 < view.height(), "sample row {y1} out of range");

    let fx1 = (u - ((x0 as i32) << NUM_SUBPIXEL_BITS)) as u32;
    let fy1 = (v - ((y0 as i32) << NUM_SUBPIXEL_BITS)) as u32;

    let p00 = view.read(x0, y0).to_array();
    let p10 = view.read(x1, y0).to_array();
    let p01 = view.read(x0, y1).to_array();
    let p11 = view.read(x1, y1).to_array();

    Rgba::from_array(std::array::from_fn(|c| {
        interpolate_channel(fx1, fy1, p00[c], p01[c], p10[c], p11[c])
    }))
}

/// Check whether `source`'s pixel at `(x, y)` has a match near `(x, y)` in
/// `candidate`
///
/// First the 3x3 neighborhood of `candidate` (clamped at the edges) is tried,
/// then bilinear samples of `candidate` at [`SAMPLE_OFFSETS`]. Samples whose
/// position would need a neighbor outside the image are skipped.
#[inline]
pub fn compare_pixel_rgba8(
    source: &Rgba8View<'_>,
    candidate: &Rgba8View<'_>,
    threshold: Rgba,
    x: usize,
    y: usize,
) -> bool {
    let pixel = source.read(x, y);
    let width = candidate.width();
    let height = candidate.height();

    // Step 1: direct 3x3 neighborhood.
    let xs = [x.saturating_sub(1), x, (x + 1).min(width - 1)];
    let ys = [y.saturating_sub(1), y, (y + 1).min(height - 1)];

    if NEIGHBORHOOD
        .iter()
        .any(|&(i, j)| compare_threshold(pixel, candidate.read(xs[i], ys[j]), threshold))
    {
        return true;
    }

    // Step 2: bilinear samples.
    let u_end = ((width - 1) as i32) << NUM_SUBPIXEL_BITS;
    let v_end = ((height - 1) as i32) << NUM_SUBPIXEL_BITS;
    let base_u = (x as i32 - 1) << NUM_SUBPIXEL_BITS;
    let base_v = (y as i32 - 1) << NUM_SUBPIXEL_BITS;

    for &[ou, ov] in SAMPLE_OFFSETS.iter() {
        let u = base_u + ou;
        let v = base_v + ov;

        if !in_bounds(u, 0, u_end) || !in_bounds(v, 0, v_end) {
            continue;
        }

        if compare_threshold(pixel, bilinear_sample_rgba8(candidate, u, v), threshold) {
            return true;
        }
    }

    false
}

/// Pixel is accepted if a match exists looking from either image
#[inline]
pub(crate) fn pixel_matches(
    reference: &Rgba8View<'_>,
    result: &Rgba8View<'_>,
    threshold: Rgba,
    x: usize,
    y: usize,
) -> bool {
    compare_pixel_rgba8(reference, result, threshold, x, y)
        || compare_pixel_rgba8(result, reference, threshold, x, y)
}

/// Compare two RGBA8 views of equal size, painting `error_mask`
///
/// Returns `true` if every pixel matched.
pub fn bilinear_compare_rgba8(
    reference: &Rgba8View<'_>,
    result: &Rgba8View<'_>,
    error_mask: &mut PixelBufferAccess<'_>,
    threshold: Rgba,
) -> bool {
    bilinear_compare_rgba8_report(reference, result, error_mask, threshold).passed
}

/// Same as [`bilinear_compare_rgba8`], returning mismatch counts
pub fn bilinear_compare_rgba8_report(
    reference: &Rgba8View<'_>,
    result: &Rgba8View<'_>,
    error_mask: &mut PixelBufferAccess<'_>,
    threshold: Rgba,
) -> CompareReport {
    check_view_extents(reference, result, error_mask);

    // Clear to green first, then only failures need writing.
    error_mask.clear(ERROR_MASK_OK);

    let mut report = CompareReport::new(reference.width() * reference.height());
    for y in 0..reference.height() {
        for x in 0..reference.width() {
            if !pixel_matches(reference, result, threshold, x, y) {
                report.record_mismatch();
                error_mask.set_pixel(ERROR_MASK_FAIL, x, y, 0);
            }
        }
    }

    report
}

/// Compare `reference` against `result`, painting `error_mask`
///
/// All three images must share extents, otherwise
/// [`Error::DimensionMismatch`] is returned. Only RGBA / UNORM_INT8 images can
/// be compared; any other format yields [`Error::UnsupportedFormat`]. A
/// finished comparison returns `Ok(true)` when every pixel matched.
pub fn bilinear_compare(
    reference: &ConstPixelBufferAccess<'_>,
    result: &ConstPixelBufferAccess<'_>,
    error_mask: &mut PixelBufferAccess<'_>,
    threshold: Rgba,
) -> Result<bool> {
    let options = CompareOptions::default().with_threshold(threshold);
    bilinear_compare_with_options(reference, result, error_mask, &options)
        .map(|report| report.passed)
}

/// [`bilinear_compare`] with explicit options, returning mismatch counts
///
/// Images with more than one depth slice are compared slice by slice, each
/// slice painting the matching slice of `error_mask`.
pub fn bilinear_compare_with_options(
    reference: &ConstPixelBufferAccess<'_>,
    result: &ConstPixelBufferAccess<'_>,
    error_mask: &mut PixelBufferAccess<'_>,
    options: &CompareOptions,
) -> Result<CompareReport> {
    check_extents("Reference and result images", reference, result)?;
    check_extents("Reference and error mask images", reference, &*error_mask)?;

    for format in [reference.format(), result.format()] {
        if format != TextureFormat::RGBA8 {
            return Err(Error::UnsupportedFormat(format));
        }
    }

    debug!(
        width = reference.width(),
        height = reference.height(),
        depth = reference.depth(),
        parallel = options.parallel,
        "bilinear compare"
    );

    let mut report = CompareReport::new(0);
    for z in 0..reference.depth() {
        let ref_view = Rgba8View::from_slice(reference, z)?;
        let res_view = Rgba8View::from_slice(result, z)?;
        let mut mask = error_mask.slice_mut(z);

        let slice_report = if options.parallel {
            parallel::bilinear_compare_rgba8_parallel(
                &ref_view,
                &res_view,
                &mut mask,
                options.threshold,
            )
        } else {
            bilinear_compare_rgba8_report(&ref_view, &res_view, &mut mask, options.threshold)
        };
        report.merge(&slice_report);
    }

    Ok(report)
}

fn check_extents(
    what: &'static str,
    expected: &impl ImageAccess,
    actual: &impl ImageAccess,
) -> Result<()> {
    if expected.extents() != actual.extents() {
        return Err(Error::DimensionMismatch {
            what,
            expected: expected.extents(),
            actual: actual.extents(),
        });
    }
    Ok(())
}

pub(crate) fn check_view_extents(
    reference: &Rgba8View<'_>,
    result: &Rgba8View<'_>,
    error_mask: &PixelBufferAccess<'_>,
) {
    assert_eq!(
        (reference.width(), reference.height()),
        (result.width(), result.height()),
        "reference and result views differ in size"
    );
    assert!(
        error_mask.width() == reference.width() && error_mask.height() == reference.height(),
        "error mask differs in size from reference"
    );
}
