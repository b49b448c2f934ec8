//! Error types for imgcmp

use crate::format::TextureFormat;
use thiserror::Error;

/// Result type for imgcmp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or running an image comparison
///
/// A comparison that runs to completion and finds differing pixels is not an
/// error: it returns `Ok(false)` and paints the error mask.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Two images that must share extents do not
    #[error("{what} have different dimensions: {expected:?} vs {actual:?}")]
    DimensionMismatch {
        /// Which pair of images was being checked
        what: &'static str,
        /// Extents `[width, height, depth]` of the image used as reference
        expected: [usize; 3],
        /// Extents `[width, height, depth]` of the other image
        actual: [usize; 3],
    },

    /// Pixel format the comparator cannot judge
    #[error("Unsupported format for bilinear comparison: {0}")]
    UnsupportedFormat(TextureFormat),

    /// Buffer size mismatch
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Byte size of the described image does not fit in `usize`
    #[error("Image size overflows: {width}x{height}x{depth}")]
    SizeOverflow {
        width: usize,
        height: usize,
        depth: usize,
    },

    /// Row or slice pitch smaller than the packed row or slice
    #[error("Invalid pitch: row pitch {row_pitch}, slice pitch {slice_pitch}")]
    InvalidPitch { row_pitch: usize, slice_pitch: usize },
}
