//! # imgcmp - tolerant image comparison for rendering conformance tests
//!
//! Pixel-exact comparison is too strict when checking a rendered image
//! against a reference produced by another implementation or other hardware.
//! This crate implements the bilinear comparator: a result pixel is accepted
//! if the reference has a pixel within threshold in its 3x3 neighborhood, or
//! at one of 28 fixed sub-pixel bilinear sample positions around it, looking
//! from either image.
//!
//! Sampling uses exact 8-bit fixed-point arithmetic and a fixed sample table,
//! so verdicts are reproducible bit for bit.
//!
//! ## Quick Start
//!
//! ```
//! use imgcmp_core::{Rgba, TextureFormat, TextureLevel, bilinear_compare};
//!
//! let pixels = [[255u8, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [0, 0, 0, 255]];
//! let reference = TextureLevel::from_rgba8(2, 2, &pixels).unwrap();
//! let result = TextureLevel::from_rgba8(2, 2, &pixels).unwrap();
//! let mut mask = TextureLevel::new(TextureFormat::RGBA8, 2, 2, 1);
//!
//! let ok = bilinear_compare(
//!     &reference.access(),
//!     &result.access(),
//!     &mut mask.access_mut(),
//!     Rgba::new(2, 2, 2, 2),
//! )
//! .unwrap();
//! assert!(ok);
//! ```
//!
//! Only RGBA / UNORM_INT8 images are compared. Other formats are rejected with
//! [`Error::UnsupportedFormat`], distinct from a failed comparison.

pub mod bilinear;
pub mod buffer;
pub mod error;
pub mod format;
pub mod options;
pub mod parallel;
pub mod report;
pub mod rgba;
pub mod view;

pub use bilinear::{
    ERROR_MASK_FAIL, ERROR_MASK_OK, NUM_SUBPIXEL_BITS, SAMPLE_OFFSETS, bilinear_compare,
    bilinear_compare_rgba8, bilinear_compare_rgba8_report, bilinear_compare_with_options,
    bilinear_sample_rgba8, compare_pixel_rgba8, interpolate_channel,
};
pub use buffer::{ConstPixelBufferAccess, ImageAccess, PixelBufferAccess, TextureLevel};
pub use error::{Error, Result};
pub use format::{ChannelOrder, ChannelType, TextureFormat};
pub use options::CompareOptions;
pub use parallel::bilinear_compare_rgba8_parallel;
pub use report::CompareReport;
pub use rgba::{Rgba, compare_threshold};
pub use view::Rgba8View;

/// Version of imgcmp
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
