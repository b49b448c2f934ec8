//! RGBA8 image view
//!
//! A 2-D accessor whose format is statically known to be RGBA / UNORM_INT8.
//! The comparator's hot loop reads pixels only through this type.

use crate::buffer::{ConstPixelBufferAccess, ImageAccess};
use crate::format::TextureFormat;
use crate::rgba::Rgba;
use crate::{Error, Result};

/// Read-only RGBA8 view over one depth slice
#[derive(Debug, Clone, Copy)]
pub struct Rgba8View<'a> {
    width: usize,
    height: usize,
    row_pitch: usize,
    data: &'a [u8],
}

impl<'a> Rgba8View<'a> {
    /// View the first depth slice of `access`
    pub fn new(access: &ConstPixelBufferAccess<'a>) -> Result<Self> {
        Self::from_slice(access, 0)
    }

    /// View depth slice `z` of `access`
    ///
    /// Fails with [`Error::UnsupportedFormat`] unless the access is RGBA8.
    pub fn from_slice(access: &ConstPixelBufferAccess<'a>, z: usize) -> Result<Self> {
        if access.format() != TextureFormat::RGBA8 {
            return Err(Error::UnsupportedFormat(access.format()));
        }
        let slice = access.slice(z);

        Ok(Self {
            width: slice.width(),
            height: slice.height(),
            row_pitch: slice.row_pitch(),
            data: slice.data(),
        })
    }

    /// Read the pixel at `(x, y)`
    #[inline]
    pub fn read(&self, x: usize, y: usize) -> Rgba {
        debug_assert!(x < self.width && y < self.height);
        let offset = y * self.row_pitch + x * 4;
        let p = &self.data[offset..offset + 4];
        Rgba::new(p[0], p[1], p[2], p[3])
    }
}

impl ImageAccess for Rgba8View<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn depth(&self) -> usize {
        1
    }

    fn format(&self) -> TextureFormat {
        TextureFormat::RGBA8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextureLevel;

    #[test]
    fn test_view_reads_pixels() {
        let pixels = [[10, 20, 30, 40], [50, 60, 70, 80]];
        let level = TextureLevel::from_rgba8(2, 1, &pixels).unwrap();
        let view = Rgba8View::new(&level.access()).unwrap();

        assert_eq!(view.extents(), [2, 1, 1]);
        assert_eq!(view.read(0, 0), Rgba::new(10, 20, 30, 40));
        assert_eq!(view.read(1, 0), Rgba::new(50, 60, 70, 80));
    }

    #[test]
    fn test_view_of_slice() {
        let mut data = vec![0u8; 2 * 2 * 2 * 4];
        data[16..20].copy_from_slice(&[1, 2, 3, 4]);
        let level = TextureLevel::from_bytes(TextureFormat::RGBA8, 2, 2, 2, data).unwrap();
        let view = Rgba8View::from_slice(&level.access(), 1).unwrap();

        assert_eq!(view.read(0, 0), Rgba::new(1, 2, 3, 4));
    }

    #[test]
    fn test_view_rejects_other_formats() {
        let level = TextureLevel::new(TextureFormat::RGBA32F, 2, 2, 1);
        assert_eq!(
            Rgba8View::new(&level.access()).unwrap_err(),
            Error::UnsupportedFormat(TextureFormat::RGBA32F)
        );
    }
}
