//! Pixel buffers and accessors
//!
//! [`TextureLevel`] owns tightly packed pixel storage. The accessors are
//! non-owning windows over a byte slice with explicit row and slice pitch;
//! comparisons only ever see accessors.

use crate::format::{ChannelType, TextureFormat};
use crate::rgba::{Rgba, unorm8_from_f32};
use crate::{Error, Result};
use half::f16;

/// Minimal read-side capabilities shared by every image accessor
pub trait ImageAccess {
    /// Width in pixels
    fn width(&self) -> usize;
    /// Height in pixels
    fn height(&self) -> usize;
    /// Depth in slices
    fn depth(&self) -> usize;
    /// Pixel format descriptor
    fn format(&self) -> TextureFormat;

    /// `[width, height, depth]`
    fn extents(&self) -> [usize; 3] {
        [self.width(), self.height(), self.depth()]
    }
}

/// Owned pixel storage for a single texture level
#[derive(Debug, Clone, PartialEq)]
pub struct TextureLevel {
    format: TextureFormat,
    width: usize,
    height: usize,
    depth: usize,
    data: Vec<u8>,
}

impl TextureLevel {
    /// Create a zero-filled level
    pub fn new(format: TextureFormat, width: usize, height: usize, depth: usize) -> Self {
        let len = packed_len(format, width, height, depth).expect("texture size overflow");
        Self {
            format,
            width,
            height,
            depth,
            data: vec![0; len],
        }
    }

    /// Wrap existing tightly packed bytes
    pub fn from_bytes(
        format: TextureFormat,
        width: usize,
        height: usize,
        depth: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = packed_len(format, width, height, depth).ok_or(Error::SizeOverflow {
            width,
            height,
            depth,
        })?;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            format,
            width,
            height,
            depth,
            data,
        })
    }

    /// Build a 2-D RGBA8 level from row-major pixels
    pub fn from_rgba8(width: usize, height: usize, pixels: &[[u8; 4]]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(pixels);
        Self::from_bytes(TextureFormat::RGBA8, width, height, 1, bytes.to_vec())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn access(&self) -> ConstPixelBufferAccess<'_> {
        let ps = self.format.pixel_size();
        ConstPixelBufferAccess {
            format: self.format,
            width: self.width,
            height: self.height,
            depth: self.depth,
            row_pitch: self.width * ps,
            slice_pitch: self.width * self.height * ps,
            data: &self.data,
        }
    }

    pub fn access_mut(&mut self) -> PixelBufferAccess<'_> {
        let ps = self.format.pixel_size();
        PixelBufferAccess {
            format: self.format,
            width: self.width,
            height: self.height,
            depth: self.depth,
            row_pitch: self.width * ps,
            slice_pitch: self.width * self.height * ps,
            data: &mut self.data,
        }
    }
}

impl ImageAccess for TextureLevel {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn format(&self) -> TextureFormat {
        self.format
    }
}

/// Read-only window over pixel data
#[derive(Debug, Clone, Copy)]
pub struct ConstPixelBufferAccess<'a> {
    format: TextureFormat,
    width: usize,
    height: usize,
    depth: usize,
    row_pitch: usize,
    slice_pitch: usize,
    data: &'a [u8],
}

impl<'a> ConstPixelBufferAccess<'a> {
    /// Create a packed accessor over `data`
    pub fn new(
        format: TextureFormat,
        width: usize,
        height: usize,
        depth: usize,
        data: &'a [u8],
    ) -> Result<Self> {
        let ps = format.pixel_size();
        Self::with_pitch(
            format,
            width,
            height,
            depth,
            width * ps,
            width * height * ps,
            data,
        )
    }

    /// Create an accessor with explicit row and slice pitch, in bytes
    pub fn with_pitch(
        format: TextureFormat,
        width: usize,
        height: usize,
        depth: usize,
        row_pitch: usize,
        slice_pitch: usize,
        data: &'a [u8],
    ) -> Result<Self> {
        check_layout(
            format,
            [width, height, depth],
            row_pitch,
            slice_pitch,
            data.len(),
        )?;
        Ok(Self {
            format,
            width,
            height,
            depth,
            row_pitch,
            slice_pitch,
            data,
        })
    }

    pub fn row_pitch(&self) -> usize {
        self.row_pitch
    }

    pub fn slice_pitch(&self) -> usize {
        self.slice_pitch
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Single depth slice as a 2-D accessor
    pub fn slice(&self, z: usize) -> ConstPixelBufferAccess<'a> {
        assert!(z < self.depth, "slice index out of bounds");
        let data: &'a [u8] = self.data;
        ConstPixelBufferAccess {
            depth: 1,
            data: &data[z * self.slice_pitch..],
            ..*self
        }
    }

    /// Normalized channel values; missing channels read as `0, 0, 0, 1`
    pub fn get_pixel(&self, x: usize, y: usize, z: usize) -> [f32; 4] {
        let offset = pixel_offset(self, x, y, z);
        decode_pixel(self.format, &self.data[offset..offset + self.format.pixel_size()])
    }

    /// Raw 8-bit RGBA read. Panics unless the format is 4-channel 8-bit.
    pub fn read_rgba8(&self, x: usize, y: usize, z: usize) -> Rgba {
        assert!(
            self.format.order.channels() == 4 && self.format.ty.is_8bit(),
            "read_rgba8 on {} access",
            self.format
        );
        let offset = pixel_offset(self, x, y, z);
        let p = &self.data[offset..offset + 4];
        Rgba::new(p[0], p[1], p[2], p[3])
    }
}

impl ImageAccess for ConstPixelBufferAccess<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn format(&self) -> TextureFormat {
        self.format
    }
}

/// Writable window over pixel data
#[derive(Debug)]
pub struct PixelBufferAccess<'a> {
    format: TextureFormat,
    width: usize,
    height: usize,
    depth: usize,
    row_pitch: usize,
    slice_pitch: usize,
    data: &'a mut [u8],
}

impl<'a> PixelBufferAccess<'a> {
    /// Create a packed accessor over `data`
    pub fn new(
        format: TextureFormat,
        width: usize,
        height: usize,
        depth: usize,
        data: &'a mut [u8],
    ) -> Result<Self> {
        let ps = format.pixel_size();
        check_layout(
            format,
            [width, height, depth],
            width * ps,
            width * height * ps,
            data.len(),
        )?;
        Ok(Self {
            format,
            width,
            height,
            depth,
            row_pitch: width * ps,
            slice_pitch: width * height * ps,
            data,
        })
    }

    /// Read-only view of the same pixels
    pub fn as_const(&self) -> ConstPixelBufferAccess<'_> {
        ConstPixelBufferAccess {
            format: self.format,
            width: self.width,
            height: self.height,
            depth: self.depth,
            row_pitch: self.row_pitch,
            slice_pitch: self.slice_pitch,
            data: &*self.data,
        }
    }

    /// Single depth slice as a writable 2-D accessor
    pub fn slice_mut(&mut self, z: usize) -> PixelBufferAccess<'_> {
        assert!(z < self.depth, "slice index out of bounds");
        let start = z * self.slice_pitch;
        PixelBufferAccess {
            format: self.format,
            width: self.width,
            height: self.height,
            depth: 1,
            row_pitch: self.row_pitch,
            slice_pitch: self.slice_pitch,
            data: &mut self.data[start..],
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize, z: usize) -> [f32; 4] {
        self.as_const().get_pixel(x, y, z)
    }

    pub fn set_pixel(&mut self, color: [f32; 4], x: usize, y: usize, z: usize) {
        let ps = self.format.pixel_size();
        let offset = pixel_offset(&self.as_const(), x, y, z);
        let mut encoded = [0u8; 16];
        encode_pixel(self.format, color, &mut encoded[..ps]);
        self.data[offset..offset + ps].copy_from_slice(&encoded[..ps]);
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: [f32; 4]) {
        let ps = self.format.pixel_size();
        let mut encoded = [0u8; 16];
        encode_pixel(self.format, color, &mut encoded[..ps]);

        for z in 0..self.depth {
            for y in 0..self.height {
                let row = z * self.slice_pitch + y * self.row_pitch;
                for pixel in self.data[row..row + self.width * ps].chunks_exact_mut(ps) {
                    pixel.copy_from_slice(&encoded[..ps]);
                }
            }
        }
    }
}

impl ImageAccess for PixelBufferAccess<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn format(&self) -> TextureFormat {
        self.format
    }
}

fn packed_len(format: TextureFormat, width: usize, height: usize, depth: usize) -> Option<usize> {
    width
        .checked_mul(height)?
        .checked_mul(depth)?
        .checked_mul(format.pixel_size())
}

fn check_layout(
    format: TextureFormat,
    [width, height, depth]: [usize; 3],
    row_pitch: usize,
    slice_pitch: usize,
    len: usize,
) -> Result<()> {
    let ps = format.pixel_size();
    let row_len = width.checked_mul(ps).ok_or(Error::InvalidPitch {
        row_pitch,
        slice_pitch,
    })?;
    if row_pitch < row_len || slice_pitch < row_pitch.saturating_mul(height) {
        return Err(Error::InvalidPitch {
            row_pitch,
            slice_pitch,
        });
    }

    if width == 0 || height == 0 || depth == 0 {
        return Ok(());
    }

    // Last slice and last row only need to hold the pixels actually addressed.
    let required = slice_pitch
        .checked_mul(depth - 1)
        .and_then(|v| v.checked_add(row_pitch.checked_mul(height - 1)?))
        .and_then(|v| v.checked_add(row_len))
        .ok_or(Error::SizeOverflow {
            width,
            height,
            depth,
        })?;
    if len < required {
        return Err(Error::BufferSize {
            expected: required,
            actual: len,
        });
    }
    Ok(())
}

fn pixel_offset(access: &ConstPixelBufferAccess<'_>, x: usize, y: usize, z: usize) -> usize {
    assert!(
        x < access.width && y < access.height && z < access.depth,
        "pixel ({x}, {y}, {z}) out of bounds for {}x{}x{}",
        access.width,
        access.height,
        access.depth
    );
    z * access.slice_pitch + y * access.row_pitch + x * access.format.pixel_size()
}

fn decode_pixel(format: TextureFormat, bytes: &[u8]) -> [f32; 4] {
    let mut out = [0.0, 0.0, 0.0, 1.0];
    let size = format.ty.size();

    for (c, raw) in bytes.chunks_exact(size).enumerate() {
        out[c] = match format.ty {
            ChannelType::UnormInt8 => raw[0] as f32 / 255.0,
            ChannelType::UnsignedInt8 => raw[0] as f32,
            ChannelType::HalfFloat => bytemuck::pod_read_unaligned::<f16>(raw).to_f32(),
            ChannelType::Float => bytemuck::pod_read_unaligned::<f32>(raw),
        };
    }
    out
}

fn encode_pixel(format: TextureFormat, color: [f32; 4], out: &mut [u8]) {
    let size = format.ty.size();

    for (raw, &value) in out.chunks_exact_mut(size).zip(color.iter()) {
        match format.ty {
            ChannelType::UnormInt8 => raw[0] = unorm8_from_f32(value),
            ChannelType::UnsignedInt8 => raw[0] = value.round().clamp(0.0, 255.0) as u8,
            ChannelType::HalfFloat => raw.copy_from_slice(bytemuck::bytes_of(&f16::from_f32(value))),
            ChannelType::Float => raw.copy_from_slice(bytemuck::bytes_of(&value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ChannelOrder;

    #[test]
    fn test_from_rgba8_reads_back() {
        let pixels = [[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 16]];
        let level = TextureLevel::from_rgba8(2, 2, &pixels).unwrap();
        let access = level.access();

        assert_eq!(access.extents(), [2, 2, 1]);
        assert_eq!(access.read_rgba8(1, 0, 0), Rgba::new(5, 6, 7, 8));
        assert_eq!(access.read_rgba8(0, 1, 0), Rgba::new(9, 10, 11, 12));
    }

    #[test]
    fn test_reject_wrong_length() {
        let pixels = [[0u8; 4]; 3];
        assert_eq!(
            TextureLevel::from_rgba8(2, 2, &pixels),
            Err(Error::BufferSize {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn test_reject_overflowing_size() {
        let result = TextureLevel::from_bytes(TextureFormat::RGBA8, usize::MAX, 2, 1, Vec::new());
        assert_eq!(
            result,
            Err(Error::SizeOverflow {
                width: usize::MAX,
                height: 2,
                depth: 1
            })
        );

        let data = [0u8; 16];
        let result = ConstPixelBufferAccess::with_pitch(
            TextureFormat::RGBA8,
            1,
            2,
            3,
            4,
            usize::MAX / 2,
            &data,
        );
        assert!(matches!(result, Err(Error::SizeOverflow { depth: 3, .. })));
    }

    #[test]
    fn test_const_access_over_host_bytes() {
        // 2x1x2 RGBA8, tightly packed
        let data: Vec<u8> = (0..16).collect();
        let access = ConstPixelBufferAccess::new(TextureFormat::RGBA8, 2, 1, 2, &data).unwrap();

        assert_eq!(access.extents(), [2, 1, 2]);
        assert_eq!(access.row_pitch(), 8);
        assert_eq!(access.slice_pitch(), 8);
        assert_eq!(access.read_rgba8(1, 0, 0), Rgba::new(4, 5, 6, 7));
        assert_eq!(access.read_rgba8(0, 0, 1), Rgba::new(8, 9, 10, 11));

        assert_eq!(
            ConstPixelBufferAccess::new(TextureFormat::RGBA8, 2, 1, 2, &data[..12]).unwrap_err(),
            Error::BufferSize {
                expected: 16,
                actual: 12
            }
        );
    }

    #[test]
    fn test_mut_access_over_host_bytes() {
        let mut data = vec![0u8; 2 * 2 * 4];
        {
            let mut access =
                PixelBufferAccess::new(TextureFormat::RGBA8, 2, 2, 1, &mut data).unwrap();
            access.clear([0.0, 1.0, 0.0, 1.0]);
            access.set_pixel([1.0, 0.0, 0.0, 1.0], 0, 1, 0);
        }
        assert_eq!(&data[..4], &[0, 255, 0, 255]);
        assert_eq!(&data[8..12], &[255, 0, 0, 255]);

        let mut short = vec![0u8; 15];
        assert!(matches!(
            PixelBufferAccess::new(TextureFormat::RGBA8, 2, 2, 1, &mut short),
            Err(Error::BufferSize { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn test_unsigned_int8_stores_raw_values() {
        let format = TextureFormat::new(ChannelOrder::Rgba, ChannelType::UnsignedInt8);
        let mut level = TextureLevel::new(format, 2, 1, 1);
        {
            let mut access = level.access_mut();
            access.clear([0.0, 1.0, 0.0, 1.0]);
            access.set_pixel([1.0, 0.0, 300.0, 1.0], 1, 0, 0);
            assert_eq!(access.get_pixel(1, 0, 0), [1.0, 0.0, 255.0, 1.0]);
        }
        assert_eq!(level.data(), &[0, 1, 0, 1, 1, 0, 255, 1]);
    }

    #[test]
    fn test_reject_short_pitch() {
        let data = [0u8; 64];
        let result = ConstPixelBufferAccess::with_pitch(TextureFormat::RGBA8, 4, 2, 1, 8, 32, &data);
        assert!(matches!(result, Err(Error::InvalidPitch { .. })));
    }

    #[test]
    fn test_padded_rows() {
        // 2x2 RGBA8 with 4 bytes of padding per row
        let mut data = [0u8; 20];
        data[12..16].copy_from_slice(&[9, 9, 9, 9]);
        let access =
            ConstPixelBufferAccess::with_pitch(TextureFormat::RGBA8, 2, 2, 1, 12, 24, &data)
                .unwrap();
        assert_eq!(access.read_rgba8(0, 1, 0), Rgba::new(9, 9, 9, 9));
    }

    #[test]
    fn test_clear_and_set_float() {
        let mut level = TextureLevel::new(TextureFormat::RGBA32F, 3, 2, 1);
        let mut access = level.access_mut();
        access.clear([0.0, 1.0, 0.0, 1.0]);
        access.set_pixel([1.0, 0.0, 0.0, 1.0], 2, 1, 0);

        assert_eq!(access.get_pixel(0, 0, 0), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(access.get_pixel(2, 1, 0), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_clear_unorm8() {
        let mut level = TextureLevel::new(TextureFormat::RGBA8, 2, 2, 2);
        level.access_mut().clear([0.0, 1.0, 0.0, 1.0]);
        assert!(level.data().chunks_exact(4).all(|p| p == [0, 255, 0, 255]));
    }

    #[test]
    fn test_half_float_roundtrip_exact_values() {
        let format = TextureFormat::new(ChannelOrder::Rgb, ChannelType::HalfFloat);
        let mut level = TextureLevel::new(format, 1, 1, 1);
        let mut access = level.access_mut();
        access.set_pixel([0.5, 0.25, 2.0, 0.0], 0, 0, 0);

        // Alpha is not stored and reads as 1
        assert_eq!(access.get_pixel(0, 0, 0), [0.5, 0.25, 2.0, 1.0]);
    }

    #[test]
    fn test_slices() {
        let mut level = TextureLevel::new(TextureFormat::RGBA8, 2, 2, 3);
        {
            let mut access = level.access_mut();
            let mut slice = access.slice_mut(2);
            slice.set_pixel([1.0, 1.0, 1.0, 1.0], 1, 1, 0);
        }
        let access = level.access();
        assert_eq!(access.read_rgba8(1, 1, 2), Rgba::WHITE);
        assert_eq!(access.slice(2).read_rgba8(1, 1, 0), Rgba::WHITE);
        assert_eq!(access.slice(1).read_rgba8(1, 1, 0), Rgba::default());
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_read() {
        let level = TextureLevel::new(TextureFormat::RGBA8, 2, 2, 1);
        level.access().read_rgba8(2, 0, 0);
    }
}
