//! Texture format descriptors
//!
//! A format is a channel order plus a channel type. Only the subset needed to
//! describe comparison inputs and error masks is modelled.

use std::fmt;

/// Channel order of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ChannelOrder {
    /// Red only
    R,
    /// Red, green
    Rg,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl ChannelOrder {
    /// Number of channels for this order
    pub fn channels(&self) -> usize {
        match self {
            Self::R => 1,
            Self::Rg => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Storage type of a single channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ChannelType {
    /// 8-bit unsigned normalized (0-255 maps to 0.0-1.0)
    UnormInt8,
    /// 8-bit unsigned integer
    UnsignedInt8,
    /// 16-bit IEEE half float
    HalfFloat,
    /// 32-bit IEEE float
    Float,
}

impl ChannelType {
    /// Size in bytes of one channel
    pub fn size(&self) -> usize {
        match self {
            Self::UnormInt8 | Self::UnsignedInt8 => 1,
            Self::HalfFloat => 2,
            Self::Float => 4,
        }
    }

    /// Check if channel values are stored as 8-bit integers
    pub fn is_8bit(&self) -> bool {
        matches!(self, Self::UnormInt8 | Self::UnsignedInt8)
    }
}

/// Pixel format descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureFormat {
    /// Channel order
    pub order: ChannelOrder,
    /// Channel storage type
    pub ty: ChannelType,
}

impl TextureFormat {
    /// Create a new format descriptor
    pub const fn new(order: ChannelOrder, ty: ChannelType) -> Self {
        Self { order, ty }
    }

    /// RGBA, 8-bit unsigned normalized. The only format the comparator accepts.
    pub const RGBA8: Self = Self::new(ChannelOrder::Rgba, ChannelType::UnormInt8);

    /// RGBA, 32-bit float. Common error mask format.
    pub const RGBA32F: Self = Self::new(ChannelOrder::Rgba, ChannelType::Float);

    /// Size in bytes of one pixel
    pub fn pixel_size(&self) -> usize {
        self.order.channels() * self.ty.size()
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = match self.order {
            ChannelOrder::R => "R",
            ChannelOrder::Rg => "RG",
            ChannelOrder::Rgb => "RGB",
            ChannelOrder::Rgba => "RGBA",
        };
        let ty = match self.ty {
            ChannelType::UnormInt8 => "UNORM_INT8",
            ChannelType::UnsignedInt8 => "UNSIGNED_INT8",
            ChannelType::HalfFloat => "HALF_FLOAT",
            ChannelType::Float => "FLOAT",
        };
        write!(f, "{}, {}", order, ty)
    }
}
