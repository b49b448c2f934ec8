//! 8-bit RGBA color and threshold comparison
//!
//! [`Rgba`] doubles as the per-channel tolerance type: a threshold is just a
//! color whose channels are the allowed absolute differences.

/// RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red component (0 to 255)
    pub r: u8,
    /// Green component (0 to 255)
    pub g: u8,
    /// Blue component (0 to 255)
    pub b: u8,
    /// Alpha component (0 to 255)
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create RGBA from an array
    #[inline]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
            a: arr[3],
        }
    }

    /// Convert to array
    #[inline]
    pub const fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from normalized floats, rounding to nearest and clamping to [0, 1]
    pub fn from_vec4(v: [f32; 4]) -> Self {
        Self::from_array(v.map(unorm8_from_f32))
    }

    /// Convert to normalized floats in [0, 1]
    pub fn to_vec4(&self) -> [f32; 4] {
        self.to_array().map(|c| c as f32 / 255.0)
    }

    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0, 255);
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
}

impl From<[u8; 4]> for Rgba {
    fn from(arr: [u8; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

/// Check whether two colors differ by at most `threshold` in every channel
///
/// Symmetric in `a` and `b`.
#[inline]
pub fn compare_threshold(a: Rgba, b: Rgba, threshold: Rgba) -> bool {
    a.r.abs_diff(b.r) <= threshold.r
        && a.g.abs_diff(b.g) <= threshold.g
        && a.b.abs_diff(b.b) <= threshold.b
        && a.a.abs_diff(b.a) <= threshold.a
}

/// `lo <= v <= hi`
#[inline]
pub fn in_range(v: i32, lo: i32, hi: i32) -> bool {
    v >= lo && v <= hi
}

/// `lo <= v < hi`
#[inline]
pub fn in_bounds(v: i32, lo: i32, hi: i32) -> bool {
    v >= lo && v < hi
}

#[inline]
pub(crate) fn unorm8_from_f32(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}
