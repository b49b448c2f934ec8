//! Test pattern generation
//!
//! Deterministic RGBA8 images and the perturbations applied to them to model
//! rendering differences between implementations.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Test pattern types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestPattern {
    /// Horizontal gradient black to white
    GradientH,
    /// Vertical gradient black to white
    GradientV,
    /// Black and white squares of the given cell size
    Checkerboard(usize),
    /// Left half black, right half white
    HardEdge,
    /// Random opaque pixels with seed
    Random(u64),
    /// Single color
    Solid([u8; 4]),
}

/// Generate test pattern as row-major RGBA8 pixels
pub fn generate_pattern(pattern: TestPattern, width: usize, height: usize) -> Vec<[u8; 4]> {
    let mut data = vec![[0u8, 0, 0, 255]; width * height];

    match pattern {
        TestPattern::GradientH => {
            for (i, px) in data.iter_mut().enumerate() {
                let v = ((i % width) * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
                *px = [v, v, v, 255];
            }
        }
        TestPattern::GradientV => {
            for (i, px) in data.iter_mut().enumerate() {
                let v = ((i / width) * 255 / height.max(2).saturating_sub(1)).min(255) as u8;
                *px = [v, v, v, 255];
            }
        }
        TestPattern::Checkerboard(cell) => {
            let cell = cell.max(1);
            for (i, px) in data.iter_mut().enumerate() {
                let (x, y) = (i % width, i / width);
                if (x / cell + y / cell) % 2 == 1 {
                    *px = [255, 255, 255, 255];
                }
            }
        }
        TestPattern::HardEdge => {
            for (i, px) in data.iter_mut().enumerate() {
                if i % width >= width / 2 {
                    *px = [255, 255, 255, 255];
                }
            }
        }
        TestPattern::Random(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for px in data.iter_mut() {
                *px = [rng.r#gen(), rng.r#gen(), rng.r#gen(), 255];
            }
        }
        TestPattern::Solid(color) => {
            data.fill(color);
        }
    }

    data
}

/// Modification applied to a pattern to produce a "result" image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Perturbation {
    /// Identical copy
    #[default]
    None,
    /// Content moved right by `dx` pixels (left if negative), edges clamped
    ShiftX(isize),
    /// Content moved down by `dy` pixels (up if negative), edges clamped
    ShiftY(isize),
    /// Uniform noise in `[-amplitude, amplitude]` on the color channels
    Noise { seed: u64, amplitude: u8 },
    /// Add `delta` to one channel of one pixel, saturating
    PixelDelta {
        x: usize,
        y: usize,
        channel: usize,
        delta: i16,
    },
}

/// Apply `perturbation` to `pixels`
pub fn apply_perturbation(
    pixels: &[[u8; 4]],
    width: usize,
    height: usize,
    perturbation: Perturbation,
) -> Vec<[u8; 4]> {
    assert_eq!(pixels.len(), width * height);

    match perturbation {
        Perturbation::None => pixels.to_vec(),
        Perturbation::ShiftX(dx) => (0..width * height)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                pixels[y * width + shifted(x, dx, width)]
            })
            .collect(),
        Perturbation::ShiftY(dy) => (0..width * height)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                pixels[shifted(y, dy, height) * width + x]
            })
            .collect(),
        Perturbation::Noise { seed, amplitude } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let amp = amplitude as i16;
            pixels
                .iter()
                .map(|px| {
                    let mut out = *px;
                    for c in out.iter_mut().take(3) {
                        *c = (*c as i16 + rng.gen_range(-amp..=amp)).clamp(0, 255) as u8;
                    }
                    out
                })
                .collect()
        }
        Perturbation::PixelDelta {
            x,
            y,
            channel,
            delta,
        } => {
            let mut out = pixels.to_vec();
            let c = &mut out[y * width + x][channel];
            *c = (*c as i16 + delta).clamp(0, 255) as u8;
            out
        }
    }
}

fn shifted(pos: usize, delta: isize, len: usize) -> usize {
    (pos as isize - delta).clamp(0, len as isize - 1) as usize
}
