//! Comparison options

use crate::rgba::Rgba;

/// Options for [`bilinear_compare_with_options`](crate::bilinear_compare_with_options)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompareOptions {
    /// Per-channel tolerance
    pub threshold: Rgba,
    /// Shard rows across the rayon thread pool. Same verdict and mask as the
    /// sequential driver.
    pub parallel: bool,
}

impl CompareOptions {
    pub fn with_threshold(mut self, threshold: Rgba) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
