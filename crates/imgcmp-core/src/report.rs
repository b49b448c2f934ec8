//! Comparison reports

use std::fmt;
use tracing::{info, warn};

/// Outcome of an image comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareReport {
    /// Whether every pixel matched
    pub passed: bool,
    /// Number of pixels painted red in the error mask
    pub mismatched_pixels: usize,
    /// Number of pixels compared
    pub total_pixels: usize,
}

impl CompareReport {
    /// Passing report over `total_pixels` pixels
    pub fn new(total_pixels: usize) -> Self {
        Self {
            passed: true,
            mismatched_pixels: 0,
            total_pixels,
        }
    }

    pub fn record_mismatch(&mut self) {
        self.passed = false;
        self.mismatched_pixels += 1;
    }

    /// Fold another report (e.g. another depth slice) into this one
    pub fn merge(&mut self, other: &CompareReport) {
        self.passed &= other.passed;
        self.mismatched_pixels += other.mismatched_pixels;
        self.total_pixels += other.total_pixels;
    }

    /// Fraction of compared pixels that mismatched
    pub fn mismatch_ratio(&self) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        self.mismatched_pixels as f64 / self.total_pixels as f64
    }

    /// Emit the result to the log under `name`
    pub fn log(&self, name: &str) {
        if self.passed {
            info!(name, total = self.total_pixels, "image comparison passed");
        } else {
            warn!(
                name,
                mismatched = self.mismatched_pixels,
                total = self.total_pixels,
                "image comparison failed"
            );
        }
    }
}

impl fmt::Display for CompareReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed { "passed" } else { "failed" };
        write!(
            f,
            "Image comparison {}: {} of {} pixels mismatched",
            verdict, self.mismatched_pixels, self.total_pixels
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_merge() {
        let mut a = CompareReport::new(4);
        let mut b = CompareReport::new(4);
        b.record_mismatch();
        b.record_mismatch();

        a.merge(&b);
        assert!(!a.passed);
        assert_eq!(a.mismatched_pixels, 2);
        assert_eq!(a.total_pixels, 8);
        assert!((a.mismatch_ratio() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_report() {
        let report = CompareReport::new(0);
        assert!(report.passed);
        assert_eq!(report.mismatch_ratio(), 0.0);
    }

    #[test]
    fn test_display() {
        let mut report = CompareReport::new(16);
        report.record_mismatch();
        assert_eq!(
            report.to_string(),
            "Image comparison failed: 1 of 16 pixels mismatched"
        );
        report.log("display");
    }
}
