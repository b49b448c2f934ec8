//! JSON-described comparison cases
//!
//! A case names a pattern, a perturbation producing the result image, a
//! threshold and the expected verdict. Case files are arrays of cases.

use crate::patterns::{Perturbation, TestPattern, apply_perturbation, generate_pattern};
use anyhow::{Context, Result, ensure};
use imgcmp_core::{
    CompareOptions, CompareReport, Rgba, TextureFormat, TextureLevel,
    bilinear_compare_with_options,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single comparison case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareCase {
    /// Case name
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Reference image content
    pub pattern: TestPattern,
    /// How the result image differs from the reference
    #[serde(default)]
    pub perturbation: Perturbation,
    /// Per-channel RGBA tolerance
    #[serde(default)]
    pub threshold: [u8; 4],
    /// Expected verdict
    pub expect_pass: bool,
}

/// Outcome of running a case
#[derive(Debug)]
pub struct CaseOutcome {
    pub name: String,
    pub report: CompareReport,
    /// RGBA8 error mask
    pub mask: TextureLevel,
    pub expect_pass: bool,
}

impl CaseOutcome {
    /// Check if the verdict is the expected one
    pub fn as_expected(&self) -> bool {
        self.report.passed == self.expect_pass
    }
}

/// Parse cases from a JSON string
pub fn parse_cases(json: &str) -> Result<Vec<CompareCase>> {
    serde_json::from_str(json).context("invalid case JSON")
}

/// Load cases from a JSON file
pub fn load_cases(path: impl AsRef<Path>) -> Result<Vec<CompareCase>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file: {}", path.display()))?;
    parse_cases(&json).with_context(|| format!("in {}", path.display()))
}

/// Build the reference and result images of `case`
pub fn build_images(case: &CompareCase) -> Result<(TextureLevel, TextureLevel)> {
    let reference = generate_pattern(case.pattern, case.width, case.height);
    if let Perturbation::PixelDelta { x, y, channel, .. } = case.perturbation {
        ensure!(
            x < case.width && y < case.height && channel < 4,
            "case {}: pixel delta at ({x}, {y}) channel {channel} outside image",
            case.name
        );
    }
    let result = apply_perturbation(&reference, case.width, case.height, case.perturbation);

    Ok((
        TextureLevel::from_rgba8(case.width, case.height, &reference)?,
        TextureLevel::from_rgba8(case.width, case.height, &result)?,
    ))
}

/// Run one case
pub fn run_case(case: &CompareCase, options: CompareOptions) -> Result<CaseOutcome> {
    let (reference, result) = build_images(case)?;
    let mut mask = TextureLevel::new(TextureFormat::RGBA8, case.width, case.height, 1);

    let options = options.with_threshold(Rgba::from_array(case.threshold));
    let report = bilinear_compare_with_options(
        &reference.access(),
        &result.access(),
        &mut mask.access_mut(),
        &options,
    )?;
    report.log(&case.name);

    Ok(CaseOutcome {
        name: case.name.clone(),
        report,
        mask,
        expect_pass: case.expect_pass,
    })
}

/// Run cases concurrently, preserving input order
pub fn run_cases(cases: &[CompareCase], options: CompareOptions) -> Result<Vec<CaseOutcome>> {
    cases.par_iter().map(|case| run_case(case, options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_case() {
        let cases = parse_cases(
            r#"[{"name": "flat", "width": 2, "height": 2,
                 "pattern": {"solid": [1, 2, 3, 4]}, "expect_pass": true}]"#,
        )
        .unwrap();

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].pattern, TestPattern::Solid([1, 2, 3, 4]));
        assert_eq!(cases[0].perturbation, Perturbation::None);
        assert_eq!(cases[0].threshold, [0, 0, 0, 0]);
    }

    #[test]
    fn test_reject_bad_pixel_delta() {
        let case = CompareCase {
            name: "bad".into(),
            width: 2,
            height: 2,
            pattern: TestPattern::GradientH,
            perturbation: Perturbation::PixelDelta {
                x: 5,
                y: 0,
                channel: 0,
                delta: 1,
            },
            threshold: [0; 4],
            expect_pass: false,
        };
        assert!(build_images(&case).is_err());
    }

    #[test]
    fn test_case_serde_roundtrip() {
        let case = CompareCase {
            name: "shift".into(),
            width: 8,
            height: 8,
            pattern: TestPattern::Checkerboard(2),
            perturbation: Perturbation::ShiftX(1),
            threshold: [1, 1, 1, 1],
            expect_pass: true,
        };
        let json = serde_json::to_string(&case).unwrap();
        assert_eq!(parse_cases(&format!("[{json}]")).unwrap(), vec![case]);
    }
}
