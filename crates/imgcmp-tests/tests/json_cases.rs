//! Case file validation
//!
//! Runs the JSON-described comparison cases under `cases/` and checks each
//! verdict against the expected one.

use imgcmp_core::CompareOptions;
use imgcmp_tests::{load_cases, parse_cases, run_case, run_cases, summarize_mask};
use std::path::Path;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn cases_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("cases")
}

#[test]
fn test_basic_cases() {
    init_logging();
    let cases = load_cases(cases_dir().join("basic.json")).expect("Failed to load cases");
    assert!(!cases.is_empty());

    let outcomes = run_cases(&cases, CompareOptions::default()).unwrap();
    let mut unexpected = Vec::new();

    for outcome in &outcomes {
        eprintln!(
            "  {:<36} {} ({} of {} mismatched)",
            outcome.name,
            if outcome.report.passed { "PASS" } else { "FAIL" },
            outcome.report.mismatched_pixels,
            outcome.report.total_pixels
        );
        if !outcome.as_expected() {
            unexpected.push(outcome.name.clone());
        }
    }

    assert!(unexpected.is_empty(), "unexpected verdicts: {unexpected:?}");
}

#[test]
fn test_outcomes_keep_case_order() {
    let cases = load_cases(cases_dir().join("basic.json")).unwrap();
    let outcomes = run_cases(&cases, CompareOptions::default()).unwrap();

    let names: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
    let expected: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_report_matches_mask() {
    let cases = load_cases(cases_dir().join("basic.json")).unwrap();

    for outcome in run_cases(&cases, CompareOptions::default()).unwrap() {
        let summary = summarize_mask(&outcome.mask);
        assert_eq!(summary.other, 0, "{}", outcome.name);
        assert_eq!(summary.failed, outcome.report.mismatched_pixels, "{}", outcome.name);
        assert_eq!(summary.ok + summary.failed, outcome.report.total_pixels, "{}", outcome.name);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let cases = load_cases(cases_dir().join("basic.json")).unwrap();

    for case in &cases {
        let sequential = run_case(case, CompareOptions::default().with_parallel(false)).unwrap();
        let parallel = run_case(case, CompareOptions::default().with_parallel(true)).unwrap();

        assert_eq!(sequential.report, parallel.report, "{}", case.name);
        assert_eq!(sequential.mask, parallel.mask, "{}", case.name);
    }
}

#[test]
fn test_checkerboard_cell_shift_count() {
    let cases = parse_cases(
        r#"[{"name": "cell_shift", "width": 16, "height": 8,
             "pattern": {"checkerboard": 4},
             "perturbation": {"shift_x": 4},
             "expect_pass": false}]"#,
    )
    .unwrap();

    let outcome = run_case(&cases[0], CompareOptions::default()).unwrap();
    assert!(outcome.as_expected());
    assert_eq!(outcome.report.mismatched_pixels, 42);
    assert_eq!(outcome.report.total_pixels, 128);
}

#[test]
fn test_missing_case_file() {
    let err = load_cases(cases_dir().join("does_not_exist.json")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read case file"));
}
