//! # imgcmp-tests
//!
//! Conformance testing support for the imgcmp comparator.
//!
//! This crate provides:
//! - Deterministic test patterns and perturbations (shifts, noise, single
//!   pixel deltas) modelling rendering differences
//! - JSON-described comparison cases with expected verdicts
//! - Error mask inspection helpers

pub mod cases;
pub mod mask;
pub mod patterns;

pub use cases::{CaseOutcome, CompareCase, load_cases, parse_cases, run_case, run_cases};
pub use mask::{MaskSummary, failed_pixels, summarize_mask};
pub use patterns::{Perturbation, TestPattern, apply_perturbation, generate_pattern};
