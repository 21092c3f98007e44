//! Assertion utilities for testing.
//!
//! Break values are rounded to two decimals by the converter, so most
//! comparisons use a tolerance of one hundredth.

#![allow(dead_code)]

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Tolerance for values that went through two-decimal rounding
pub const ROUNDING_EPSILON: f64 = 0.01 + 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that two slices of floating-point values are approximately element-wise equal.
///
/// # Panics
///
/// Panics if the slices have different lengths or if any element-wise comparison fails.
pub fn assert_array_approx_eq(actual: &[f64], expected: &[f64], epsilon: Option<f64>) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Arrays have different lengths: actual = {}, expected = {}",
        actual.len(),
        expected.len()
    );

    let eps = epsilon.unwrap_or(DEFAULT_EPSILON);
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();

        assert!(
            diff <= eps,
            "Arrays differ at index {}: actual = {}, expected = {}, diff = {}, epsilon = {}",
            i,
            a,
            e,
            diff,
            eps
        );
    }
}

/// Assert that a value is within expected bounds (inclusive).
pub fn assert_in_range(actual: f64, min: f64, max: f64) {
    assert!(
        actual >= min && actual <= max,
        "Value not in range: actual = {}, min = {}, max = {}",
        actual,
        min,
        max
    );
}
