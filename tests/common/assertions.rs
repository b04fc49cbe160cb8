//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point comparisons of possibly missing values.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

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

/// Assert that two columns are element-wise equal, treating missing as equal
/// to missing and comparing present values with a tolerance.
///
/// # Panics
///
/// Panics if the columns have different lengths, if a value is missing in
/// only one of them, or if any present pair differs by more than `epsilon`.
pub fn assert_column_approx_eq(actual: &[Option<f64>], expected: &[Option<f64>], epsilon: Option<f64>) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Columns have different lengths: actual = {}, expected = {}",
        actual.len(),
        expected.len()
    );

    let eps = epsilon.unwrap_or(DEFAULT_EPSILON);
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        match (a, e) {
            (None, None) => {}
            (Some(a), Some(e)) => {
                let diff = (a - e).abs();
                assert!(
                    diff <= eps,
                    "Columns differ at index {}: actual = {}, expected = {}, diff = {}, epsilon = {}",
                    i,
                    a,
                    e,
                    diff,
                    eps
                );
            }
            _ => panic!(
                "Columns differ at index {}: actual = {:?}, expected = {:?}",
                i, a, e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_column_approx_eq() {
        assert_column_approx_eq(&[Some(1.0), None], &[Some(1.0 + 1e-12), None], None);
    }

    #[test]
    #[should_panic]
    fn test_assert_column_approx_eq_missing_mismatch() {
        assert_column_approx_eq(&[Some(1.0), None], &[Some(1.0), Some(2.0)], None);
    }
}
