//! Deviations between a reference value and an estimate of it.

/// Absolute difference `|estimate - reference|`.
#[must_use]
pub fn absolute_deviation(reference: f64, estimate: f64) -> f64 {
    (estimate - reference).abs()
}

/// Absolute difference as a percentage of the reference.
///
/// Returns `0.0` when the reference is zero.
///
/// ```
/// # use meanlab_stats::comparison::relative_deviation_percent;
/// assert_eq!(relative_deviation_percent(50.0, 51.0), 2.0);
/// assert_eq!(relative_deviation_percent(0.0, 5.0), 0.0);
/// ```
#[must_use]
pub fn relative_deviation_percent(reference: f64, estimate: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    absolute_deviation(reference, estimate) / reference.abs() * 100.0
}

/// Returns whether `actual` is strictly closer than `tolerance` to `target`.
///
/// ```
/// # use meanlab_stats::comparison::within_tolerance;
/// assert!(within_tolerance(35.259, 35.25, 0.01));
/// assert!(!within_tolerance(35.261, 35.25, 0.01));
/// ```
#[must_use]
pub fn within_tolerance(actual: f64, target: f64, tolerance: f64) -> bool {
    (actual - target).abs() < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_deviation_is_symmetric() {
        assert_eq!(absolute_deviation(10.0, 12.5), 2.5);
        assert_eq!(absolute_deviation(12.5, 10.0), 2.5);
    }

    #[test]
    fn test_relative_deviation_uses_reference_magnitude() {
        assert_eq!(relative_deviation_percent(-50.0, -49.0), 2.0);
    }

    #[test]
    fn test_tolerance_boundary() {
        assert!(within_tolerance(45.009, 45.0, 0.01));
        assert!(!within_tolerance(45.011, 45.0, 0.01));
        assert!(!within_tolerance(f64::NAN, 45.0, 0.01));
    }
}
