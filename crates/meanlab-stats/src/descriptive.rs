/// Sums values strictly from left to right.
///
/// All means in this crate are built on top of this function so that the same
/// input sequence always produces the same bits.
///
/// # Examples
///
/// ```
/// # use meanlab_stats::descriptive::sum;
/// assert_eq!(sum(&[1.5, 2.5, 3.0]), 7.0);
/// assert_eq!(sum(&[]), 0.0);
/// ```
#[must_use]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, value| acc + value)
}

/// Arithmetic mean of the values assigned to one group.
///
/// Returns `0.0` for an empty group. This is documented behavior rather than an
/// error: a group nobody has filled yet simply has no weight.
///
/// # Examples
///
/// ```
/// # use meanlab_stats::descriptive::group_mean;
/// assert_eq!(group_mean(&[70.0, 60.0, 61.0, 63.0, 60.0, 66.0]), 380.0 / 6.0);
/// assert_eq!(group_mean(&[]), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn group_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Arithmetic mean of a whole raw sequence.
///
/// Same arithmetic as [`group_mean`]; kept as a separate entry point because the
/// lesson reports "the true mean of the raw data" separately from per-group means.
///
/// # Examples
///
/// ```
/// # use meanlab_stats::descriptive::raw_mean;
/// assert_eq!(raw_mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
/// assert_eq!(raw_mean(&[]), 0.0);
/// ```
#[must_use]
pub fn raw_mean(values: &[f64]) -> f64 {
    group_mean(values)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_mean_is_zero() {
        assert_eq!(group_mean(&[]), 0.0);
        assert_eq!(raw_mean(&[]), 0.0);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(group_mean(&[42.0]), 42.0);
    }

    #[test]
    fn test_repeated_values() {
        let values = [43.0, 43.0, 43.0, 49.0];
        assert_eq!(sum(&values), 178.0);
        assert_eq!(group_mean(&values), 44.5);
    }

    #[test]
    fn test_sum_is_left_to_right() {
        // (1e16 + 1) + -1e16 loses the 1, a different order would keep it
        let values = [1e16, 1.0, -1e16];
        assert_eq!(sum(&values), ((1e16 + 1.0) + -1e16));
    }

    proptest! {
        #[test]
        fn test_mean_equals_sum_over_count(values in prop::collection::vec(-1.0e6..1.0e6f64, 1..64)) {
            #[expect(clippy::cast_precision_loss)]
            let expected = sum(&values) / values.len() as f64;
            prop_assert_eq!(group_mean(&values), expected);
            prop_assert_eq!(raw_mean(&values), expected);
        }

        #[test]
        fn test_mean_is_reproducible(values in prop::collection::vec(-1.0e6..1.0e6f64, 0..64)) {
            prop_assert_eq!(group_mean(&values).to_bits(), group_mean(&values.clone()).to_bits());
        }
    }
}
