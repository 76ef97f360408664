//! Weighted overall mean of grouped data.
//!
//! Grouped data only remembers, for each group, one representative value (the group's
//! mean or its midpoint) and a weight (how many raw values the group stands for).
//! The overall mean is then `Σ(value × weight) / Σ weight`.

/// A representative value together with the number of observations it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighted {
    /// Representative value (group mean or class midpoint).
    pub value: f64,
    /// Weight, usually the group frequency.
    pub weight: f64,
}

impl Weighted {
    #[must_use]
    pub const fn new(value: f64, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// Computes `Σ(value × weight) / Σ weight`, accumulating left to right.
///
/// Returns `0.0` when the total weight is zero, matching [`group_mean`] on empty input.
///
/// # Examples
///
/// ```
/// use meanlab_stats::weighted::{Weighted, overall_mean};
///
/// let groups = [
///     Weighted::new(35.0, 4.0),
///     Weighted::new(45.0, 12.0),
///     Weighted::new(55.0, 10.0),
///     Weighted::new(65.0, 6.0),
/// ];
/// assert_eq!(overall_mean(groups), 50.625);
/// assert_eq!(overall_mean([Weighted::new(10.0, 0.0)]), 0.0);
/// ```
///
/// [`group_mean`]: crate::descriptive::group_mean
#[must_use]
pub fn overall_mean<I>(groups: I) -> f64
where
    I: IntoIterator<Item = Weighted>,
{
    let (weighted_sum, total_weight) = groups
        .into_iter()
        .fold((0.0, 0.0), |(sum, total), group| {
            (sum + group.value * group.weight, total + group.weight)
        });
    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_groups() {
        assert_eq!(overall_mean([]), 0.0);
    }

    #[test]
    fn test_zero_weight_groups_do_not_contribute() {
        let groups = [Weighted::new(100.0, 0.0), Weighted::new(20.0, 2.0)];
        assert_eq!(overall_mean(groups), 20.0);
    }

    #[test]
    fn test_group_means_reproduce_raw_mean() {
        // Canonical leaf-length data: sums 141, 530, 548, 380
        let groups = [
            Weighted::new(141.0 / 4.0, 4.0),
            Weighted::new(530.0 / 12.0, 12.0),
            Weighted::new(548.0 / 10.0, 10.0),
            Weighted::new(380.0 / 6.0, 6.0),
        ];
        assert!((overall_mean(groups) - 1599.0 / 32.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn test_matches_definition(
            pairs in prop::collection::vec((-1.0e3..1.0e3f64, 1u32..50), 1..8)
        ) {
            let groups: Vec<_> = pairs
                .iter()
                .map(|&(value, weight)| Weighted::new(value, f64::from(weight)))
                .collect();
            let mut numerator = 0.0;
            let mut denominator = 0.0;
            for group in &groups {
                numerator += group.value * group.weight;
                denominator += group.weight;
            }
            prop_assert_eq!(overall_mean(groups), numerator / denominator);
        }
    }
}
