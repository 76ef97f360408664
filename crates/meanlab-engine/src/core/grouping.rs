use arrayvec::ArrayVec;
use meanlab_stats::{
    binning,
    weighted::{self, Weighted},
};
use serde::{Deserialize, Serialize};

use crate::MAX_GROUPS;

use super::{definition::LessonDefinition, group::Group};

/// An ordered set of groups built from a lesson definition.
///
/// The main lesson and the sandbox each own one `Grouping`. Both are created by
/// [`Grouping::empty`] or [`Grouping::fresh`], so they never share group records.
///
/// # Example
///
/// ```
/// use meanlab_engine::{Grouping, LessonDefinition};
///
/// let lesson = LessonDefinition::canonical();
/// let grouping = Grouping::fresh(&lesson.raw_values, &lesson);
/// let counts: Vec<_> = grouping.iter().map(|g| g.assigned_count()).collect();
/// assert_eq!(counts, [4, 12, 10, 6]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grouping {
    groups: ArrayVec<Group, MAX_GROUPS>,
}

impl Grouping {
    /// One group per interval of `definition`, with nothing assigned or entered.
    ///
    /// Intervals beyond [`MAX_GROUPS`] are ignored; [`LessonDefinition::validate`]
    /// rejects such definitions up front.
    #[must_use]
    pub fn empty(definition: &LessonDefinition) -> Self {
        let count = definition.intervals.len().min(MAX_GROUPS);
        let groups = definition
            .intervals
            .iter()
            .take(count)
            .enumerate()
            .map(|(index, spec)| Group::new(spec, index + 1 == count))
            .collect();
        Self { groups }
    }

    /// Classifies every value of `raw_values` into a fresh grouping and computes every
    /// figure of every group.
    ///
    /// Values that fall outside every interval are skipped.
    #[must_use]
    pub fn fresh(raw_values: &[f64], definition: &LessonDefinition) -> Self {
        let mut grouping = Self::empty(definition);
        for &value in raw_values {
            match grouping.classify(value) {
                Some(index) => grouping.groups[index].push_classified(value),
                None => tracing::debug!(value, "value outside every interval, skipped"),
            }
        }
        for group in &mut grouping.groups {
            group.compute_all();
        }
        grouping
    }

    /// Index of the group whose interval contains `value`.
    #[must_use]
    pub fn classify(&self, value: f64) -> Option<usize> {
        let intervals = self
            .groups
            .iter()
            .map(Group::interval)
            .collect::<ArrayVec<_, MAX_GROUPS>>();
        binning::classify(value, &intervals)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Group> {
        self.groups.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups.iter()
    }

    /// Total number of values assigned across all groups.
    #[must_use]
    pub fn total_assigned(&self) -> usize {
        self.groups.iter().map(Group::assigned_count).sum()
    }

    /// Sum of expected frequencies.
    #[must_use]
    pub fn total_expected(&self) -> usize {
        self.groups.iter().map(Group::expected_frequency).sum()
    }

    /// `Σ(mean × expected frequency) / Σ expected frequency` using each group's
    /// canonical mean (0 when absent).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn overall_mean(&self) -> f64 {
        weighted::overall_mean(self.groups.iter().map(|group| {
            Weighted::new(
                group.mean().unwrap_or(0.0),
                group.expected_frequency() as f64,
            )
        }))
    }

    /// Overall mean estimated from class midpoints, the grouped-data formula
    /// `Σ nᵢcᵢ / N`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn midpoint_mean(&self) -> f64 {
        weighted::overall_mean(self.groups.iter().map(|group| {
            Weighted::new(group.class_midpoint(), group.expected_frequency() as f64)
        }))
    }

    /// Overall mean of the true group means, weighted by assigned count.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn assigned_mean(&self) -> f64 {
        weighted::overall_mean(self.groups.iter().map(|group| {
            Weighted::new(group.assigned_mean(), group.assigned_count() as f64)
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Field, IntervalSpec};

    use super::*;

    #[test]
    fn test_empty_grouping_marks_last_interval() {
        let lesson = LessonDefinition::canonical();
        let grouping = Grouping::empty(&lesson);
        assert_eq!(grouping.len(), 4);
        let last: Vec<_> = grouping.iter().map(Group::is_last_interval).collect();
        assert_eq!(last, [false, false, false, true]);
        assert_eq!(grouping.total_assigned(), 0);
        assert_eq!(grouping.total_expected(), 32);
    }

    #[test]
    fn test_fresh_grouping_of_canonical_data() {
        let lesson = LessonDefinition::canonical();
        let grouping = Grouping::fresh(&lesson.raw_values, &lesson);
        let sums: Vec<_> = grouping.iter().map(Group::assigned_sum).collect();
        assert_eq!(sums, [141.0, 530.0, 548.0, 380.0]);
        assert_eq!(grouping.get(0).unwrap().mean(), Some(35.25));
        assert_eq!(grouping.midpoint_mean(), 50.625);
        assert!((grouping.overall_mean() - 49.968_75).abs() < 1e-9);
    }

    #[test]
    fn test_fresh_grouping_skips_unmatched_values() {
        let lesson = LessonDefinition::canonical();
        let grouping = Grouping::fresh(&[10.0, 35.0, 99.0], &lesson);
        assert_eq!(grouping.total_assigned(), 1);
        assert_eq!(grouping.total_expected(), 1);
        assert_eq!(grouping.overall_mean(), 35.0);
    }

    #[test]
    fn test_boundary_values() {
        let lesson = LessonDefinition::canonical();
        let grouping = Grouping::empty(&lesson);
        assert_eq!(grouping.classify(40.0), Some(1));
        assert_eq!(grouping.classify(60.0), Some(3));
        assert_eq!(grouping.classify(70.0), Some(3));
        assert_eq!(grouping.classify(70.5), None);
    }

    #[test]
    fn test_overall_mean_without_means_is_zero() {
        let lesson = LessonDefinition::canonical();
        assert_eq!(Grouping::empty(&lesson).overall_mean(), 0.0);
    }

    #[test]
    fn test_overlong_definition_is_truncated() {
        let lesson = LessonDefinition {
            name: "wide".to_owned(),
            raw_values: vec![],
            intervals: (0..MAX_GROUPS + 2)
                .map(|i| {
                    #[expect(clippy::cast_precision_loss)]
                    let lower = i as f64;
                    IntervalSpec::new(lower, lower + 1.0, 0, false)
                })
                .collect(),
        };
        let grouping = Grouping::empty(&lesson);
        assert_eq!(grouping.len(), MAX_GROUPS);
        assert!(grouping.get(MAX_GROUPS - 1).unwrap().is_last_interval());
        assert!(grouping.get(0).unwrap().entry(Field::Mean).is_none());
    }
}
