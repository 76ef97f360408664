use meanlab_stats::comparison;
use serde::{Deserialize, Serialize};

use crate::core::Grouping;

use super::state::LessonState;

/// How far an estimate of the mean lies from a reference mean.
///
/// Used on step D to compare the grouped mean with the raw mean, and on the summary
/// to compare the midpoint estimate with the true mean.
///
/// ```
/// use meanlab_engine::MeanComparison;
///
/// let comparison = MeanComparison::new(50.0, 50.625);
/// assert_eq!(comparison.difference, 0.625);
/// assert_eq!(comparison.difference_percent, 1.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanComparison {
    pub reference: f64,
    pub estimate: f64,
    /// `|estimate - reference|`
    pub difference: f64,
    /// `difference / |reference| × 100`, or 0 for a zero reference.
    pub difference_percent: f64,
}

impl MeanComparison {
    #[must_use]
    pub fn new(reference: f64, estimate: f64) -> Self {
        Self {
            reference,
            estimate,
            difference: comparison::absolute_deviation(reference, estimate),
            difference_percent: comparison::relative_deviation_percent(reference, estimate),
        }
    }
}

impl LessonState {
    /// The first completed grouping's mean compared with the current one.
    #[must_use]
    pub fn summary_comparison(&self) -> Option<MeanComparison> {
        self.original_mean()
            .zip(self.current_mean())
            .map(|(original, current)| MeanComparison::new(original, current))
    }
}

/// One row of the step B comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationRow {
    pub label: String,
    pub mean: Option<f64>,
    pub midpoint: Option<f64>,
    /// `|mean - midpoint|` once both are known.
    pub deviation: Option<f64>,
}

/// Builds the step B table from the canonical mean and midpoint of every group.
#[must_use]
pub fn deviation_rows(groups: &Grouping) -> Vec<DeviationRow> {
    groups
        .iter()
        .map(|group| {
            let mean = group.mean();
            let midpoint = group.midpoint();
            DeviationRow {
                label: group.label().to_owned(),
                mean,
                midpoint,
                deviation: mean
                    .zip(midpoint)
                    .map(|(mean, midpoint)| comparison::absolute_deviation(midpoint, mean)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{LessonDefinition, solution_actions};

    use super::*;

    #[test]
    fn test_zero_reference_has_no_percentage() {
        let comparison = MeanComparison::new(0.0, 3.0);
        assert_eq!(comparison.difference, 3.0);
        assert_eq!(comparison.difference_percent, 0.0);
    }

    #[test]
    fn test_rows_of_computed_grouping() {
        let lesson = LessonDefinition::canonical();
        let rows = deviation_rows(&Grouping::fresh(&lesson.raw_values, &lesson));
        let labels: Vec<_> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, ["[30;40)", "[40;50)", "[50;60)", "[60;70]"]);
        assert_eq!(rows[0].mean, Some(35.25));
        assert_eq!(rows[0].midpoint, Some(35.0));
        assert_eq!(rows[0].deviation, Some(0.25));
        // 380 / 6
        assert!((rows[3].deviation.unwrap() - (380.0 / 6.0 - 65.0_f64).abs()).abs() < 1e-12);
    }

    #[test]
    fn test_summary_comparison_tracks_regrouping() {
        let lesson = LessonDefinition::canonical();
        let mut state = LessonState::new(lesson.clone());
        assert_eq!(state.summary_comparison(), None);

        for action in solution_actions(&lesson) {
            state.apply(&action);
        }
        let comparison = state.summary_comparison().unwrap();
        assert_eq!(comparison.difference, 0.0);

        // Swap 37 out of [30;40): the grouping is incomplete until it comes back
        state.remove_value(0, 37.0);
        assert_eq!(state.summary_comparison(), None);
        state.assign_value(0, 37.0);
        assert_eq!(state.summary_comparison().unwrap().difference, 0.0);
    }

    #[test]
    fn test_rows_of_empty_grouping_are_unknown() {
        let lesson = LessonDefinition::canonical();
        let rows = deviation_rows(&Grouping::empty(&lesson));
        assert!(
            rows.iter()
                .all(|row| row.mean.is_none() && row.midpoint.is_none() && row.deviation.is_none())
        );
    }
}
