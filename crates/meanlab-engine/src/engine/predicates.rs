//! Step completion gates and per-entry verdicts.
//!
//! Every check compares a learner entry with a target derived from the lesson state.
//! Counts and sums must match exactly; everything else must lie strictly within
//! [`TOLERANCE`] of its target. Targets that are not positive never count as correct,
//! so an untouched zero can never pass.
//!
//! The step gates are conjunctions of the per-entry verdicts, so the feedback shown
//! to a learner and the gate that unlocks the next step cannot disagree.

use meanlab_stats::comparison::within_tolerance;
use serde::{Deserialize, Serialize};

use crate::{
    TOLERANCE,
    core::{Field, Group, Grouping},
};

use super::state::LessonState;

/// Grade of a single learner entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum Verdict {
    /// Nothing entered yet, or the figure it depends on is missing.
    Pending,
    Correct,
    Incorrect,
}

impl Verdict {
    fn grade(entry: Option<f64>, is_correct: impl FnOnce(f64) -> bool) -> Self {
        match entry {
            None => Verdict::Pending,
            Some(value) if is_correct(value) => Verdict::Correct,
            Some(_) => Verdict::Incorrect,
        }
    }
}

/// Verdicts for every entry of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFeedback {
    pub frequency: Verdict,
    pub sum: Verdict,
    pub mean: Verdict,
    pub midpoint: Verdict,
    pub deviation: Verdict,
    pub product: Verdict,
}

impl GroupFeedback {
    #[must_use]
    pub fn for_group(group: &Group) -> Self {
        Self {
            frequency: frequency_verdict(group),
            sum: sum_verdict(group),
            mean: mean_verdict(group),
            midpoint: midpoint_verdict(group),
            deviation: deviation_verdict(group),
            product: product_verdict(group),
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Verdict {
        match field {
            Field::Frequency => self.frequency,
            Field::Sum => self.sum,
            Field::Mean => self.mean,
            Field::Midpoint => self.midpoint,
            Field::Deviation => self.deviation,
            Field::Product => self.product,
        }
    }
}

/// The frequency entry must equal the number of assigned values, which must be positive.
#[expect(clippy::cast_precision_loss, clippy::float_cmp)]
#[must_use]
pub fn frequency_verdict(group: &Group) -> Verdict {
    let actual = group.assigned_count();
    Verdict::grade(group.manual(Field::Frequency), |entry| {
        actual > 0 && entry == actual as f64
    })
}

/// The sum entry must equal the sum of the assigned values, which must be positive.
#[expect(clippy::float_cmp)]
#[must_use]
pub fn sum_verdict(group: &Group) -> Verdict {
    let actual = group.assigned_sum();
    Verdict::grade(group.manual(Field::Sum), |entry| {
        actual > 0.0 && entry == actual
    })
}

/// The mean entry must be within tolerance of the assigned values' mean.
#[must_use]
pub fn mean_verdict(group: &Group) -> Verdict {
    let actual = group.assigned_mean();
    Verdict::grade(group.manual(Field::Mean), |entry| {
        actual > 0.0 && within_tolerance(entry, actual, TOLERANCE)
    })
}

/// The midpoint entry must be within tolerance of `(lower + upper) / 2`.
#[must_use]
pub fn midpoint_verdict(group: &Group) -> Verdict {
    let target = group.class_midpoint();
    Verdict::grade(group.manual(Field::Midpoint), |entry| {
        target > 0.0 && within_tolerance(entry, target, TOLERANCE)
    })
}

/// The deviation entry must be within tolerance of `|mean - midpoint|`, using the
/// group's canonical mean and the learner's midpoint.
#[must_use]
pub fn deviation_verdict(group: &Group) -> Verdict {
    let Some((mean, midpoint)) = group
        .mean()
        .zip(group.manual(Field::Midpoint))
        .filter(|&(mean, midpoint)| mean != 0.0 && midpoint != 0.0)
    else {
        return Verdict::Pending;
    };
    let target = (mean - midpoint).abs();
    Verdict::grade(group.manual(Field::Deviation), |entry| {
        within_tolerance(entry, target, TOLERANCE)
    })
}

/// The product entry must be within tolerance of `expected frequency × midpoint`,
/// using the learner's midpoint.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn product_verdict(group: &Group) -> Verdict {
    let target = group.expected_frequency() as f64 * group.manual(Field::Midpoint).unwrap_or(0.0);
    Verdict::grade(group.manual(Field::Product), |entry| {
        target > 0.0 && within_tolerance(entry, target, TOLERANCE)
    })
}

/// Target of the final mean: `Σ product entries / Σ expected frequency`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn final_mean_target(groups: &Grouping) -> f64 {
    let total_product = groups
        .iter()
        .map(|group| group.manual(Field::Product).unwrap_or(0.0))
        .fold(0.0, |acc, product| acc + product);
    let total_frequency = groups.total_expected();
    if total_frequency > 0 {
        total_product / total_frequency as f64
    } else {
        0.0
    }
}

#[must_use]
pub fn final_mean_verdict(state: &LessonState) -> Verdict {
    let target = final_mean_target(state.groups());
    Verdict::grade(state.manual_final_mean(), |entry| {
        target > 0.0 && within_tolerance(entry, target, TOLERANCE)
    })
}

#[must_use]
pub fn group_feedback(state: &LessonState) -> Vec<GroupFeedback> {
    state.groups().iter().map(GroupFeedback::for_group).collect()
}

/// Every raw value is assigned and every group's frequency, sum and mean are correct.
#[must_use]
pub fn step_a_complete(state: &LessonState) -> bool {
    state.groups().total_assigned() == state.raw_values().len()
        && state.groups().iter().all(|group| {
            frequency_verdict(group).is_correct()
                && sum_verdict(group).is_correct()
                && mean_verdict(group).is_correct()
        })
}

/// Step A is complete and every midpoint and deviation is correct.
#[must_use]
pub fn step_b_complete(state: &LessonState) -> bool {
    step_a_complete(state)
        && state.groups().iter().all(|group| {
            midpoint_verdict(group).is_correct() && deviation_verdict(group).is_correct()
        })
}

/// Step B is complete, every product is correct and the final mean is correct.
#[must_use]
pub fn step_c_complete(state: &LessonState) -> bool {
    step_b_complete(state)
        && state
            .groups()
            .iter()
            .all(|group| product_verdict(group).is_correct())
        && final_mean_verdict(state).is_correct()
}

#[cfg(test)]
mod tests {
    use crate::{Action, LessonDefinition, solution_actions};

    use super::*;

    fn solved() -> LessonState {
        let lesson = LessonDefinition::canonical();
        LessonState::replay(lesson.clone(), &solution_actions(&lesson))
    }

    fn assigned() -> LessonState {
        let lesson = LessonDefinition::canonical();
        let actions: Vec<_> = solution_actions(&lesson)
            .into_iter()
            .filter(|action| matches!(action, Action::AssignValue { .. }))
            .collect();
        LessonState::replay(lesson, &actions)
    }

    #[test]
    fn test_solution_passes_every_gate() {
        let state = solved();
        assert!(step_a_complete(&state));
        assert!(step_b_complete(&state));
        assert!(step_c_complete(&state));
        for feedback in group_feedback(&state) {
            for field in Field::ALL {
                assert_eq!(feedback.get(field), Verdict::Correct, "{field}");
            }
        }
        assert_eq!(final_mean_verdict(&state), Verdict::Correct);
    }

    #[test]
    fn test_fresh_lesson_is_pending() {
        let state = LessonState::new(LessonDefinition::canonical());
        assert!(!step_a_complete(&state));
        for feedback in group_feedback(&state) {
            for field in Field::ALL {
                assert_eq!(feedback.get(field), Verdict::Pending);
            }
        }
        assert_eq!(final_mean_verdict(&state), Verdict::Pending);
    }

    #[test]
    fn test_step_a_requires_every_value_assigned() {
        let mut state = solved();
        state.remove_value(0, 37.0);
        state.update_manual_frequency(0, 3.0);
        state.update_manual_sum(0, 104.0);
        state.update_manual_mean(0, 104.0 / 3.0);
        assert!(group_feedback(&state)[0].frequency.is_correct());
        assert!(!step_a_complete(&state));
    }

    #[test]
    fn test_step_a_rejects_zero_entries_for_empty_group() {
        let lesson = LessonDefinition::canonical();
        let mut state = LessonState::new(lesson);
        state.update_manual_frequency(0, 0.0);
        state.update_manual_sum(0, 0.0);
        state.update_manual_mean(0, 0.0);
        let feedback = group_feedback(&state)[0];
        assert_eq!(feedback.frequency, Verdict::Incorrect);
        assert_eq!(feedback.sum, Verdict::Incorrect);
        assert_eq!(feedback.mean, Verdict::Incorrect);
    }

    #[test]
    fn test_frequency_and_sum_are_exact() {
        let mut state = assigned();
        state.update_manual_frequency(0, 4.001);
        state.update_manual_sum(0, 141.001);
        let feedback = group_feedback(&state)[0];
        assert_eq!(feedback.frequency, Verdict::Incorrect);
        assert_eq!(feedback.sum, Verdict::Incorrect);
        state.update_manual_frequency(0, 4.0);
        state.update_manual_sum(0, 141.0);
        let feedback = group_feedback(&state)[0];
        assert_eq!(feedback.frequency, Verdict::Correct);
        assert_eq!(feedback.sum, Verdict::Correct);
    }

    #[test]
    fn test_mean_tolerance_boundary() {
        let mut state = assigned();
        state.update_manual_mean(0, 35.25 + 0.009);
        assert_eq!(group_feedback(&state)[0].mean, Verdict::Correct);
        state.update_manual_mean(0, 35.25 - 0.009);
        assert_eq!(group_feedback(&state)[0].mean, Verdict::Correct);
        state.update_manual_mean(0, 35.25 + 0.011);
        assert_eq!(group_feedback(&state)[0].mean, Verdict::Incorrect);
        state.update_manual_mean(0, 35.25 - 0.011);
        assert_eq!(group_feedback(&state)[0].mean, Verdict::Incorrect);
    }

    #[test]
    fn test_two_decimal_mean_is_accepted() {
        let mut state = solved();
        // 530 / 12 = 44.1666..
        state.update_manual_mean(1, 44.17);
        assert!(step_a_complete(&state));
        state.update_manual_mean(1, 44.18);
        assert!(!step_a_complete(&state));
    }

    #[test]
    fn test_midpoint_tolerance_boundary() {
        let mut state = solved();
        state.update_manual_midpoint(1, 45.009);
        state.update_manual_deviation(1, (44.17 - 45.009_f64).abs());
        assert_eq!(group_feedback(&state)[1].midpoint, Verdict::Correct);
        state.update_manual_midpoint(1, 45.011);
        assert_eq!(group_feedback(&state)[1].midpoint, Verdict::Incorrect);
        assert!(!step_b_complete(&state));
    }

    #[test]
    fn test_deviation_uses_mirrored_mean() {
        let mut state = solved();
        let group = state.groups().get(0).unwrap();
        assert_eq!(group.mean(), Some(35.25));
        state.update_manual_deviation(0, 0.25 + 0.009);
        assert_eq!(group_feedback(&state)[0].deviation, Verdict::Correct);
        state.update_manual_deviation(0, 0.25 + 0.011);
        assert_eq!(group_feedback(&state)[0].deviation, Verdict::Incorrect);

        // A different (still tolerated) step A mean moves the deviation target
        state.update_manual_mean(0, 35.259);
        state.update_manual_deviation(0, 0.259);
        assert_eq!(group_feedback(&state)[0].deviation, Verdict::Correct);
        assert!(step_b_complete(&state));
    }

    #[test]
    fn test_deviation_pending_without_midpoint() {
        let mut state = assigned();
        state.update_manual_mean(0, 35.25);
        state.update_manual_deviation(0, 0.25);
        assert_eq!(group_feedback(&state)[0].deviation, Verdict::Pending);
        state.update_manual_midpoint(0, 35.0);
        assert_eq!(group_feedback(&state)[0].deviation, Verdict::Correct);
    }

    #[test]
    fn test_product_tolerance_boundary() {
        let mut state = solved();
        // 12 × 45
        state.update_manual_product(1, 540.009);
        assert_eq!(group_feedback(&state)[1].product, Verdict::Correct);
        state.update_manual_product(1, 540.011);
        assert_eq!(group_feedback(&state)[1].product, Verdict::Incorrect);
        assert!(!step_c_complete(&state));
    }

    #[test]
    fn test_final_mean_target() {
        let state = solved();
        assert_eq!(final_mean_target(state.groups()), 50.625);
    }

    #[test]
    fn test_final_mean_tolerance_boundary() {
        let mut state = solved();
        state.update_manual_final_mean(50.63);
        assert!(step_c_complete(&state));
        state.update_manual_final_mean(50.625 + 0.009);
        assert!(step_c_complete(&state));
        state.update_manual_final_mean(50.625 - 0.011);
        assert!(!step_c_complete(&state));
        state.update_manual_final_mean(50.50);
        assert!(!step_c_complete(&state));
        state.update_manual_final_mean(50.00);
        assert!(!step_c_complete(&state));
        assert_eq!(final_mean_verdict(&state), Verdict::Incorrect);
    }

    #[test]
    fn test_gates_are_cumulative() {
        let mut state = solved();
        state.update_manual_sum(2, 547.0);
        assert!(!step_a_complete(&state));
        assert!(!step_b_complete(&state));
        assert!(!step_c_complete(&state));
        // Later-step entries are still graded on their own
        assert!(group_feedback(&state)[2].product.is_correct());
    }
}
