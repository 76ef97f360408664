use meanlab_stats::weighted::{self, Weighted};

use crate::core::{Grouping, LessonDefinition};

use super::action::Action;

/// Builds the action script that completes steps A, B and C of `definition` and
/// leaves the learner on step D.
///
/// Every distinct raw value is assigned once (which moves all of its occurrences),
/// then the exact figures of each step are entered followed by a step change.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn solution_actions(definition: &LessonDefinition) -> Vec<Action> {
    let reference = Grouping::fresh(&definition.raw_values, definition);
    let mut actions = Vec::new();

    for value in definition.distinct_values() {
        if let Some(group) = reference.classify(value) {
            actions.push(Action::AssignValue { group, value });
        }
    }

    for (group, figures) in reference.iter().enumerate() {
        actions.extend([
            Action::UpdateManualFrequency {
                group,
                value: figures.assigned_count() as f64,
            },
            Action::UpdateManualSum {
                group,
                value: figures.assigned_sum(),
            },
            Action::UpdateManualMean {
                group,
                value: figures.assigned_mean(),
            },
        ]);
    }
    actions.push(Action::NextStep);

    for (group, figures) in reference.iter().enumerate() {
        let midpoint = figures.class_midpoint();
        actions.extend([
            Action::UpdateManualMidpoint {
                group,
                value: midpoint,
            },
            Action::UpdateManualDeviation {
                group,
                value: (figures.assigned_mean() - midpoint).abs(),
            },
        ]);
    }
    actions.push(Action::NextStep);

    let products = definition
        .intervals
        .iter()
        .zip(reference.iter())
        .map(|(spec, figures)| {
            Weighted::new(figures.class_midpoint(), spec.expected_frequency as f64)
        })
        .collect::<Vec<_>>();
    for (group, product) in products.iter().enumerate() {
        actions.push(Action::UpdateManualProduct {
            group,
            value: product.weight * product.value,
        });
    }
    actions.push(Action::UpdateManualFinalMean {
        value: weighted::overall_mean(products),
    });
    actions.push(Action::NextStep);

    actions
}
