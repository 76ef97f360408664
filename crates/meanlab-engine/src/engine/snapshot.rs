use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    SnapshotError,
    core::{GroupIndexSet, Grouping, LessonDefinition, Step},
};

use super::state::LessonState;

/// The persisted subset of a [`LessonState`].
///
/// The sandbox is not part of it; restoring a snapshot starts the sandbox from the
/// lesson's raw data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSnapshot {
    pub current_step: Step,
    pub groups: Grouping,
    #[serde(default)]
    pub manual_final_mean: Option<f64>,
    pub original_mean: Option<f64>,
    pub current_mean: Option<f64>,
    /// Stored for readers of the file; rebuilt from `groups` on restore.
    pub completed_groups: GroupIndexSet,
}

impl LessonState {
    #[must_use]
    pub fn snapshot(&self) -> LessonSnapshot {
        LessonSnapshot {
            current_step: self.current_step(),
            groups: self.groups().clone(),
            manual_final_mean: self.manual_final_mean(),
            original_mean: self.original_mean(),
            current_mean: self.current_mean(),
            completed_groups: self.completed_groups().clone(),
        }
    }

    /// Rebuilds a state from `snapshot` for the lesson `definition`.
    ///
    /// The snapshot's groups must describe exactly the lesson's intervals and must
    /// not hold more values than an interval expects.
    pub fn restore(
        definition: LessonDefinition,
        snapshot: LessonSnapshot,
    ) -> Result<Self, SnapshotError> {
        check_groups(&definition, &snapshot.groups)?;
        info!(
            lesson = %definition.name,
            step = ?snapshot.current_step,
            "restoring lesson snapshot"
        );
        Ok(Self::from_parts(
            definition,
            snapshot.current_step,
            snapshot.groups,
            snapshot.manual_final_mean,
            snapshot.original_mean,
            snapshot.current_mean,
        ))
    }
}

#[expect(clippy::float_cmp)]
fn check_groups(definition: &LessonDefinition, groups: &Grouping) -> Result<(), SnapshotError> {
    let expected = Grouping::empty(definition);
    if groups.len() != expected.len() || definition.intervals.len() != expected.len() {
        return Err(SnapshotError::GroupCountMismatch {
            expected: definition.intervals.len(),
            actual: groups.len(),
        });
    }
    for (index, (group, reference)) in groups.iter().zip(expected.iter()).enumerate() {
        if group.label() != reference.label()
            || group.lower_bound() != reference.lower_bound()
            || group.upper_bound() != reference.upper_bound()
            || group.is_last_interval() != reference.is_last_interval()
            || group.expected_frequency() != reference.expected_frequency()
        {
            return Err(SnapshotError::GroupMismatch {
                index,
                label: reference.label().to_owned(),
            });
        }
        if group.assigned_count() > group.expected_frequency() {
            return Err(SnapshotError::AssignmentOverflow {
                index,
                assigned: group.assigned_count(),
                expected: group.expected_frequency(),
            });
        }
        let interval = group.interval();
        if let Some(&value) = group
            .assigned_values()
            .iter()
            .find(|&&value| !interval.contains(value))
        {
            return Err(SnapshotError::ValueOutsideInterval {
                index,
                label: group.label().to_owned(),
                value,
            });
        }
        if let Some(&value) = group.assigned_values().iter().find(|&&value| {
            groups
                .iter()
                .take(index)
                .any(|earlier| earlier.contains_value(value))
        }) {
            return Err(SnapshotError::ValueInSeveralGroups { value });
        }
    }
    Ok(())
}
