use serde::{Deserialize, Serialize};

use crate::core::Step;

use super::state::LessonState;

/// A single learner (or navigation) action.
///
/// Actions are plain data so that a lesson can be replayed from a script:
///
/// ```
/// use meanlab_engine::Action;
///
/// let script = r#"[
///     {"action": "assign_value", "group": 0, "value": 37.0},
///     {"action": "update_manual_frequency", "group": 0, "value": 4.0},
///     {"action": "next_step"}
/// ]"#;
/// let actions: Vec<Action> = serde_json::from_str(script).unwrap();
/// assert_eq!(actions[0], Action::AssignValue { group: 0, value: 37.0 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    AssignValue { group: usize, value: f64 },
    RemoveValue { group: usize, value: f64 },
    UpdateManualFrequency { group: usize, value: f64 },
    UpdateManualSum { group: usize, value: f64 },
    UpdateManualMean { group: usize, value: f64 },
    UpdateManualMidpoint { group: usize, value: f64 },
    UpdateManualDeviation { group: usize, value: f64 },
    UpdateManualProduct { group: usize, value: f64 },
    UpdateManualFinalMean { value: f64 },
    /// Replace one value of the sandbox raw data and regroup.
    EditSandboxValue { index: usize, value: f64 },
    /// Replace the whole sandbox raw data and regroup.
    RecalculateSandbox { values: Vec<f64> },
    ResetRawSandbox,
    ResetLesson,
    GoToStep { step: Step },
    NextStep,
    PreviousStep,
}

/// Pure transition: returns the state after `action`, leaving `state` untouched.
///
/// ```
/// use meanlab_engine::{Action, LessonDefinition, LessonState, reduce};
///
/// let state = LessonState::new(LessonDefinition::canonical());
/// let next = reduce(&state, &Action::AssignValue { group: 1, value: 43.0 });
/// assert_eq!(next.groups().get(1).unwrap().assigned_count(), 3);
/// assert_eq!(state.groups().get(1).unwrap().assigned_count(), 0);
/// ```
#[must_use]
pub fn reduce(state: &LessonState, action: &Action) -> LessonState {
    let mut next = state.clone();
    next.apply(action);
    next
}
