use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    LessonDefinitionError,
    core::{Field, GroupIndexSet, Grouping, LessonDefinition, Step, Tagged},
};

use super::{action::Action, predicates, sandbox::Sandbox};

/// The lesson store.
///
/// Holds the main-lesson groups, the learner's navigation position, the completion
/// cache and an independent [`Sandbox`] for step D. Every mutation is total: invalid
/// input (unknown group, duplicate or overflowing assignment, locked step) leaves the
/// state unchanged and is only reported through the completion predicates.
///
/// # Example
///
/// ```
/// use meanlab_engine::{LessonDefinition, LessonState};
///
/// let mut state = LessonState::new(LessonDefinition::canonical());
/// state.assign_value(0, 37.0);
/// state.assign_value(0, 37.0); // duplicate, ignored
/// assert_eq!(state.groups().get(0).unwrap().assigned_values(), &[37.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LessonState {
    definition: Arc<LessonDefinition>,
    current_step: Step,
    groups: Grouping,
    manual_final_mean: Option<f64>,
    completed_groups: GroupIndexSet,
    original_mean: Option<f64>,
    current_mean: Option<f64>,
    sandbox: Sandbox,
}

impl LessonState {
    /// Starts a lesson with empty assignments and no entries.
    ///
    /// The definition is not validated; use [`LessonState::try_new`] for definitions
    /// that come from outside the program.
    #[must_use]
    pub fn new(definition: LessonDefinition) -> Self {
        let definition = Arc::new(definition);
        let sandbox = Sandbox::new(&definition);
        Self {
            groups: Grouping::empty(&definition),
            definition,
            current_step: Step::A,
            manual_final_mean: None,
            completed_groups: GroupIndexSet::new(),
            original_mean: None,
            current_mean: None,
            sandbox,
        }
    }

    pub fn try_new(definition: LessonDefinition) -> Result<Self, LessonDefinitionError> {
        definition.validate()?;
        Ok(Self::new(definition))
    }

    /// Folds `actions` over a fresh state.
    pub fn replay<'a, I>(definition: LessonDefinition, actions: I) -> Self
    where
        I: IntoIterator<Item = &'a Action>,
    {
        let mut state = Self::new(definition);
        for action in actions {
            state.apply(action);
        }
        state
    }

    pub(crate) fn from_parts(
        definition: LessonDefinition,
        current_step: Step,
        groups: Grouping,
        manual_final_mean: Option<f64>,
        original_mean: Option<f64>,
        current_mean: Option<f64>,
    ) -> Self {
        let mut state = Self::new(definition);
        state.current_step = current_step;
        state.groups = groups;
        state.manual_final_mean = manual_final_mean;
        state.original_mean = original_mean;
        state.current_mean = current_mean;
        state.refresh_completion();
        state
    }

    #[must_use]
    pub fn definition(&self) -> &LessonDefinition {
        &self.definition
    }

    /// The immutable raw sequence step A is graded against.
    #[must_use]
    pub fn raw_values(&self) -> &[f64] {
        &self.definition.raw_values
    }

    #[must_use]
    pub fn current_step(&self) -> Step {
        self.current_step
    }

    #[must_use]
    pub fn groups(&self) -> &Grouping {
        &self.groups
    }

    #[must_use]
    pub fn manual_final_mean(&self) -> Option<f64> {
        self.manual_final_mean
    }

    #[must_use]
    pub fn completed_groups(&self) -> &GroupIndexSet {
        &self.completed_groups
    }

    /// Overall mean of the true group means, latched when all groups were first filled.
    #[must_use]
    pub fn original_mean(&self) -> Option<f64> {
        self.original_mean
    }

    /// Overall mean of the true group means while all groups are filled.
    #[must_use]
    pub fn current_mean(&self) -> Option<f64> {
        self.current_mean
    }

    #[must_use]
    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Mean of the sandbox's edited raw data.
    #[must_use]
    pub fn raw_data_mean(&self) -> f64 {
        self.sandbox.raw_mean()
    }

    /// Overall mean of the sandbox groups.
    #[must_use]
    pub fn sandbox_mean(&self) -> f64 {
        self.sandbox.grouped_mean()
    }

    pub fn apply(&mut self, action: &Action) {
        match *action {
            Action::AssignValue { group, value } => self.assign_value(group, value),
            Action::RemoveValue { group, value } => self.remove_value(group, value),
            Action::UpdateManualFrequency { group, value } => {
                self.update_manual_frequency(group, value);
            }
            Action::UpdateManualSum { group, value } => self.update_manual_sum(group, value),
            Action::UpdateManualMean { group, value } => self.update_manual_mean(group, value),
            Action::UpdateManualMidpoint { group, value } => {
                self.update_manual_midpoint(group, value);
            }
            Action::UpdateManualDeviation { group, value } => {
                self.update_manual_deviation(group, value);
            }
            Action::UpdateManualProduct { group, value } => {
                self.update_manual_product(group, value);
            }
            Action::UpdateManualFinalMean { value } => self.update_manual_final_mean(value),
            Action::EditSandboxValue { index, value } => self.edit_sandbox_value(index, value),
            Action::RecalculateSandbox { ref values } => self.recalculate_sandbox(values.clone()),
            Action::ResetRawSandbox => self.reset_raw_sandbox(),
            Action::ResetLesson => self.reset_lesson(),
            Action::GoToStep { step } => self.go_to_step(step),
            Action::NextStep => self.next_step(),
            Action::PreviousStep => self.previous_step(),
        }
    }

    /// Assigns every occurrence of `value` in the raw data to group `group_index`.
    ///
    /// All occurrences are added in one go or none are. The assignment is ignored when
    /// the value is already assigned (to this or another group), does not occur in the
    /// raw data, lies outside the group's interval, or does not fit in the group's
    /// remaining capacity.
    pub fn assign_value(&mut self, group_index: usize, value: f64) {
        if let Some(other) = self
            .groups
            .iter()
            .position(|group| group.contains_value(value))
            .filter(|&other| other != group_index)
        {
            debug!(
                group_index,
                value,
                other,
                "assignment ignored: value already assigned to another group"
            );
            return;
        }
        let occurrences = self.definition.occurrences(value);
        let Some(group) = self.groups.get_mut(group_index) else {
            debug!(group_index, value, "assignment ignored: no such group");
            return;
        };
        if !group.interval().contains(value) {
            debug!(
                group_index,
                value,
                "assignment ignored: value outside the group interval"
            );
            return;
        }
        match group.try_assign(value, occurrences) {
            Ok(()) => self.refresh_completion(),
            Err(reason) => debug!(group_index, value, %reason, "assignment ignored"),
        }
    }

    /// Removes every occurrence of `value` from group `group_index`.
    pub fn remove_value(&mut self, group_index: usize, value: f64) {
        let Some(group) = self.groups.get_mut(group_index) else {
            debug!(group_index, value, "removal ignored: no such group");
            return;
        };
        if group.remove_value(value) > 0 {
            self.refresh_completion();
        }
    }

    pub fn update_manual_frequency(&mut self, group_index: usize, value: f64) {
        self.enter(group_index, Field::Frequency, value);
    }

    pub fn update_manual_sum(&mut self, group_index: usize, value: f64) {
        self.enter(group_index, Field::Sum, value);
    }

    /// Records the learner's group mean. The same slot is what later steps read as
    /// the group's mean.
    pub fn update_manual_mean(&mut self, group_index: usize, value: f64) {
        self.enter(group_index, Field::Mean, value);
    }

    /// Records the learner's midpoint. The same slot is what later steps read as
    /// the group's midpoint.
    pub fn update_manual_midpoint(&mut self, group_index: usize, value: f64) {
        self.enter(group_index, Field::Midpoint, value);
    }

    pub fn update_manual_deviation(&mut self, group_index: usize, value: f64) {
        self.enter(group_index, Field::Deviation, value);
    }

    pub fn update_manual_product(&mut self, group_index: usize, value: f64) {
        self.enter(group_index, Field::Product, value);
    }

    pub fn update_manual_final_mean(&mut self, value: f64) {
        self.manual_final_mean = Some(value);
    }

    fn enter(&mut self, group_index: usize, field: Field, value: f64) {
        let Some(group) = self.groups.get_mut(group_index) else {
            debug!(group_index, %field, value, "entry ignored: no such group");
            return;
        };
        group.set_entry(field, Tagged::manual(value, field.step()));
    }

    /// Regroups `raw_values` in the sandbox. The main lesson is not touched.
    pub fn recalculate_sandbox(&mut self, raw_values: Vec<f64>) {
        self.sandbox.recalculate(raw_values, &self.definition);
    }

    /// Replaces one sandbox raw value and regroups.
    pub fn edit_sandbox_value(&mut self, index: usize, value: f64) {
        self.sandbox.edit_value(index, value, &self.definition);
    }

    /// Restores the sandbox raw data to the lesson's raw data and regroups.
    pub fn reset_raw_sandbox(&mut self) {
        info!("resetting sandbox raw data");
        self.sandbox.reset(&self.definition);
    }

    /// Restarts the main lesson. The sandbox is left as it is.
    pub fn reset_lesson(&mut self) {
        info!(lesson = %self.definition.name, "restarting lesson");
        self.groups = Grouping::empty(&self.definition);
        self.current_step = Step::A;
        self.manual_final_mean = None;
        self.completed_groups.clear();
        self.original_mean = None;
        self.current_mean = None;
    }

    #[must_use]
    pub fn is_step_a_complete(&self) -> bool {
        predicates::step_a_complete(self)
    }

    #[must_use]
    pub fn is_step_b_complete(&self) -> bool {
        predicates::step_b_complete(self)
    }

    #[must_use]
    pub fn is_step_c_complete(&self) -> bool {
        predicates::step_c_complete(self)
    }

    /// Whether `step`'s own gate is satisfied. Steps without a gate are always complete.
    #[must_use]
    pub fn is_step_complete(&self, step: Step) -> bool {
        match step {
            Step::A => self.is_step_a_complete(),
            Step::B => self.is_step_b_complete(),
            Step::C => self.is_step_c_complete(),
            Step::D | Step::Summary => true,
        }
    }

    /// The furthest step the learner may navigate to.
    #[must_use]
    pub fn highest_unlocked_step(&self) -> Step {
        Step::ALL
            .into_iter()
            .find(|&step| !self.is_step_complete(step))
            .unwrap_or(Step::Summary)
    }

    /// Moves to `step` if it is unlocked; otherwise does nothing.
    pub fn go_to_step(&mut self, step: Step) {
        let unlocked = self.highest_unlocked_step();
        if step > unlocked {
            debug!(?step, ?unlocked, "navigation ignored: step is locked");
            return;
        }
        self.current_step = step;
    }

    pub fn next_step(&mut self) {
        if let Some(step) = self.current_step.next() {
            self.go_to_step(step);
        }
    }

    pub fn previous_step(&mut self) {
        if let Some(step) = self.current_step.previous() {
            self.current_step = step;
        }
    }

    fn refresh_completion(&mut self) {
        self.completed_groups = self
            .groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.is_filled())
            .map(|(index, _)| index)
            .collect();

        if !self.groups.is_empty() && self.completed_groups.len() == self.groups.len() {
            let mean = self.groups.assigned_mean();
            self.current_mean = Some(mean);
            self.original_mean.get_or_insert(mean);
        } else {
            self.current_mean = None;
        }
    }
}
