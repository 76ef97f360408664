use meanlab_stats::descriptive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Grouping, LessonDefinition};

use super::summary::MeanComparison;

/// Editable copy of the raw data used on step D.
///
/// Every edit regroups the whole sequence from scratch against the lesson intervals,
/// so the sandbox never carries assignments or entries from the main lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sandbox {
    raw_values: Vec<f64>,
    groups: Grouping,
    grouped_mean: f64,
    raw_mean: f64,
}

impl Sandbox {
    /// A sandbox holding the lesson's own raw data.
    #[must_use]
    pub fn new(definition: &LessonDefinition) -> Self {
        Self::compute(definition.raw_values.clone(), definition)
    }

    fn compute(raw_values: Vec<f64>, definition: &LessonDefinition) -> Self {
        let groups = Grouping::fresh(&raw_values, definition);
        let grouped_mean = groups.overall_mean();
        let raw_mean = descriptive::raw_mean(&raw_values);
        Self {
            raw_values,
            groups,
            grouped_mean,
            raw_mean,
        }
    }

    pub(crate) fn recalculate(&mut self, raw_values: Vec<f64>, definition: &LessonDefinition) {
        *self = Self::compute(raw_values, definition);
        debug!(
            values = self.raw_values.len(),
            grouped_mean = self.grouped_mean,
            raw_mean = self.raw_mean,
            "sandbox regrouped"
        );
    }

    pub(crate) fn edit_value(&mut self, index: usize, value: f64, definition: &LessonDefinition) {
        if index >= self.raw_values.len() {
            debug!(index, value, "sandbox edit ignored: index out of range");
            return;
        }
        let mut raw_values = self.raw_values.clone();
        raw_values[index] = value;
        self.recalculate(raw_values, definition);
    }

    pub(crate) fn reset(&mut self, definition: &LessonDefinition) {
        *self = Self::new(definition);
    }

    #[must_use]
    pub fn raw_values(&self) -> &[f64] {
        &self.raw_values
    }

    #[must_use]
    pub fn groups(&self) -> &Grouping {
        &self.groups
    }

    /// Overall mean of the regrouped data, weighted by classified counts.
    #[must_use]
    pub fn grouped_mean(&self) -> f64 {
        self.grouped_mean
    }

    /// Arithmetic mean of the sandbox raw values.
    #[must_use]
    pub fn raw_mean(&self) -> f64 {
        self.raw_mean
    }

    /// Grouped-data estimate from class midpoints.
    #[must_use]
    pub fn midpoint_mean(&self) -> f64 {
        self.groups.midpoint_mean()
    }

    /// Grouped mean compared with the raw mean.
    #[must_use]
    pub fn comparison(&self) -> MeanComparison {
        MeanComparison::new(self.raw_mean, self.grouped_mean)
    }

    /// Midpoint estimate compared with the raw mean.
    #[must_use]
    pub fn midpoint_comparison(&self) -> MeanComparison {
        MeanComparison::new(self.raw_mean, self.midpoint_mean())
    }
}
