use meanlab_stats::{binning::Interval, descriptive};
use serde::{Deserialize, Serialize};

use super::{definition::IntervalSpec, step::Step};

/// Where a group figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum Source {
    /// Typed by the learner on the given step.
    Manual(Step),
    /// Computed by the engine (sandbox recomputation).
    Computed,
}

/// A group figure together with its provenance.
///
/// A group keeps a single slot per figure. Entering the mean on step A writes
/// `Tagged { value, source: Manual(A) }` into the `mean` slot, and every later
/// reader (deviation check, chart) reads that same slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tagged {
    pub value: f64,
    pub source: Source,
}

impl Tagged {
    #[must_use]
    pub const fn manual(value: f64, step: Step) -> Self {
        Self {
            value,
            source: Source::Manual(step),
        }
    }

    #[must_use]
    pub const fn computed(value: f64) -> Self {
        Self {
            value,
            source: Source::Computed,
        }
    }

    /// The value, if a learner typed it.
    #[must_use]
    pub fn manual_value(&self) -> Option<f64> {
        self.source.is_manual().then_some(self.value)
    }
}

/// A figure a learner can enter for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Field {
    #[display("frequency")]
    Frequency,
    #[display("sum")]
    Sum,
    #[display("mean")]
    Mean,
    #[display("midpoint")]
    Midpoint,
    #[display("deviation")]
    Deviation,
    /// Frequency × midpoint.
    #[display("product")]
    Product,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Frequency,
        Field::Sum,
        Field::Mean,
        Field::Midpoint,
        Field::Deviation,
        Field::Product,
    ];

    /// The step on which the learner enters this figure.
    #[must_use]
    pub const fn step(self) -> Step {
        match self {
            Field::Frequency | Field::Sum | Field::Mean => Step::A,
            Field::Midpoint | Field::Deviation => Step::B,
            Field::Product => Step::C,
        }
    }
}

/// Why an assignment was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AssignRejection {
    #[display("value already assigned to this group")]
    Duplicate,
    #[display("needs {needed} free slots, only {remaining} left")]
    Overflow { needed: usize, remaining: usize },
    #[display("value does not occur in the raw data")]
    NotInData,
}

/// One interval of a grouped-frequency table and everything the learner did with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    label: String,
    lower_bound: f64,
    upper_bound: f64,
    is_last_interval: bool,
    expected_frequency: usize,
    assigned_values: Vec<f64>,
    frequency: Option<Tagged>,
    sum: Option<Tagged>,
    mean: Option<Tagged>,
    midpoint: Option<Tagged>,
    deviation: Option<Tagged>,
    product: Option<Tagged>,
}

impl Group {
    #[must_use]
    pub fn new(spec: &IntervalSpec, is_last_interval: bool) -> Self {
        Self {
            label: spec.label.clone(),
            lower_bound: spec.lower_bound,
            upper_bound: spec.upper_bound,
            is_last_interval,
            expected_frequency: spec.expected_frequency,
            assigned_values: Vec::new(),
            frequency: None,
            sum: None,
            mean: None,
            midpoint: None,
            deviation: None,
            product: None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    #[must_use]
    pub fn is_last_interval(&self) -> bool {
        self.is_last_interval
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        if self.is_last_interval {
            Interval::closed(self.lower_bound, self.upper_bound)
        } else {
            Interval::half_open(self.lower_bound, self.upper_bound)
        }
    }

    /// The correct midpoint `(lower + upper) / 2`, independent of what was entered.
    #[must_use]
    pub fn class_midpoint(&self) -> f64 {
        self.interval().midpoint()
    }

    #[must_use]
    pub fn expected_frequency(&self) -> usize {
        self.expected_frequency
    }

    #[must_use]
    pub fn assigned_values(&self) -> &[f64] {
        &self.assigned_values
    }

    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.assigned_values.len()
    }

    #[must_use]
    pub fn assigned_sum(&self) -> f64 {
        descriptive::sum(&self.assigned_values)
    }

    #[must_use]
    pub fn assigned_mean(&self) -> f64 {
        descriptive::group_mean(&self.assigned_values)
    }

    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.expected_frequency
            .saturating_sub(self.assigned_values.len())
    }

    /// All expected values have been assigned.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.assigned_values.len() == self.expected_frequency
    }

    #[must_use]
    pub fn contains_value(&self, value: f64) -> bool {
        self.assigned_values.contains(&value)
    }

    #[must_use]
    pub fn entry(&self, field: Field) -> Option<Tagged> {
        match field {
            Field::Frequency => self.frequency,
            Field::Sum => self.sum,
            Field::Mean => self.mean,
            Field::Midpoint => self.midpoint,
            Field::Deviation => self.deviation,
            Field::Product => self.product,
        }
    }

    /// The learner's entry for `field`, ignoring computed values.
    #[must_use]
    pub fn manual(&self, field: Field) -> Option<f64> {
        self.entry(field).and_then(|tagged| tagged.manual_value())
    }

    /// The canonical group mean, whichever step or computation produced it.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        self.mean.map(|tagged| tagged.value)
    }

    /// The canonical group midpoint, whichever step or computation produced it.
    #[must_use]
    pub fn midpoint(&self) -> Option<f64> {
        self.midpoint.map(|tagged| tagged.value)
    }

    pub(crate) fn set_entry(&mut self, field: Field, tagged: Tagged) {
        let slot = match field {
            Field::Frequency => &mut self.frequency,
            Field::Sum => &mut self.sum,
            Field::Mean => &mut self.mean,
            Field::Midpoint => &mut self.midpoint,
            Field::Deviation => &mut self.deviation,
            Field::Product => &mut self.product,
        };
        *slot = Some(tagged);
    }

    /// Appends `occurrences` copies of `value`, all or nothing.
    pub(crate) fn try_assign(
        &mut self,
        value: f64,
        occurrences: usize,
    ) -> Result<(), AssignRejection> {
        if occurrences == 0 {
            return Err(AssignRejection::NotInData);
        }
        if self.contains_value(value) {
            return Err(AssignRejection::Duplicate);
        }
        let remaining = self.remaining_capacity();
        if occurrences > remaining {
            return Err(AssignRejection::Overflow {
                needed: occurrences,
                remaining,
            });
        }
        self.assigned_values
            .extend(std::iter::repeat_n(value, occurrences));
        Ok(())
    }

    /// Removes every copy of `value` and returns how many were removed.
    pub(crate) fn remove_value(&mut self, value: f64) -> usize {
        let before = self.assigned_values.len();
        self.assigned_values.retain(|&v| v != value);
        before - self.assigned_values.len()
    }

    /// Pushes a single classified value (sandbox path, no capacity check).
    pub(crate) fn push_classified(&mut self, value: f64) {
        self.assigned_values.push(value);
    }

    /// Fills every figure from the assigned values and resets the expected
    /// frequency to the classified count.
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn compute_all(&mut self) {
        let frequency = self.assigned_values.len();
        let sum = self.assigned_sum();
        let mean = self.assigned_mean();
        let midpoint = self.class_midpoint();
        self.expected_frequency = frequency;
        self.frequency = Some(Tagged::computed(frequency as f64));
        self.sum = Some(Tagged::computed(sum));
        self.mean = Some(Tagged::computed(mean));
        self.midpoint = Some(Tagged::computed(midpoint));
        self.deviation = Some(Tagged::computed((mean - midpoint).abs()));
        self.product = Some(Tagged::computed(frequency as f64 * midpoint));
    }
}
