use meanlab_stats::binning::{self, Interval};
use serde::{Deserialize, Serialize};

use crate::{LessonDefinitionError, MAX_GROUPS};

/// One row of the grouped-frequency table as designed by the lesson author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSpec {
    /// Display label, e.g. `[30;40)`.
    pub label: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Number of raw values that belong to this interval.
    pub expected_frequency: usize,
}

impl IntervalSpec {
    #[must_use]
    pub fn new(lower_bound: f64, upper_bound: f64, expected_frequency: usize, last: bool) -> Self {
        let interval = if last {
            Interval::closed(lower_bound, upper_bound)
        } else {
            Interval::half_open(lower_bound, upper_bound)
        };
        Self {
            label: interval.label(),
            lower_bound,
            upper_bound,
            expected_frequency,
        }
    }
}

/// A complete lesson: the raw measurements and the intervals they are grouped into.
///
/// The last interval is always the closed one; every other interval is half-open.
///
/// # Example
///
/// ```
/// use meanlab_engine::LessonDefinition;
///
/// let lesson = LessonDefinition::canonical();
/// assert!(lesson.validate().is_ok());
/// assert_eq!(lesson.raw_values.len(), 32);
/// assert_eq!(lesson.occurrences(43.0), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonDefinition {
    pub name: String,
    pub raw_values: Vec<f64>,
    pub intervals: Vec<IntervalSpec>,
}

const LEAF_LENGTHS: [f64; 32] = [
    40.0, 46.0, 45.0, 59.0, 43.0, 52.0, 49.0, 43.0, //
    59.0, 53.0, 70.0, 42.0, 60.0, 37.0, 55.0, 43.0, //
    51.0, 56.0, 61.0, 57.0, 32.0, 63.0, 46.0, 56.0, //
    60.0, 42.0, 46.0, 66.0, 39.0, 50.0, 33.0, 45.0,
];

const STUDENT_WEIGHTS: [f64; 32] = [
    45.0, 48.0, 52.0, 47.0, 50.0, 54.0, 49.0, 46.0, //
    53.0, 51.0, 55.0, 48.0, 57.0, 44.0, 52.0, 47.0, //
    49.0, 50.0, 56.0, 53.0, 42.0, 58.0, 48.0, 51.0, //
    54.0, 47.0, 50.0, 59.0, 45.0, 52.0, 41.0, 48.0,
];

impl LessonDefinition {
    pub const BUILTIN_NAMES: [&'static str; 2] = ["canonical", "practice"];

    /// Leaf lengths in millimetres, grouped into `[30;40) [40;50) [50;60) [60;70]`.
    #[must_use]
    pub fn canonical() -> Self {
        Self::evenly_spaced("canonical", &LEAF_LENGTHS, 30.0, 10.0, &[4, 12, 10, 6])
    }

    /// Student weights in kilograms, grouped into `[40;45) [45;50) [50;55) [55;60]`.
    #[must_use]
    pub fn practice() -> Self {
        Self::evenly_spaced("practice", &STUDENT_WEIGHTS, 40.0, 5.0, &[3, 12, 12, 5])
    }

    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "canonical" => Some(Self::canonical()),
            "practice" => Some(Self::practice()),
            _ => None,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn evenly_spaced(
        name: &str,
        raw_values: &[f64],
        start: f64,
        width: f64,
        frequencies: &[usize],
    ) -> Self {
        let last = frequencies.len().saturating_sub(1);
        let intervals = frequencies
            .iter()
            .enumerate()
            .map(|(i, &frequency)| {
                let lower = start + width * i as f64;
                IntervalSpec::new(lower, lower + width, frequency, i == last)
            })
            .collect();
        Self {
            name: name.to_owned(),
            raw_values: raw_values.to_vec(),
            intervals,
        }
    }

    /// Returns the membership interval of the group at `index`.
    #[must_use]
    pub fn interval(&self, index: usize) -> Option<Interval> {
        let spec = self.intervals.get(index)?;
        let interval = if index + 1 == self.intervals.len() {
            Interval::closed(spec.lower_bound, spec.upper_bound)
        } else {
            Interval::half_open(spec.lower_bound, spec.upper_bound)
        };
        Some(interval)
    }

    pub fn interval_iter(&self) -> impl Iterator<Item = Interval> + '_ {
        (0..self.intervals.len()).filter_map(|index| self.interval(index))
    }

    /// Number of times `value` occurs in the raw sequence.
    #[must_use]
    pub fn occurrences(&self, value: f64) -> usize {
        self.raw_values.iter().filter(|&&v| v == value).count()
    }

    /// Distinct raw values in order of first occurrence.
    #[must_use]
    pub fn distinct_values(&self) -> Vec<f64> {
        let mut distinct: Vec<f64> = Vec::new();
        for &value in &self.raw_values {
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }
        distinct
    }

    /// Checks that the definition can drive a lesson.
    ///
    /// Beyond structural checks, this verifies that every raw value falls into exactly
    /// the interval counts the author declared, since those counts are what the learner
    /// is graded against.
    pub fn validate(&self) -> Result<(), LessonDefinitionError> {
        if self.intervals.is_empty() {
            return Err(LessonDefinitionError::NoIntervals);
        }
        if self.intervals.len() > MAX_GROUPS {
            return Err(LessonDefinitionError::TooManyIntervals {
                count: self.intervals.len(),
                max: MAX_GROUPS,
            });
        }

        for (index, spec) in self.intervals.iter().enumerate() {
            let (lower, upper) = (spec.lower_bound, spec.upper_bound);
            if !lower.is_finite() || !upper.is_finite() || lower >= upper {
                return Err(LessonDefinitionError::InvalidBounds {
                    index,
                    lower,
                    upper,
                });
            }
            if spec.expected_frequency == 0 {
                return Err(LessonDefinitionError::EmptyInterval {
                    label: spec.label.clone(),
                });
            }
        }
        for (index, pair) in self.intervals.windows(2).enumerate() {
            if pair[1].lower_bound < pair[0].upper_bound {
                return Err(LessonDefinitionError::OverlappingIntervals { index: index + 1 });
            }
        }

        let intervals = self.interval_iter().collect::<Vec<_>>();
        let mut counts = vec![0; intervals.len()];
        for (index, &value) in self.raw_values.iter().enumerate() {
            if !value.is_finite() {
                return Err(LessonDefinitionError::NonFiniteValue { index, value });
            }
            let Some(group) = binning::classify(value, &intervals) else {
                return Err(LessonDefinitionError::UnclassifiedValue { index, value });
            };
            counts[group] += 1;
        }

        for (spec, actual) in self.intervals.iter().zip(counts) {
            if spec.expected_frequency != actual {
                return Err(LessonDefinitionError::FrequencyMismatch {
                    label: spec.label.clone(),
                    expected: spec.expected_frequency,
                    actual,
                });
            }
        }
        Ok(())
    }
}
