pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Largest number of groups a lesson may define.
pub const MAX_GROUPS: usize = 8;

/// Uniform correctness threshold for every learner entry checked against a
/// derived target. An entry is correct when `|entry - target| < TOLERANCE`.
pub const TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum LessonDefinitionError {
    #[display("lesson defines no intervals")]
    NoIntervals,
    #[display("lesson defines {count} intervals, at most {max} are supported")]
    TooManyIntervals { count: usize, max: usize },
    #[display("interval #{index} has invalid bounds [{lower}, {upper}]")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },
    #[display("interval {label} expects no values, so it can never be completed")]
    EmptyInterval { label: String },
    #[display("interval #{index} overlaps or precedes the interval before it")]
    OverlappingIntervals { index: usize },
    #[display("raw value #{index} ({value}) is not a finite number")]
    NonFiniteValue { index: usize, value: f64 },
    #[display("raw value #{index} ({value}) falls outside every interval")]
    UnclassifiedValue { index: usize, value: f64 },
    #[display("interval {label} expects {expected} values but {actual} raw values fall into it")]
    FrequencyMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    #[display("snapshot has {actual} groups but the lesson defines {expected}")]
    GroupCountMismatch { expected: usize, actual: usize },
    #[display("snapshot group #{index} does not match the lesson interval {label}")]
    GroupMismatch { index: usize, label: String },
    #[display("snapshot group #{index} holds {assigned} values but expects at most {expected}")]
    AssignmentOverflow {
        index: usize,
        assigned: usize,
        expected: usize,
    },
    #[display("snapshot group #{index} ({label}) holds {value}, which lies outside it")]
    ValueOutsideInterval {
        index: usize,
        label: String,
        value: f64,
    },
    #[display("snapshot assigns {value} to more than one group")]
    ValueInSeveralGroups { value: f64 },
}
