use serde::{Deserialize, Serialize};

/// One screen of the guided lesson.
///
/// The lesson is strictly linear: A → B → C → D → Summary. Steps A, B and C each
/// have a completion predicate that gates the following step; D and the summary
/// have none.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
pub enum Step {
    /// Classify raw values and compute per-group frequency, sum and mean.
    #[default]
    A,
    /// Compute midpoints and compare them with the group means.
    B,
    /// Compute the grouped mean from frequencies and midpoints.
    C,
    /// Edit the raw data and watch the grouped estimate move.
    D,
    Summary,
}

impl Step {
    pub const ALL: [Step; 5] = [Step::A, Step::B, Step::C, Step::D, Step::Summary];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Step::A => 0,
            Step::B => 1,
            Step::C => 2,
            Step::D => 3,
            Step::Summary => 4,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Step::A => "Classify the data and compute group means",
            Step::B => "Compare group means with midpoints",
            Step::C => "Compute the grouped mean",
            Step::D => "Representative values",
            Step::Summary => "Summary",
        }
    }
}
