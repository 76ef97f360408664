//! Interval membership and classification for grouped data.
//!
//! A grouped-frequency table splits the number line into ordered intervals.
//! Every interval is half-open `[lower, upper)` except the last one of a table,
//! which is closed `[lower, upper]` so that the maximum of the data still has a home.
//!
//! # Examples
//!
//! ```
//! use meanlab_stats::binning::{Interval, classify};
//!
//! let intervals = [
//!     Interval::half_open(30.0, 40.0),
//!     Interval::half_open(40.0, 50.0),
//!     Interval::half_open(50.0, 60.0),
//!     Interval::closed(60.0, 70.0),
//! ];
//!
//! // Upper bounds of half-open intervals belong to the next interval
//! assert_eq!(classify(50.0, &intervals), Some(2));
//! // The last interval includes its upper bound
//! assert_eq!(classify(70.0, &intervals), Some(3));
//! assert_eq!(classify(29.9, &intervals), None);
//! ```

use std::fmt;

/// A numeric interval used as a grouping bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Upper bound, inclusive only when `closed` is set.
    pub upper: f64,
    /// Whether the upper bound belongs to the interval.
    pub closed: bool,
}

impl Interval {
    /// Creates a half-open interval `[lower, upper)`.
    #[must_use]
    pub const fn half_open(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            closed: false,
        }
    }

    /// Creates a closed interval `[lower, upper]`.
    #[must_use]
    pub const fn closed(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            closed: true,
        }
    }

    /// Returns whether `value` falls into this interval.
    ///
    /// ```
    /// # use meanlab_stats::binning::Interval;
    /// assert!(Interval::half_open(30.0, 40.0).contains(30.0));
    /// assert!(!Interval::half_open(30.0, 40.0).contains(40.0));
    /// assert!(Interval::closed(60.0, 70.0).contains(70.0));
    /// ```
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if self.closed {
            value >= self.lower && value <= self.upper
        } else {
            value >= self.lower && value < self.upper
        }
    }

    /// The class mark `(lower + upper) / 2` used as the interval's representative value.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Width of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Formats the interval in the textbook style, e.g. `[30;40)` or `[60;70]`.
    #[must_use]
    pub fn label(&self) -> String {
        let close = if self.closed { ']' } else { ')' };
        format!("[{};{}{close}", Bound(self.lower), Bound(self.upper))
    }
}

/// Returns the index of the first interval containing `value`.
///
/// Intervals are tested in order; overlapping inputs are not detected and the first
/// match wins. `None` means the value lies outside every interval, which callers must
/// tolerate.
#[must_use]
pub fn classify<'a, I>(value: f64, intervals: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Interval>,
{
    intervals
        .into_iter()
        .position(|interval| interval.contains(value))
}

/// Prints whole-number bounds without a trailing `.0`.
struct Bound(f64);

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> [Interval; 4] {
        [
            Interval::half_open(30.0, 40.0),
            Interval::half_open(40.0, 50.0),
            Interval::half_open(50.0, 60.0),
            Interval::closed(60.0, 70.0),
        ]
    }

    #[test]
    fn test_lower_bound_is_inclusive() {
        let intervals = canonical();
        assert_eq!(classify(30.0, &intervals), Some(0));
        assert_eq!(classify(60.0, &intervals), Some(3));
    }

    #[test]
    fn test_upper_bound_moves_to_next_interval() {
        let intervals = canonical();
        assert_eq!(classify(40.0, &intervals), Some(1));
        assert_eq!(classify(39.999, &intervals), Some(0));
        assert_eq!(classify(60.0, &intervals), Some(3));
    }

    #[test]
    fn test_last_upper_bound_is_inclusive() {
        let intervals = canonical();
        assert_eq!(classify(70.0, &intervals), Some(3));
        assert_eq!(classify(70.001, &intervals), None);
    }

    #[test]
    fn test_unmatched_values() {
        let intervals = canonical();
        assert_eq!(classify(-1.0, &intervals), None);
        assert_eq!(classify(f64::NAN, &intervals), None);
        assert_eq!(classify(35.0, &[] as &[Interval]), None);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let intervals = [Interval::closed(0.0, 10.0), Interval::closed(5.0, 15.0)];
        assert_eq!(classify(7.0, &intervals), Some(0));
    }

    #[test]
    fn test_midpoint_and_width() {
        let interval = Interval::half_open(40.0, 50.0);
        assert_eq!(interval.midpoint(), 45.0);
        assert_eq!(interval.width(), 10.0);
        assert_eq!(Interval::half_open(40.0, 45.0).midpoint(), 42.5);
    }

    #[test]
    fn test_label() {
        assert_eq!(Interval::half_open(30.0, 40.0).label(), "[30;40)");
        assert_eq!(Interval::closed(60.0, 70.0).label(), "[60;70]");
        assert_eq!(Interval::half_open(2.5, 5.0).label(), "[2.5;5)");
    }
}
