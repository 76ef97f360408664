//! Grouped-data statistics for the meanlab lesson.
//!
//! This crate provides the small, pure building blocks the lesson engine is made of:
//!
//! - **Descriptive statistics**: left-to-right sums and arithmetic means
//! - **Binning**: half-open / closed intervals and first-match classification
//! - **Weighted means**: overall mean of grouped data from `(mean, weight)` pairs
//! - **Comparison**: absolute and relative deviations, tolerance checks
//!
//! Every function is deterministic. Sums are always accumulated left to right so that
//! identical inputs produce bit-identical results, which matters because learner
//! entries are compared against these values with a fixed tolerance.
//!
//! # Modules
//!
//! - [`descriptive`]: Sums and means of raw values
//! - [`binning`]: Interval membership and classification
//! - [`weighted`]: Weighted overall mean of grouped data
//! - [`comparison`]: Deviations between a reference and an estimate
//!
//! # Examples
//!
//! ## Computing a group mean
//!
//! ```
//! use meanlab_stats::descriptive::group_mean;
//!
//! assert_eq!(group_mean(&[37.0, 32.0, 39.0, 33.0]), 35.25);
//! assert_eq!(group_mean(&[]), 0.0);
//! ```
//!
//! ## Classifying a value
//!
//! ```
//! use meanlab_stats::binning::{Interval, classify};
//!
//! let intervals = [
//!     Interval::half_open(30.0, 40.0),
//!     Interval::half_open(40.0, 50.0),
//!     Interval::closed(50.0, 60.0),
//! ];
//! assert_eq!(classify(40.0, &intervals), Some(1));
//! assert_eq!(classify(60.0, &intervals), Some(2));
//! assert_eq!(classify(61.0, &intervals), None);
//! ```
//!
//! ## Computing a weighted mean
//!
//! ```
//! use meanlab_stats::weighted::{Weighted, overall_mean};
//!
//! let groups = [Weighted::new(35.0, 4.0), Weighted::new(45.0, 12.0)];
//! assert_eq!(overall_mean(groups), 42.5);
//! ```

pub mod binning;
pub mod comparison;
pub mod descriptive;
pub mod weighted;
