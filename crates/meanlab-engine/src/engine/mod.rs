//! Lesson state, actions and the rules that grade the learner.
//!
//! - [`LessonState`] - The store: main-lesson groups, navigation, sandbox, caches
//! - [`Action`] - Every mutation as data, applied with [`reduce`] or [`LessonState::apply`]
//! - [`predicates`] - Step completion gates and per-entry verdicts
//! - [`Sandbox`] - Editable copy of the raw data, regrouped from scratch on every edit
//! - [`LessonSnapshot`] - The persisted subset of the state
//! - [`MeanComparison`] / [`DeviationRow`] - Figures shown on step D and the summary
//! - [`solution_actions`] - Answer key that completes steps A to C
//!
//! # Lesson Flow
//!
//! 1. Assign every raw value to its interval (step A)
//! 2. Enter frequency, sum and mean for every group (step A)
//! 3. Enter midpoints and |mean - midpoint| deviations (step B)
//! 4. Enter frequency × midpoint products and the grouped mean (step C)
//! 5. Edit the raw data in the sandbox and compare means (step D)
//!
//! # Example
//!
//! ```
//! use meanlab_engine::{LessonDefinition, LessonState, Step, solution_actions};
//!
//! let lesson = LessonDefinition::canonical();
//! let mut state = LessonState::new(lesson.clone());
//! assert!(!state.is_step_a_complete());
//!
//! for action in solution_actions(&lesson) {
//!     state.apply(&action);
//! }
//! assert!(state.is_step_c_complete());
//! assert_eq!(state.current_step(), Step::D);
//! ```

pub use self::{action::*, sandbox::*, snapshot::*, solution::*, state::*, summary::*};

pub mod predicates;

mod action;
mod sandbox;
mod snapshot;
mod solution;
mod state;
mod summary;
