use chrono::{DateTime, Utc};
use meanlab_engine::{LessonSnapshot, LessonState};
use serde::{Deserialize, Serialize};

/// Saved lesson progress that `replay --resume` can continue from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    /// Timestamp when the session was saved (ISO 8601 format)
    pub saved_at: DateTime<Utc>,
    /// Name of the lesson the snapshot belongs to
    pub lesson: String,
    pub snapshot: LessonSnapshot,
}

impl SavedSession {
    pub fn new(state: &LessonState) -> Self {
        Self {
            saved_at: Utc::now(),
            lesson: state.definition().name.clone(),
            snapshot: state.snapshot(),
        }
    }
}
