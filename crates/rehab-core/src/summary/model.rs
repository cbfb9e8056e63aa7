//! Session summary domain model.

use crate::error::{RehabError, Result};
use crate::exercise::ExerciseType;
use crate::session::{SessionPlan, SessionState};
use serde::{Deserialize, Serialize};

/// A completed session as handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// A unique identifier for the summary.
    pub id: String,
    pub exercise_type: ExerciseType,
    pub sets_planned: u32,
    pub reps_planned: u32,
    pub reps_completed: u32,
    #[serde(default)]
    pub notes: Option<String>,
    /// Creation time (RFC 3339, UTC).
    pub created_at: String,
}

/// The editable form behind the save prompt.
///
/// Counts are signed because they come from user edits; [`SummaryDraft::build`]
/// rejects anything that is not a valid count. A draft is never consumed by a
/// failed save, so the user can fix it and retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDraft {
    pub exercise_type: ExerciseType,
    pub sets_planned: i64,
    pub reps_planned: i64,
    pub reps_completed: i64,
    #[serde(default)]
    pub notes: String,
}

impl SummaryDraft {
    /// Prefills the draft from the plan and the current repetition count.
    pub fn from_session(plan: &SessionPlan, state: &SessionState) -> Self {
        Self {
            exercise_type: plan.exercise_type(),
            sets_planned: i64::from(plan.planned_sets()),
            reps_planned: i64::from(plan.planned_reps()),
            reps_completed: i64::from(state.repetition_count()),
            notes: String::new(),
        }
    }

    /// Validates the draft and stamps it with an id and creation time.
    pub fn build(&self) -> Result<SessionSummary> {
        let sets_planned = positive("sets_planned", self.sets_planned)?;
        let reps_planned = positive("reps_planned", self.reps_planned)?;
        let reps_completed = non_negative("reps_completed", self.reps_completed)?;

        let notes = self.notes.trim();
        Ok(SessionSummary {
            id: uuid::Uuid::new_v4().to_string(),
            exercise_type: self.exercise_type,
            sets_planned,
            reps_planned,
            reps_completed,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

fn positive(field: &'static str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(RehabError::validation(field, "must be a positive integer"));
    }
    u32::try_from(value).map_err(|_| RehabError::validation(field, "is too large"))
}

fn non_negative(field: &'static str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(RehabError::validation(field, "must not be negative"));
    }
    u32::try_from(value).map_err(|_| RehabError::validation(field, "is too large"))
}
