use super::model::{SessionSummary, SummaryDraft};
use crate::error::Result;
use crate::session::{SessionPlan, SessionState};

/// Builds a persistable summary from the final session state.
///
/// `reps_completed_override` replaces the current repetition count when the
/// user edited it in the save prompt.
pub fn build_summary(
    plan: &SessionPlan,
    state: &SessionState,
    reps_completed_override: Option<i64>,
    notes: Option<&str>,
) -> Result<SessionSummary> {
    let mut draft = SummaryDraft::from_session(plan, state);
    if let Some(reps) = reps_completed_override {
        draft.reps_completed = reps;
    }
    if let Some(notes) = notes {
        draft.notes = notes.to_string();
    }
    draft.build()
}
