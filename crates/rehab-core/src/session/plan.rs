use crate::error::{RehabError, Result};
use crate::exercise::ExerciseType;
use serde::{Deserialize, Serialize};

/// The sets and repetitions a user confirmed for one exercise.
///
/// Immutable once created; confirming a new setup replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlan {
    exercise_type: ExerciseType,
    planned_sets: u32,
    planned_reps: u32,
}

impl SessionPlan {
    /// Creates a plan without validating the counts.
    ///
    /// A plan with zero planned repetitions is accepted: the session then
    /// never advances or prompts on its own and only mirrors classifier state.
    pub fn new(exercise_type: ExerciseType, planned_sets: u32, planned_reps: u32) -> Self {
        Self {
            exercise_type,
            planned_sets,
            planned_reps,
        }
    }

    /// Checks that both counts are positive.
    pub fn validate(&self) -> Result<()> {
        if self.planned_sets == 0 {
            return Err(RehabError::validation(
                "sets_planned",
                "must be a positive integer",
            ));
        }
        if self.planned_reps == 0 {
            return Err(RehabError::validation(
                "reps_planned",
                "must be a positive integer",
            ));
        }
        Ok(())
    }

    pub fn exercise_type(&self) -> ExerciseType {
        self.exercise_type
    }

    pub fn planned_sets(&self) -> u32 {
        self.planned_sets
    }

    pub fn planned_reps(&self) -> u32 {
        self.planned_reps
    }

    /// Whether repetitions drive set transitions for this plan.
    pub fn counts_repetitions(&self) -> bool {
        self.planned_reps > 0
    }
}
