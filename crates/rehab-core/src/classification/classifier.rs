//! Exercise classifier trait.
//!
//! Defines the interface to the external frame-classification collaborator.

use super::model::{ClassificationResult, HandPose};
use crate::error::Result;
use crate::exercise::ExerciseType;
use async_trait::async_trait;

/// An abstract classifier that turns raw hand poses into exercise states.
///
/// The collaborator owns landmark geometry and repetition counting; the
/// session only consumes its results.
///
/// # Implementation Notes
///
/// Network failures should be reported as `RehabError::Classifier` with
/// `retryable` set, so the caller can retry on the next throttle tick.
#[async_trait]
pub trait ExerciseClassifier: Send + Sync {
    /// Classifies one hand pose for the given exercise.
    async fn classify(&self, pose: &HandPose, exercise: ExerciseType)
    -> Result<ClassificationResult>;

    /// Resets the collaborator's cumulative repetition counter for an exercise.
    async fn reset_counter(&self, exercise: ExerciseType) -> Result<()>;
}
