//! HttpClassifier - classifier collaborator reached over the backend REST API.
//!
//! Calls `POST /analyze` with the hand landmarks and `POST /reset` to clear
//! the backend's repetition counter.

use crate::client::{BackendClient, RequestFailure, check_status};
use async_trait::async_trait;
use rehab_core::classification::{ClassificationResult, ExerciseClassifier, HandPose, Landmark};
use rehab_core::error::Result;
use rehab_core::exercise::{DiscreteState, ExerciseType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    landmarks: &'a [Landmark],
    exercise_type: ExerciseType,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    state: String,
    repetitions: u32,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    state_changed: bool,
}

impl AnalyzeResponse {
    /// The backend does not echo the exercise, so the result is stamped with
    /// the one that was requested.
    fn into_result(self, exercise: ExerciseType) -> ClassificationResult {
        ClassificationResult {
            exercise_type: exercise,
            discrete_state: DiscreteState::parse(&self.state),
            repetitions: self.repetitions,
            feedback: self.feedback,
            state_changed: self.state_changed,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResetRequest {
    exercise_type: ExerciseType,
}

/// Classifier implementation that talks to the HandAssist backend.
#[derive(Clone)]
pub struct HttpClassifier {
    client: BackendClient,
}

impl HttpClassifier {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExerciseClassifier for HttpClassifier {
    async fn classify(
        &self,
        pose: &HandPose,
        exercise: ExerciseType,
    ) -> Result<ClassificationResult> {
        let body = AnalyzeRequest {
            landmarks: &pose.landmarks,
            exercise_type: exercise,
        };

        let response = self
            .client
            .http()
            .post(self.client.url("/analyze"))
            .json(&body)
            .send()
            .await
            .map_err(|err| RequestFailure::from_transport("Classification", err))
            .map_err(RequestFailure::into_classifier_error)?;

        let response = check_status("Classification", response)
            .await
            .map_err(RequestFailure::into_classifier_error)?;

        let parsed: AnalyzeResponse = response
            .json()
            .await
            .map_err(|err| RequestFailure::from_transport("Classification", err))
            .map_err(RequestFailure::into_classifier_error)?;

        tracing::debug!(
            "[HttpClassifier] {} -> state={} reps={}",
            exercise,
            parsed.state,
            parsed.repetitions
        );

        Ok(parsed.into_result(exercise))
    }

    async fn reset_counter(&self, exercise: ExerciseType) -> Result<()> {
        let response = self
            .client
            .http()
            .post(self.client.url("/reset"))
            .json(&ResetRequest {
                exercise_type: exercise,
            })
            .send()
            .await
            .map_err(|err| RequestFailure::from_transport("Counter reset", err))
            .map_err(RequestFailure::into_classifier_error)?;

        check_status("Counter reset", response)
            .await
            .map_err(RequestFailure::into_classifier_error)?;

        tracing::info!("[HttpClassifier] Counter reset for {}", exercise);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehab_core::exercise::Finger;

    #[test]
    fn test_analyze_request_shape() {
        let landmarks = vec![Landmark { x: 0.1, y: 0.2, z: 0.0 }; 2];
        let body = AnalyzeRequest {
            landmarks: &landmarks,
            exercise_type: ExerciseType::FingerLifts,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["exercise_type"], "finger_lifts");
        assert_eq!(json["landmarks"].as_array().unwrap().len(), 2);
        assert!(json["landmarks"][0]["x"].is_number());
    }

    #[test]
    fn test_analyze_response_mapping() {
        let json = r#"{
            "state": "TOUCH_MIDDLE",
            "repetitions": 2,
            "feedback": "Good! Thumb to middle finger.",
            "state_changed": true
        }"#;
        let response: AnalyzeResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result(ExerciseType::ThumbOpposition);

        assert_eq!(result.exercise_type, ExerciseType::ThumbOpposition);
        assert_eq!(result.discrete_state, DiscreteState::Touch(Finger::Middle));
        assert_eq!(result.repetitions, 2);
        assert!(result.state_changed);
    }

    #[test]
    fn test_unknown_state_maps_to_unknown() {
        let json = r#"{"state": "HOVERING", "repetitions": 0}"#;
        let response: AnalyzeResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result(ExerciseType::OpenClose);
        assert_eq!(result.discrete_state, DiscreteState::Unknown);
        assert!(!result.state_changed);
    }
}
