//! Classification domain model.

use crate::exercise::{DiscreteState, ExerciseType};
use serde::{Deserialize, Serialize};

/// Number of landmarks in a full hand pose.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// A single normalized hand landmark.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// A raw hand pose as produced by the hand-tracking collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandPose {
    pub landmarks: Vec<Landmark>,
}

impl HandPose {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Whether the pose carries every landmark the classifier expects.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= HAND_LANDMARK_COUNT
    }
}

/// One frame's classification for a named exercise.
///
/// Transient: consumed once by the session state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub exercise_type: ExerciseType,
    #[serde(rename = "state", alias = "discrete_state")]
    pub discrete_state: DiscreteState,
    /// Cumulative repetitions since the last external counter reset.
    pub repetitions: u32,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub state_changed: bool,
}

impl ClassificationResult {
    /// Feedback text if present and not blank.
    pub fn feedback_text(&self) -> Option<&str> {
        self.feedback
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "exercise_type": "pinch",
            "state": "CLOSED",
            "repetitions": 4,
            "feedback": "Perpekto ang pagkapit!",
            "state_changed": true
        }"#;
        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.exercise_type, ExerciseType::Pinch);
        assert_eq!(result.discrete_state, DiscreteState::Closed);
        assert_eq!(result.repetitions, 4);
        assert_eq!(result.feedback_text(), Some("Perpekto ang pagkapit!"));
        assert!(result.state_changed);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"exercise_type": "open_close", "state": "TRANSITION", "repetitions": 0}"#;
        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.feedback, None);
        assert!(!result.state_changed);
    }

    #[test]
    fn test_blank_feedback_is_ignored() {
        let result = ClassificationResult {
            exercise_type: ExerciseType::OpenClose,
            discrete_state: DiscreteState::Open,
            repetitions: 1,
            feedback: Some("   ".to_string()),
            state_changed: true,
        };
        assert_eq!(result.feedback_text(), None);
    }

    #[test]
    fn test_hand_pose_completeness() {
        assert!(!HandPose::new(vec![Landmark::default(); 5]).is_complete());
        assert!(HandPose::new(vec![Landmark::default(); HAND_LANDMARK_COUNT]).is_complete());
    }
}
