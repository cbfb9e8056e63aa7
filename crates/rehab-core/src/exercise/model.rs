//! Exercise catalogue and discrete pose states.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The fixed set of exercises the classifier backend understands.
///
/// Wire identifiers are the snake_case variant names (`open_close`, `pinch`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExerciseType {
    /// Open and close the whole hand.
    OpenClose,
    /// Pinch thumb and index finger together.
    Pinch,
    /// Spread the fingers apart and bring them back together.
    AbductionAdduction,
    /// Touch the thumb to each fingertip in order.
    ThumbOpposition,
    /// Lift one finger at a time from a flat hand.
    FingerLifts,
}

impl ExerciseType {
    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenClose => "Hand Open/Close",
            Self::Pinch => "Pinch",
            Self::AbductionAdduction => "Finger Abduction/Adduction",
            Self::ThumbOpposition => "Thumb Opposition",
            Self::FingerLifts => "Finger Lifts",
        }
    }
}

/// A non-thumb finger, as named by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

/// The exercise-specific pose label for a single frame.
///
/// Parsing never fails: anything the backend sends that is not recognised
/// becomes [`DiscreteState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiscreteState {
    Open,
    Closed,
    Spread,
    Transition,
    Release,
    Tracking,
    /// Flat hand with no finger lifted.
    None,
    /// Thumb touching the given fingertip.
    Touch(Finger),
    /// The given finger is lifted.
    FingerUp(Finger),
    #[default]
    Unknown,
}

impl DiscreteState {
    /// Parses a backend state label such as `OPEN`, `TOUCH_RING` or `INDEX_UP`.
    pub fn parse(label: &str) -> Self {
        let label = label.trim().to_ascii_uppercase();
        match label.as_str() {
            "OPEN" => Self::Open,
            "CLOSED" => Self::Closed,
            "SPREAD" => Self::Spread,
            "TRANSITION" | "TRANSITIONING" => Self::Transition,
            "RELEASE" => Self::Release,
            "TRACKING" => Self::Tracking,
            "NONE" => Self::None,
            other => {
                if let Some(finger) = other.strip_prefix("TOUCH_") {
                    finger.parse().map(Self::Touch).unwrap_or(Self::Unknown)
                } else if let Some(finger) = other.strip_suffix("_UP") {
                    finger.parse().map(Self::FingerUp).unwrap_or(Self::Unknown)
                } else {
                    Self::Unknown
                }
            }
        }
    }

    /// The presentation tag for this state.
    pub fn color_hint(&self) -> ColorHint {
        match self {
            Self::Open | Self::Spread | Self::Touch(_) | Self::FingerUp(_) => ColorHint::Positive,
            Self::Closed => ColorHint::Negative,
            Self::Transition | Self::Release | Self::Tracking | Self::None | Self::Unknown => {
                ColorHint::Neutral
            }
        }
    }
}

impl fmt::Display for DiscreteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("OPEN"),
            Self::Closed => f.write_str("CLOSED"),
            Self::Spread => f.write_str("SPREAD"),
            Self::Transition => f.write_str("TRANSITION"),
            Self::Release => f.write_str("RELEASE"),
            Self::Tracking => f.write_str("TRACKING"),
            Self::None => f.write_str("NONE"),
            Self::Touch(finger) => write!(f, "TOUCH_{finger}"),
            Self::FingerUp(finger) => write!(f, "{finger}_UP"),
            Self::Unknown => f.write_str("UNKNOWN"),
        }
    }
}

impl Serialize for DiscreteState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DiscreteState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

/// Presentation-level tag used to color the state indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorHint {
    Positive,
    Negative,
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_exercise_type_wire_names() {
        assert_eq!(ExerciseType::OpenClose.to_string(), "open_close");
        assert_eq!(
            ExerciseType::from_str("abduction_adduction").unwrap(),
            ExerciseType::AbductionAdduction
        );
        assert!(ExerciseType::from_str("jumping_jacks").is_err());
        assert_eq!(ExerciseType::iter().count(), 5);

        let json = serde_json::to_string(&ExerciseType::ThumbOpposition).unwrap();
        assert_eq!(json, "\"thumb_opposition\"");
    }

    #[test]
    fn test_parse_simple_states() {
        assert_eq!(DiscreteState::parse("OPEN"), DiscreteState::Open);
        assert_eq!(DiscreteState::parse("closed"), DiscreteState::Closed);
        assert_eq!(DiscreteState::parse("TRANSITIONING"), DiscreteState::Transition);
        assert_eq!(DiscreteState::parse("NONE"), DiscreteState::None);
    }

    #[test]
    fn test_parse_finger_states() {
        assert_eq!(
            DiscreteState::parse("TOUCH_RING"),
            DiscreteState::Touch(Finger::Ring)
        );
        assert_eq!(
            DiscreteState::parse("PINKY_UP"),
            DiscreteState::FingerUp(Finger::Pinky)
        );
        assert_eq!(DiscreteState::parse("TOUCH_THUMB"), DiscreteState::Unknown);
        assert_eq!(DiscreteState::parse("garbage"), DiscreteState::Unknown);
    }

    #[test]
    fn test_display_matches_wire_labels() {
        assert_eq!(DiscreteState::Touch(Finger::Index).to_string(), "TOUCH_INDEX");
        assert_eq!(DiscreteState::FingerUp(Finger::Middle).to_string(), "MIDDLE_UP");
        assert_eq!(DiscreteState::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_color_hints() {
        assert_eq!(DiscreteState::Open.color_hint(), ColorHint::Positive);
        assert_eq!(DiscreteState::Spread.color_hint(), ColorHint::Positive);
        assert_eq!(DiscreteState::Closed.color_hint(), ColorHint::Negative);
        assert_eq!(DiscreteState::Transition.color_hint(), ColorHint::Neutral);
        assert_eq!(DiscreteState::Unknown.color_hint(), ColorHint::Neutral);
    }
}
