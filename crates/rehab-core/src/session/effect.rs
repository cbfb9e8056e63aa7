use crate::exercise::{ColorHint, DiscreteState};
use crate::motivation::MotivationTier;
use serde::{Deserialize, Serialize};

/// Something the presentation layer should reflect after a session operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// The set target was reached and the next set started.
    /// The classifier counter must be reset.
    AdvanceSet { completed_set: u32, next_set: u32 },
    /// The current set was restarted from zero.
    /// The classifier counter must be reset.
    SetRestarted { set: u32 },
    /// The final set is done; ask the user to save their progress.
    PromptSave,
    /// Show the latest discrete state.
    StateUpdate {
        state: DiscreteState,
        color: ColorHint,
    },
    /// Classifier feedback for a state change.
    Feedback { text: String },
    /// A new motivation milestone was reached.
    Motivation { tier: MotivationTier, phrase: String },
}

impl Effect {
    pub fn requests_counter_reset(&self) -> bool {
        matches!(self, Self::AdvanceSet { .. } | Self::SetRestarted { .. })
    }

    /// Text meant for the user's eyes and ears, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Feedback { text } => Some(text),
            Self::Motivation { phrase, .. } => Some(phrase),
            _ => None,
        }
    }
}

/// The ordered effects produced by one `ingest` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Effects(Vec<Effect>);

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Effect] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn requests_counter_reset(&self) -> bool {
        self.0.iter().any(Effect::requests_counter_reset)
    }

    pub fn prompts_save(&self) -> bool {
        self.0.iter().any(|e| matches!(e, Effect::PromptSave))
    }
}

impl From<Vec<Effect>> for Effects {
    fn from(effects: Vec<Effect>) -> Self {
        Self(effects)
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Effects {
    type Item = &'a Effect;
    type IntoIter = std::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
