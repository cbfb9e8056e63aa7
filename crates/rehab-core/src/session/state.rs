use crate::motivation::MotivationTier;
use serde::{Deserialize, Serialize};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No plan confirmed yet; input is ignored.
    #[default]
    AwaitingPlan,
    /// Sets are being performed.
    InProgress,
    /// The final set reached its target and the save prompt was raised.
    PlanComplete,
}

/// Mutable progress of the active session.
///
/// Only the session machine mutates it; everyone else reads through the
/// accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) current_set: u32,
    pub(crate) repetition_count: u32,
    pub(crate) motivation_tier: MotivationTier,
    pub(crate) awaiting_save_prompt: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            current_set: 1,
            repetition_count: 0,
            motivation_tier: MotivationTier::Start,
            awaiting_save_prompt: false,
        }
    }

    /// 1-indexed set currently being performed.
    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    pub fn repetition_count(&self) -> u32 {
        self.repetition_count
    }

    pub fn motivation_tier(&self) -> MotivationTier {
        self.motivation_tier
    }

    pub fn awaiting_save_prompt(&self) -> bool {
        self.awaiting_save_prompt
    }

    /// Clears per-set progress, keeping the set index.
    pub(crate) fn restart_set(&mut self) {
        self.repetition_count = 0;
        self.motivation_tier = MotivationTier::Start;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
