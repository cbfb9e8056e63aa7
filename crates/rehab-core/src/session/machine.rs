//! Set/repetition progression state machine.

use super::effect::{Effect, Effects};
use super::plan::SessionPlan;
use super::state::{SessionPhase, SessionState};
use crate::classification::ClassificationResult;
use crate::error::{RehabError, Result};
use crate::motivation::{MotivationPolicy, MotivationTier};

/// Turns classification results into set and repetition progress.
///
/// The machine never counts repetitions itself: `repetition_count` always
/// mirrors the latest result from the classifier. What it decides is when a
/// set is done, when to move on, and when to ask the user to save.
///
/// Every call runs to completion before the next one, so no locking is
/// needed; callers hold it by `&mut`.
pub struct SessionMachine {
    plan: Option<SessionPlan>,
    state: SessionState,
    phase: SessionPhase,
    motivation: MotivationPolicy,
}

impl SessionMachine {
    /// Creates an idle machine with no plan.
    pub fn new(motivation: MotivationPolicy) -> Self {
        Self {
            plan: None,
            state: SessionState::new(),
            phase: SessionPhase::AwaitingPlan,
            motivation,
        }
    }

    /// Creates a machine with an active plan.
    pub fn with_plan(plan: SessionPlan, motivation: MotivationPolicy) -> Self {
        let mut machine = Self::new(motivation);
        machine.reset_session(plan);
        machine
    }

    /// Replaces the plan and resets all progress.
    pub fn reset_session(&mut self, plan: SessionPlan) {
        tracing::info!(
            "[SessionMachine] New session: exercise={}, sets={}, reps={}",
            plan.exercise_type(),
            plan.planned_sets(),
            plan.planned_reps()
        );
        self.plan = Some(plan);
        self.state = SessionState::new();
        self.phase = SessionPhase::InProgress;
    }

    /// Ingests one result, ignoring anything that does not apply.
    ///
    /// Results with no active plan or for another exercise are logged and
    /// dropped. Use [`Self::try_ingest`] to learn why a result was rejected.
    pub fn ingest(&mut self, result: &ClassificationResult) -> Effects {
        match self.try_ingest(result) {
            Ok(effects) => effects,
            Err(err) => {
                tracing::warn!("[SessionMachine] Ignoring classification: {}", err);
                Effects::new()
            }
        }
    }

    /// Ingests one result.
    ///
    /// Returns `StaleExercise` for a result whose exercise is not the active
    /// one and `InvalidState` when no plan is active. Results that arrive
    /// after the plan completed yield no effects.
    pub fn try_ingest(&mut self, result: &ClassificationResult) -> Result<Effects> {
        let plan = self
            .plan
            .ok_or_else(|| RehabError::InvalidState("no active session plan".to_string()))?;

        if result.exercise_type != plan.exercise_type() {
            return Err(RehabError::StaleExercise {
                received: result.exercise_type.to_string(),
                active: plan.exercise_type().to_string(),
            });
        }

        if self.phase == SessionPhase::PlanComplete {
            tracing::debug!("[SessionMachine] Plan complete, result dropped");
            return Ok(Effects::new());
        }

        if result.repetitions < self.state.repetition_count {
            tracing::warn!(
                "[SessionMachine] Classifier repetitions went down: {} -> {}",
                self.state.repetition_count,
                result.repetitions
            );
        }
        self.state.repetition_count = result.repetitions;

        let is_final_set = self.state.current_set >= Self::total_sets(&plan);
        let set_target_reached =
            plan.counts_repetitions() && self.state.repetition_count >= plan.planned_reps();

        // Milestones belong to the set this result was counted in, so they are
        // evaluated before a possible advance clears the tier.
        let milestone = if plan.counts_repetitions() {
            let ratio = f64::from(self.state.repetition_count) / f64::from(plan.planned_reps());
            self.motivation
                .evaluate(self.state.motivation_tier, ratio, is_final_set)
        } else {
            None
        };
        if let Some(milestone) = &milestone {
            self.state.motivation_tier = milestone.tier;
        }

        let mut effects = Effects::new();

        if set_target_reached && !is_final_set {
            effects.push(self.advance_set());
        } else if set_target_reached && !self.state.awaiting_save_prompt {
            tracing::info!(
                "[SessionMachine] Final set {} complete, prompting save",
                self.state.current_set
            );
            self.state.awaiting_save_prompt = true;
            self.phase = SessionPhase::PlanComplete;
            effects.push(Effect::PromptSave);
        } else {
            effects.push(Effect::StateUpdate {
                state: result.discrete_state,
                color: result.discrete_state.color_hint(),
            });
        }

        if result.state_changed {
            if let Some(text) = result.feedback_text() {
                effects.push(Effect::Feedback {
                    text: text.to_string(),
                });
            }
        }

        if let Some(milestone) = milestone {
            if let Some(phrase) = milestone.phrase {
                effects.push(Effect::Motivation {
                    tier: milestone.tier,
                    phrase,
                });
            }
        }

        tracing::debug!(
            "[SessionMachine] Ingested {} reps={} set={} effects={}",
            result.discrete_state,
            self.state.repetition_count,
            self.state.current_set,
            effects.len()
        );

        Ok(effects)
    }

    /// Moves to the next set on user request.
    ///
    /// Fails with `InvalidState` when already on the final set.
    pub fn start_next_set(&mut self) -> Result<Effect> {
        let plan = self
            .plan
            .ok_or_else(|| RehabError::InvalidState("no active session plan".to_string()))?;

        if self.state.current_set >= Self::total_sets(&plan) {
            return Err(RehabError::InvalidState(format!(
                "already at final set ({} of {})",
                self.state.current_set,
                plan.planned_sets()
            )));
        }

        Ok(self.advance_set())
    }

    /// Restarts the current set from zero repetitions.
    pub fn restart_set(&mut self) -> Result<Effect> {
        if self.plan.is_none() {
            return Err(RehabError::InvalidState("no active session plan".to_string()));
        }
        if self.phase == SessionPhase::PlanComplete {
            return Err(RehabError::InvalidState("plan already complete".to_string()));
        }

        self.state.restart_set();
        tracing::info!("[SessionMachine] Restarted set {}", self.state.current_set);
        Ok(Effect::SetRestarted {
            set: self.state.current_set,
        })
    }

    fn advance_set(&mut self) -> Effect {
        let completed_set = self.state.current_set;
        self.state.current_set += 1;
        self.state.restart_set();
        tracing::info!(
            "[SessionMachine] Set {} complete, starting set {}",
            completed_set,
            self.state.current_set
        );
        Effect::AdvanceSet {
            completed_set,
            next_set: self.state.current_set,
        }
    }

    fn total_sets(plan: &SessionPlan) -> u32 {
        plan.planned_sets().max(1)
    }

    // ============================================================================
    // Read-only accessors
    // ============================================================================

    pub fn plan(&self) -> Option<&SessionPlan> {
        self.plan.as_ref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_set(&self) -> u32 {
        self.state.current_set
    }

    pub fn repetition_count(&self) -> u32 {
        self.state.repetition_count
    }

    pub fn motivation_tier(&self) -> MotivationTier {
        self.state.motivation_tier
    }

    pub fn awaiting_save_prompt(&self) -> bool {
        self.state.awaiting_save_prompt
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new(MotivationPolicy::default())
    }
}
