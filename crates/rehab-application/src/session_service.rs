//! Exercise session use case.
//!
//! Wires the frame sampler, the classifier collaborator, the session state
//! machine, the feedback dispatcher and the presenter into one event path.

use crate::presenter::{ProgressView, SessionPresenter};
use rehab_core::classification::{ClassificationResult, ExerciseClassifier, HandPose};
use rehab_core::config::RehabConfig;
use rehab_core::error::{RehabError, Result};
use rehab_core::feedback::{FeedbackDispatcher, SpeechSink};
use rehab_core::motivation::MotivationPolicy;
use rehab_core::sampler::FrameSampler;
use rehab_core::session::{Effect, Effects, SessionMachine, SessionPlan};
use rehab_core::summary::{SessionSummary, SummaryDraft, SummaryRepository};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Tunables for [`ExerciseSessionService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub throttle: Duration,
    pub audio_enabled: bool,
    pub history_limit: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&RehabConfig::default())
    }
}

impl From<&RehabConfig> for SessionOptions {
    fn from(config: &RehabConfig) -> Self {
        Self {
            throttle: config.throttle_interval(),
            audio_enabled: config.audio_enabled,
            history_limit: config.history_limit,
        }
    }
}

/// What happened to one submitted frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No hand in the frame; the presenter was told.
    NoHand,
    /// Held back by the throttle; a fresher frame will replace it.
    Throttled,
    /// The result was ingested.
    Ingested(Effects),
    /// The result belonged to an exercise that is no longer active.
    Stale,
    /// The classifier failed; the next tick tries again.
    ClassifierUnavailable { message: String, retryable: bool },
}

/// Drives one exercise session from frames to feedback.
///
/// Every operation takes `&mut self` and completes before the next one
/// starts, so a counter reset is always finished before the next
/// classification request goes out. While a reset keeps failing, no frame
/// is classified: the backend's count would still hold the previous set.
pub struct ExerciseSessionService<P, S> {
    machine: SessionMachine,
    counter_reset_pending: bool,
    dispatcher: FeedbackDispatcher,
    sampler: FrameSampler<HandPose>,
    classifier: Arc<dyn ExerciseClassifier>,
    summaries: Arc<dyn SummaryRepository>,
    presenter: P,
    speech: S,
    history_limit: usize,
}

impl<P, S> ExerciseSessionService<P, S>
where
    P: SessionPresenter,
    S: SpeechSink,
{
    pub fn new(
        classifier: Arc<dyn ExerciseClassifier>,
        summaries: Arc<dyn SummaryRepository>,
        presenter: P,
        speech: S,
        options: SessionOptions,
    ) -> Self {
        Self {
            machine: SessionMachine::default(),
            counter_reset_pending: false,
            dispatcher: FeedbackDispatcher::new(options.audio_enabled),
            sampler: FrameSampler::new(options.throttle),
            classifier,
            summaries,
            presenter,
            speech,
            history_limit: options.history_limit,
        }
    }

    /// Replaces the motivation policy (e.g. with a seeded phrase source).
    ///
    /// Discards any active session.
    pub fn with_motivation_policy(mut self, policy: MotivationPolicy) -> Self {
        self.machine = SessionMachine::new(policy);
        self
    }

    // ============================================================================
    // Session lifecycle
    // ============================================================================

    /// Starts a new session for `plan`, resetting the classifier counter.
    pub async fn start(&mut self, plan: SessionPlan) {
        self.machine.reset_session(plan);
        self.sampler.reset();
        self.dispatcher.reset();
        self.reset_classifier_counter().await;
        self.presenter.show_progress(self.progress_view());
    }

    /// Submits a camera frame. `None` means no hand was detected.
    pub async fn submit_frame(
        &mut self,
        pose: Option<HandPose>,
        now: Instant,
    ) -> Result<FrameOutcome> {
        let plan = self.active_plan()?;

        let Some(pose) = pose else {
            self.presenter.show_no_hand();
            return Ok(FrameOutcome::NoHand);
        };

        let Some(pose) = self.sampler.offer(pose, now) else {
            return Ok(FrameOutcome::Throttled);
        };

        self.classify_frame(pose, plan).await
    }

    /// Classifies the frame still held back by the throttle, once its
    /// interval has elapsed at `now`. Returns `None` when nothing is pending.
    pub async fn flush_pending_frame(&mut self, now: Instant) -> Result<Option<FrameOutcome>> {
        let plan = self.active_plan()?;
        let Some(pose) = self.sampler.poll(now) else {
            return Ok(None);
        };
        self.classify_frame(pose, plan).await.map(Some)
    }

    /// Feeds an already classified result through the session.
    pub async fn ingest_result(&mut self, result: ClassificationResult) -> Result<FrameOutcome> {
        if let Some(outcome) = self.retry_pending_reset().await {
            return Ok(outcome);
        }

        let effects = match self.machine.try_ingest(&result) {
            Ok(effects) => effects,
            Err(err @ RehabError::StaleExercise { .. }) => {
                tracing::warn!("[SessionService] Dropping result: {}", err);
                return Ok(FrameOutcome::Stale);
            }
            Err(err) => return Err(err),
        };

        if effects.requests_counter_reset() {
            self.reset_classifier_counter().await;
        }
        self.present(&effects);

        Ok(FrameOutcome::Ingested(effects))
    }

    /// Moves to the next set on user request.
    pub async fn start_next_set(&mut self) -> Result<Effect> {
        let effect = self.machine.start_next_set()?;
        self.reset_classifier_counter().await;
        self.present(&Effects::from(vec![effect.clone()]));
        Ok(effect)
    }

    /// Restarts the current set from zero.
    pub async fn restart_set(&mut self) -> Result<Effect> {
        let effect = self.machine.restart_set()?;
        self.reset_classifier_counter().await;
        self.present(&Effects::from(vec![effect.clone()]));
        Ok(effect)
    }

    // ============================================================================
    // Summaries
    // ============================================================================

    /// A save-dialog draft prefilled from the current session.
    pub fn summary_draft(&self) -> Option<SummaryDraft> {
        self.machine
            .plan()
            .map(|plan| SummaryDraft::from_session(plan, self.machine.state()))
    }

    /// Validates and stores the draft.
    ///
    /// Validation runs before any network call. On failure the draft is left
    /// untouched so the user can correct it or retry.
    pub async fn save_summary(&self, draft: &SummaryDraft) -> Result<SessionSummary> {
        let summary = draft.build()?;
        if let Err(err) = self.summaries.save(&summary).await {
            tracing::warn!("[SessionService] Saving summary failed: {}", err);
            return Err(err);
        }
        tracing::info!(
            "[SessionService] Saved summary {} for {}",
            summary.id,
            summary.exercise_type
        );
        Ok(summary)
    }

    /// Stored summaries, most recent first.
    pub async fn history(&self) -> Result<Vec<SessionSummary>> {
        self.summaries.list_recent(self.history_limit).await
    }

    // ============================================================================
    // Audio and accessors
    // ============================================================================

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.dispatcher.set_audio_enabled(enabled);
        if !enabled {
            self.speech.cancel();
        }
    }

    pub fn audio_enabled(&self) -> bool {
        self.dispatcher.audio_enabled()
    }

    pub fn machine(&self) -> &SessionMachine {
        &self.machine
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    /// Whether a failed counter reset still blocks classification.
    pub fn counter_reset_pending(&self) -> bool {
        self.counter_reset_pending
    }

    /// Frames superseded by fresher ones before reaching the classifier.
    pub fn dropped_frames(&self) -> u64 {
        self.sampler.dropped()
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn active_plan(&self) -> Result<SessionPlan> {
        self.machine
            .plan()
            .copied()
            .ok_or_else(|| RehabError::InvalidState("no active session plan".to_string()))
    }

    fn progress_view(&self) -> ProgressView {
        let (planned_sets, planned_reps) = self
            .machine
            .plan()
            .map(|plan| (plan.planned_sets(), plan.planned_reps()))
            .unwrap_or((0, 0));
        ProgressView {
            current_set: self.machine.current_set(),
            planned_sets,
            repetitions: self.machine.repetition_count(),
            planned_reps,
        }
    }

    async fn classify_frame(&mut self, pose: HandPose, plan: SessionPlan) -> Result<FrameOutcome> {
        if let Some(outcome) = self.retry_pending_reset().await {
            return Ok(outcome);
        }

        match self.classifier.classify(&pose, plan.exercise_type()).await {
            Ok(result) => self.ingest_result(result).await,
            Err(err) => {
                tracing::warn!("[SessionService] Classification failed: {}", err);
                let retryable = err.is_retryable();
                let message = err.to_string();
                self.presenter.show_notice(&message);
                Ok(FrameOutcome::ClassifierUnavailable { message, retryable })
            }
        }
    }

    /// Resets the backend counter. A failure is reported and leaves the reset
    /// pending until a later attempt succeeds.
    async fn reset_classifier_counter(&mut self) {
        let Some(exercise) = self.machine.plan().map(SessionPlan::exercise_type) else {
            return;
        };
        match self.classifier.reset_counter(exercise).await {
            Ok(()) => self.counter_reset_pending = false,
            Err(err) => {
                tracing::warn!("[SessionService] Counter reset for {} failed: {}", exercise, err);
                self.counter_reset_pending = true;
                self.presenter
                    .show_notice(&format!("Could not reset the repetition counter: {}", err));
            }
        }
    }

    /// Retries an outstanding counter reset; the outcome to report while it
    /// still fails.
    async fn retry_pending_reset(&mut self) -> Option<FrameOutcome> {
        if !self.counter_reset_pending {
            return None;
        }
        self.reset_classifier_counter().await;
        self.counter_reset_pending
            .then(|| FrameOutcome::ClassifierUnavailable {
                message: "repetition counter reset still pending".to_string(),
                retryable: true,
            })
    }

    fn present(&mut self, effects: &Effects) {
        for effect in effects {
            match effect {
                Effect::StateUpdate { state, color } => self.presenter.show_state(*state, *color),
                Effect::AdvanceSet {
                    completed_set,
                    next_set,
                } => self.presenter.show_set_advanced(*completed_set, *next_set),
                Effect::PromptSave => {
                    if let Some(draft) = self.summary_draft() {
                        self.presenter.prompt_save(&draft);
                    }
                }
                _ => {}
            }
        }

        self.presenter.show_progress(self.progress_view());
        self.dispatcher
            .dispatch(effects, &mut self.presenter, &mut self.speech);
    }
}
