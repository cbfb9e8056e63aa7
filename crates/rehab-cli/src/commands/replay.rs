//! `rehab replay` - drive a session from recorded classifier output.

use super::{PlanArgs, load_config, read_jsonl};
use crate::console::{ConsolePresenter, TerminalSpeech};
use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use colored::Colorize;
use rehab_application::{ExerciseSessionService, FrameOutcome, SessionOptions};
use rehab_core::classification::{ClassificationResult, ExerciseClassifier, HandPose};
use rehab_core::error::{RehabError, Result as RehabResult};
use rehab_core::exercise::{DiscreteState, ExerciseType};
use rehab_core::summary::SummaryRepository;
use rehab_infrastructure::InMemorySummaryRepository;
use rehab_interaction::{BackendClient, HttpProgressRepository};
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Recorded results, one JSON object per line
    pub file: PathBuf,

    /// Do not speak feedback
    #[arg(long)]
    pub mute: bool,

    /// Save the summary to the progress store when the plan completes
    #[arg(long)]
    pub save: bool,

    /// Notes attached to the saved summary
    #[arg(long)]
    pub notes: Option<String>,
}

/// One recorded `/analyze` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedResult {
    #[serde(alias = "discrete_state")]
    pub state: DiscreteState,
    pub repetitions: u32,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub state_changed: bool,
}

struct Playback {
    records: VecDeque<RecordedResult>,
    last_raw: u32,
    baseline: u32,
}

/// Plays recorded results back as if they came from the live classifier.
///
/// Counter resets are emulated: repetitions are reported relative to the
/// count at the last reset. A recording whose count already drops back
/// (captured from a backend that reset) is passed through unchanged.
pub struct RecordedClassifier {
    playback: Mutex<Playback>,
}

impl RecordedClassifier {
    pub fn new(records: Vec<RecordedResult>) -> Self {
        Self {
            playback: Mutex::new(Playback {
                records: records.into(),
                last_raw: 0,
                baseline: 0,
            }),
        }
    }
}

#[async_trait]
impl ExerciseClassifier for RecordedClassifier {
    async fn classify(
        &self,
        _pose: &HandPose,
        exercise: ExerciseType,
    ) -> RehabResult<ClassificationResult> {
        let mut playback = self.playback.lock().await;
        let record = playback
            .records
            .pop_front()
            .ok_or_else(|| RehabError::classifier("recording exhausted", false))?;

        let raw = record.repetitions;
        if raw < playback.baseline {
            playback.baseline = 0;
        }
        playback.last_raw = raw;

        Ok(ClassificationResult {
            exercise_type: exercise,
            discrete_state: record.state,
            repetitions: raw - playback.baseline,
            feedback: record.feedback,
            state_changed: record.state_changed,
        })
    }

    async fn reset_counter(&self, exercise: ExerciseType) -> RehabResult<()> {
        let mut playback = self.playback.lock().await;
        playback.baseline = playback.last_raw;
        tracing::debug!(
            "[RecordedClassifier] Counter reset for {} at {}",
            exercise,
            playback.baseline
        );
        Ok(())
    }
}

pub async fn run(args: ReplayArgs) -> Result<()> {
    let config = load_config()?;
    let plan = args.plan.plan()?;
    let records: Vec<RecordedResult> = read_jsonl(&args.file)?;
    let frames = records.len();

    let summaries: Arc<dyn SummaryRepository> = if args.save {
        Arc::new(HttpProgressRepository::new(BackendClient::from_config(
            &config,
        )?))
    } else {
        Arc::new(InMemorySummaryRepository::new())
    };

    let options = SessionOptions::from(&config);
    let mut service = ExerciseSessionService::new(
        Arc::new(RecordedClassifier::new(records)),
        summaries,
        ConsolePresenter::new(),
        TerminalSpeech::new(),
        options,
    );
    if args.mute {
        service.set_audio_enabled(false);
    }

    println!(
        "{} {} ({} frames)",
        "Replaying".bold(),
        plan.exercise_type().display_name(),
        frames
    );
    service.start(plan).await;

    // One frame per throttle interval, so none is held back.
    let mut clock = Instant::now();
    for _ in 0..frames {
        clock += options.throttle;
        let outcome = service.submit_frame(Some(HandPose::default()), clock).await?;
        if let FrameOutcome::ClassifierUnavailable { message, .. } = outcome {
            anyhow::bail!("Replay stopped: {}", message);
        }
    }

    println!(
        "{} set {}, {} reps, {} spoken cues",
        "Finished at".bold(),
        service.machine().current_set(),
        service.machine().repetition_count(),
        service.speech().utterances()
    );

    let Some(mut draft) = service.presenter_mut().take_draft() else {
        println!("{}", "Plan not completed; nothing to save.".dimmed());
        return Ok(());
    };

    if !args.save {
        println!("{}", "Run with --save to store this session.".dimmed());
        return Ok(());
    }

    draft.notes = args.notes.unwrap_or_default();
    let summary = service.save_summary(&draft).await?;
    println!("{} {}", "Saved summary".green().bold(), summary.id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: DiscreteState, repetitions: u32) -> RecordedResult {
        RecordedResult {
            state,
            repetitions,
            feedback: None,
            state_changed: false,
        }
    }

    #[test]
    fn test_recorded_result_parses_backend_response() {
        let line =
            r#"{"state": "OPEN", "repetitions": 3, "feedback": "Good", "state_changed": true}"#;
        let record: RecordedResult = serde_json::from_str(line).unwrap();
        assert_eq!(record.state, DiscreteState::Open);
        assert_eq!(record.repetitions, 3);
        assert!(record.state_changed);
    }

    #[tokio::test]
    async fn test_reset_rebases_cumulative_recording() {
        let classifier = RecordedClassifier::new(vec![
            record(DiscreteState::Open, 5),
            record(DiscreteState::Closed, 7),
        ]);
        let pose = HandPose::default();

        let first = classifier.classify(&pose, ExerciseType::OpenClose).await.unwrap();
        assert_eq!(first.repetitions, 5);

        classifier.reset_counter(ExerciseType::OpenClose).await.unwrap();
        let second = classifier.classify(&pose, ExerciseType::OpenClose).await.unwrap();
        assert_eq!(second.repetitions, 2);
        assert_eq!(second.exercise_type, ExerciseType::OpenClose);
    }

    #[tokio::test]
    async fn test_recording_that_already_resets_passes_through() {
        let classifier = RecordedClassifier::new(vec![
            record(DiscreteState::Open, 4),
            record(DiscreteState::Open, 1),
        ]);
        let pose = HandPose::default();

        classifier.classify(&pose, ExerciseType::Pinch).await.unwrap();
        classifier.reset_counter(ExerciseType::Pinch).await.unwrap();
        let next = classifier.classify(&pose, ExerciseType::Pinch).await.unwrap();
        assert_eq!(next.repetitions, 1);
    }

    #[tokio::test]
    async fn test_exhausted_recording_is_not_retryable() {
        let classifier = RecordedClassifier::new(Vec::new());
        let err = classifier
            .classify(&HandPose::default(), ExerciseType::Pinch)
            .await
            .unwrap_err();
        assert!(!err.is_retryable());
    }
}
