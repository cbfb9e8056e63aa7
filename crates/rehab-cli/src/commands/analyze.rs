//! `rehab analyze` - classify recorded hand poses through the backend.

use super::{PlanArgs, load_config, read_jsonl};
use crate::console::{ConsolePresenter, TerminalSpeech};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rehab_application::{ExerciseSessionService, FrameOutcome, SessionOptions};
use rehab_core::classification::{HandPose, Landmark};
use rehab_infrastructure::InMemorySummaryRepository;
use rehab_interaction::{BackendClient, HttpClassifier};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Captured frames, one JSON object per line
    pub file: PathBuf,

    /// Do not speak feedback
    #[arg(long)]
    pub mute: bool,
}

/// One captured camera frame. `landmarks` is null when no hand was tracked.
#[derive(Debug, Clone, Deserialize)]
pub struct PoseFrame {
    /// Capture time relative to the start of the recording.
    #[serde(default)]
    pub t_ms: u64,
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

impl PoseFrame {
    /// The tracked pose, if complete enough to classify.
    pub fn pose(self) -> Option<HandPose> {
        self.landmarks
            .map(HandPose::new)
            .filter(HandPose::is_complete)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct FrameTally {
    classified: usize,
    throttled: usize,
    no_hand: usize,
    stale: usize,
    failed: usize,
}

impl FrameTally {
    fn record(&mut self, outcome: &FrameOutcome) {
        match outcome {
            FrameOutcome::Ingested(_) => self.classified += 1,
            FrameOutcome::Throttled => self.throttled += 1,
            FrameOutcome::NoHand => self.no_hand += 1,
            FrameOutcome::Stale => self.stale += 1,
            FrameOutcome::ClassifierUnavailable { .. } => self.failed += 1,
        }
    }

    /// A held frame released after the recording ended was counted as
    /// throttled when it arrived.
    fn record_flushed(&mut self, outcome: &FrameOutcome) {
        self.throttled = self.throttled.saturating_sub(1);
        self.record(outcome);
    }
}

fn reject_fatal(outcome: FrameOutcome) -> Result<()> {
    if let FrameOutcome::ClassifierUnavailable {
        message,
        retryable: false,
    } = outcome
    {
        anyhow::bail!("Classifier rejected the request: {}", message);
    }
    Ok(())
}

pub async fn run(args: AnalyzeArgs) -> Result<()> {
    let config = load_config()?;
    let plan = args.plan.plan()?;
    let frames: Vec<PoseFrame> = read_jsonl(&args.file)?;

    let client = BackendClient::from_config(&config)?;
    tracing::info!("[Analyze] Using classifier at {}", client.base_url());

    let options = SessionOptions::from(&config);
    let mut service = ExerciseSessionService::new(
        Arc::new(HttpClassifier::new(client)),
        Arc::new(InMemorySummaryRepository::new()),
        ConsolePresenter::new(),
        TerminalSpeech::new(),
        options,
    );
    if args.mute {
        service.set_audio_enabled(false);
    }

    println!(
        "{} {} ({} frames)",
        "Analyzing".bold(),
        plan.exercise_type().display_name(),
        frames.len()
    );
    service.start(plan).await;

    let started = Instant::now();
    let mut last_at = started;
    let mut tally = FrameTally::default();
    for frame in frames {
        last_at = started + Duration::from_millis(frame.t_ms);
        let outcome = service.submit_frame(frame.pose(), last_at).await?;
        tally.record(&outcome);
        reject_fatal(outcome)?;
    }

    // The final frame may still be held by the throttle.
    if let Some(outcome) = service
        .flush_pending_frame(last_at + options.throttle)
        .await?
    {
        tally.record_flushed(&outcome);
        reject_fatal(outcome)?;
    }

    println!(
        "{} {} classified, {} throttled, {} without hand, {} stale, {} failed",
        "Frames:".bold(),
        tally.classified,
        tally.throttled,
        tally.no_hand,
        tally.stale,
        tally.failed
    );
    println!(
        "{} set {}, {} reps",
        "Finished at".bold(),
        service.machine().current_set(),
        service.machine().repetition_count()
    );

    if let Some(draft) = service.presenter_mut().take_draft() {
        println!(
            "{}",
            format!(
                "Use `rehab replay --save` or the web app to store {} reps.",
                draft.reps_completed
            )
            .dimmed()
        );
    }

    Ok(())
}
