//! Terminal rendering of a running session.

use colored::Colorize;
use rehab_application::{ProgressView, SessionPresenter};
use rehab_core::exercise::{ColorHint, DiscreteState};
use rehab_core::feedback::{FeedbackSurface, SpeechSink};
use rehab_core::summary::SummaryDraft;

/// Prints session updates to stdout, colored by state.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    last_progress: Option<ProgressView>,
    last_state: Option<DiscreteState>,
    hand_missing: bool,
    pending_draft: Option<SummaryDraft>,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The draft handed over by the save prompt, if the plan completed.
    pub fn take_draft(&mut self) -> Option<SummaryDraft> {
        self.pending_draft.take()
    }
}

impl FeedbackSurface for ConsolePresenter {
    fn show_feedback(&mut self, text: &str) {
        println!("  {} {}", ">".cyan(), text);
    }

    fn show_motivation(&mut self, text: &str) {
        println!("  {}", text.yellow().bold());
    }
}

impl SessionPresenter for ConsolePresenter {
    fn show_no_hand(&mut self) {
        if !self.hand_missing {
            println!("  {}", "No hand detected".dimmed());
            self.hand_missing = true;
        }
    }

    fn show_state(&mut self, state: DiscreteState, color: ColorHint) {
        self.hand_missing = false;
        if self.last_state == Some(state) {
            return;
        }
        self.last_state = Some(state);

        let label = state.to_string();
        let label = match color {
            ColorHint::Positive => label.green(),
            ColorHint::Negative => label.red(),
            ColorHint::Neutral => label.normal(),
        };
        println!("  state {}", label);
    }

    fn show_progress(&mut self, progress: ProgressView) {
        if self.last_progress == Some(progress) {
            return;
        }
        self.last_progress = Some(progress);

        if progress.planned_reps == 0 {
            println!("{} reps {}", "•".blue(), progress.repetitions);
        } else {
            println!(
                "{} set {}/{}  reps {}/{}",
                "•".blue(),
                progress.current_set,
                progress.planned_sets.max(1),
                progress.repetitions,
                progress.planned_reps
            );
        }
    }

    fn show_set_advanced(&mut self, completed_set: u32, next_set: u32) {
        println!(
            "{}",
            format!("Set {} done, starting set {}", completed_set, next_set)
                .green()
                .bold()
        );
    }

    fn prompt_save(&mut self, draft: &SummaryDraft) {
        println!(
            "{} {} - {} sets x {} reps, {} reps in the final set",
            "Plan complete:".green().bold(),
            draft.exercise_type.display_name(),
            draft.sets_planned,
            draft.reps_planned,
            draft.reps_completed
        );
        self.pending_draft = Some(draft.clone());
    }

    fn show_notice(&mut self, message: &str) {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }
}

/// Speech stand-in for terminals: utterances are echoed as text.
#[derive(Debug, Default)]
pub struct TerminalSpeech {
    utterances: usize,
}

impl TerminalSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utterances(&self) -> usize {
        self.utterances
    }
}

impl SpeechSink for TerminalSpeech {
    fn cancel(&mut self) {}

    fn speak(&mut self, text: &str) {
        self.utterances += 1;
        println!("  {} {}", "(say)".dimmed(), text.italic());
    }
}
