//! Presentation collaborator interface.

use rehab_core::exercise::{ColorHint, DiscreteState};
use rehab_core::feedback::FeedbackSurface;
use rehab_core::summary::SummaryDraft;

/// Progress counters shown alongside the camera view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressView {
    pub current_set: u32,
    pub planned_sets: u32,
    pub repetitions: u32,
    pub planned_reps: u32,
}

/// Everything the session service asks the UI to show.
///
/// Feedback and motivation text arrive through the [`FeedbackSurface`]
/// supertrait so the dispatcher can render them directly.
pub trait SessionPresenter: FeedbackSurface {
    /// No hand was detected in the latest frame.
    fn show_no_hand(&mut self);

    fn show_state(&mut self, state: DiscreteState, color: ColorHint);

    fn show_progress(&mut self, progress: ProgressView);

    fn show_set_advanced(&mut self, completed_set: u32, next_set: u32);

    /// The plan is complete; open the save dialog prefilled with `draft`.
    fn prompt_save(&mut self, draft: &SummaryDraft);

    /// A recoverable condition worth telling the user about.
    fn show_notice(&mut self, message: &str);
}
