//! Visual and spoken feedback dispatch.

use crate::session::Effect;

/// Output for spoken cues.
///
/// Implementations are best effort: a platform without speech support simply
/// reports itself unavailable.
pub trait SpeechSink {
    /// Whether speech can be produced at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Stops any utterance still playing.
    fn cancel(&mut self);

    /// Starts speaking `text`.
    fn speak(&mut self, text: &str);
}

/// A speech sink for platforms with no speech support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeech;

impl SpeechSink for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    fn cancel(&mut self) {}

    fn speak(&mut self, _text: &str) {}
}

/// Where feedback and motivation text is rendered.
pub trait FeedbackSurface {
    fn show_feedback(&mut self, text: &str);
    fn show_motivation(&mut self, text: &str);
}

/// Routes feedback and motivation effects to the screen and, when audio is
/// enabled, to speech.
///
/// Only one utterance plays at a time: every new one cancels the previous.
/// Text identical to the last utterance is shown but not spoken again until a
/// set boundary (`AdvanceSet`, `SetRestarted`) or [`Self::reset`].
#[derive(Debug, Clone)]
pub struct FeedbackDispatcher {
    audio_enabled: bool,
    last_spoken: Option<String>,
}

impl FeedbackDispatcher {
    pub fn new(audio_enabled: bool) -> Self {
        Self {
            audio_enabled,
            last_spoken: None,
        }
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio_enabled = enabled;
    }

    /// Forgets the last utterance, e.g. when a new session starts.
    pub fn reset(&mut self) {
        self.last_spoken = None;
    }

    /// Renders and, if allowed, speaks every message-bearing effect.
    ///
    /// Returns the number of utterances started.
    pub fn dispatch<'a, I>(
        &mut self,
        effects: I,
        surface: &mut dyn FeedbackSurface,
        speech: &mut dyn SpeechSink,
    ) -> usize
    where
        I: IntoIterator<Item = &'a Effect>,
    {
        let mut spoken = 0;
        for effect in effects {
            let text = match effect {
                Effect::Feedback { text } => {
                    surface.show_feedback(text);
                    text
                }
                Effect::Motivation { phrase, .. } => {
                    surface.show_motivation(phrase);
                    phrase
                }
                Effect::AdvanceSet { .. } | Effect::SetRestarted { .. } => {
                    self.reset();
                    continue;
                }
                _ => continue,
            };

            if self.speak(text, speech) {
                spoken += 1;
            }
        }
        spoken
    }

    fn speak(&mut self, text: &str, speech: &mut dyn SpeechSink) -> bool {
        if !self.audio_enabled || !speech.is_available() {
            return false;
        }
        if self.last_spoken.as_deref() == Some(text) {
            tracing::debug!("[FeedbackDispatcher] Skipping repeated utterance: {}", text);
            return false;
        }
        speech.cancel();
        speech.speak(text);
        self.last_spoken = Some(text.to_string());
        tracing::debug!("[FeedbackDispatcher] Speaking: {}", text);
        true
    }
}

impl Default for FeedbackDispatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::{ColorHint, DiscreteState};
    use crate::motivation::MotivationTier;

    #[derive(Default)]
    struct RecordingSurface {
        feedback: Vec<String>,
        motivation: Vec<String>,
    }

    impl FeedbackSurface for RecordingSurface {
        fn show_feedback(&mut self, text: &str) {
            self.feedback.push(text.to_string());
        }

        fn show_motivation(&mut self, text: &str) {
            self.motivation.push(text.to_string());
        }
    }

    #[derive(Default)]
    struct RecordingSpeech {
        calls: Vec<String>,
    }

    impl SpeechSink for RecordingSpeech {
        fn cancel(&mut self) {
            self.calls.push("<cancel>".to_string());
        }

        fn speak(&mut self, text: &str) {
            self.calls.push(text.to_string());
        }
    }

    fn sample_effects() -> Vec<Effect> {
        vec![
            Effect::StateUpdate {
                state: DiscreteState::Open,
                color: ColorHint::Positive,
            },
            Effect::Feedback {
                text: "Hand open".to_string(),
            },
            Effect::Motivation {
                tier: MotivationTier::Halfway,
                phrase: "Keep going".to_string(),
            },
        ]
    }

    #[test]
    fn test_renders_and_speaks_with_cancel_first() {
        let mut dispatcher = FeedbackDispatcher::new(true);
        let mut surface = RecordingSurface::default();
        let mut speech = RecordingSpeech::default();

        let spoken = dispatcher.dispatch(&sample_effects(), &mut surface, &mut speech);

        assert_eq!(spoken, 2);
        assert_eq!(surface.feedback, vec!["Hand open"]);
        assert_eq!(surface.motivation, vec!["Keep going"]);
        assert_eq!(
            speech.calls,
            vec!["<cancel>", "Hand open", "<cancel>", "Keep going"]
        );
    }

    #[test]
    fn test_muted_still_renders() {
        let mut dispatcher = FeedbackDispatcher::new(false);
        let mut surface = RecordingSurface::default();
        let mut speech = RecordingSpeech::default();

        let spoken = dispatcher.dispatch(&sample_effects(), &mut surface, &mut speech);

        assert_eq!(spoken, 0);
        assert!(speech.calls.is_empty());
        assert_eq!(surface.feedback.len(), 1);
        assert_eq!(surface.motivation.len(), 1);
    }

    #[test]
    fn test_unavailable_speech_is_skipped() {
        let mut dispatcher = FeedbackDispatcher::default();
        let mut surface = RecordingSurface::default();

        let spoken = dispatcher.dispatch(&sample_effects(), &mut surface, &mut NoSpeech);

        assert_eq!(spoken, 0);
        assert_eq!(surface.feedback.len(), 1);
    }

    #[test]
    fn test_repeated_text_is_spoken_once() {
        let mut dispatcher = FeedbackDispatcher::new(true);
        let mut surface = RecordingSurface::default();
        let mut speech = RecordingSpeech::default();
        let feedback = vec![Effect::Feedback {
            text: "Hand open".to_string(),
        }];

        assert_eq!(dispatcher.dispatch(&feedback, &mut surface, &mut speech), 1);
        assert_eq!(dispatcher.dispatch(&feedback, &mut surface, &mut speech), 0);

        assert_eq!(surface.feedback, vec!["Hand open", "Hand open"]);
        assert_eq!(speech.calls, vec!["<cancel>", "Hand open"]);
    }

    #[test]
    fn test_set_boundary_allows_repeat() {
        let mut dispatcher = FeedbackDispatcher::new(true);
        let mut surface = RecordingSurface::default();
        let mut speech = RecordingSpeech::default();
        let set_done = |completed_set| {
            vec![
                Effect::AdvanceSet {
                    completed_set,
                    next_set: completed_set + 1,
                },
                Effect::Motivation {
                    tier: MotivationTier::SetComplete,
                    phrase: "Set complete".to_string(),
                },
            ]
        };

        assert_eq!(dispatcher.dispatch(&set_done(1), &mut surface, &mut speech), 1);
        assert_eq!(dispatcher.dispatch(&set_done(2), &mut surface, &mut speech), 1);

        dispatcher.reset();
        let again = vec![Effect::Motivation {
            tier: MotivationTier::SetComplete,
            phrase: "Set complete".to_string(),
        }];
        assert_eq!(dispatcher.dispatch(&again, &mut surface, &mut speech), 1);
    }

    #[test]
    fn test_toggle_audio() {
        let mut dispatcher = FeedbackDispatcher::new(true);
        dispatcher.set_audio_enabled(false);
        assert!(!dispatcher.audio_enabled());
    }
}
