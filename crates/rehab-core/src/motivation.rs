//! Motivation milestones.
//!
//! Maps repetition progress within a set to a milestone tier and the phrase
//! shown (and spoken) when that tier is first reached.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const SET_COMPLETE_PHRASE: &str = "Set complete! Great work.";
pub const PLAN_COMPLETE_SUFFIX: &str = " You finished every set. Excellent job today!";
pub const ALMOST_THERE_PHRASE: &str = "Almost there! Just a few more.";

/// Encouragements used when the user passes the halfway mark.
pub const HALFWAY_PHRASES: &[&str] = &[
    "Keep going, you're doing great!",
    "Halfway there, nice and steady!",
    "Good rhythm, keep it up!",
    "You're making real progress!",
    "Strong work, stay with it!",
];

/// Milestone level within a set. Ordered: a higher tier is further along.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MotivationTier {
    #[default]
    Start,
    Halfway,
    AlmostThere,
    SetComplete,
}

impl MotivationTier {
    /// Numeric level, 0 through 3.
    pub fn level(&self) -> u8 {
        match self {
            Self::Start => 0,
            Self::Halfway => 1,
            Self::AlmostThere => 2,
            Self::SetComplete => 3,
        }
    }

    /// The tier reached at the given progress ratio (`reps / planned_reps`).
    pub fn from_ratio(progress_ratio: f64) -> Self {
        if progress_ratio >= 1.0 {
            Self::SetComplete
        } else if progress_ratio >= 0.8 {
            Self::AlmostThere
        } else if progress_ratio >= 0.5 {
            Self::Halfway
        } else {
            Self::Start
        }
    }
}

/// Source of indices for picking a halfway phrase.
pub trait PhraseSource: Send {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform pseudo-random phrase selection.
pub struct RandomPhraseSource {
    rng: StdRng,
}

impl RandomPhraseSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible source, for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPhraseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseSource for RandomPhraseSource {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// A reached tier and the phrase to surface for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub tier: MotivationTier,
    pub phrase: Option<String>,
}

/// Computes the milestone for a progress ratio.
///
/// The only impurity is the injected phrase source, consulted for the
/// halfway tier alone.
pub fn tier_for(
    progress_ratio: f64,
    is_final_set: bool,
    source: &mut dyn PhraseSource,
) -> Milestone {
    let tier = MotivationTier::from_ratio(progress_ratio);
    let phrase = match tier {
        MotivationTier::Start => None,
        MotivationTier::Halfway => {
            let index = source.pick(HALFWAY_PHRASES.len()) % HALFWAY_PHRASES.len();
            Some(HALFWAY_PHRASES[index].to_string())
        }
        MotivationTier::AlmostThere => Some(ALMOST_THERE_PHRASE.to_string()),
        MotivationTier::SetComplete => {
            let mut phrase = SET_COMPLETE_PHRASE.to_string();
            if is_final_set {
                phrase.push_str(PLAN_COMPLETE_SUFFIX);
            }
            Some(phrase)
        }
    };
    Milestone { tier, phrase }
}

/// Gatekeeper that only lets a milestone through when it beats the current tier.
pub struct MotivationPolicy {
    source: Box<dyn PhraseSource>,
}

impl MotivationPolicy {
    pub fn new(source: Box<dyn PhraseSource>) -> Self {
        Self { source }
    }

    /// Returns the new milestone if `progress_ratio` reaches a tier strictly
    /// above `current`. The phrase source is consulted only in that case, so a
    /// halfway phrase is chosen once per transition.
    pub fn evaluate(
        &mut self,
        current: MotivationTier,
        progress_ratio: f64,
        is_final_set: bool,
    ) -> Option<Milestone> {
        if MotivationTier::from_ratio(progress_ratio) <= current {
            return None;
        }
        Some(tier_for(progress_ratio, is_final_set, self.source.as_mut()))
    }
}

impl Default for MotivationPolicy {
    fn default() -> Self {
        Self::new(Box::new(RandomPhraseSource::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always picks the same index and counts how often it was asked.
    struct FixedSource {
        index: usize,
        calls: usize,
    }

    impl PhraseSource for FixedSource {
        fn pick(&mut self, _len: usize) -> usize {
            self.calls += 1;
            self.index
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(MotivationTier::from_ratio(0.0), MotivationTier::Start);
        assert_eq!(MotivationTier::from_ratio(0.49), MotivationTier::Start);
        assert_eq!(MotivationTier::from_ratio(0.5), MotivationTier::Halfway);
        assert_eq!(MotivationTier::from_ratio(0.79), MotivationTier::Halfway);
        assert_eq!(MotivationTier::from_ratio(0.8), MotivationTier::AlmostThere);
        assert_eq!(MotivationTier::from_ratio(1.0), MotivationTier::SetComplete);
        assert_eq!(MotivationTier::from_ratio(1.7), MotivationTier::SetComplete);
        assert_eq!(MotivationTier::from_ratio(f64::NAN), MotivationTier::Start);
    }

    #[test]
    fn test_completion_suffix_only_on_final_set() {
        let mut source = FixedSource { index: 0, calls: 0 };

        let final_set = tier_for(1.0, true, &mut source);
        assert_eq!(final_set.tier, MotivationTier::SetComplete);
        assert!(final_set.phrase.unwrap().contains(PLAN_COMPLETE_SUFFIX));

        let middle_set = tier_for(1.0, false, &mut source);
        let phrase = middle_set.phrase.unwrap();
        assert_eq!(phrase, SET_COMPLETE_PHRASE);
        assert!(!phrase.contains(PLAN_COMPLETE_SUFFIX));
    }

    #[test]
    fn test_halfway_phrase_uses_source() {
        let mut source = FixedSource { index: 2, calls: 0 };
        let milestone = tier_for(0.6, false, &mut source);
        assert_eq!(milestone.tier, MotivationTier::Halfway);
        assert_eq!(milestone.phrase.as_deref(), Some(HALFWAY_PHRASES[2]));
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn test_below_halfway_has_no_phrase() {
        let mut source = FixedSource { index: 0, calls: 0 };
        let milestone = tier_for(0.2, false, &mut source);
        assert_eq!(milestone.tier, MotivationTier::Start);
        assert!(milestone.phrase.is_none());
        assert_eq!(source.calls, 0);
    }

    #[test]
    fn test_policy_only_emits_on_higher_tier() {
        let mut policy = MotivationPolicy::new(Box::new(RandomPhraseSource::seeded(7)));

        assert!(policy.evaluate(MotivationTier::Start, 0.3, false).is_none());
        let halfway = policy.evaluate(MotivationTier::Start, 0.5, false).unwrap();
        assert_eq!(halfway.tier, MotivationTier::Halfway);
        assert!(HALFWAY_PHRASES.contains(&halfway.phrase.as_deref().unwrap()));

        assert!(policy.evaluate(MotivationTier::Halfway, 0.7, false).is_none());
        assert!(policy.evaluate(MotivationTier::AlmostThere, 0.5, false).is_none());

        let jump = policy.evaluate(MotivationTier::Start, 0.9, false).unwrap();
        assert_eq!(jump.tier, MotivationTier::AlmostThere);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = RandomPhraseSource::seeded(42);
        let mut b = RandomPhraseSource::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.pick(HALFWAY_PHRASES.len()), b.pick(HALFWAY_PHRASES.len()));
        }
    }
}
