//! Character-by-character typing effect over a cyclic list of phrases.
//!
//! The animator is a plain value: the owner asks for [`TypingAnimator::next_delay`],
//! waits that long on a single timer, then calls [`TypingAnimator::step`]. A new
//! state means a new timer, and the old one is dropped first.

use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_TYPE_SPEED: Duration = Duration::from_millis(100);
pub const DEFAULT_DELETE_SPEED: Duration = Duration::from_millis(50);
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(2_000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypingError {
    #[error("typing animation needs at least one phrase")]
    NoPhrases,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    PausedAfterTyping,
    Deleting,
    AdvancingPhrase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_speed: Duration,
    pub delete_speed: Duration,
    pub pause: Duration,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_speed: DEFAULT_TYPE_SPEED,
            delete_speed: DEFAULT_DELETE_SPEED,
            pause: DEFAULT_PAUSE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypingAnimator {
    phrases: Rc<[String]>,
    timings: TypingTimings,
    index: usize,
    // Counted in chars, not bytes.
    shown: usize,
    phase: TypingPhase,
}

impl TypingAnimator {
    pub fn new(
        phrases: impl Into<Rc<[String]>>,
        timings: TypingTimings,
    ) -> Result<Self, TypingError> {
        let phrases = phrases.into();
        if phrases.is_empty() {
            return Err(TypingError::NoPhrases);
        }

        Ok(Self {
            phrases,
            timings,
            index: 0,
            shown: 0,
            phase: TypingPhase::Typing,
        })
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.index]
    }

    /// The visible prefix of the current phrase.
    pub fn displayed(&self) -> &str {
        let phrase = self.current_phrase();
        let end = phrase
            .char_indices()
            .nth(self.shown)
            .map(|(offset, _)| offset)
            .unwrap_or(phrase.len());
        &phrase[..end]
    }

    /// `true` while characters are being added rather than removed.
    pub fn is_typing(&self) -> bool {
        matches!(self.phase, TypingPhase::Typing | TypingPhase::AdvancingPhrase)
    }

    fn phrase_len(&self) -> usize {
        self.current_phrase().chars().count()
    }

    /// How long the owner waits before the next [`step`](Self::step).
    pub fn next_delay(&self) -> Duration {
        match self.phase {
            TypingPhase::Typing if self.shown < self.phrase_len() => self.timings.type_speed,
            TypingPhase::Typing => self.timings.pause,
            TypingPhase::Deleting if self.shown > 0 => self.timings.delete_speed,
            TypingPhase::PausedAfterTyping
            | TypingPhase::Deleting
            | TypingPhase::AdvancingPhrase => Duration::ZERO,
        }
    }

    /// Applies exactly one transition.
    pub fn step(&mut self) {
        match self.phase {
            TypingPhase::Typing => {
                if self.shown < self.phrase_len() {
                    self.shown += 1;
                } else {
                    self.phase = TypingPhase::PausedAfterTyping;
                }
            }
            TypingPhase::PausedAfterTyping => self.phase = TypingPhase::Deleting,
            TypingPhase::Deleting => {
                if self.shown > 0 {
                    self.shown -= 1;
                } else {
                    self.phase = TypingPhase::AdvancingPhrase;
                }
            }
            TypingPhase::AdvancingPhrase => {
                self.index = (self.index + 1) % self.phrases.len();
                self.shown = 0;
                self.phase = TypingPhase::Typing;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn animator(phrases: &[&str]) -> TypingAnimator {
        let phrases: Vec<String> = phrases.iter().map(|phrase| phrase.to_string()).collect();
        TypingAnimator::new(phrases, TypingTimings::default()).expect("non-empty phrases")
    }

    // Steps until the visible text changes or the phrase index moves, recording
    // whether a pause-length wait happened on the way.
    fn next_visible(animator: &mut TypingAnimator) -> (String, usize, bool) {
        let before = (animator.displayed().to_string(), animator.index());
        let mut paused = false;
        loop {
            if animator.next_delay() == animator.timings.pause {
                paused = true;
            }
            animator.step();
            let now = (animator.displayed().to_string(), animator.index());
            if now != before {
                return (now.0, now.1, paused);
            }
        }
    }

    #[test]
    fn empty_phrase_list_is_rejected() {
        let result = TypingAnimator::new(Vec::<String>::new(), TypingTimings::default());

        assert_eq!(result, Err(TypingError::NoPhrases));
    }

    #[test]
    fn starts_typing_the_first_phrase_from_empty() {
        let animator = animator(&["Developer", "Designer"]);

        assert_eq!(animator.phase(), TypingPhase::Typing);
        assert_eq!(animator.index(), 0);
        assert_eq!(animator.displayed(), "");
        assert!(animator.is_typing());
        assert_eq!(animator.next_delay(), DEFAULT_TYPE_SPEED);
    }

    #[test]
    fn two_phrase_scenario_follows_the_documented_tick_sequence() {
        let mut animator = animator(&["AB", "C"]);
        let mut seen = Vec::new();

        for _ in 0..9 {
            seen.push(next_visible(&mut animator));
        }

        let expected = vec![
            ("A".to_string(), 0, false),
            ("AB".to_string(), 0, false),
            ("A".to_string(), 0, true),
            ("".to_string(), 0, false),
            ("".to_string(), 1, false),
            ("C".to_string(), 1, false),
            ("".to_string(), 1, true),
            ("".to_string(), 0, false),
            ("A".to_string(), 0, false),
        ];
        assert_eq!(seen, expected);
    }

    #[test]
    fn full_phrase_waits_for_the_pause_before_deleting() {
        let mut animator = animator(&["Hi"]);
        animator.step();
        animator.step();

        assert_eq!(animator.displayed(), "Hi");
        assert_eq!(animator.phase(), TypingPhase::Typing);
        assert_eq!(animator.next_delay(), DEFAULT_PAUSE);

        animator.step();
        assert_eq!(animator.phase(), TypingPhase::PausedAfterTyping);
        assert_eq!(animator.displayed(), "Hi");
        assert_eq!(animator.next_delay(), Duration::ZERO);

        animator.step();
        assert_eq!(animator.phase(), TypingPhase::Deleting);
        assert!(!animator.is_typing());
        assert_eq!(animator.next_delay(), DEFAULT_DELETE_SPEED);
    }

    #[test]
    fn displayed_text_is_always_a_prefix_of_the_current_phrase() {
        let mut animator = animator(&["Full Stack Developer", "UI Designer", "Open Source Fan"]);

        for _ in 0..2_000 {
            assert!(animator.current_phrase().starts_with(animator.displayed()));
            animator.step();
        }
    }

    #[test]
    fn emptied_phrase_advances_exactly_one_position() {
        let mut animator = animator(&["ab", "cd", "ef"]);

        while animator.phase() != TypingPhase::AdvancingPhrase {
            animator.step();
        }
        assert_eq!(animator.index(), 0);
        assert_eq!(animator.displayed(), "");

        animator.step();
        assert_eq!(animator.index(), 1);
        assert_eq!(animator.phase(), TypingPhase::Typing);
        assert!(animator.is_typing());
    }

    #[test]
    fn cycling_n_phrases_returns_to_the_first() {
        let mut animator = animator(&["one", "two", "three", "four"]);
        let count = animator.phrase_count();
        let mut cycles = 0;

        loop {
            animator.step();
            if animator.phase() == TypingPhase::AdvancingPhrase {
                cycles += 1;
                animator.step();
                if animator.index() == 0 {
                    break;
                }
            }
        }

        assert_eq!(cycles, count);
    }

    #[test]
    fn single_phrase_loops_onto_itself() {
        let mut animator = animator(&["x"]);

        for _ in 0..6 {
            animator.step();
        }

        assert_eq!(animator.index(), 0);
        assert_eq!(animator.phase(), TypingPhase::Typing);
        assert_eq!(animator.displayed(), "");
    }

    #[test]
    fn multibyte_phrases_are_revealed_per_character() {
        let mut animator = animator(&["né✓"]);
        let mut revealed = Vec::new();

        for _ in 0..3 {
            animator.step();
            revealed.push(animator.displayed().to_string());
        }

        assert_eq!(revealed, vec!["n", "né", "né✓"]);
    }

    #[test]
    fn timer_delays_follow_configured_timings() {
        let timings = TypingTimings {
            type_speed: Duration::from_millis(120),
            delete_speed: Duration::from_millis(40),
            pause: Duration::from_millis(900),
        };
        let mut animator =
            TypingAnimator::new(vec!["a".to_string()], timings).expect("non-empty phrases");

        assert_eq!(animator.next_delay(), Duration::from_millis(120));
        animator.step();
        assert_eq!(animator.next_delay(), Duration::from_millis(900));
        animator.step();
        animator.step();
        assert_eq!(animator.next_delay(), Duration::from_millis(40));
    }
}
