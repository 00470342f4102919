//! Sliding-window pattern recognition over the opponent's action stream.
//!
//! The recognizer keeps roughly the most recent second of play (60 tags at
//! 60 fps) in a ring buffer and answers "what is this player doing" and
//! "how do we make them stop" questions. An empty buffer yields all-zero
//! rates and no exploit, never an error.

use std::collections::{HashMap, VecDeque};

/// Ring buffer capacity: one second of observations at 60 fps.
pub const PATTERN_WINDOW: usize = 60;

/// Minimum samples before `always_does` may return true.
const MIN_HABIT_SAMPLES: usize = 10;

/// Counter-play recommendation derived from the behavior profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Exploit {
    /// Opponent blocks too much: throw them.
    Throw,
    /// Opponent stays crouched: hit them with an overhead.
    Overhead,
    /// Opponent blocks high and never crouches: go low.
    Low,
    /// Opponent is passive or turtling: walk them to the corner.
    Pressure,
    /// Opponent jumps or mashes predictably: whiff-bait and punish.
    Bait,
    #[default]
    None,
}

/// Substring-matched action rates over the current window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BehaviorProfile {
    pub block_rate: f32,
    pub attack_rate: f32,
    pub jump_rate: f32,
    pub forward_rate: f32,
    pub backward_rate: f32,
    pub crouch_rate: f32,
}

/// Boolean reads plus the exploit recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PatternReport {
    pub is_defensive: bool,
    pub is_aggressive: bool,
    pub is_predictable: bool,
    pub is_zoner: bool,
    pub is_jumper: bool,
    pub exploit: Exploit,
}

/// Bounded classifier over observed opponent action tags.
#[derive(Debug, Clone, Default)]
pub struct PatternRecognizer {
    history: VecDeque<String>,
}

impl PatternRecognizer {
    pub fn new() -> Self {
        Self { history: VecDeque::with_capacity(PATTERN_WINDOW) }
    }

    /// Append one observation, evicting the oldest past capacity.
    pub fn record_action(&mut self, tag: &str) {
        if self.history.len() == PATTERN_WINDOW {
            self.history.pop_front();
        }
        self.history.push_back(tag.to_string());
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Compute the six action rates over the window.
    pub fn analyze_behavior(&self) -> BehaviorProfile {
        if self.history.is_empty() {
            return BehaviorProfile::default();
        }
        let total = self.history.len() as f32;
        let rate = |pred: &dyn Fn(&str) -> bool| {
            self.history.iter().filter(|t| pred(t)).count() as f32 / total
        };
        BehaviorProfile {
            block_rate: rate(&|t| t.contains("block")),
            attack_rate: rate(&|t| {
                t.contains("punch") || t.contains("kick") || t.contains("attack")
            }),
            jump_rate: rate(&|t| t.contains("jump")),
            forward_rate: rate(&|t| t.contains("forward")),
            backward_rate: rate(&|t| t.contains("back")),
            crouch_rate: rate(&|t| t.contains("crouch") || t.contains("down")),
        }
    }

    /// Derive behavior flags and a single exploit recommendation.
    ///
    /// The exploit cascade is a fixed priority order; reordering it
    /// changes bot behavior.
    pub fn detect_pattern(&self) -> PatternReport {
        let profile = self.analyze_behavior();

        let is_defensive = profile.block_rate > 0.4 || profile.backward_rate > 0.3;
        let is_aggressive = profile.attack_rate > 0.5 || profile.forward_rate > 0.4;
        let is_predictable = self.most_frequent_share() > 0.4;
        let is_zoner = profile.attack_rate > 0.3 && profile.backward_rate > 0.25;
        let is_jumper = profile.jump_rate > 0.3;

        let passive = !self.history.is_empty()
            && profile.attack_rate < 0.1
            && profile.jump_rate < 0.1
            && profile.forward_rate < 0.1;

        let exploit = if profile.block_rate > 0.5 {
            Exploit::Throw
        } else if profile.crouch_rate > 0.4 {
            Exploit::Overhead
        } else if profile.crouch_rate < 0.2 && profile.block_rate > 0.3 {
            Exploit::Low
        } else if passive {
            Exploit::Pressure
        } else if is_defensive {
            Exploit::Pressure
        } else if profile.jump_rate > 0.3 {
            Exploit::Bait
        } else if is_predictable && profile.block_rate <= 0.4 {
            Exploit::Bait
        } else {
            Exploit::None
        };

        PatternReport { is_defensive, is_aggressive, is_predictable, is_zoner, is_jumper, exploit }
    }

    /// Whether one tag dominates the window. Requires at least
    /// `MIN_HABIT_SAMPLES` observations to avoid early false positives.
    pub fn always_does(&self, tag: &str, threshold: f32) -> bool {
        if self.history.len() < MIN_HABIT_SAMPLES {
            return false;
        }
        let matching = self.history.iter().filter(|t| t.contains(tag)).count();
        matching as f32 / self.history.len() as f32 >= threshold
    }

    /// Whether the exact ordered subsequence reoccurs at least twice
    /// within the window. Occurrences may overlap.
    pub fn detect_sequence(&self, seq: &[&str]) -> bool {
        if seq.is_empty() {
            return false;
        }
        let tags: Vec<&str> = self.history.iter().map(String::as_str).collect();
        let occurrences = tags.windows(seq.len()).filter(|w| *w == seq).count();
        occurrences >= 2
    }

    /// Share of the window taken by the single most frequent tag.
    fn most_frequent_share(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for tag in &self.history {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
        let max = counts.values().copied().max().unwrap_or(0);
        max as f32 / self.history.len() as f32
    }
}
