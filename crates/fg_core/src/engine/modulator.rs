//! Difficulty modulation: reaction latency, execution accuracy and
//! injected mistakes.
//!
//! This is the sole place where human-like imperfection enters the engine.
//! Every roll goes through the caller-supplied rng so trials are
//! reproducible under a fixed seed.

use rand::Rng;
use tracing::trace;

use crate::engine::types::{ActionCommand, Button, Direction};

/// Lowest and highest supported difficulty. Out-of-range values clamp.
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

/// Clamp a requested difficulty into the supported range.
pub fn clamp_difficulty(difficulty: u8) -> u8 {
    difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Maps the 1-10 difficulty scalar onto latency, accuracy and error rates.
#[derive(Debug, Clone)]
pub struct DifficultyModulator {
    difficulty: u8,
    /// Half-width of the uniform noise added by `scale_probability`.
    noise_amount: f32,
}

impl DifficultyModulator {
    pub fn new(difficulty: u8) -> Self {
        Self { difficulty: clamp_difficulty(difficulty), noise_amount: 0.1 }
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.difficulty = clamp_difficulty(difficulty);
    }

    /// Frames between observing a situation and acting on it.
    /// 15 frames at difficulty 1 down to 1 frame at difficulty 10.
    pub fn reaction_frames(&self) -> u32 {
        let frames = (16.0 - self.difficulty as f32 * 1.5).round() as i32;
        frames.max(1) as u32
    }

    /// Chance a chosen action comes out as intended (~50% to 100%).
    pub fn execution_accuracy(&self) -> f32 {
        (0.45 + self.difficulty as f32 * 0.055).min(1.0)
    }

    /// Chance per decision of an outright misinput (50% down to 5%).
    pub fn mistake_rate(&self) -> f32 {
        (11 - self.difficulty as i32) as f32 * 0.05
    }

    /// Scale a requested probability by skill, then jitter it.
    ///
    /// Low difficulties use only half the requested rate; the additive
    /// uniform noise keeps repeated reads from being perfectly flat.
    pub fn scale_probability(&self, requested: f32, rng: &mut impl Rng) -> f32 {
        let scaled = requested * (0.5 + 0.5 * self.difficulty as f32 / 10.0);
        let noise = rng.gen_range(-self.noise_amount..=self.noise_amount);
        (scaled + noise).clamp(0.0, 1.0)
    }

    /// Pass the action through, or corrupt it with probability
    /// `1 - execution_accuracy()`.
    ///
    /// Error classes: wrong button (40%), wrong direction (30%),
    /// dropped input (30%).
    pub fn apply_modulation(&self, action: ActionCommand, rng: &mut impl Rng) -> ActionCommand {
        if rng.gen::<f32>() < self.execution_accuracy() {
            return action;
        }
        let corrupted = corrupt_action(action, rng);
        trace!(difficulty = self.difficulty, ?action, ?corrupted, "injected execution error");
        corrupted
    }
}

impl Default for DifficultyModulator {
    fn default() -> Self {
        Self::new(5)
    }
}

fn corrupt_action(action: ActionCommand, rng: &mut impl Rng) -> ActionCommand {
    let roll = rng.gen::<f32>();
    if roll < 0.4 {
        ActionCommand { button: wrong_button(action.button, rng), ..action }
    } else if roll < 0.7 {
        ActionCommand { direction: wrong_direction(action.direction, rng), ..action }
    } else {
        // Dropped input: the hand fumbles and nothing comes out.
        ActionCommand::neutral()
    }
}

fn wrong_button(intended: Button, rng: &mut impl Rng) -> Button {
    const BUTTONS: [Button; 8] = [
        Button::LightPunch,
        Button::HeavyPunch,
        Button::LightKick,
        Button::HeavyKick,
        Button::Block,
        Button::Special1,
        Button::Special2,
        Button::Super,
    ];
    loop {
        let pick = BUTTONS[rng.gen_range(0..BUTTONS.len())];
        if pick != intended {
            return pick;
        }
    }
}

fn wrong_direction(intended: Direction, rng: &mut impl Rng) -> Direction {
    const DIRECTIONS: [Direction; 5] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::Neutral,
    ];
    loop {
        let pick = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
        if pick != intended {
            return pick;
        }
    }
}
