//! Tutorial: teaching archetype.
//!
//! Cycles five 600-frame phases of deliberately unsafe, telegraphed
//! patterns, one per defensive skill the player is meant to practice.
//! When the player lands something (a 3-hit combo or a punish), the bot
//! backs off for a moment as a reward signal.

use rand::Rng;
use tracing::debug;

use crate::bot::policies::DecisionContext;
use crate::engine::query;
use crate::engine::types::{ActionCommand, Button, Direction};
use crate::tactics::defensive::try_punish;
use crate::tactics::spacing::maintain_zone_distance;

/// Length of each teaching phase.
const PHASE_FRAMES: u64 = 600;

/// Reward pause after the player succeeds.
const BACKOFF_FRAMES: u64 = 30;

/// Opponent combo length that counts as player success.
const SUCCESS_COMBO: u32 = 3;

/// The skill being taught, derived from the frame counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialPhase {
    /// Slow telegraphed heavies the player learns to block.
    Blocking,
    /// Stands still so jump-ins can be practiced against its anti-air.
    AntiAir,
    /// Walks a fixed zone so the player learns footsies.
    Spacing,
    /// Whiffs unsafe moves on a fixed rhythm, inviting punishes.
    Punishing,
    /// Simple jab pressure to practice escaping.
    Pressure,
}

impl TutorialPhase {
    pub fn at_frame(frame: u64) -> Self {
        match (frame / PHASE_FRAMES) % 5 {
            0 => TutorialPhase::Blocking,
            1 => TutorialPhase::AntiAir,
            2 => TutorialPhase::Spacing,
            3 => TutorialPhase::Punishing,
            _ => TutorialPhase::Pressure,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tutorial {
    back_off_until: u64,
    last_opponent_combo: u32,
}

impl Tutorial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide<R: Rng>(&mut self, ctx: &mut DecisionContext<'_, R>) -> ActionCommand {
        let frame = ctx.snapshot.frame;

        // Reward detection: a fresh 3-hit combo or being left at a heavy
        // frame deficit both mean the player did the lesson right.
        let combo_landed = ctx.opponent.combo_count >= SUCCESS_COMBO
            && ctx.opponent.combo_count > self.last_opponent_combo;
        if combo_landed || ctx.advantage.opponent_has_advantage() {
            if frame >= self.back_off_until {
                debug!(frame, "tutorial bot backing off after player success");
            }
            self.back_off_until = frame + BACKOFF_FRAMES;
        }
        self.last_opponent_combo = ctx.opponent.combo_count;

        let away = query::direction_away(ctx.actor, ctx.opponent);
        if frame < self.back_off_until {
            return ActionCommand::new(away, Button::None, 4);
        }

        let toward = query::direction_toward(ctx.actor, ctx.opponent);
        match TutorialPhase::at_frame(frame) {
            TutorialPhase::Blocking => {
                // One big obvious heavy every two seconds, guard in between.
                if frame % 120 < 4 {
                    ActionCommand::new(toward, Button::HeavyPunch, 0)
                } else {
                    ActionCommand::new(away, Button::Block, 20)
                }
            }
            TutorialPhase::AntiAir => {
                if ctx.opponent.is_airborne() {
                    ActionCommand::new(Direction::Neutral, Button::HeavyPunch, 0)
                } else {
                    ActionCommand::neutral()
                }
            }
            TutorialPhase::Spacing => {
                if frame % 90 < 2 {
                    ActionCommand::new(Direction::Neutral, Button::Special1, 0)
                } else {
                    maintain_zone_distance(ctx.actor, ctx.opponent, 150.0)
                        .unwrap_or_else(ActionCommand::neutral)
                }
            }
            TutorialPhase::Punishing => {
                // Whiff an unsafe sweep on a fixed rhythm; otherwise guard
                // so the only opening is the one being taught.
                if frame % 150 < 3 {
                    ActionCommand::new(Direction::Down, Button::HeavyKick, 0)
                } else {
                    ActionCommand::new(away, Button::Block, 20)
                }
            }
            TutorialPhase::Pressure => {
                if let Some(cmd) = try_punish(ctx.actor, ctx.opponent, ctx.table) {
                    return cmd;
                }
                if frame % 40 < 4 {
                    ActionCommand::new(toward, Button::LightPunch, 0)
                } else {
                    ActionCommand::new(toward, Button::None, 4)
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.back_off_until = 0;
        self.last_opponent_combo = 0;
    }

    #[cfg(test)]
    pub(crate) fn is_backing_off(&self, frame: u64) -> bool {
        frame < self.back_off_until
    }
}
