//! Aggressor: rushdown archetype.
//!
//! Offense comes first; defense only when a free punish or an anti-air
//! presents itself. Everything else closes distance.

use rand::Rng;

use crate::bot::policies::DecisionContext;
use crate::engine::types::ActionCommand;
use crate::tactics::defensive::{try_anti_air, try_punish};
use crate::tactics::offensive::{aggressive_approach, OffensiveTactics, OffensiveWeights};

const WEIGHTS: OffensiveWeights = OffensiveWeights { throw_rate: 0.35, mixup_rate: 0.5 };

#[derive(Debug, Clone, Default)]
pub struct Aggressor {
    offense: OffensiveTactics,
}

impl Aggressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide<R: Rng>(&mut self, ctx: &mut DecisionContext<'_, R>) -> ActionCommand {
        if let Some(cmd) = self.offense.get_offensive_priority(
            ctx.actor,
            ctx.opponent,
            ctx.advantage,
            &WEIGHTS,
            ctx.rng,
        ) {
            return cmd;
        }
        if let Some(cmd) = try_punish(ctx.actor, ctx.opponent, ctx.table) {
            return cmd;
        }
        if let Some(cmd) = try_anti_air(ctx.actor, ctx.opponent, ctx.anti_air_accuracy, ctx.rng) {
            return cmd;
        }
        aggressive_approach(ctx.actor, ctx.opponent, ctx.rng)
    }

    pub fn reset(&mut self) {
        self.offense.reset();
    }

    #[cfg(test)]
    pub(crate) fn pressure_frames(&self) -> u32 {
        self.offense.pressure_frames()
    }
}
