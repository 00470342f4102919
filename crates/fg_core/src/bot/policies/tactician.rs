//! Tactician: zoner archetype.
//!
//! Holds the opponent at long range with projectiles and pokes; defense
//! kicks in only when the opponent gets through.

use rand::Rng;

use crate::bot::policies::DecisionContext;
use crate::engine::query;
use crate::engine::types::{ActionCommand, Button, Direction};
use crate::tactics::defensive::{try_anti_air, try_block, try_punish};
use crate::tactics::spacing::{SpacingTactics, SpacingWeights};

const WEIGHTS: SpacingWeights =
    SpacingWeights { projectile_rate: 0.45, poke_rate: 0.35, optimal_distance: 220.0 };

#[derive(Debug, Clone, Default)]
pub struct Tactician {
    spacing: SpacingTactics,
}

impl Tactician {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide<R: Rng>(&mut self, ctx: &mut DecisionContext<'_, R>) -> ActionCommand {
        if let Some(cmd) = try_punish(ctx.actor, ctx.opponent, ctx.table) {
            return cmd;
        }
        if let Some(cmd) = try_anti_air(ctx.actor, ctx.opponent, ctx.anti_air_accuracy, ctx.rng) {
            return cmd;
        }
        if let Some(cmd) =
            try_block(ctx.actor, ctx.opponent, ctx.advantage, ctx.block_probability, ctx.rng)
        {
            return cmd;
        }

        // A cornered zoner has lost the game plan: walk back out first.
        if query::is_near_corner(ctx.actor, &ctx.snapshot.bounds) {
            let toward_center = if ctx.actor.position.0 < ctx.snapshot.bounds.center() {
                Direction::Right
            } else {
                Direction::Left
            };
            return ActionCommand::new(toward_center, Button::None, 6);
        }

        self.spacing
            .get_spacing_priority(ctx.snapshot.frame, ctx.actor, ctx.opponent, &WEIGHTS, ctx.rng)
            .unwrap_or_else(ActionCommand::neutral)
    }

    pub fn reset(&mut self) {
        self.spacing.reset();
    }
}
