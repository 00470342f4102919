//! Guardian: defensive archetype.
//!
//! Priority tree: punish, anti-air, block, safe offense when plus,
//! corner escape under pressure, whiff punish, maintain spacing.

use rand::Rng;

use crate::bot::policies::DecisionContext;
use crate::engine::query::{self, RangeBand};
use crate::engine::types::{ActionCommand, Button, Direction, FighterStatus};
use crate::tactics::defensive::{try_anti_air, try_block, try_punish};
use crate::tactics::spacing::maintain_zone_distance;

/// Preferred footsie distance while nothing demands a response.
const SPACING_DISTANCE: f32 = 140.0;

#[derive(Debug, Clone, Default)]
pub struct Guardian;

impl Guardian {
    pub fn new() -> Self {
        Self
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

        let dist = query::distance(ctx.actor, ctx.opponent);
        let toward = query::direction_toward(ctx.actor, ctx.opponent);

        // Safe offense only while plus on frames.
        if ctx.advantage.has_advantage() && query::range_band(dist) != RangeBand::Far {
            return ActionCommand::new(toward, Button::LightPunch, 0);
        }

        // Escape the corner before pressure mounts.
        let pressured = query::range_band(dist) == RangeBand::Close
            && (ctx.opponent.status == FighterStatus::Attack
                || ctx.advantage.opponent_has_advantage());
        if pressured && query::is_near_corner(ctx.actor, &ctx.snapshot.bounds) {
            return ActionCommand::new(Direction::Up, Button::None, 0);
        }

        // Whiff punishing: counter-hit a slow startup, or walk in on a
        // move that is going to miss.
        if ctx.advantage.is_counter_hit_opportunity(ctx.opponent) {
            return ActionCommand::new(toward, Button::HeavyPunch, 0);
        }
        if ctx.advantage.will_move_whiff(ctx.opponent, ctx.actor, ctx.table) {
            return ActionCommand::new(toward, Button::None, 3);
        }

        maintain_zone_distance(ctx.actor, ctx.opponent, SPACING_DISTANCE)
            .unwrap_or_else(ActionCommand::neutral)
    }

    pub fn reset(&mut self) {}
}
