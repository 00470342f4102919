//! Spacing tactics: projectiles, pokes and zone maintenance.

use rand::Rng;

use crate::engine::query::{self, RangeBand};
use crate::engine::types::{ActionCommand, Button, Direction, FighterView};

/// Frames between ranged attacks.
const PROJECTILE_COOLDOWN_FRAMES: u64 = 45;

/// Minimum gap before a projectile is worth throwing.
const PROJECTILE_MIN_DISTANCE: f32 = 150.0;

/// Half-width of the zone dead-band: inside it the bot holds position.
const ZONE_DEAD_BAND: f32 = 30.0;

/// Rolled rates and the preferred fighting distance.
#[derive(Debug, Clone, Copy)]
pub struct SpacingWeights {
    pub projectile_rate: f32,
    pub poke_rate: f32,
    pub optimal_distance: f32,
}

/// Per-bot spacing state: the projectile cooldown.
#[derive(Debug, Clone, Default)]
pub struct SpacingTactics {
    projectile_ready_frame: u64,
}

impl SpacingTactics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.projectile_ready_frame = 0;
    }

    /// Ordered spacing checks: projectile, poke, zone nudge. Returns None
    /// inside the dead-band, where holding position is the right call.
    pub fn get_spacing_priority(
        &mut self,
        frame: u64,
        actor: &FighterView,
        opponent: &FighterView,
        weights: &SpacingWeights,
        rng: &mut impl Rng,
    ) -> Option<ActionCommand> {
        let dist = query::distance(actor, opponent);

        // Ranged attack, gated by cooldown so it cannot be mashed.
        if dist > PROJECTILE_MIN_DISTANCE
            && frame >= self.projectile_ready_frame
            && rng.gen::<f32>() < weights.projectile_rate
        {
            self.projectile_ready_frame = frame + PROJECTILE_COOLDOWN_FRAMES;
            return Some(ActionCommand::new(Direction::Neutral, Button::Special1, 0));
        }

        // Poke an opponent walking in.
        if query::range_band(dist) == RangeBand::Mid
            && query::is_approaching(actor, opponent)
            && rng.gen::<f32>() < weights.poke_rate
        {
            return Some(ActionCommand::new(
                query::direction_toward(actor, opponent),
                Button::LightKick,
                0,
            ));
        }

        maintain_zone_distance(actor, opponent, weights.optimal_distance)
    }
}

/// Nudge toward the configured optimal distance. Inside the ±30 px
/// dead-band there is nothing to correct and the result is None.
pub fn maintain_zone_distance(
    actor: &FighterView,
    opponent: &FighterView,
    optimal: f32,
) -> Option<ActionCommand> {
    let dist = query::distance(actor, opponent);
    let error = dist - optimal;
    if error.abs() <= ZONE_DEAD_BAND {
        None
    } else if error < 0.0 {
        // Too close: back off.
        Some(ActionCommand::new(query::direction_away(actor, opponent), Button::None, 4))
    } else {
        Some(ActionCommand::new(query::direction_toward(actor, opponent), Button::None, 4))
    }
}
