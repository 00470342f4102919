//! The five archetype policies.
//!
//! Policies are a closed set selected by configuration, dispatched through
//! a tagged union rather than trait objects so the rng can stay generic.
//! Each variant owns only the tactic state and weight constants it needs;
//! everything read per frame arrives through `DecisionContext`.

pub mod aggressor;
pub mod guardian;
pub mod tactician;
pub mod tutorial;
pub mod wildcard;

use rand::Rng;

use crate::bot::config::BotStyle;
use crate::engine::frame_advantage::FrameAdvantageTracker;
use crate::engine::frame_data::MoveTable;
use crate::engine::pattern::PatternRecognizer;
use crate::engine::types::{ActionCommand, CombatSnapshot, FighterView};

pub use aggressor::Aggressor;
pub use guardian::Guardian;
pub use tactician::Tactician;
pub use tutorial::Tutorial;
pub use wildcard::{WildStyle, Wildcard};

/// Everything a policy may read while making one decision.
///
/// Borrowed fresh each frame; nothing in here outlives the `decide` call.
pub struct DecisionContext<'a, R: Rng> {
    pub snapshot: &'a CombatSnapshot,
    pub actor: &'a FighterView,
    pub opponent: &'a FighterView,
    pub advantage: &'a FrameAdvantageTracker,
    pub pattern: &'a PatternRecognizer,
    pub table: &'a MoveTable,
    /// Difficulty-derived (or overridden) rates, already probability-scaled.
    pub block_probability: f32,
    pub anti_air_accuracy: f32,
    pub rng: &'a mut R,
}

/// Closed set of archetype policies.
#[derive(Debug, Clone)]
pub enum BotPolicy {
    Aggressor(Aggressor),
    Guardian(Guardian),
    Tactician(Tactician),
    Tutorial(Tutorial),
    Wildcard(Wildcard),
}

/// Build a context over a two-fighter snapshot (ids 1 and 2) with perfect
/// rates, for policy unit tests.
#[cfg(test)]
pub(crate) fn test_ctx<'a>(
    snapshot: &'a CombatSnapshot,
    advantage: &'a FrameAdvantageTracker,
    pattern: &'a PatternRecognizer,
    rng: &'a mut rand_chacha::ChaCha8Rng,
) -> DecisionContext<'a, rand_chacha::ChaCha8Rng> {
    use crate::engine::frame_data::DEFAULT_MOVE_TABLE;
    use crate::engine::types::FighterId;
    DecisionContext {
        snapshot,
        actor: snapshot.fighter(FighterId(1)).expect("actor fixture"),
        opponent: snapshot.fighter(FighterId(2)).expect("opponent fixture"),
        advantage,
        pattern,
        table: &DEFAULT_MOVE_TABLE,
        block_probability: 1.0,
        anti_air_accuracy: 1.0,
        rng,
    }
}

impl BotPolicy {
    pub fn for_style(style: BotStyle) -> Self {
        match style {
            BotStyle::Aggressor => BotPolicy::Aggressor(Aggressor::new()),
            BotStyle::Guardian => BotPolicy::Guardian(Guardian::new()),
            BotStyle::Tactician => BotPolicy::Tactician(Tactician::new()),
            BotStyle::Tutorial => BotPolicy::Tutorial(Tutorial::new()),
            BotStyle::Wildcard => BotPolicy::Wildcard(Wildcard::new()),
        }
    }

    pub fn decide<R: Rng>(&mut self, ctx: &mut DecisionContext<'_, R>) -> ActionCommand {
        match self {
            BotPolicy::Aggressor(p) => p.decide(ctx),
            BotPolicy::Guardian(p) => p.decide(ctx),
            BotPolicy::Tactician(p) => p.decide(ctx),
            BotPolicy::Tutorial(p) => p.decide(ctx),
            BotPolicy::Wildcard(p) => p.decide(ctx),
        }
    }

    /// Clear all per-round counters, as if freshly constructed.
    pub fn reset(&mut self) {
        match self {
            BotPolicy::Aggressor(p) => p.reset(),
            BotPolicy::Guardian(p) => p.reset(),
            BotPolicy::Tactician(p) => p.reset(),
            BotPolicy::Tutorial(p) => p.reset(),
            BotPolicy::Wildcard(p) => p.reset(),
        }
    }
}
