//! # fg_core - Scripted Opponent Decision Engine
//!
//! Frame-accurate decision making for non-human fighters in a 2D fighting
//! game. Given a read-only combat snapshot, each bot chooses exactly one
//! discrete action per simulation frame.
//!
//! ## Features
//! - Five bot archetypes composed from a shared tactics library
//! - 1-10 difficulty scale driving reaction latency and execution errors
//! - Opponent pattern recognition with exploit recommendations
//! - Fully deterministic under a fixed seed (same seed = same actions)
//!
//! The engine never steps the simulation, never blocks and never fails at
//! runtime: every degraded input produces the neutral action instead.

pub mod api;
pub mod bot;
pub mod engine;
pub mod error;
pub mod tactics;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use api::{decide_json, DecisionRequest, DecisionResponse};
pub use bot::{BotConfiguration, BotController, BotPolicy, BotStyle};
pub use engine::{
    ActionCommand, ArenaBounds, Button, CombatSnapshot, DifficultyModulator, Direction, Exploit,
    FighterId, FighterStatus, FighterView, FrameAdvantageTracker, MoveFrameData, MoveTable,
    PatternRecognizer, PunishSeverity, RangeBand,
};
pub use error::ConfigError;
