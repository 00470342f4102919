//! JSON API for host-engine integration.
//!
//! One-shot decision endpoint used by test harnesses and curriculum
//! schedulers. Long-lived hosts should hold a `BotController` directly so
//! reaction buffering and pattern history persist between frames.

use serde::{Deserialize, Serialize};

use crate::bot::{BotConfiguration, BotController};
use crate::engine::types::{ActionCommand, CombatSnapshot, FighterId};
use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub config: BotConfiguration,
    pub snapshot: CombatSnapshot,
    pub actor_id: FighterId,
    pub target_id: FighterId,
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub action: ActionCommand,
}

/// Build a bot from the request's configuration, decide once, and return
/// the action as JSON.
pub fn decide_json(request_json: &str) -> Result<String, ConfigError> {
    let request: DecisionRequest = serde_json::from_str(request_json)
        .map_err(|e| ConfigError::BadRequest(e.to_string()))?;
    let mut bot = BotController::new(request.config)?;
    let action = bot.decide(&request.snapshot, request.actor_id, request.target_id);
    let response = DecisionResponse { action };
    serde_json::to_string(&response).map_err(|e| ConfigError::BadRequest(e.to_string()))
}
