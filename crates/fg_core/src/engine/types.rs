//! Core combat types shared across the decision engine.
//!
//! Everything here is a plain value type. The snapshot is owned by the host
//! simulation and handed to the engine by reference once per frame; the
//! engine never mutates it and never keeps references across frames.

use serde::{Deserialize, Serialize};

/// Stable identifier for a fighter entity within a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FighterId(pub u32);

/// Stick direction component of an input command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    #[default]
    Neutral,
}

/// Button component of an input command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    LightPunch,
    HeavyPunch,
    LightKick,
    HeavyKick,
    Block,
    Special1,
    Special2,
    Super,
    #[default]
    None,
}

impl Button {
    /// Whether pressing this button starts an attack.
    pub fn is_attack(self) -> bool {
        !matches!(self, Button::Block | Button::None)
    }
}

/// One discrete input emitted by the engine, one per simulation frame.
///
/// This is the sole output type of the engine. Each decision produces a
/// fresh value; commands are never shared or aliased between bots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionCommand {
    pub direction: Direction,
    pub button: Button,
    /// Frames the input should be held by the host (0 = single tap).
    pub hold_frames: u32,
}

impl ActionCommand {
    pub fn new(direction: Direction, button: Button, hold_frames: u32) -> Self {
        Self { direction, button, hold_frames }
    }

    /// The do-nothing command, used for every degraded outcome.
    pub fn neutral() -> Self {
        Self { direction: Direction::Neutral, button: Button::None, hold_frames: 0 }
    }

    pub fn is_neutral(&self) -> bool {
        self.direction == Direction::Neutral && self.button == Button::None
    }
}

impl Default for ActionCommand {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Discrete fighter state as reported by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterStatus {
    #[default]
    Idle,
    Attack,
    Block,
    Blockstun,
    Hitstun,
    Jump,
    Knockdown,
}

/// Read-only projection of one fighter entity.
///
/// The simulation owns the real entity; this view carries exactly the
/// fields the decision engine is allowed to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterView {
    pub id: FighterId,
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub facing_right: bool,
    /// Health as a fraction of maximum (0.0-1.0).
    pub health_ratio: f32,
    pub energy_ratio: f32,
    pub super_meter_ratio: f32,
    pub status: FighterStatus,
    pub grounded: bool,
    /// Identifier of the move currently executing, if any.
    pub current_move: Option<String>,
    /// Frames elapsed since the current move started.
    pub move_frame: u32,
    /// Forced non-actionable frames remaining (block-stun or hit-stun).
    pub stun_frames: u32,
    pub active_hitboxes: u32,
    pub combo_count: u32,
}

impl FighterView {
    /// Fighter is locked out of acting by stun or knockdown.
    pub fn is_stunned(&self) -> bool {
        self.stun_frames > 0
            || matches!(
                self.status,
                FighterStatus::Hitstun | FighterStatus::Blockstun | FighterStatus::Knockdown
            )
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self.status, FighterStatus::Block | FighterStatus::Blockstun)
    }

    pub fn is_airborne(&self) -> bool {
        !self.grounded
    }
}

/// Horizontal extent of the arena. The engine only reasons in one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub left: f32,
    pub right: f32,
}

impl ArenaBounds {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn center(&self) -> f32 {
        (self.left + self.right) * 0.5
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self { left: 0.0, right: 800.0 }
    }
}

/// Immutable per-frame view of the whole combat state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub frame: u64,
    pub fighters: Vec<FighterView>,
    pub bounds: ArenaBounds,
}

impl CombatSnapshot {
    /// Look up a fighter by id. Absent ids are a degraded outcome for the
    /// caller, never an error.
    pub fn fighter(&self, id: FighterId) -> Option<&FighterView> {
        self.fighters.iter().find(|f| f.id == id)
    }
}
