//! Frame advantage tracking and punish-window classification.
//!
//! One tracker exists per actor/target pair and is refreshed once per frame
//! before any tactic runs. Missing fighters leave the tracker in its
//! "no opportunity" state rather than erroring.

use crate::engine::frame_data::MoveTable;
use crate::engine::query;
use crate::engine::types::{CombatSnapshot, FighterId, FighterStatus, FighterView};

/// How hard an open punish window can be hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunishSeverity {
    Heavy,
    Medium,
    Light,
}

/// Classify a punish window from the defender's remaining recovery and the
/// gap to close. Thresholds are ordered and mutually exclusive; the first
/// match wins.
pub fn punish_severity(recovery_frames: u32, distance: f32) -> Option<PunishSeverity> {
    if recovery_frames >= 15 && distance < 80.0 {
        Some(PunishSeverity::Heavy)
    } else if recovery_frames >= 10 && distance < 100.0 {
        Some(PunishSeverity::Medium)
    } else if recovery_frames >= 6 && distance < 120.0 {
        Some(PunishSeverity::Light)
    } else {
        None
    }
}

/// Per-pair cache of signed frame advantage.
///
/// Positive advantage favors the actor: the target is stuck in stun for
/// longer than we are.
#[derive(Debug, Clone, Default)]
pub struct FrameAdvantageTracker {
    advantage: i32,
    valid: bool,
}

impl FrameAdvantageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the cached advantage for this actor/target pair.
    pub fn update(&mut self, snapshot: &CombatSnapshot, actor: FighterId, target: FighterId) {
        match (snapshot.fighter(actor), snapshot.fighter(target)) {
            (Some(actor), Some(target)) => {
                self.advantage = target.stun_frames as i32 - actor.stun_frames as i32;
                self.valid = true;
            }
            _ => {
                self.advantage = 0;
                self.valid = false;
            }
        }
    }

    pub fn advantage(&self) -> i32 {
        self.advantage
    }

    pub fn has_advantage(&self) -> bool {
        self.valid && self.advantage > 0
    }

    pub fn opponent_has_advantage(&self) -> bool {
        self.valid && self.advantage < -2
    }

    pub fn is_neutral(&self) -> bool {
        !self.valid || (-2..=2).contains(&self.advantage)
    }

    /// Target is committed to an attack but has not produced a hitbox yet;
    /// a fast counter lands before their move becomes active.
    pub fn is_counter_hit_opportunity(&self, target: &FighterView) -> bool {
        self.valid
            && target.status == FighterStatus::Attack
            && target.active_hitboxes == 0
            && target.move_frame < 10
    }

    /// Whether the attacker's current move will miss: the defender sits
    /// outside the move's effective range.
    pub fn will_move_whiff(
        &self,
        attacker: &FighterView,
        defender: &FighterView,
        table: &MoveTable,
    ) -> bool {
        if attacker.status != FighterStatus::Attack {
            return false;
        }
        let Some(move_id) = attacker.current_move.as_deref() else {
            return false;
        };
        query::distance(attacker, defender) > table.effective_range(move_id)
    }

    pub fn reset(&mut self) {
        self.advantage = 0;
        self.valid = false;
    }
}
