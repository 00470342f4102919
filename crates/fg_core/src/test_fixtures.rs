//! Shared builders for unit tests.

use crate::engine::types::{
    ArenaBounds, CombatSnapshot, FighterId, FighterStatus, FighterView,
};

/// Idle, grounded, full-health fighter standing at `x`.
pub fn fighter(id: u32, x: f32) -> FighterView {
    FighterView {
        id: FighterId(id),
        position: (x, 0.0),
        velocity: (0.0, 0.0),
        facing_right: true,
        health_ratio: 1.0,
        energy_ratio: 1.0,
        super_meter_ratio: 0.0,
        status: FighterStatus::Idle,
        grounded: true,
        current_move: None,
        move_frame: 0,
        stun_frames: 0,
        active_hitboxes: 0,
        combo_count: 0,
    }
}

pub fn snapshot(fighters: Vec<FighterView>) -> CombatSnapshot {
    CombatSnapshot { frame: 0, fighters, bounds: ArenaBounds::default() }
}

pub fn snapshot_at_frame(frame: u64, fighters: Vec<FighterView>) -> CombatSnapshot {
    CombatSnapshot { frame, fighters, bounds: ArenaBounds::default() }
}
