//! Stateless read-only queries over the combat snapshot.
//!
//! Every function here is total and side-effect-free: absent optional data
//! degrades to a documented heuristic instead of failing.

use crate::engine::frame_data::MoveTable;
use crate::engine::types::{ArenaBounds, Direction, FighterStatus, FighterView};

/// Distance band used by the tactics modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBand {
    /// Under 100 px: throws and jabs connect.
    Close,
    /// 100-249 px: footsie range.
    Mid,
    /// 250 px and beyond: projectile range.
    Far,
}

/// Horizontal distance between two fighters. The engine reasons in one
/// axis only; height is handled through the grounded flag.
pub fn distance(a: &FighterView, b: &FighterView) -> f32 {
    (a.position.0 - b.position.0).abs()
}

pub fn range_band(dist: f32) -> RangeBand {
    if dist < 100.0 {
        RangeBand::Close
    } else if dist < 250.0 {
        RangeBand::Mid
    } else {
        RangeBand::Far
    }
}

/// Whether the fighter is free to start a new action this frame.
pub fn can_act(fighter: &FighterView) -> bool {
    !fighter.is_stunned() && !is_in_recovery(fighter)
}

/// In the post-active tail of an attack: committed but no longer hitting.
pub fn is_in_recovery(fighter: &FighterView) -> bool {
    fighter.status == FighterStatus::Attack && fighter.active_hitboxes == 0
}

/// Frames until the fighter finishes its current move.
///
/// Exact when the move table knows the move; otherwise the
/// `max(0, 15 - move_frame)` heuristic.
pub fn recovery_frames_remaining(fighter: &FighterView, table: &MoveTable) -> u32 {
    if fighter.status != FighterStatus::Attack {
        return 0;
    }
    match fighter.current_move.as_deref().and_then(|id| table.get(id)) {
        Some(data) => data.total_frames().saturating_sub(fighter.move_frame),
        None => 15u32.saturating_sub(fighter.move_frame),
    }
}

/// Stick direction that moves `from` toward `to`.
pub fn direction_toward(from: &FighterView, to: &FighterView) -> Direction {
    if to.position.0 >= from.position.0 {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// Stick direction that moves `from` away from `to`.
pub fn direction_away(from: &FighterView, to: &FighterView) -> Direction {
    match direction_toward(from, to) {
        Direction::Right => Direction::Left,
        _ => Direction::Right,
    }
}

/// Within 100 px of either arena wall.
pub fn is_near_corner(fighter: &FighterView, bounds: &ArenaBounds) -> bool {
    let x = fighter.position.0;
    x - bounds.left < 100.0 || bounds.right - x < 100.0
}

/// Whether `other` is closing the horizontal gap toward `fighter`.
pub fn is_approaching(fighter: &FighterView, other: &FighterView) -> bool {
    let gap = fighter.position.0 - other.position.0;
    // Moving right closes a positive gap, moving left a negative one.
    other.velocity.0 * gap > 0.0
}
