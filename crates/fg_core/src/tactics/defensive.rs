//! Defensive tactics: punishes, anti-airs and blocking.
//!
//! Priority order is the algorithm here. Punish comes first because an open
//! recovery window is strictly better than any guess; blocking comes last
//! so the caller can still fall through to spacing or offense.

use rand::Rng;

use crate::engine::frame_advantage::{punish_severity, FrameAdvantageTracker, PunishSeverity};
use crate::engine::frame_data::MoveTable;
use crate::engine::query::{self, RangeBand};
use crate::engine::types::{ActionCommand, Button, Direction, FighterStatus, FighterView};

/// Rolled rates for the defensive checks, derived from difficulty with
/// optional per-bot overrides.
#[derive(Debug, Clone, Copy)]
pub struct DefensiveWeights {
    pub block_probability: f32,
    pub anti_air_accuracy: f32,
}

/// Ordered defensive checks: punish, anti-air, block, else nothing.
pub fn get_defensive_priority(
    actor: &FighterView,
    opponent: &FighterView,
    advantage: &FrameAdvantageTracker,
    table: &MoveTable,
    weights: &DefensiveWeights,
    rng: &mut impl Rng,
) -> Option<ActionCommand> {
    if let Some(punish) = try_punish(actor, opponent, table) {
        return Some(punish);
    }
    if let Some(anti_air) = try_anti_air(actor, opponent, weights.anti_air_accuracy, rng) {
        return Some(anti_air);
    }
    try_block(actor, opponent, advantage, weights.block_probability, rng)
}

/// Punish an opponent stuck in attack recovery, scaled to the window size.
pub fn try_punish(
    actor: &FighterView,
    opponent: &FighterView,
    table: &MoveTable,
) -> Option<ActionCommand> {
    if !query::is_in_recovery(opponent) {
        return None;
    }
    let recovery = query::recovery_frames_remaining(opponent, table);
    let dist = query::distance(actor, opponent);
    let toward = query::direction_toward(actor, opponent);
    match punish_severity(recovery, dist)? {
        PunishSeverity::Heavy => {
            // Spend meter on the big windows, otherwise the hardest normal.
            let button =
                if actor.super_meter_ratio >= 1.0 { Button::Super } else { Button::HeavyPunch };
            Some(ActionCommand::new(toward, button, 0))
        }
        PunishSeverity::Medium => Some(ActionCommand::new(toward, Button::HeavyPunch, 0)),
        PunishSeverity::Light => Some(ActionCommand::new(toward, Button::LightPunch, 0)),
    }
}

/// Swat an airborne opponent, rolled against anti-air accuracy.
///
/// Close range uses a standing heavy, mid range the crouching heavy;
/// far jumps are not worth committing to.
pub fn try_anti_air(
    actor: &FighterView,
    opponent: &FighterView,
    accuracy: f32,
    rng: &mut impl Rng,
) -> Option<ActionCommand> {
    if !opponent.is_airborne() {
        return None;
    }
    if rng.gen::<f32>() >= accuracy {
        return None;
    }
    match query::range_band(query::distance(actor, opponent)) {
        RangeBand::Close => Some(ActionCommand::new(Direction::Neutral, Button::HeavyPunch, 0)),
        RangeBand::Mid => Some(ActionCommand::new(Direction::Down, Button::HeavyKick, 0)),
        RangeBand::Far => None,
    }
}

/// Block an incoming attack, rolled against block probability.
///
/// Only while the opponent is mid-attack and we do not hold frame
/// advantage; low block covers crouching and light-kick strings, high
/// block everything else.
pub fn try_block(
    actor: &FighterView,
    opponent: &FighterView,
    advantage: &FrameAdvantageTracker,
    block_probability: f32,
    rng: &mut impl Rng,
) -> Option<ActionCommand> {
    if opponent.status != FighterStatus::Attack || advantage.has_advantage() {
        return None;
    }
    if rng.gen::<f32>() >= block_probability {
        return None;
    }
    let hits_low = opponent
        .current_move
        .as_deref()
        .map(|id| id.contains("crouch") || id.contains("light_kick"))
        .unwrap_or(false);
    if hits_low {
        Some(ActionCommand::new(Direction::Down, Button::Block, 8))
    } else {
        Some(ActionCommand::new(query::direction_away(actor, opponent), Button::Block, 8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frame_data::DEFAULT_MOVE_TABLE;
    use crate::engine::types::FighterId;
    use crate::test_fixtures::{fighter, snapshot};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    fn neutral_tracker() -> FrameAdvantageTracker {
        let snap = snapshot(vec![fighter(1, 100.0), fighter(2, 160.0)]);
        let mut tracker = FrameAdvantageTracker::new();
        tracker.update(&snap, FighterId(1), FighterId(2));
        tracker
    }

    fn recovering_opponent(x: f32, move_id: &str, move_frame: u32) -> FighterView {
        let mut f = fighter(2, x);
        f.status = FighterStatus::Attack;
        f.active_hitboxes = 0;
        f.current_move = Some(move_id.to_string());
        f.move_frame = move_frame;
        f
    }

    #[test]
    fn test_punish_heavy_at_point_blank() {
        let actor = fighter(1, 100.0);
        // super (43 total frames) whiffed on frame 5: 38 frames left
        let opponent = recovering_opponent(160.0, "super", 5);
        let cmd = try_punish(&actor, &opponent, &DEFAULT_MOVE_TABLE).unwrap();
        assert_eq!(cmd.button, Button::HeavyPunch);
        assert_eq!(cmd.direction, Direction::Right);
    }

    #[test]
    fn test_punish_spends_meter_when_full() {
        let mut actor = fighter(1, 100.0);
        actor.super_meter_ratio = 1.0;
        let opponent = recovering_opponent(160.0, "super", 5);
        let cmd = try_punish(&actor, &opponent, &DEFAULT_MOVE_TABLE).unwrap();
        assert_eq!(cmd.button, Button::Super);
    }

    #[test]
    fn test_punish_light_at_edge_of_range() {
        let actor = fighter(1, 100.0);
        // light recovery window only
        let opponent = recovering_opponent(210.0, "heavy_punch", 18);
        let cmd = try_punish(&actor, &opponent, &DEFAULT_MOVE_TABLE).unwrap();
        assert_eq!(cmd.button, Button::LightPunch);
    }

    #[test]
    fn test_no_punish_when_opponent_free() {
        let actor = fighter(1, 100.0);
        let opponent = fighter(2, 160.0);
        assert!(try_punish(&actor, &opponent, &DEFAULT_MOVE_TABLE).is_none());
    }

    #[test]
    fn test_anti_air_by_range() {
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);

        let mut close = fighter(2, 150.0);
        close.grounded = false;
        let cmd = try_anti_air(&actor, &close, 1.0, &mut rng).unwrap();
        assert_eq!(cmd.button, Button::HeavyPunch);
        assert_eq!(cmd.direction, Direction::Neutral);

        let mut mid = fighter(2, 280.0);
        mid.grounded = false;
        let cmd = try_anti_air(&actor, &mid, 1.0, &mut rng).unwrap();
        assert_eq!(cmd.button, Button::HeavyKick);
        assert_eq!(cmd.direction, Direction::Down);

        let mut far = fighter(2, 500.0);
        far.grounded = false;
        assert!(try_anti_air(&actor, &far, 1.0, &mut rng).is_none());
    }

    #[test]
    fn test_anti_air_ignores_grounded_opponent() {
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let opponent = fighter(2, 150.0);
        assert!(try_anti_air(&actor, &opponent, 1.0, &mut rng).is_none());
    }

    #[test]
    fn test_block_high_and_low() {
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let tracker = neutral_tracker();

        let mut high = fighter(2, 160.0);
        high.status = FighterStatus::Attack;
        high.current_move = Some("heavy_punch".to_string());
        let cmd = try_block(&actor, &high, &tracker, 1.0, &mut rng).unwrap();
        assert_eq!(cmd.button, Button::Block);
        assert_eq!(cmd.direction, Direction::Left); // away from opponent on the right

        let mut low = fighter(2, 160.0);
        low.status = FighterStatus::Attack;
        low.current_move = Some("crouch_light_kick".to_string());
        let cmd = try_block(&actor, &low, &tracker, 1.0, &mut rng).unwrap();
        assert_eq!(cmd.direction, Direction::Down);
    }

    #[test]
    fn test_no_block_with_frame_advantage() {
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let mut attacking = fighter(2, 160.0);
        attacking.status = FighterStatus::Attack;
        attacking.stun_frames = 10; // tracker sees us plus on frames

        let snap = snapshot(vec![fighter(1, 100.0), attacking.clone()]);
        let mut tracker = FrameAdvantageTracker::new();
        tracker.update(&snap, FighterId(1), FighterId(2));

        assert!(try_block(&actor, &attacking, &tracker, 1.0, &mut rng).is_none());
    }

    #[test]
    fn test_block_rate_follows_probability() {
        // Law-of-large-numbers bound: 1000 trials at p=0.7 land in [0.6, 0.8].
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let tracker = neutral_tracker();
        let mut attacking = fighter(2, 160.0);
        attacking.status = FighterStatus::Attack;
        attacking.current_move = Some("heavy_punch".to_string());

        let blocked = (0..1000)
            .filter(|_| try_block(&actor, &attacking, &tracker, 0.7, &mut rng).is_some())
            .count();
        let rate = blocked as f32 / 1000.0;
        assert!((0.6..=0.8).contains(&rate), "observed block rate {rate}");
    }

    #[test]
    fn test_priority_order_punish_over_block() {
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let tracker = neutral_tracker();
        // Recovering opponent is both "mid-attack" and punishable; punish wins.
        let opponent = recovering_opponent(160.0, "super", 5);
        let weights = DefensiveWeights { block_probability: 1.0, anti_air_accuracy: 1.0 };
        let cmd = get_defensive_priority(
            &actor,
            &opponent,
            &tracker,
            &DEFAULT_MOVE_TABLE,
            &weights,
            &mut rng,
        )
        .unwrap();
        assert!(cmd.button.is_attack());
    }
}
