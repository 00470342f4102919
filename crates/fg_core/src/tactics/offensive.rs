//! Offensive tactics: frame traps, throws, combos and mix-ups.
//!
//! Check order is fixed: frame trap, throw, combo continuation, mix-up.
//! The mix-up keeps one frame of memory (the last choice) so the bot does
//! not fall into a single repeated read.

use rand::Rng;

use crate::engine::frame_advantage::FrameAdvantageTracker;
use crate::engine::query::{self, RangeBand};
use crate::engine::types::{ActionCommand, Button, Direction, FighterStatus, FighterView};

/// Chance of jumping in instead of walking during a mid-range approach.
const APPROACH_JUMP_RATE: f32 = 0.15;

/// Distance beyond which the approach dashes instead of walking.
const DASH_RANGE: f32 = 200.0;

/// Rolled rates for the offensive checks.
#[derive(Debug, Clone, Copy)]
pub struct OffensiveWeights {
    pub throw_rate: f32,
    /// Chance to flip away from a repeated mix-up choice.
    pub mixup_rate: f32,
}

/// One branch of the high/low/throw guessing game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixupChoice {
    High,
    Low,
    Throw,
}

impl MixupChoice {
    fn command(self, toward: Direction) -> ActionCommand {
        match self {
            MixupChoice::High => ActionCommand::new(toward, Button::HeavyKick, 0),
            MixupChoice::Low => ActionCommand::new(Direction::Down, Button::LightKick, 0),
            MixupChoice::Throw => ActionCommand::new(toward, Button::HeavyPunch, 1),
        }
    }
}

/// Per-bot offensive state: the anti-repeat memory and a pressure counter.
#[derive(Debug, Clone, Default)]
pub struct OffensiveTactics {
    last_mixup: Option<MixupChoice>,
    /// Consecutive decisions spent on offense, reset when offense yields.
    pressure_frames: u32,
}

impl OffensiveTactics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressure_frames(&self) -> u32 {
        self.pressure_frames
    }

    pub fn reset(&mut self) {
        self.last_mixup = None;
        self.pressure_frames = 0;
    }

    /// Ordered offensive checks: frame trap, throw mix-up, combo
    /// continuation, close-range mix-up, else nothing.
    pub fn get_offensive_priority(
        &mut self,
        actor: &FighterView,
        opponent: &FighterView,
        _advantage: &FrameAdvantageTracker,
        weights: &OffensiveWeights,
        rng: &mut impl Rng,
    ) -> Option<ActionCommand> {
        let action = self.offensive_action(actor, opponent, weights, rng);
        match action {
            Some(_) => self.pressure_frames += 1,
            None => self.pressure_frames = 0,
        }
        action
    }

    fn offensive_action(
        &mut self,
        actor: &FighterView,
        opponent: &FighterView,
        weights: &OffensiveWeights,
        rng: &mut impl Rng,
    ) -> Option<ActionCommand> {
        let toward = query::direction_toward(actor, opponent);
        let band = query::range_band(query::distance(actor, opponent));

        // Frame trap: catch a button pressed in the block-stun tail.
        if opponent.status == FighterStatus::Blockstun
            && (1..=4).contains(&opponent.stun_frames)
        {
            return Some(ActionCommand::new(toward, Button::LightPunch, 0));
        }

        // Throw a standing blocker.
        if band == RangeBand::Close
            && opponent.status == FighterStatus::Block
            && rng.gen::<f32>() < weights.throw_rate
        {
            return Some(ActionCommand::new(toward, Button::HeavyPunch, 1));
        }

        // Keep an open combo going.
        if actor.combo_count > 0 {
            let button =
                if actor.combo_count % 2 == 1 { Button::LightKick } else { Button::HeavyPunch };
            return Some(ActionCommand::new(toward, button, 0));
        }

        // Close-range mix-up with an anti-repeat bias.
        if band == RangeBand::Close {
            let choice = self.roll_mixup(weights.mixup_rate, rng);
            self.last_mixup = Some(choice);
            return Some(choice.command(toward));
        }

        None
    }

    fn roll_mixup(&self, mixup_rate: f32, rng: &mut impl Rng) -> MixupChoice {
        const CHOICES: [MixupChoice; 3] = [MixupChoice::High, MixupChoice::Low, MixupChoice::Throw];
        let mut choice = CHOICES[rng.gen_range(0..CHOICES.len())];
        if Some(choice) == self.last_mixup && rng.gen::<f32>() < mixup_rate {
            // Flip to one of the two alternates.
            let alternates: Vec<MixupChoice> =
                CHOICES.iter().copied().filter(|c| Some(*c) != self.last_mixup).collect();
            choice = alternates[rng.gen_range(0..alternates.len())];
        }
        choice
    }
}

/// Always-available approach: dash when far, walk (with the occasional
/// jump-in) at mid range, hold position when already close.
pub fn aggressive_approach(
    actor: &FighterView,
    opponent: &FighterView,
    rng: &mut impl Rng,
) -> ActionCommand {
    let dist = query::distance(actor, opponent);
    let toward = query::direction_toward(actor, opponent);
    if dist > DASH_RANGE {
        // Held direction doubles as a dash input for the host.
        ActionCommand::new(toward, Button::None, 2)
    } else if query::range_band(dist) == RangeBand::Mid {
        if rng.gen::<f32>() < APPROACH_JUMP_RATE {
            ActionCommand::new(Direction::Up, Button::None, 0)
        } else {
            ActionCommand::new(toward, Button::None, 4)
        }
    } else {
        ActionCommand::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frame_advantage::FrameAdvantageTracker;
    use crate::engine::types::FighterId;
    use crate::test_fixtures::{fighter, snapshot};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    fn tracker() -> FrameAdvantageTracker {
        let snap = snapshot(vec![fighter(1, 100.0), fighter(2, 160.0)]);
        let mut t = FrameAdvantageTracker::new();
        t.update(&snap, FighterId(1), FighterId(2));
        t
    }

    const WEIGHTS: OffensiveWeights = OffensiveWeights { throw_rate: 1.0, mixup_rate: 1.0 };

    #[test]
    fn test_frame_trap_in_blockstun_tail() {
        let mut tactics = OffensiveTactics::new();
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let mut opponent = fighter(2, 160.0);
        opponent.status = FighterStatus::Blockstun;
        opponent.stun_frames = 3;

        let cmd =
            tactics.get_offensive_priority(&actor, &opponent, &tracker(), &WEIGHTS, &mut rng);
        assert_eq!(cmd.unwrap().button, Button::LightPunch);
    }

    #[test]
    fn test_no_frame_trap_outside_tail() {
        let mut tactics = OffensiveTactics::new();
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let mut opponent = fighter(2, 400.0);
        opponent.status = FighterStatus::Blockstun;
        opponent.stun_frames = 12;

        let cmd =
            tactics.get_offensive_priority(&actor, &opponent, &tracker(), &WEIGHTS, &mut rng);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_throw_standing_blocker_at_close_range() {
        let mut tactics = OffensiveTactics::new();
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let mut opponent = fighter(2, 160.0);
        opponent.status = FighterStatus::Block;

        let cmd = tactics
            .get_offensive_priority(&actor, &opponent, &tracker(), &WEIGHTS, &mut rng)
            .unwrap();
        assert_eq!(cmd.button, Button::HeavyPunch);
        assert_eq!(cmd.direction, Direction::Right);
        assert_eq!(cmd.hold_frames, 1);
    }

    #[test]
    fn test_combo_continuation() {
        let mut tactics = OffensiveTactics::new();
        let mut rng = test_rng();
        let mut actor = fighter(1, 100.0);
        actor.combo_count = 1;
        let opponent = fighter(2, 400.0);

        let cmd = tactics
            .get_offensive_priority(&actor, &opponent, &tracker(), &WEIGHTS, &mut rng)
            .unwrap();
        assert_eq!(cmd.button, Button::LightKick);

        actor.combo_count = 2;
        let cmd = tactics
            .get_offensive_priority(&actor, &opponent, &tracker(), &WEIGHTS, &mut rng)
            .unwrap();
        assert_eq!(cmd.button, Button::HeavyPunch);
    }

    #[test]
    fn test_mixup_never_repeats_with_full_flip_rate() {
        let mut tactics = OffensiveTactics::new();
        let mut rng = test_rng();
        // With mixup_rate = 1.0 an immediate repeat is always flipped.
        let mut last: Option<MixupChoice> = None;
        for _ in 0..200 {
            let choice = tactics.roll_mixup(1.0, &mut rng);
            if let Some(prev) = last {
                assert_ne!(choice, prev);
            }
            tactics.last_mixup = Some(choice);
            last = Some(choice);
        }
    }

    #[test]
    fn test_mixup_at_close_range_yields_attack() {
        let mut tactics = OffensiveTactics::new();
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let opponent = fighter(2, 160.0);

        let cmd = tactics
            .get_offensive_priority(&actor, &opponent, &tracker(), &WEIGHTS, &mut rng)
            .unwrap();
        assert!(cmd.button.is_attack());
        assert!(tactics.last_mixup.is_some());
    }

    #[test]
    fn test_pressure_counter_tracks_offense() {
        let mut tactics = OffensiveTactics::new();
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);
        let opponent = fighter(2, 160.0);

        for _ in 0..3 {
            tactics.get_offensive_priority(&actor, &opponent, &tracker(), &WEIGHTS, &mut rng);
        }
        assert_eq!(tactics.pressure_frames(), 3);

        let far = fighter(2, 700.0);
        tactics.get_offensive_priority(&actor, &far, &tracker(), &WEIGHTS, &mut rng);
        assert_eq!(tactics.pressure_frames(), 0);
    }

    #[test]
    fn test_approach_by_distance() {
        let mut rng = test_rng();
        let actor = fighter(1, 100.0);

        let far = fighter(2, 500.0);
        let cmd = aggressive_approach(&actor, &far, &mut rng);
        assert_eq!(cmd.direction, Direction::Right);
        assert_eq!(cmd.hold_frames, 2);

        let close = fighter(2, 150.0);
        assert!(aggressive_approach(&actor, &close, &mut rng).is_neutral());

        // Mid range walks or jumps; over many rolls both appear.
        let mid = fighter(2, 280.0);
        let mut jumps = 0;
        let mut walks = 0;
        for _ in 0..500 {
            match aggressive_approach(&actor, &mid, &mut rng).direction {
                Direction::Up => jumps += 1,
                Direction::Right => walks += 1,
                other => panic!("unexpected approach direction {other:?}"),
            }
        }
        assert!(jumps > 20, "jump-ins too rare: {jumps}");
        assert!(walks > 300, "walks too rare: {walks}");
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut tactics = OffensiveTactics::new();
        tactics.last_mixup = Some(MixupChoice::Low);
        tactics.pressure_frames = 9;
        tactics.reset();
        assert!(tactics.last_mixup.is_none());
        assert_eq!(tactics.pressure_frames(), 0);
    }
}
