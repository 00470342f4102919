//! The per-bot decision loop.
//!
//! A `BotController` is invoked once per simulation frame and always
//! returns exactly one `ActionCommand`. It owns all per-bot state (reaction
//! buffer, pattern history, tactic counters, rng); nothing is shared
//! between bot instances, so any number can be driven from one thread.
//!
//! The loop is a two-state machine: *deciding* asks the archetype policy
//! for a raw action, runs it through the difficulty modulator and buffers
//! it for the reaction window; *buffering* replays the buffered action
//! until the window expires.

pub mod config;
pub mod policies;

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::engine::frame_advantage::FrameAdvantageTracker;
use crate::engine::frame_data::{MoveTable, DEFAULT_MOVE_TABLE};
use crate::engine::modulator::DifficultyModulator;
use crate::engine::pattern::PatternRecognizer;
use crate::engine::query;
use crate::engine::types::{ActionCommand, CombatSnapshot, FighterId, FighterStatus, FighterView};
use crate::error::ConfigError;

pub use config::{BotConfiguration, BotStyle};
pub use policies::{BotPolicy, DecisionContext};

/// Most recent opponent actions kept by the reaction layer.
const OPPONENT_HISTORY_CAP: usize = 20;

/// Reaction-latency state, reset at every round boundary.
#[derive(Debug, Clone, Default)]
struct ReactionState {
    /// Frames left before the next real decision.
    frames_until_action: u32,
    /// Action replayed while waiting.
    buffered: ActionCommand,
    last_opponent_action: Option<String>,
    opponent_history: VecDeque<String>,
    last_decision_frame: u64,
}

impl ReactionState {
    fn observe(&mut self, tag: &str) {
        if self.opponent_history.len() == OPPONENT_HISTORY_CAP {
            self.opponent_history.pop_front();
        }
        self.opponent_history.push_back(tag.to_string());
        self.last_opponent_action = Some(tag.to_string());
    }

    fn reset(&mut self) {
        self.frames_until_action = 0;
        self.buffered = ActionCommand::neutral();
        self.last_opponent_action = None;
        self.opponent_history.clear();
        self.last_decision_frame = 0;
    }
}

/// One scripted opponent: policy, modulator and all per-round state.
pub struct BotController {
    config: BotConfiguration,
    modulator: DifficultyModulator,
    tracker: FrameAdvantageTracker,
    recognizer: PatternRecognizer,
    policy: BotPolicy,
    reaction: ReactionState,
    table: MoveTable,
    rng: ChaCha8Rng,
}

impl BotController {
    /// Build a bot from configuration. The only failure mode is a
    /// malformed configuration; nothing fails after construction.
    pub fn new(config: BotConfiguration) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let modulator = DifficultyModulator::new(config.difficulty());
        let policy = BotPolicy::for_style(config.style);
        debug!(name = %config.name, style = %config.style, difficulty = config.difficulty(), "bot created");
        Ok(Self {
            config,
            modulator,
            tracker: FrameAdvantageTracker::new(),
            recognizer: PatternRecognizer::new(),
            policy,
            reaction: ReactionState::default(),
            table: DEFAULT_MOVE_TABLE.clone(),
            rng,
        })
    }

    /// Replace the built-in move table, e.g. with roster-specific data.
    pub fn with_move_table(mut self, table: MoveTable) -> Self {
        self.table = table;
        self
    }

    /// Choose one action for this frame.
    ///
    /// Never fails: a missing fighter or an un-actionable actor yields the
    /// neutral command.
    pub fn decide(
        &mut self,
        snapshot: &CombatSnapshot,
        actor_id: FighterId,
        target_id: FighterId,
    ) -> ActionCommand {
        let (Some(actor), Some(opponent)) =
            (snapshot.fighter(actor_id), snapshot.fighter(target_id))
        else {
            return ActionCommand::neutral();
        };
        // Observe before the actionability gate: the pattern window must
        // cover the frames spent in stun, or the bot never sees the moves
        // that are hitting it.
        let tag = observe_opponent(actor, opponent);
        self.reaction.observe(&tag);
        self.recognizer.record_action(&tag);
        self.tracker.update(snapshot, actor_id, target_id);

        if !query::can_act(actor) {
            // Locked out: nothing to buffer, nothing to decide.
            return ActionCommand::neutral();
        }

        // Buffering state: replay until the reaction window expires.
        if self.reaction.frames_until_action > 0 {
            self.reaction.frames_until_action -= 1;
            return self.reaction.buffered;
        }

        // Deciding state.
        let block_probability =
            self.modulator.scale_probability(self.config.block_probability(), &mut self.rng);
        let anti_air_accuracy =
            self.modulator.scale_probability(self.config.anti_air_accuracy(), &mut self.rng);
        let mut ctx = DecisionContext {
            snapshot,
            actor,
            opponent,
            advantage: &self.tracker,
            pattern: &self.recognizer,
            table: &self.table,
            block_probability,
            anti_air_accuracy,
            rng: &mut self.rng,
        };
        let raw = self.policy.decide(&mut ctx);
        let action = self.modulator.apply_modulation(raw, &mut self.rng);

        let jitter_span = 10i32 - self.config.difficulty() as i32;
        let extra = if jitter_span > 0 { self.rng.gen_range(0..jitter_span as u32) } else { 0 };
        self.reaction.frames_until_action = self.modulator.reaction_frames() + extra;
        self.reaction.buffered = action;
        self.reaction.last_decision_frame = snapshot.frame;
        action
    }

    /// Discard all in-round state. Must be called at round boundaries or
    /// pattern history and tactic counters bleed into the next round.
    pub fn reset(&mut self) {
        self.reaction.reset();
        self.recognizer.reset();
        self.tracker.reset();
        self.policy.reset();
        debug!(name = %self.config.name, "bot reset");
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn style(&self) -> BotStyle {
        self.config.style
    }

    pub fn difficulty(&self) -> u8 {
        self.config.difficulty()
    }

    /// Re-clamp the difficulty and recompute every derived rate.
    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.config.set_difficulty(difficulty);
        self.modulator.set_difficulty(self.config.difficulty());
    }

    pub fn block_probability(&self) -> f32 {
        self.config.block_probability()
    }

    pub fn anti_air_accuracy(&self) -> f32 {
        self.config.anti_air_accuracy()
    }

    pub fn reaction_frames(&self) -> u32 {
        self.modulator.reaction_frames()
    }

    /// Frames left in the current reaction window, for harnesses.
    pub fn frames_until_next_decision(&self) -> u32 {
        self.reaction.frames_until_action
    }
}

/// Tag one frame of opponent behavior for the pattern recognizer.
fn observe_opponent(actor: &FighterView, opponent: &FighterView) -> String {
    match opponent.status {
        FighterStatus::Block | FighterStatus::Blockstun => "block".to_string(),
        FighterStatus::Hitstun => "hitstun".to_string(),
        FighterStatus::Knockdown => "knockdown".to_string(),
        FighterStatus::Jump => "jump".to_string(),
        FighterStatus::Attack => {
            opponent.current_move.clone().unwrap_or_else(|| "attack".to_string())
        }
        FighterStatus::Idle => {
            if opponent.velocity.0.abs() < 0.1 {
                "idle".to_string()
            } else if query::is_approaching(actor, opponent) {
                "walk_forward".to_string()
            } else {
                "walk_back".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{fighter, snapshot, snapshot_at_frame};

    fn bot(style: BotStyle, difficulty: u8) -> BotController {
        let mut cfg = BotConfiguration::new("test", style, difficulty);
        cfg.seed = Some(7);
        BotController::new(cfg).unwrap()
    }

    fn duel_snapshot(frame: u64) -> crate::engine::types::CombatSnapshot {
        snapshot_at_frame(frame, vec![fighter(1, 200.0), fighter(2, 400.0)])
    }

    #[test]
    fn test_missing_fighters_yield_neutral() {
        let mut bot = bot(BotStyle::Aggressor, 5);
        let snap = snapshot(vec![fighter(1, 100.0)]);
        assert!(bot.decide(&snap, FighterId(1), FighterId(99)).is_neutral());
        assert!(bot.decide(&snap, FighterId(99), FighterId(1)).is_neutral());
    }

    #[test]
    fn test_stunned_actor_yields_neutral() {
        // Guardian must refuse to act at frame disadvantage at any skill.
        for difficulty in [1, 10] {
            let mut bot = bot(BotStyle::Guardian, difficulty);
            let mut actor = fighter(1, 200.0);
            actor.status = FighterStatus::Hitstun;
            actor.stun_frames = 12;
            let snap = snapshot(vec![actor, fighter(2, 300.0)]);

            let neutral = (0..50)
                .filter(|_| bot.decide(&snap, FighterId(1), FighterId(2)).is_neutral())
                .count();
            assert!(neutral * 100 >= 75 * 50, "only {neutral}/50 neutral at d{difficulty}");
        }
    }

    #[test]
    fn test_observes_opponent_while_stunned() {
        // Frames spent in hitstun still feed the pattern window: the bot
        // must learn from the combo it is eating.
        let mut bot = bot(BotStyle::Wildcard, 5);
        let mut actor = fighter(1, 200.0);
        actor.status = FighterStatus::Hitstun;
        actor.stun_frames = 12;
        let mut attacker = fighter(2, 260.0);
        attacker.status = FighterStatus::Attack;
        attacker.current_move = Some("light_punch".to_string());
        attacker.active_hitboxes = 1;

        for frame in 0..60 {
            let snap = snapshot_at_frame(frame, vec![actor.clone(), attacker.clone()]);
            assert!(bot.decide(&snap, FighterId(1), FighterId(2)).is_neutral());
        }
        assert_eq!(bot.recognizer.len(), 60);
        assert_eq!(bot.reaction.last_opponent_action.as_deref(), Some("light_punch"));
    }

    #[test]
    fn test_buffered_action_replayed_through_reaction_window() {
        let mut bot = bot(BotStyle::Guardian, 1); // 15-frame reaction
        let snap = duel_snapshot(0);

        let first = bot.decide(&snap, FighterId(1), FighterId(2));
        let window = bot.frames_until_next_decision();
        assert!(window >= 15);

        for _ in 0..window {
            assert_eq!(bot.decide(&snap, FighterId(1), FighterId(2)), first);
        }
        assert_eq!(bot.frames_until_next_decision(), 0);
    }

    #[test]
    fn test_top_difficulty_has_no_extra_jitter() {
        let mut bot = bot(BotStyle::Aggressor, 10);
        let snap = duel_snapshot(0);
        bot.decide(&snap, FighterId(1), FighterId(2));
        // reaction_frames(10) == 1 and the jitter span is empty.
        assert_eq!(bot.frames_until_next_decision(), 1);
    }

    #[test]
    fn test_reset_returns_to_fresh_state() {
        let mut bot = bot(BotStyle::Aggressor, 5);
        for frame in 0..120 {
            let snap = duel_snapshot(frame);
            bot.decide(&snap, FighterId(1), FighterId(2));
        }
        assert!(!bot.recognizer.is_empty());

        bot.reset();
        assert_eq!(bot.frames_until_next_decision(), 0);
        assert!(bot.reaction.opponent_history.is_empty());
        assert!(bot.reaction.last_opponent_action.is_none());
        assert!(bot.recognizer.is_empty());
        if let BotPolicy::Aggressor(a) = &bot.policy {
            assert_eq!(a.pressure_frames(), 0);
        } else {
            panic!("expected aggressor policy");
        }
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let mut a = bot(BotStyle::Wildcard, 6);
        let mut b = bot(BotStyle::Wildcard, 6);
        for frame in 0..200 {
            let snap = duel_snapshot(frame);
            assert_eq!(
                a.decide(&snap, FighterId(1), FighterId(2)),
                b.decide(&snap, FighterId(1), FighterId(2)),
                "diverged at frame {frame}"
            );
        }
    }

    #[test]
    fn test_all_styles_survive_arbitrary_states() {
        // Smoke test: no archetype may panic on any status combination.
        use crate::engine::types::FighterStatus::*;
        let statuses = [Idle, Attack, Block, Blockstun, Hitstun, Jump, Knockdown];
        for style in BotStyle::ALL {
            let mut bot = bot(style, 5);
            let mut frame = 0;
            for actor_status in statuses {
                for opponent_status in statuses {
                    let mut actor = fighter(1, 150.0);
                    actor.status = actor_status;
                    let mut opponent = fighter(2, 220.0);
                    opponent.status = opponent_status;
                    if opponent_status == Attack {
                        opponent.current_move = Some("heavy_punch".to_string());
                        opponent.move_frame = 5;
                    }
                    let snap = snapshot_at_frame(frame, vec![actor, opponent]);
                    bot.decide(&snap, FighterId(1), FighterId(2));
                    frame += 1;
                }
            }
        }
    }

    #[test]
    fn test_set_difficulty_updates_reaction() {
        let mut bot = bot(BotStyle::Guardian, 1);
        assert_eq!(bot.reaction_frames(), 15);
        bot.set_difficulty(10);
        assert_eq!(bot.reaction_frames(), 1);
        assert_eq!(bot.difficulty(), 10);
        bot.set_difficulty(0);
        assert_eq!(bot.difficulty(), 1);
    }

    #[test]
    fn test_opponent_history_bounded() {
        let mut bot = bot(BotStyle::Guardian, 10);
        for frame in 0..100 {
            let snap = duel_snapshot(frame);
            bot.decide(&snap, FighterId(1), FighterId(2));
        }
        assert!(bot.reaction.opponent_history.len() <= OPPONENT_HISTORY_CAP);
    }

    #[test]
    fn test_observation_tags() {
        let actor = fighter(1, 100.0);

        let mut opponent = fighter(2, 300.0);
        opponent.status = FighterStatus::Block;
        assert_eq!(observe_opponent(&actor, &opponent), "block");

        opponent.status = FighterStatus::Attack;
        opponent.current_move = Some("light_kick".to_string());
        assert_eq!(observe_opponent(&actor, &opponent), "light_kick");

        opponent.status = FighterStatus::Idle;
        opponent.current_move = None;
        opponent.velocity.0 = -3.0;
        assert_eq!(observe_opponent(&actor, &opponent), "walk_forward");

        opponent.velocity.0 = 3.0;
        assert_eq!(observe_opponent(&actor, &opponent), "walk_back");

        opponent.velocity.0 = 0.0;
        assert_eq!(observe_opponent(&actor, &opponent), "idle");
    }
}
