//! Wildcard: adaptive archetype.
//!
//! Holds a current style, re-rolled every 300 frames with a 60% chance of
//! counter-picking whatever the pattern recognizer currently reads in the
//! opponent. The exploit recommendation is consulted first each decision;
//! style tactics are the fallback.

use rand::Rng;
use tracing::debug;

use crate::bot::policies::DecisionContext;
use crate::engine::pattern::{Exploit, PatternReport};
use crate::engine::query::{self, RangeBand};
use crate::engine::types::{ActionCommand, Button, Direction};
use crate::tactics::defensive::{DefensiveWeights, get_defensive_priority};
use crate::tactics::offensive::{aggressive_approach, OffensiveTactics, OffensiveWeights};
use crate::tactics::spacing::{maintain_zone_distance, SpacingTactics, SpacingWeights};

/// Frames between style re-rolls.
const STYLE_SWITCH_FRAMES: u64 = 300;

/// Chance to counter-pick a detected dominant style instead of rolling
/// uniformly. Tuned value; do not "improve" without rebalancing.
const COUNTER_PICK_RATE: f32 = 0.6;

const OFFENSE_WEIGHTS: OffensiveWeights = OffensiveWeights { throw_rate: 0.3, mixup_rate: 0.45 };
const ZONER_WEIGHTS: SpacingWeights =
    SpacingWeights { projectile_rate: 0.4, poke_rate: 0.3, optimal_distance: 200.0 };
const DEFENSIVE_SPACING: f32 = 140.0;

/// The style currently being imitated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildStyle {
    Defensive,
    Aggressive,
    Zoner,
    Random,
}

const ALL_STYLES: [WildStyle; 4] =
    [WildStyle::Defensive, WildStyle::Aggressive, WildStyle::Zoner, WildStyle::Random];

#[derive(Debug, Clone)]
pub struct Wildcard {
    style: WildStyle,
    next_roll_frame: u64,
    offense: OffensiveTactics,
    spacing: SpacingTactics,
}

impl Wildcard {
    pub fn new() -> Self {
        Self {
            // Rolls a real style on the first decision.
            style: WildStyle::Random,
            next_roll_frame: 0,
            offense: OffensiveTactics::new(),
            spacing: SpacingTactics::new(),
        }
    }

    pub fn style(&self) -> WildStyle {
        self.style
    }

    pub fn decide<R: Rng>(&mut self, ctx: &mut DecisionContext<'_, R>) -> ActionCommand {
        let frame = ctx.snapshot.frame;
        let report = ctx.pattern.detect_pattern();

        if frame >= self.next_roll_frame {
            let previous = self.style;
            self.style = roll_style(&report, ctx.rng);
            self.next_roll_frame = frame + STYLE_SWITCH_FRAMES;
            if self.style != previous {
                debug!(frame, ?previous, style = ?self.style, "wildcard style switch");
            }
        }

        if let Some(cmd) = self.play_exploit(&report, ctx) {
            return cmd;
        }
        self.play_style(ctx)
    }

    /// Act on the recognizer's exploit recommendation, if any.
    fn play_exploit<R: Rng>(
        &mut self,
        report: &PatternReport,
        ctx: &mut DecisionContext<'_, R>,
    ) -> Option<ActionCommand> {
        let dist = query::distance(ctx.actor, ctx.opponent);
        let close = query::range_band(dist) == RangeBand::Close;
        let toward = query::direction_toward(ctx.actor, ctx.opponent);

        match report.exploit {
            Exploit::Throw => Some(if close {
                ActionCommand::new(toward, Button::HeavyPunch, 1)
            } else {
                aggressive_approach(ctx.actor, ctx.opponent, ctx.rng)
            }),
            Exploit::Overhead => Some(if close {
                ActionCommand::new(toward, Button::HeavyKick, 0)
            } else {
                aggressive_approach(ctx.actor, ctx.opponent, ctx.rng)
            }),
            Exploit::Low => Some(if close {
                ActionCommand::new(Direction::Down, Button::LightKick, 0)
            } else {
                aggressive_approach(ctx.actor, ctx.opponent, ctx.rng)
            }),
            Exploit::Pressure => Some(
                self.offense
                    .get_offensive_priority(
                        ctx.actor,
                        ctx.opponent,
                        ctx.advantage,
                        &OFFENSE_WEIGHTS,
                        ctx.rng,
                    )
                    .unwrap_or_else(|| aggressive_approach(ctx.actor, ctx.opponent, ctx.rng)),
            ),
            Exploit::Bait => {
                // Step out of range and punish whatever comes out.
                if ctx.advantage.is_counter_hit_opportunity(ctx.opponent) {
                    Some(ActionCommand::new(toward, Button::HeavyPunch, 0))
                } else {
                    Some(ActionCommand::new(
                        query::direction_away(ctx.actor, ctx.opponent),
                        Button::None,
                        4,
                    ))
                }
            }
            Exploit::None => None,
        }
    }

    fn play_style<R: Rng>(&mut self, ctx: &mut DecisionContext<'_, R>) -> ActionCommand {
        match self.style {
            WildStyle::Defensive => {
                let weights = DefensiveWeights {
                    block_probability: ctx.block_probability,
                    anti_air_accuracy: ctx.anti_air_accuracy,
                };
                get_defensive_priority(
                    ctx.actor,
                    ctx.opponent,
                    ctx.advantage,
                    ctx.table,
                    &weights,
                    ctx.rng,
                )
                .or_else(|| {
                    maintain_zone_distance(ctx.actor, ctx.opponent, DEFENSIVE_SPACING)
                })
                .unwrap_or_else(ActionCommand::neutral)
            }
            WildStyle::Aggressive => self
                .offense
                .get_offensive_priority(
                    ctx.actor,
                    ctx.opponent,
                    ctx.advantage,
                    &OFFENSE_WEIGHTS,
                    ctx.rng,
                )
                .unwrap_or_else(|| aggressive_approach(ctx.actor, ctx.opponent, ctx.rng)),
            WildStyle::Zoner => self
                .spacing
                .get_spacing_priority(
                    ctx.snapshot.frame,
                    ctx.actor,
                    ctx.opponent,
                    &ZONER_WEIGHTS,
                    ctx.rng,
                )
                .unwrap_or_else(ActionCommand::neutral),
            WildStyle::Random => random_action(ctx),
        }
    }

    pub fn reset(&mut self) {
        self.style = WildStyle::Random;
        self.next_roll_frame = 0;
        self.offense.reset();
        self.spacing.reset();
    }
}

impl Default for Wildcard {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-roll the style: 60% counter-pick against a detected dominant read,
/// otherwise uniform over all four styles.
fn roll_style(report: &PatternReport, rng: &mut impl Rng) -> WildStyle {
    let counter = if report.is_aggressive {
        Some(WildStyle::Defensive)
    } else if report.is_defensive {
        Some(WildStyle::Aggressive)
    } else if report.is_zoner {
        Some(WildStyle::Aggressive)
    } else if report.is_jumper {
        Some(WildStyle::Defensive)
    } else {
        None
    };

    match counter {
        Some(style) if rng.gen::<f32>() < COUNTER_PICK_RATE => style,
        _ => ALL_STYLES[rng.gen_range(0..ALL_STYLES.len())],
    }
}

/// The chaos option: any plausible input, no reads at all.
fn random_action<R: Rng>(ctx: &mut DecisionContext<'_, R>) -> ActionCommand {
    let toward = query::direction_toward(ctx.actor, ctx.opponent);
    match ctx.rng.gen_range(0..5) {
        0 => ActionCommand::neutral(),
        1 => ActionCommand::new(toward, Button::None, 4),
        2 => ActionCommand::new(Direction::Up, Button::None, 0),
        3 => ActionCommand::new(toward, Button::LightPunch, 0),
        _ => ActionCommand::new(query::direction_away(ctx.actor, ctx.opponent), Button::Block, 6),
    }
}
