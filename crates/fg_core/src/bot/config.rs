//! Bot configuration: archetype, difficulty and probability overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::modulator::clamp_difficulty;
use crate::error::ConfigError;

/// The five bot archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotStyle {
    /// Rushdown: constant forward pressure and mix-ups.
    Aggressor,
    /// Defensive: blocks, anti-airs and punishes.
    Guardian,
    /// Zoner: projectiles and distance control.
    Tactician,
    /// Teaching dummy: telegraphed phases the player learns against.
    Tutorial,
    /// Adaptive: reads the opponent and counter-picks a style.
    Wildcard,
}

impl BotStyle {
    pub const ALL: [BotStyle; 5] = [
        BotStyle::Aggressor,
        BotStyle::Guardian,
        BotStyle::Tactician,
        BotStyle::Tutorial,
        BotStyle::Wildcard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BotStyle::Aggressor => "aggressor",
            BotStyle::Guardian => "guardian",
            BotStyle::Tactician => "tactician",
            BotStyle::Tutorial => "tutorial",
            BotStyle::Wildcard => "wildcard",
        }
    }
}

impl fmt::Display for BotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BotStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aggressor" => Ok(BotStyle::Aggressor),
            "guardian" => Ok(BotStyle::Guardian),
            "tactician" => Ok(BotStyle::Tactician),
            "tutorial" => Ok(BotStyle::Tutorial),
            "wildcard" => Ok(BotStyle::Wildcard),
            other => Err(ConfigError::UnknownStyle(other.to_string())),
        }
    }
}

/// Constructor-time bot configuration.
///
/// Immutable after construction except through `set_difficulty`, which
/// re-clamps and lets the derived rates recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfiguration {
    pub name: String,
    pub style: BotStyle,
    difficulty: u8,
    /// Overrides the difficulty-derived block probability when set.
    #[serde(default)]
    pub block_probability_override: Option<f32>,
    /// Overrides the difficulty-derived anti-air accuracy when set.
    #[serde(default)]
    pub anti_air_accuracy_override: Option<f32>,
    /// Fixed rng seed for reproducible play; None seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl BotConfiguration {
    pub fn new(name: impl Into<String>, style: BotStyle, difficulty: u8) -> Self {
        Self {
            name: name.into(),
            style,
            difficulty: clamp_difficulty(difficulty),
            block_probability_override: None,
            anti_air_accuracy_override: None,
            seed: None,
        }
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.difficulty = clamp_difficulty(difficulty);
    }

    /// Difficulty-derived rate shared by both probability defaults.
    fn derived_rate(&self) -> f32 {
        (0.3 + self.difficulty as f32 * 0.04).clamp(0.0, 1.0)
    }

    pub fn block_probability(&self) -> f32 {
        self.block_probability_override.unwrap_or_else(|| self.derived_rate())
    }

    pub fn anti_air_accuracy(&self) -> f32 {
        self.anti_air_accuracy_override.unwrap_or_else(|| self.derived_rate())
    }

    /// Reject malformed configurations before a bot is built from them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(p) = self.block_probability_override {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::InvalidProbability {
                    name: "block_probability_override",
                    value: p,
                });
            }
        }
        if let Some(p) = self.anti_air_accuracy_override {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::InvalidProbability {
                    name: "anti_air_accuracy_override",
                    value: p,
                });
            }
        }
        Ok(())
    }
}
