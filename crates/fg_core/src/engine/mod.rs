//! Frame-level combat analysis: snapshot types, stateless queries, frame
//! advantage, difficulty modulation and pattern recognition.

pub mod frame_advantage;
pub mod frame_data;
pub mod modulator;
pub mod pattern;
pub mod query;
pub mod types;

pub use frame_advantage::{punish_severity, FrameAdvantageTracker, PunishSeverity};
pub use frame_data::{MoveFrameData, MoveTable, DEFAULT_MOVE_TABLE};
pub use modulator::{clamp_difficulty, DifficultyModulator, MAX_DIFFICULTY, MIN_DIFFICULTY};
pub use pattern::{BehaviorProfile, Exploit, PatternRecognizer, PatternReport, PATTERN_WINDOW};
pub use query::RangeBand;
pub use types::{
    ActionCommand, ArenaBounds, Button, CombatSnapshot, Direction, FighterId, FighterStatus,
    FighterView,
};
