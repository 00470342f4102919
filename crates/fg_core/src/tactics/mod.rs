//! The tactics library: priority-ordered action proposers.
//!
//! Each module is independently testable and pure with respect to the
//! snapshot plus its own small counters. The priority order inside each
//! module is part of the design; archetype policies compose the modules in
//! their own order on top.

pub mod defensive;
pub mod offensive;
pub mod spacing;

pub use defensive::{get_defensive_priority, DefensiveWeights};
pub use offensive::{aggressive_approach, MixupChoice, OffensiveTactics, OffensiveWeights};
pub use spacing::{maintain_zone_distance, SpacingTactics, SpacingWeights};
