//! Per-move frame data table.
//!
//! The table is authoritative when the simulation reports a known move id.
//! Unknown ids degrade to the substring heuristics at the bottom of this
//! file; their thresholds match the tuned values of the shipped roster and
//! must not be re-balanced casually.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Startup / active / recovery split for one move, plus its reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveFrameData {
    pub startup: u32,
    pub active: u32,
    pub recovery: u32,
    /// Horizontal reach in pixels within which the move can connect.
    pub effective_range: f32,
}

impl MoveFrameData {
    pub fn total_frames(&self) -> u32 {
        self.startup + self.active + self.recovery
    }
}

/// Lookup from move id to frame data.
#[derive(Debug, Clone, Default)]
pub struct MoveTable {
    moves: HashMap<String, MoveFrameData>,
}

impl MoveTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, data: MoveFrameData) {
        self.moves.insert(id.into(), data);
    }

    pub fn get(&self, id: &str) -> Option<&MoveFrameData> {
        self.moves.get(id)
    }

    /// Reach of the given move: exact when known, heuristic otherwise.
    pub fn effective_range(&self, id: &str) -> f32 {
        self.get(id)
            .map(|m| m.effective_range)
            .unwrap_or_else(|| effective_range_heuristic(id))
    }
}

/// Frame data for the shared normal/special move set.
pub static DEFAULT_MOVE_TABLE: Lazy<MoveTable> = Lazy::new(|| {
    let mut table = MoveTable::new();
    table.insert(
        "light_punch",
        MoveFrameData { startup: 3, active: 2, recovery: 6, effective_range: 70.0 },
    );
    table.insert(
        "heavy_punch",
        MoveFrameData { startup: 7, active: 3, recovery: 16, effective_range: 90.0 },
    );
    table.insert(
        "light_kick",
        MoveFrameData { startup: 4, active: 2, recovery: 8, effective_range: 85.0 },
    );
    table.insert(
        "heavy_kick",
        MoveFrameData { startup: 9, active: 4, recovery: 18, effective_range: 110.0 },
    );
    table.insert(
        "crouch_light_kick",
        MoveFrameData { startup: 4, active: 2, recovery: 9, effective_range: 80.0 },
    );
    table.insert(
        "crouch_heavy_kick",
        MoveFrameData { startup: 8, active: 3, recovery: 20, effective_range: 100.0 },
    );
    table.insert(
        "special_1",
        MoveFrameData { startup: 12, active: 1, recovery: 24, effective_range: 600.0 },
    );
    table.insert(
        "special_2",
        MoveFrameData { startup: 8, active: 6, recovery: 20, effective_range: 120.0 },
    );
    table.insert(
        "super",
        MoveFrameData { startup: 5, active: 8, recovery: 30, effective_range: 130.0 },
    );
    table
});

/// Reach estimate for moves missing from the table.
///
/// Known approximation: light normals are short, heavies a little longer,
/// projectiles effectively full-screen.
pub fn effective_range_heuristic(id: &str) -> f32 {
    if id.contains("special") || id.contains("projectile") {
        600.0
    } else if id.contains("light") || id.contains("lp") || id.contains("lk") {
        70.0
    } else if id.contains("heavy") || id.contains("hp") || id.contains("hk") {
        95.0
    } else {
        80.0
    }
}
