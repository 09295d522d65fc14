//! Game state snapshot: the complete visible state handed to the renderer
//! after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Position, SimTime};

/// Complete game state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub playfield: PlayfieldView,
    pub level: u32,
    pub difficulty: f64,
    pub score: ScoreView,
    /// Turrets in roster order.
    pub turrets: Vec<TurretView>,
    pub cities_remaining: u32,
    /// Live enemy missiles and planes.
    pub enemies_live: u32,
    pub audio_events: Vec<AudioEvent>,
    /// Drawable entities sorted by ascending depth.
    pub draw_list: Vec<DrawItem>,
}

/// Playfield size the simulation is running with.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayfieldView {
    pub width: f64,
    pub height: f64,
}

/// Running and best score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub high_score: u64,
    /// Score handed to the game-over screen.
    pub final_score: Option<u64>,
}

/// Turret status for the ammo labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretView {
    pub id: u64,
    pub position: Position,
    pub ammo: u32,
    pub aim_deg: f64,
}

/// One draw call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawItem {
    pub id: u64,
    pub kind: EntityKind,
    pub team: Option<Team>,
    pub visual: String,
    pub sprite: Option<String>,
    pub position: Position,
    /// Position at the start of the tick, for interpolation.
    pub previous: Position,
    /// Degrees, counter-clockwise from +x.
    pub rotation: f64,
    pub depth: i32,
    /// Missile launch point, for the trail line.
    pub trail_origin: Option<Position>,
}

impl DrawItem {
    /// Position to draw at, `alpha` of the way from `previous` to `position`.
    pub fn interpolated(&self, alpha: f64) -> Position {
        self.previous.lerp(&self.position, alpha.clamp(0.0, 1.0))
    }
}
