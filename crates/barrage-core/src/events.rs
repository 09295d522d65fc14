//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::constants::{SOUND_CITY, SOUND_EXPLOSION, SOUND_MISSILE};
use crate::enums::{EntityKind, Team};

/// Audio/UI events drained into every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A turret fired.
    MissileLaunched { x: f64, y: f64 },
    /// A missile detonated.
    Explosion { x: f64, y: f64, team: Team },
    /// A city or turret was destroyed.
    StructureLost { kind: EntityKind, x: f64, y: f64 },
    /// A new level began.
    LevelStarted { level: u32, difficulty: f64 },
    /// The game-over delay expired.
    GameOver { score: u64 },
}

impl AudioEvent {
    /// Sound asset to play for this event, if any.
    pub fn sound_key(&self) -> Option<&'static str> {
        match self {
            AudioEvent::MissileLaunched { .. } => Some(SOUND_MISSILE),
            AudioEvent::Explosion { .. } => Some(SOUND_EXPLOSION),
            AudioEvent::StructureLost { .. } => Some(SOUND_CITY),
            AudioEvent::LevelStarted { .. } | AudioEvent::GameOver { .. } => None,
        }
    }
}
