//! Player and shell commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible inputs to the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Shell ---
    /// Asset loading finished; leave the loading screen.
    AssetsLoaded,
    /// Display surface changed size.
    Resize { width: f64, height: f64 },

    // --- Menus ---
    /// Start a new game from the menu or the game-over screen.
    StartGame,
    /// Leave the game-over screen.
    ReturnToMenu,

    // --- Fire control ---
    /// Latest pointer sample, in playfield coordinates (y up).
    SampleInput {
        pointer_x: f64,
        pointer_y: f64,
        primary_down: bool,
    },
}
