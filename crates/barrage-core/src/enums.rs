//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Side an entity fights for. Explosions never damage their own team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
}

/// Entity variant tag. The engine dispatches per-tick behaviour on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    City,
    Turret,
    Missile,
    Plane,
    Explosion,
    /// Wave scheduler for the current level. Never drawn.
    EnemyController,
    /// Deferred transition to game over. Never drawn.
    GameOverTimer,
}

impl EntityKind {
    /// Whether this kind takes part in explosion collision tests.
    pub fn is_bounded(self) -> bool {
        matches!(
            self,
            EntityKind::City | EntityKind::Turret | EntityKind::Missile | EntityKind::Plane
        )
    }

    /// Whether this kind produces a draw call.
    pub fn is_drawable(self) -> bool {
        !matches!(self, EntityKind::EnemyController | EntityKind::GameOverTimer)
    }
}

/// Wave scheduler phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerPhase {
    /// Level timer running, spawning missiles and planes.
    #[default]
    Active,
    /// Level timer elapsed, waiting for the board to clear.
    Draining,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Loading,
    Menu,
    Playing,
    GameOver,
}
