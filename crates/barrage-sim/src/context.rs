//! Per-tick state shared by the entity behaviours.

use hecs::Entity;
use rand_chacha::ChaCha8Rng;

use barrage_core::config::Tuning;
use barrage_core::events::AudioEvent;
use barrage_core::types::Position;

use crate::entity_manager::EntityManager;
use crate::score::ScoreState;

/// Playfield size, queried when spawning and for the off-screen boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

/// Defensive structures in spawn order.
#[derive(Debug, Clone, Default)]
pub struct Rosters {
    pub cities: Vec<Entity>,
    pub turrets: Vec<Entity>,
}

impl Rosters {
    /// Cities then turrets that are still live.
    pub fn live_structures(&self, entities: &EntityManager) -> Vec<Entity> {
        self.cities
            .iter()
            .chain(self.turrets.iter())
            .copied()
            .filter(|&e| entities.is_live(e))
            .collect()
    }

    pub fn is_defeated(&self) -> bool {
        self.cities.is_empty() && self.turrets.is_empty()
    }

    /// Remove a destroyed structure. Returns true if it was on a roster.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let before = self.cities.len() + self.turrets.len();
        self.cities.retain(|&e| e != entity);
        self.turrets.retain(|&e| e != entity);
        before != self.cities.len() + self.turrets.len()
    }
}

/// Requests raised during a tick and handled by the engine after pruning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickSignals {
    /// The level's controller finished and disposed itself.
    pub level_cleared: bool,
    /// The game-over delay expired.
    pub game_over: bool,
}

/// Mutable view over engine state for one tick.
pub struct TickContext<'a> {
    pub entities: &'a mut EntityManager,
    pub rng: &'a mut ChaCha8Rng,
    pub tuning: &'a Tuning,
    pub rosters: &'a Rosters,
    pub score: &'a mut ScoreState,
    pub audio_events: &'a mut Vec<AudioEvent>,
    pub signals: &'a mut TickSignals,
    pub playfield: Playfield,
    /// Pointer position sampled for this tick.
    pub pointer: Position,
    /// Difficulty of the level in progress.
    pub difficulty: f64,
    pub enemy_controller: Option<Entity>,
    pub dt: f64,
}
