//! Simulation engine for BARRAGE.
//!
//! Owns the entity manager, runs one fixed step per tick, and produces
//! GameStateSnapshots for the front end.

pub mod context;
pub mod engine;
pub mod entity_manager;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use barrage_core as core;
pub use engine::{SimConfig, SimulationEngine};
