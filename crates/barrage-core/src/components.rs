//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the sim crate's
//! systems, not here.

use serde::{Deserialize, Serialize};

use crate::enums::ControllerPhase;
use crate::types::{Aabb, Position};

/// Pose of an entity. `previous` is the position at the start of the
/// current tick, kept for render interpolation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Transform {
    pub position: Position,
    pub previous: Position,
    /// Rotation in degrees, counter-clockwise from +x.
    pub rotation: f64,
}

/// Draw order key. Higher values draw later (on top).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Depth(pub i32);

/// Collision half extents around the entity position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Footprint {
    pub half_width: f64,
    pub half_height: f64,
}

/// Current collision shape, recomputed from the pose every tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Bounds(pub Aabb);

/// Asset the renderer should use for this entity.
#[derive(Debug, Clone, Serialize)]
pub struct Visual {
    pub key: &'static str,
    /// Extra sprite drawn at the entity position (missile heads).
    pub sprite: Option<&'static str>,
}

/// Marks a city.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct City;

/// Turret fire-control state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TurretState {
    pub ammo: u32,
    /// Barrel angle in degrees.
    pub aim_deg: f64,
}

/// Straight-line missile state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MissileState {
    pub origin: Position,
    pub target: Position,
    pub speed: f64,
    /// Player-fired missiles are not destroyable by explosions.
    pub destroyable: bool,
}

/// Plane launch timer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlaneState {
    pub launch_timer_secs: f64,
}

/// Explosion lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExplosionState {
    pub remaining_secs: f64,
}

/// Wave scheduler state for one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyControllerState {
    pub phase: ControllerPhase,
    pub level: u32,
    pub difficulty: f64,
    pub missile_count: u32,
    pub plane_count: u32,
    pub missile_speed: f64,
    pub level_duration_secs: f64,
    pub level_remaining_secs: f64,
    pub missile_timer_secs: f64,
    pub plane_timer_secs: f64,
}

/// Deferred transition to game over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameOverTimer {
    pub remaining_secs: f64,
}
