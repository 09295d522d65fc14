//! Gameplay tuning. Every field defaults to its constant, so a tuning file
//! only needs the values it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_difficulty: f64,
    pub difficulty_increment: f64,
    pub level_duration_secs: f64,
    pub missiles_per_level: f64,
    pub planes_per_level: f64,
    pub enemy_missile_speed: f64,
    pub turret_ammo_per_level: f64,
    pub plane_speed: f64,
    pub plane_missile_interval_secs: f64,
    pub player_missile_speed: f64,
    pub explosion_lifetime_secs: f64,
    pub missile_score: u64,
    pub plane_score: u64,
    pub game_over_delay_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_difficulty: BASE_DIFFICULTY,
            difficulty_increment: DIFFICULTY_INCREMENT,
            level_duration_secs: LEVEL_DURATION_SECS,
            missiles_per_level: MISSILES_PER_LEVEL,
            planes_per_level: PLANES_PER_LEVEL,
            enemy_missile_speed: ENEMY_MISSILE_SPEED,
            turret_ammo_per_level: TURRET_AMMO_PER_LEVEL,
            plane_speed: PLANE_SPEED,
            plane_missile_interval_secs: PLANE_MISSILE_INTERVAL_SECS,
            player_missile_speed: PLAYER_MISSILE_SPEED,
            explosion_lifetime_secs: EXPLOSION_LIFETIME_SECS,
            missile_score: MISSILE_SCORE,
            plane_score: PLANE_SCORE,
            game_over_delay_secs: GAME_OVER_DELAY_SECS,
        }
    }
}

/// Per-level numbers derived from a difficulty multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    pub difficulty: f64,
    pub missile_count: u32,
    pub plane_count: u32,
    pub missile_speed: f64,
    pub turret_ammo: u32,
}

impl Tuning {
    /// Scale the per-level numbers by `difficulty`. Counts truncate.
    pub fn level_params(&self, difficulty: f64) -> LevelParams {
        LevelParams {
            difficulty,
            missile_count: (self.missiles_per_level * difficulty) as u32,
            plane_count: (self.planes_per_level * difficulty) as u32,
            missile_speed: self.enemy_missile_speed * difficulty,
            turret_ammo: (self.turret_ammo_per_level * difficulty) as u32,
        }
    }

    /// Score for a kill with the given base value, truncating the scaled
    /// base before applying the multi-kill multiplier.
    pub fn kill_score(&self, base: u64, difficulty: f64, multiplier: u64) -> u64 {
        ((base as f64 * difficulty) as u64) * multiplier
    }
}
