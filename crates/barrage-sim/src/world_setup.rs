//! Entity spawn factories.
//!
//! Every factory goes through `EntityManager::add` so the entity gets a
//! kind, a depth and a registration slot. Bounded entities get their
//! collision box computed immediately, so an entity spawned mid-tick can
//! be hit in the same tick.

use hecs::Entity;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::*;
use barrage_core::config::Tuning;
use barrage_core::constants::*;
use barrage_core::enums::*;
use barrage_core::types::{Aabb, Position, Velocity};

use crate::context::{Playfield, Rosters};
use crate::entity_manager::EntityManager;

/// Spawn the defensive row: structures alternate city/turret, city first,
/// evenly spread between the borders.
pub fn setup_structures(entities: &mut EntityManager, playfield: Playfield) -> Rosters {
    let mut rosters = Rosters::default();
    let span = playfield.width - STRUCTURE_BORDER * 2.0;
    let gaps = (STRUCTURE_COUNT - 1) as f64;

    for i in 0..STRUCTURE_COUNT {
        let x = STRUCTURE_BORDER + i as f64 * span / gaps;
        let position = Position::new(x, STRUCTURE_Y);
        if i % 2 == 0 {
            rosters.cities.push(spawn_city(entities, position));
        } else {
            rosters.turrets.push(spawn_turret(entities, position, 0));
        }
    }
    rosters
}

fn transform_at(position: Position, rotation: f64) -> Transform {
    Transform {
        position,
        previous: position,
        rotation,
    }
}

fn footprint((half_width, half_height): (f64, f64)) -> Footprint {
    Footprint {
        half_width,
        half_height,
    }
}

fn bounds_at(position: Position, (half_width, half_height): (f64, f64)) -> Bounds {
    Bounds(Aabb::around(position, half_width, half_height))
}

pub fn spawn_city(entities: &mut EntityManager, position: Position) -> Entity {
    entities.add(
        EntityKind::City,
        DEPTH_STRUCTURE,
        (
            City,
            Team::Player,
            transform_at(position, 0.0),
            footprint(CITY_HALF_EXTENTS),
            bounds_at(position, CITY_HALF_EXTENTS),
            Visual {
                key: VISUAL_CITY,
                sprite: None,
            },
        ),
    )
}

pub fn spawn_turret(entities: &mut EntityManager, position: Position, ammo: u32) -> Entity {
    entities.add(
        EntityKind::Turret,
        DEPTH_STRUCTURE,
        (
            TurretState {
                ammo,
                aim_deg: TURRET_DEFAULT_AIM_DEG,
            },
            Team::Player,
            transform_at(position, TURRET_DEFAULT_AIM_DEG),
            footprint(TURRET_HALF_EXTENTS),
            bounds_at(position, TURRET_HALF_EXTENTS),
            Visual {
                key: VISUAL_TURRET,
                sprite: None,
            },
        ),
    )
}

/// Spawn a straight-line missile. The head sprite is picked at random.
pub fn spawn_missile(
    entities: &mut EntityManager,
    rng: &mut ChaCha8Rng,
    origin: Position,
    target: Position,
    speed: f64,
    team: Team,
    destroyable: bool,
) -> Entity {
    let sprite = PRODUCE_SPRITES.choose(rng).copied();
    entities.add(
        EntityKind::Missile,
        DEPTH_MISSILE,
        (
            MissileState {
                origin,
                target,
                speed,
                destroyable,
            },
            team,
            transform_at(origin, origin.angle_to_deg(&target)),
            footprint(MISSILE_HALF_EXTENTS),
            bounds_at(origin, MISSILE_HALF_EXTENTS),
            Visual {
                key: VISUAL_MISSILE,
                sprite,
            },
        ),
    )
}

pub fn spawn_plane(entities: &mut EntityManager, position: Position, tuning: &Tuning) -> Entity {
    entities.add(
        EntityKind::Plane,
        DEPTH_PLANE,
        (
            PlaneState {
                launch_timer_secs: tuning.plane_missile_interval_secs,
            },
            Team::Enemy,
            Velocity::new(tuning.plane_speed, 0.0),
            transform_at(position, 0.0),
            footprint(PLANE_HALF_EXTENTS),
            bounds_at(position, PLANE_HALF_EXTENTS),
            Visual {
                key: VISUAL_PLANE,
                sprite: None,
            },
        ),
    )
}

pub fn spawn_explosion(
    entities: &mut EntityManager,
    position: Position,
    team: Team,
    tuning: &Tuning,
) -> Entity {
    entities.add(
        EntityKind::Explosion,
        DEPTH_EXPLOSION,
        (
            ExplosionState {
                remaining_secs: tuning.explosion_lifetime_secs,
            },
            team,
            transform_at(position, 0.0),
            footprint(EXPLOSION_HALF_EXTENTS),
            bounds_at(position, EXPLOSION_HALF_EXTENTS),
            Visual {
                key: VISUAL_EXPLOSION,
                sprite: None,
            },
        ),
    )
}

/// Spawn the wave scheduler for `level` at `difficulty`. Both spawn
/// countdowns start at one full interval.
pub fn spawn_enemy_controller(
    entities: &mut EntityManager,
    tuning: &Tuning,
    level: u32,
    difficulty: f64,
) -> Entity {
    let params = tuning.level_params(difficulty);
    let duration = tuning.level_duration_secs;
    let state = EnemyControllerState {
        phase: ControllerPhase::Active,
        level,
        difficulty,
        missile_count: params.missile_count,
        plane_count: params.plane_count,
        missile_speed: params.missile_speed,
        level_duration_secs: duration,
        level_remaining_secs: duration,
        missile_timer_secs: duration / params.missile_count as f64,
        plane_timer_secs: duration / params.plane_count as f64,
    };
    entities.add(EntityKind::EnemyController, 0, (state,))
}

pub fn spawn_game_over_timer(entities: &mut EntityManager, tuning: &Tuning) -> Entity {
    entities.add(
        EntityKind::GameOverTimer,
        0,
        (GameOverTimer {
            remaining_secs: tuning.game_over_delay_secs,
        },),
    )
}
