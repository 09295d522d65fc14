//! Per-kind entity behaviours and the tick-level systems around them.
//!
//! `act` and `act_end` dispatch on `EntityKind`; each behaviour reads and
//! writes its own components through the `TickContext`.

pub mod cleanup;
pub mod explosion;
pub mod fire_control;
pub mod game_over;
pub mod missile_kinematics;
pub mod movement;
pub mod plane;
pub mod snapshot;
pub mod wave_spawner;

use hecs::Entity;

use barrage_core::enums::EntityKind;

use crate::context::TickContext;

/// First pass: main behaviour.
pub fn act(ctx: &mut TickContext, entity: Entity, kind: EntityKind) {
    match kind {
        EntityKind::Missile => missile_kinematics::act(ctx, entity),
        EntityKind::Plane => plane::act(ctx, entity),
        EntityKind::Turret => fire_control::aim(ctx, entity),
        EntityKind::Explosion => explosion::act(ctx, entity),
        EntityKind::EnemyController => wave_spawner::act(ctx, entity),
        EntityKind::GameOverTimer => game_over::act(ctx, entity),
        EntityKind::City => {}
    }
}

/// Second pass, after every entity has acted.
pub fn act_end(ctx: &mut TickContext, entity: Entity, kind: EntityKind) {
    if kind == EntityKind::Explosion {
        explosion::act_end(ctx, entity);
    }
}
