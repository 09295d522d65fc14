//! Enemy bomber: flies left to right at constant altitude and drops a
//! missile at a random structure on a fixed interval.

use hecs::{Entity, World};

use barrage_core::components::{EnemyControllerState, PlaneState, Transform};
use barrage_core::enums::Team;
use barrage_core::types::{Position, Velocity};

use crate::context::TickContext;
use crate::systems::{movement, wave_spawner};
use crate::world_setup;

fn read(world: &World, entity: Entity) -> Option<(Position, Velocity, PlaneState)> {
    let transform = world.get::<&Transform>(entity).ok()?;
    let velocity = world.get::<&Velocity>(entity).ok()?;
    let state = world.get::<&PlaneState>(entity).ok()?;
    Some((transform.position, *velocity, *state))
}

/// Missile speed of the level in progress.
fn controller_missile_speed(ctx: &TickContext) -> Option<f64> {
    let controller = ctx.enemy_controller?;
    let state = ctx
        .entities
        .world()
        .get::<&EnemyControllerState>(controller)
        .ok()?;
    Some(state.missile_speed)
}

/// Per-tick plane update.
pub fn act(ctx: &mut TickContext, entity: Entity) {
    let Some((position, velocity, mut state)) = read(ctx.entities.world(), entity) else {
        return;
    };

    let next = movement::integrate(position, &velocity, ctx.dt);
    if let Ok(mut transform) = ctx.entities.world().get::<&mut Transform>(entity) {
        transform.position = next;
    }

    state.launch_timer_secs -= ctx.dt;
    if state.launch_timer_secs < 0.0 {
        state.launch_timer_secs = ctx.tuning.plane_missile_interval_secs;
        if let Some(target) = wave_spawner::pick_structure_target(ctx) {
            if let Some(speed) = controller_missile_speed(ctx) {
                world_setup::spawn_missile(
                    ctx.entities,
                    ctx.rng,
                    next,
                    target,
                    speed,
                    Team::Enemy,
                    true,
                );
            }
        }
    }
    if let Ok(mut stored) = ctx.entities.world().get::<&mut PlaneState>(entity) {
        *stored = state;
    }

    if next.x > ctx.playfield.width {
        ctx.entities.dispose(entity);
    }
}
