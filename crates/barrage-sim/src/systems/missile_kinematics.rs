//! Straight-line missile flight.
//!
//! A missile moves at constant speed from its origin toward a fixed target
//! point. Overshoot is prevented per axis by detecting a sign change of
//! (position - target) across the step, which holds for any `dt`. On
//! arrival the missile is replaced by an explosion of its team.

use glam::DVec2;
use hecs::{Entity, World};

use barrage_core::components::{MissileState, Transform};
use barrage_core::enums::Team;
use barrage_core::events::AudioEvent;
use barrage_core::types::Position;

use crate::context::TickContext;
use crate::world_setup;

/// Advance `current` toward `target` by `speed * dt`, clamping each axis
/// that would pass the target onto it.
pub fn step_toward(current: Position, target: Position, speed: f64, dt: f64) -> Position {
    let direction = (target.to_vec() - current.to_vec()).normalize_or_zero();
    let step: DVec2 = direction * speed * dt;

    let mut next = current;
    if current.x != target.x {
        next.x += step.x;
    }
    if current.y != target.y {
        next.y += step.y;
    }

    if (current.x < target.x && next.x > target.x) || (current.x > target.x && next.x < target.x) {
        next.x = target.x;
    }
    if (current.y < target.y && next.y > target.y) || (current.y > target.y && next.y < target.y) {
        next.y = target.y;
    }
    next
}

fn read(world: &World, entity: Entity) -> Option<(Position, MissileState, Team)> {
    let transform = world.get::<&Transform>(entity).ok()?;
    let state = world.get::<&MissileState>(entity).ok()?;
    let team = world.get::<&Team>(entity).ok()?;
    Some((transform.position, *state, *team))
}

/// Per-tick missile update.
pub fn act(ctx: &mut TickContext, entity: Entity) {
    let Some((current, state, team)) = read(ctx.entities.world(), entity) else {
        return;
    };

    let next = step_toward(current, state.target, state.speed, ctx.dt);
    if let Ok(mut transform) = ctx.entities.world().get::<&mut Transform>(entity) {
        transform.position = next;
    }

    if next.approx_eq(&state.target) {
        ctx.entities.dispose(entity);
        world_setup::spawn_explosion(ctx.entities, next, team, ctx.tuning);
        ctx.audio_events.push(AudioEvent::Explosion {
            x: next.x,
            y: next.y,
            team,
        });
    }
}
