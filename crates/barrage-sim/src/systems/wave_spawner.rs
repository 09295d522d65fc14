//! Enemy wave scheduler.
//!
//! One controller entity runs per level. While its level timer is
//! non-negative it counts down two independent spawn timers and launches
//! enemy missiles and planes; once the timer expires it drains, waiting
//! for the last enemy missile or plane to leave play before disposing
//! itself and signalling the engine to start the next level.

use hecs::Entity;
use rand::seq::SliceRandom;
use rand::Rng;

use barrage_core::components::EnemyControllerState;
use barrage_core::constants::PLANE_ALTITUDE_OFFSET;
use barrage_core::enums::{ControllerPhase, EntityKind, Team};
use barrage_core::types::Position;

use crate::context::TickContext;
use crate::entity_manager::EntityManager;
use crate::world_setup;

/// Live enemy missiles plus live planes.
pub fn enemies_live(entities: &EntityManager) -> u32 {
    let missiles = entities
        .world()
        .query::<(&EntityKind, &Team)>()
        .iter()
        .filter(|(entity, (kind, team))| {
            **kind == EntityKind::Missile && **team == Team::Enemy && entities.is_live(*entity)
        })
        .count();
    let planes = entities.live_of_kind(EntityKind::Plane).len();
    (missiles + planes) as u32
}

/// Position of a random live city or turret.
pub fn pick_structure_target(ctx: &mut TickContext) -> Option<Position> {
    let candidates = ctx.rosters.live_structures(ctx.entities);
    let target = *candidates.choose(ctx.rng)?;
    ctx.entities.position(target)
}

fn launch_missile(ctx: &mut TickContext, speed: f64) {
    let Some(target) = pick_structure_target(ctx) else {
        return;
    };
    let x = ctx.rng.gen_range(0.0..=ctx.playfield.width.max(0.0));
    let origin = Position::new(x, ctx.playfield.height);
    world_setup::spawn_missile(
        ctx.entities,
        ctx.rng,
        origin,
        target,
        speed,
        Team::Enemy,
        true,
    );
}

fn launch_plane(ctx: &mut TickContext) {
    let position = Position::new(0.0, ctx.playfield.height - PLANE_ALTITUDE_OFFSET);
    world_setup::spawn_plane(ctx.entities, position, ctx.tuning);
}

/// Per-tick controller update.
pub fn act(ctx: &mut TickContext, entity: Entity) {
    let Some(mut state) = ctx
        .entities
        .world()
        .get::<&EnemyControllerState>(entity)
        .ok()
        .map(|s| (*s).clone())
    else {
        return;
    };

    match state.phase {
        ControllerPhase::Active => {
            state.missile_timer_secs -= ctx.dt;
            if state.missile_timer_secs < 0.0 {
                state.missile_timer_secs = state.level_duration_secs / state.missile_count as f64;
                launch_missile(ctx, state.missile_speed);
            }

            state.plane_timer_secs -= ctx.dt;
            if state.plane_timer_secs < 0.0 {
                state.plane_timer_secs = state.level_duration_secs / state.plane_count as f64;
                launch_plane(ctx);
            }

            state.level_remaining_secs -= ctx.dt;
            if state.level_remaining_secs < 0.0 {
                state.phase = ControllerPhase::Draining;
                tracing::debug!(level = state.level, "Level timer expired, draining");
            }
        }
        ControllerPhase::Draining => {
            if enemies_live(ctx.entities) == 0 {
                ctx.entities.dispose(entity);
                ctx.signals.level_cleared = true;
                tracing::debug!(level = state.level, "Level cleared");
            }
        }
    }

    if let Ok(mut stored) = ctx.entities.world().get::<&mut EnemyControllerState>(entity) {
        *stored = state;
    }
}
