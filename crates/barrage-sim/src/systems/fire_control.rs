//! Turret aiming and player fire control.
//!
//! Turrets track the pointer every tick. A press edge of the primary
//! button fires exactly one turret, chosen round-robin over the turret
//! roster. A turret with no ammo consumes the press without firing.

use hecs::Entity;

use barrage_core::components::{TurretState, Transform};
use barrage_core::constants::*;
use barrage_core::enums::Team;
use barrage_core::events::AudioEvent;
use barrage_core::types::Position;

use crate::context::TickContext;
use crate::world_setup;

/// Press-edge detector plus the round-robin cursor.
#[derive(Debug, Clone, Default)]
pub struct FireControl {
    previous_down: bool,
    next_turret: usize,
}

impl FireControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget input history, e.g. when a new game starts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True on the sample where the button goes from up to down.
    fn press_edge(&mut self, down: bool) -> bool {
        let edge = down && !self.previous_down;
        self.previous_down = down;
        edge
    }
}

/// Rotation pivot of a turret barrel.
pub fn pivot_point(position: Position) -> Position {
    Position::new(position.x, position.y + TURRET_PIVOT_HEIGHT)
}

/// Barrel tip for a turret at `position` aimed at `aim_deg`.
pub fn muzzle_point(position: Position, aim_deg: f64) -> Position {
    let pivot = pivot_point(position);
    let rad = aim_deg.to_radians();
    Position::new(
        pivot.x + TURRET_MUZZLE_LENGTH * rad.cos(),
        pivot.y + TURRET_MUZZLE_LENGTH * rad.sin(),
    )
}

/// Whether an aim angle is inside the barrel's travel.
pub fn in_aim_range(angle_deg: f64) -> bool {
    (TURRET_AIM_MIN_DEG..TURRET_AIM_MAX_DEG).contains(&angle_deg)
}

/// Per-tick turret update: follow the pointer while it is in range.
pub fn aim(ctx: &mut TickContext, entity: Entity) {
    let pointer = ctx.pointer;
    let world = ctx.entities.world();
    let (Ok(mut turret), Ok(mut transform)) = (
        world.get::<&mut TurretState>(entity),
        world.get::<&mut Transform>(entity),
    ) else {
        return;
    };

    let angle = pivot_point(transform.position).angle_to_deg(&pointer);
    if in_aim_range(angle) {
        turret.aim_deg = angle;
        transform.rotation = angle;
    }
}

/// Fire `turret` at the pointer. Returns false if it is gone or dry.
pub fn fire(ctx: &mut TickContext, turret: Entity) -> bool {
    let muzzle = {
        let world = ctx.entities.world();
        let (Ok(mut state), Ok(transform)) = (
            world.get::<&mut TurretState>(turret),
            world.get::<&Transform>(turret),
        ) else {
            return false;
        };
        if state.ammo == 0 {
            return false;
        }
        state.ammo -= 1;
        tracing::debug!(ammo = state.ammo, "Turret fired");
        muzzle_point(transform.position, state.aim_deg)
    };

    world_setup::spawn_missile(
        ctx.entities,
        ctx.rng,
        muzzle,
        ctx.pointer,
        ctx.tuning.player_missile_speed,
        Team::Player,
        false,
    );
    ctx.audio_events.push(AudioEvent::MissileLaunched {
        x: muzzle.x,
        y: muzzle.y,
    });
    true
}

/// Handle the primary button sample for this tick. Returns the turret
/// that was selected, if a press edge occurred and a turret exists.
pub fn run(ctx: &mut TickContext, control: &mut FireControl, primary_down: bool) -> Option<Entity> {
    if !control.press_edge(primary_down) {
        return None;
    }

    let turrets = &ctx.rosters.turrets;
    if turrets.is_empty() {
        return None;
    }
    let index = control.next_turret % turrets.len();
    let turret = turrets[index];
    control.next_turret = (index + 1) % turrets.len();

    if ctx.entities.is_live(turret) {
        fire(ctx, turret);
    }
    Some(turret)
}
