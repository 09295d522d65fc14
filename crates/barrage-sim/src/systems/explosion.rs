//! Explosion collision and lifetime.
//!
//! On each act an explosion tests every other live bounded entity. A
//! candidate is destroyed if it belongs to the opposing team, its box
//! intersects the explosion box, and it is not a player-fired missile.
//! Kills within one act award a rising multiplier: the n-th missile or
//! plane destroyed scores `floor(base * difficulty) * n`.

use hecs::{Entity, World};

use barrage_core::components::{Bounds, ExplosionState, MissileState};
use barrage_core::enums::{EntityKind, Team};
use barrage_core::types::Aabb;

use crate::context::TickContext;

/// Collision-relevant view of a potential victim.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub kind: EntityKind,
    pub team: Team,
    pub bounds: Aabb,
    pub destroyable: bool,
}

fn read_candidate(world: &World, entity: Entity) -> Option<Candidate> {
    let kind = *world.get::<&EntityKind>(entity).ok()?;
    if !kind.is_bounded() {
        return None;
    }
    let team = *world.get::<&Team>(entity).ok()?;
    let bounds = world.get::<&Bounds>(entity).ok()?.0;
    let destroyable = world
        .get::<&MissileState>(entity)
        .map(|m| m.destroyable)
        .unwrap_or(true);
    Some(Candidate {
        kind,
        team,
        bounds,
        destroyable,
    })
}

/// Whether an explosion of `team` covering `area` destroys `candidate`.
pub fn is_eligible(team: Team, area: &Aabb, candidate: &Candidate) -> bool {
    candidate.team != team && candidate.destroyable && area.intersects(&candidate.bounds)
}

/// Destroy everything eligible inside the blast.
pub fn act(ctx: &mut TickContext, entity: Entity) {
    let area = match ctx.entities.world().get::<&Bounds>(entity) {
        Ok(bounds) => bounds.0,
        Err(_) => return,
    };
    let Ok(team) = ctx.entities.world().get::<&Team>(entity).map(|t| *t) else {
        return;
    };

    let mut multiplier: u64 = 1;
    for other in ctx.entities.live_entities() {
        if other == entity {
            continue;
        }
        let Some(candidate) = read_candidate(ctx.entities.world(), other) else {
            continue;
        };
        if !is_eligible(team, &area, &candidate) {
            continue;
        }

        ctx.entities.dispose(other);
        let base = match candidate.kind {
            EntityKind::Missile => ctx.tuning.missile_score,
            EntityKind::Plane => ctx.tuning.plane_score,
            _ => continue,
        };
        let points = ctx.tuning.kill_score(base, ctx.difficulty, multiplier);
        ctx.score.add(points);
        tracing::debug!(
            kind = ?candidate.kind,
            points,
            multiplier,
            score = ctx.score.score(),
            "Enemy destroyed"
        );
        multiplier += 1;
    }
}

/// Age the explosion and dispose it once its lifetime is spent.
pub fn act_end(ctx: &mut TickContext, entity: Entity) {
    let expired = match ctx.entities.world().get::<&mut ExplosionState>(entity) {
        Ok(mut state) => {
            state.remaining_secs -= ctx.dt;
            state.remaining_secs <= 0.0
        }
        Err(_) => return,
    };
    if expired {
        ctx.entities.dispose(entity);
    }
}
