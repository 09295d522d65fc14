//! Snapshot system: reads the entity manager and builds a complete
//! `GameStateSnapshot`. Read-only.

use hecs::{Entity, World};

use barrage_core::components::*;
use barrage_core::enums::*;
use barrage_core::events::AudioEvent;
use barrage_core::state::*;
use barrage_core::types::SimTime;

use crate::context::{Playfield, Rosters};
use crate::entity_manager::EntityManager;
use crate::score::ScoreState;
use crate::systems::wave_spawner;

/// Engine-level values that are not stored on entities.
pub struct SnapshotInput<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub playfield: Playfield,
    pub level: u32,
    pub difficulty: f64,
    pub score: &'a ScoreState,
    pub final_score: Option<u64>,
}

/// Build a complete GameStateSnapshot from the current state.
pub fn build_snapshot(
    entities: &EntityManager,
    rosters: &Rosters,
    input: SnapshotInput,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: input.time,
        phase: input.phase,
        playfield: PlayfieldView {
            width: input.playfield.width,
            height: input.playfield.height,
        },
        level: input.level,
        difficulty: input.difficulty,
        score: ScoreView {
            score: input.score.score(),
            high_score: input.score.high_score(),
            final_score: input.final_score,
        },
        turrets: build_turrets(entities, rosters),
        cities_remaining: rosters.cities.len() as u32,
        enemies_live: wave_spawner::enemies_live(entities),
        audio_events,
        draw_list: build_draw_list(entities),
    }
}

fn build_turrets(entities: &EntityManager, rosters: &Rosters) -> Vec<TurretView> {
    let world = entities.world();
    rosters
        .turrets
        .iter()
        .filter_map(|&entity| {
            let state = world.get::<&TurretState>(entity).ok()?;
            let transform = world.get::<&Transform>(entity).ok()?;
            Some(TurretView {
                id: entity.to_bits().get(),
                position: transform.position,
                ammo: state.ammo,
                aim_deg: state.aim_deg,
            })
        })
        .collect()
}

fn build_draw_list(entities: &EntityManager) -> Vec<DrawItem> {
    let world = entities.world();
    entities
        .draw_order()
        .into_iter()
        .filter_map(|entity| draw_item(world, entity))
        .collect()
}

fn draw_item(world: &World, entity: Entity) -> Option<DrawItem> {
    let kind = *world.get::<&EntityKind>(entity).ok()?;
    let depth = world.get::<&Depth>(entity).ok()?.0;
    let transform = *world.get::<&Transform>(entity).ok()?;
    let visual = world.get::<&Visual>(entity).ok()?;
    let team = world.get::<&Team>(entity).ok().map(|t| *t);
    let trail_origin = world.get::<&MissileState>(entity).ok().map(|m| m.origin);

    Some(DrawItem {
        id: entity.to_bits().get(),
        kind,
        team,
        visual: visual.key.to_string(),
        sprite: visual.sprite.map(str::to_string),
        position: transform.position,
        previous: transform.previous,
        rotation: transform.rotation,
        depth,
        trail_origin,
    })
}
