//! Entity registry over a hecs world.
//!
//! hecs iterates by archetype, so registration order is tracked separately
//! to give the act pass a stable visiting order and the draw list a stable
//! tie-break. Disposal is deferred: `dispose` only flags an entity, and
//! `prune` despawns everything flagged at the end of the tick.

use hecs::{DynamicBundle, Entity, EntityBuilder, World};

use barrage_core::components::{Depth, Transform};
use barrage_core::enums::EntityKind;
use barrage_core::types::Position;

/// Lifecycle bookkeeping attached to every managed entity.
#[derive(Debug, Clone, Copy)]
struct Registration {
    seq: u64,
    disposed: bool,
}

/// An entity removed by `prune`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pruned {
    pub entity: Entity,
    pub kind: EntityKind,
    pub position: Option<Position>,
}

/// Owns every simulated entity.
pub struct EntityManager {
    world: World,
    /// Registered entities that have not been pruned yet, oldest first.
    order: Vec<Entity>,
    next_seq: u64,
}

impl EntityManager {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            order: Vec::new(),
            next_seq: 0,
        }
    }

    /// Register a new live entity built from `bundle`.
    pub fn add(&mut self, kind: EntityKind, depth: i32, bundle: impl DynamicBundle) -> Entity {
        let mut builder = EntityBuilder::new();
        builder.add_bundle(bundle);
        builder.add(kind).add(Depth(depth)).add(Registration {
            seq: self.next_seq,
            disposed: false,
        });
        self.next_seq += 1;

        let entity = self.world.spawn(builder.build());
        self.order.push(entity);
        entity
    }

    /// Live entities in registration order, captured at the start of a tick.
    /// Entities added after this call are not part of the snapshot.
    pub fn begin_tick(&self) -> Vec<Entity> {
        self.live_entities()
    }

    /// Flag an entity for removal at the end of the tick.
    /// Returns false if it was unknown or already disposed.
    pub fn dispose(&mut self, entity: Entity) -> bool {
        match self.world.get::<&mut Registration>(entity) {
            Ok(mut reg) if !reg.disposed => {
                reg.disposed = true;
                true
            }
            _ => false,
        }
    }

    /// Despawn every disposed entity.
    pub fn prune(&mut self) -> Vec<Pruned> {
        let mut pruned = Vec::new();
        for &entity in &self.order {
            let disposed = self
                .world
                .get::<&Registration>(entity)
                .map(|reg| reg.disposed)
                .unwrap_or(true);
            if !disposed {
                continue;
            }
            if let Some(kind) = self.kind(entity) {
                pruned.push(Pruned {
                    entity,
                    kind,
                    position: self.position(entity),
                });
            }
        }

        for record in &pruned {
            let _ = self.world.despawn(record.entity);
        }
        let world = &self.world;
        self.order.retain(|&entity| world.contains(entity));
        pruned
    }

    /// Drop every entity. Sequence numbers keep counting.
    pub fn clear(&mut self) {
        self.world.clear();
        self.order.clear();
    }

    /// Registered and not disposed.
    pub fn is_live(&self, entity: Entity) -> bool {
        self.world
            .get::<&Registration>(entity)
            .map(|reg| !reg.disposed)
            .unwrap_or(false)
    }

    pub fn kind(&self, entity: Entity) -> Option<EntityKind> {
        self.world.get::<&EntityKind>(entity).map(|k| *k).ok()
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.world
            .get::<&Transform>(entity)
            .map(|t| t.position)
            .ok()
    }

    /// Live entities in registration order.
    pub fn live_entities(&self) -> Vec<Entity> {
        self.order
            .iter()
            .copied()
            .filter(|&entity| self.is_live(entity))
            .collect()
    }

    /// Live entities of one kind, in registration order.
    pub fn live_of_kind(&self, kind: EntityKind) -> Vec<Entity> {
        self.order
            .iter()
            .copied()
            .filter(|&entity| self.is_live(entity) && self.kind(entity) == Some(kind))
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.order.iter().filter(|&&e| self.is_live(e)).count()
    }

    /// Number of stored entities, including disposed ones not yet pruned.
    pub fn stored_count(&self) -> usize {
        self.order.len()
    }

    /// Live drawable entities sorted by ascending depth, ties by registration order.
    pub fn draw_order(&self) -> Vec<Entity> {
        let mut keyed: Vec<(Depth, u64, Entity)> = self
            .world
            .query::<(&Depth, &Registration, &EntityKind)>()
            .iter()
            .filter(|(_, (_, reg, kind))| !reg.disposed && kind.is_drawable())
            .map(|(entity, (depth, reg, _))| (*depth, reg.seq, entity))
            .collect();
        keyed.sort_by_key(|&(depth, seq, _)| (depth, seq));
        keyed.into_iter().map(|(_, _, entity)| entity).collect()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
