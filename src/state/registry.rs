use crate::boundary::Boundary;
use crate::geometry::Coordinate;
use crate::state::entity::{Entity, Evaluation};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Entity storage with stable insertion order.
///
/// Everything sits behind one lock so an evaluation pass is a single step:
/// no report, upsert or snapshot can observe or mutate the registry halfway
/// through a pass.
pub struct EntityRegistry {
    inner: RwLock<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    entities: Vec<Entity>,
    /// entity id -> slot in `entities`
    index: HashMap<String, usize>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().expect("entity registry lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().expect("entity registry lock poisoned")
    }

    /// Insert a new entity or replace an existing one by id.
    ///
    /// A replaced entity keeps its original insertion slot rather than moving
    /// to the end. Listing order carries no meaning beyond stability.
    pub fn upsert(&self, entity: Entity) {
        let mut inner = self.write();

        match inner.index.get(&entity.id).copied() {
            Some(slot) => {
                debug!(entity_id = %entity.id, "Entity replaced");
                inner.entities[slot] = entity;
            }
            None => {
                info!(entity_id = %entity.id, live = entity.is_live_tracked, "Entity registered");
                let slot = inner.entities.len();
                inner.index.insert(entity.id.clone(), slot);
                inner.entities.push(entity);
            }
        }
    }

    /// Update the position of a known entity.
    ///
    /// Returns false (and changes nothing) when the id is unknown. Containment
    /// is left alone until the next evaluation.
    pub fn report_position(&self, entity_id: &str, position: Coordinate) -> bool {
        let mut inner = self.write();

        let Some(slot) = inner.index.get(entity_id).copied() else {
            debug!(entity_id = %entity_id, "Position report for unknown entity ignored");
            return false;
        };

        inner.entities[slot].position = Some(position);
        true
    }

    /// Get entity by ID
    pub fn get(&self, entity_id: &str) -> Option<Entity> {
        let inner = self.read();
        inner
            .index
            .get(entity_id)
            .map(|&slot| inner.entities[slot].clone())
    }

    /// All entities in insertion order
    pub fn snapshot(&self) -> Vec<Entity> {
        self.read().entities.clone()
    }

    pub fn len(&self) -> usize {
        self.read().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `step` to the position of every simulated entity that has one.
    ///
    /// Returns the number of entities moved.
    pub fn perturb_simulated<F>(&self, mut step: F) -> usize
    where
        F: FnMut(Coordinate) -> Coordinate,
    {
        let mut inner = self.write();
        let mut moved = 0;

        for entity in inner.entities.iter_mut().filter(|e| !e.is_live_tracked) {
            if let Some(position) = entity.position {
                entity.position = Some(step(position));
                moved += 1;
            }
        }

        moved
    }

    /// Re-evaluate containment of every positioned entity against `boundary`.
    ///
    /// Entities without a position are skipped and never transition. The
    /// whole pass runs under the write lock.
    pub fn evaluate(&self, boundary: &Boundary) -> Vec<Evaluation> {
        let mut inner = self.write();
        let mut results = Vec::with_capacity(inner.entities.len());

        for entity in inner.entities.iter_mut() {
            let Some(position) = entity.position else {
                continue;
            };

            let was_inside = entity.is_inside;
            let is_inside = boundary.contains(&position);
            entity.is_inside = is_inside;

            results.push(Evaluation {
                entity: entity.clone(),
                was_inside,
                transitioned: was_inside && !is_inside,
            });
        }

        results
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
