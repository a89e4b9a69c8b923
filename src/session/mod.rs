// Session context: owns boundary, registry and ledger for one tracking run

mod events;

pub use events::TrackerEvent;

use crate::alert::AlertLedger;
use crate::boundary::{Boundary, BoundaryError, BoundaryStore};
use crate::geometry::Coordinate;
use crate::state::{Entity, EntityRegistry};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;


/// Explicit tracking context.
///
/// Passed to the monitoring loop and to every intake/export entry point
/// instead of living in global state.
///
/// A monitoring tick (move, evaluate, alert) holds the step lock from start
/// to finish. Registration, position reports and boundary edits made through
/// the session take the same lock, so none of them lands mid-tick.
pub struct Session {
    pub boundary: BoundaryStore,
    pub registry: EntityRegistry,
    pub alerts: AlertLedger,

    step: Mutex<()>,

    /// Broadcast channel for tracker events (alerts, containment flips, edits)
    events_tx: broadcast::Sender<TrackerEvent>,
}

impl Session {
    pub fn new(boundary: Boundary) -> Self {
        let (events_tx, _) = broadcast::channel(1000);

        Self {
            boundary: BoundaryStore::new(boundary),
            registry: EntityRegistry::new(),
            alerts: AlertLedger::new(),
            step: Mutex::new(()),
            events_tx,
        }
    }

    /// Register (or replace) an entity and announce it
    pub fn register(&self, entity: Entity) {
        let entity_id = entity.id.clone();
        {
            let _step = self.lock_step();
            self.registry.upsert(entity);
        }
        self.publish(TrackerEvent::EntityRegistered {
            entity_id,
            timestamp: Utc::now(),
        });
    }

    /// Boundary edit intake: validate, then replace in full
    pub fn replace_boundary(&self, boundary: Boundary) -> Result<(), BoundaryError> {
        boundary.validate()?;
        let vertices = boundary.vertices.clone();
        {
            let _step = self.lock_step();
            self.boundary.set(boundary);
        }
        self.publish(TrackerEvent::BoundaryChanged {
            vertices,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Position report for a known entity; false when the id is unknown
    pub fn report_position(&self, entity_id: &str, position: Coordinate) -> bool {
        let _step = self.lock_step();
        self.registry.report_position(entity_id, position)
    }

    /// Exclusive access for one monitoring tick
    pub(crate) fn lock_step(&self) -> MutexGuard<'_, ()> {
        self.step.lock().expect("session step lock poisoned")
    }

    /// Subscribe to tracker events
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events_tx.subscribe()
    }

    /// Broadcast to subscribers (no subscribers is fine)
    pub(crate) fn publish(&self, event: TrackerEvent) {
        let _ = self.events_tx.send(event);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Boundary::default())
    }
}
