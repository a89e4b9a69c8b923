use crate::alert::Alert;
use crate::geometry::{BoundaryVertex, Coordinate};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Tracker event broadcast to subscribers
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// New breach alert recorded in the ledger
    AlertRaised { alert: Alert },

    /// An entity crossed the boundary in either direction
    ContainmentChanged {
        entity_id: String,
        is_inside: bool,
        position: Option<Coordinate>,
        timestamp: DateTime<Utc>,
    },

    /// Boundary replaced by an authorized edit
    BoundaryChanged {
        vertices: Vec<BoundaryVertex>,
        timestamp: DateTime<Utc>,
    },

    EntityRegistered {
        entity_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl TrackerEvent {
    /// Entity the event concerns, if any
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            TrackerEvent::AlertRaised { alert } => Some(&alert.entity_id),
            TrackerEvent::ContainmentChanged { entity_id, .. } => Some(entity_id),
            TrackerEvent::EntityRegistered { entity_id, .. } => Some(entity_id),
            TrackerEvent::BoundaryChanged { .. } => None,
        }
    }
}
