// Boundary breach alerts

mod ledger;

pub use ledger::AlertLedger;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;


/// Boundary breach event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// "alert-<uuidv7>-<entity id>"; the UUIDv7 carries the emission time
    pub id: String,
    pub entity_id: String,
    pub entity_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Set once a consumer acknowledges the alert
    pub read: bool,
}

impl Alert {
    pub(crate) fn new(entity_id: &str, entity_name: &str, message: String) -> Self {
        Self {
            id: format!("alert-{}-{}", Uuid::now_v7().simple(), entity_id),
            entity_id: entity_id.to_string(),
            entity_name: entity_name.to_string(),
            message,
            timestamp: Utc::now(),
            read: false,
        }
    }
}

/// Message recorded when an entity leaves the boundary
pub fn exit_message(entity_name: &str) -> String {
    format!("{} left the designated boundary.", entity_name)
}
