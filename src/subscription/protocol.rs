use serde::Deserialize;

/// Client → Server message types
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "subscribe")]
    Subscribe { entity_id: String },
    #[serde(rename = "unsubscribe")]
    Unsubscribe { entity_id: String },
}

// Server → Client messages are `TrackerEvent` values serialized as-is:
// {"type": "alert_raised" | "containment_changed" | "boundary_changed" | "entity_registered", ...}
