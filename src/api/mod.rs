// HTTP and WebSocket APIs

pub mod alerts;
pub mod boundary;
pub mod entities;
pub mod websocket;

pub use alerts::create_alert_router;
pub use boundary::create_boundary_router;
pub use entities::create_entity_router;
pub use websocket::{create_ws_router, ws_handler};

use crate::intake::LocationFeed;
use crate::session::Session;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;

/// Shared application state for all routers
#[derive(Clone)]
pub struct ApiState {
    pub session: Arc<Session>,
    pub feed: Arc<LocationFeed>,
    /// Required bearer token for boundary edits. None = edits unrestricted.
    pub admin_token: Option<String>,
}

/// Error response body
#[derive(Serialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}

/// Full API: entities, boundary, alerts and the event stream
pub fn create_router(state: ApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(create_entity_router(Arc::clone(&state)))
        .merge(create_boundary_router(Arc::clone(&state)))
        .merge(create_alert_router(Arc::clone(&state)))
        .merge(create_ws_router(state))
}
