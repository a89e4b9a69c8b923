use crate::api::ApiState;
use crate::subscription::ConnectionManager;
use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::info;

/// GET /api/ws - WebSocket upgrade handler streaming tracker events
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<ApiState>>) -> Response {
    info!("WebSocket upgrade request received");
    ws.on_upgrade(|socket| async move {
        let events_rx = state.session.subscribe();
        ConnectionManager::new().handle(socket, events_rx).await;
    })
}

pub fn create_ws_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/ws", get(ws_handler))
        .with_state(state)
}
