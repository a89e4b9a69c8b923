use crate::alert::Alert;
use crate::api::{ApiState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for alert listing
#[derive(Deserialize)]
pub struct AlertQueryParams {
    /// Only unread alerts when true, only read ones when false
    pub unread: Option<bool>,
}

pub fn create_alert_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/alerts", get(list_alerts))
        .route("/api/alerts/:id/ack", post(acknowledge_alert))
        .with_state(state)
}

/// GET /api/alerts - newest first
async fn list_alerts(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<AlertQueryParams>,
) -> Json<Vec<Alert>> {
    let alerts = state
        .session
        .alerts
        .all()
        .into_iter()
        .filter(|a| params.unread.map_or(true, |unread| a.read != unread))
        .collect();

    Json(alerts)
}

/// POST /api/alerts/:id/ack - mark read, re-enabling alerts for that entity
async fn acknowledge_alert(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Alert>, AlertError> {
    if !state.session.alerts.acknowledge(&id) {
        return Err(AlertError::NotFound);
    }

    state
        .session
        .alerts
        .get(&id)
        .map(Json)
        .ok_or(AlertError::NotFound)
}

/// Alert API error types
#[derive(Debug)]
pub enum AlertError {
    NotFound,
}

impl IntoResponse for AlertError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AlertError::NotFound => (StatusCode::NOT_FOUND, "Alert not found"),
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
        });

        (status, body).into_response()
    }
}
