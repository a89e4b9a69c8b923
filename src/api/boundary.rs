use crate::api::{ApiState, ErrorResponse};
use crate::boundary::Boundary;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::{info, warn};

pub fn create_boundary_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/boundary", get(get_boundary).put(put_boundary))
        .with_state(state)
}

/// GET /api/boundary - returns the active polygon
async fn get_boundary(State(state): State<Arc<ApiState>>) -> Json<Boundary> {
    Json(state.session.boundary.get())
}

/// PUT /api/boundary - full replacement. Requires the admin bearer token when configured.
async fn put_boundary(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(boundary): Json<Boundary>,
) -> Response {
    if !validate_admin_token(&headers, &state.admin_token) {
        warn!("Rejected boundary edit with missing or wrong admin token");
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized".to_string());
    }

    let vertices = boundary.len();
    if let Err(e) = state.session.replace_boundary(boundary) {
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    info!(vertices = vertices, "Boundary updated via API");
    Json(state.session.boundary.get()).into_response()
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

/// Returns true if the bearer token in `Authorization` matches the expected admin token.
/// Returns true (no restriction) when `expected` is None.
fn validate_admin_token(headers: &HeaderMap, expected: &Option<String>) -> bool {
    let Some(expected_token) = expected else {
        return true;
    };

    let Some(auth_header) = headers.get("Authorization") else {
        return false;
    };
    let Ok(value) = auth_header.to_str() else {
        return false;
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return false;
    };

    token.trim() == expected_token
}
