use crate::api::{ApiState, ErrorResponse};
use crate::intake::{IntakeError, LocationError, SourceStatus};
use crate::state::{Entity, EntityProfile};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Query parameters for entity listing
#[derive(Deserialize)]
pub struct EntityQueryParams {
    /// Filter by current containment status
    pub inside: Option<bool>,
    /// Filter by tracking mode
    pub live: Option<bool>,
}

/// Registration body (ID-scan form output)
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub year_of_study: String,
}

/// Raw position from a live location source
#[derive(Deserialize)]
pub struct PositionReport {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize)]
struct ReportResponse {
    accepted: bool,
}

#[derive(Serialize)]
struct FailureResponse {
    recorded: bool,
}

/// Create entity API router
pub fn create_entity_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/entities", get(list_entities))
        .route("/api/entities/:id", get(get_entity).put(register_entity))
        .route("/api/entities/:id/position", post(report_position))
        .route("/api/entities/:id/location-error", post(report_location_error))
        .route("/api/entities/:id/source", get(get_source_status))
        .with_state(state)
}

/// GET /api/entities - List all entities in registration order
///
/// Query parameters:
/// - `inside`: only entities currently inside (true) or outside (false)
/// - `live`: only live-tracked (true) or simulated (false) entities
async fn list_entities(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<EntityQueryParams>,
) -> Json<Vec<Entity>> {
    let entities = state
        .session
        .registry
        .snapshot()
        .into_iter()
        .filter(|e| params.inside.map_or(true, |inside| e.is_inside == inside))
        .filter(|e| params.live.map_or(true, |live| e.is_live_tracked == live))
        .collect();

    Json(entities)
}

/// GET /api/entities/:id - Get specific entity
async fn get_entity(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Entity>, EntityError> {
    state
        .session
        .registry
        .get(&id)
        .map(Json)
        .ok_or(EntityError::NotFound)
}

/// PUT /api/entities/:id - Register a live-tracked entity (replaces any existing one)
async fn register_entity(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Entity>, EntityError> {
    if id.trim().is_empty() {
        return Err(EntityError::Validation("entity id is required".to_string()));
    }
    if request.name.trim().is_empty() {
        return Err(EntityError::Validation("name is required".to_string()));
    }

    let entity = Entity::live(EntityProfile {
        id,
        name: request.name,
        roll_number: request.roll_number,
        department: request.department,
        year_of_study: request.year_of_study,
    });

    info!(entity_id = %entity.id, "Registering live entity");
    state.session.register(entity.clone());

    Ok(Json(entity))
}

/// POST /api/entities/:id/position - Live position report
///
/// Unknown ids are accepted and ignored (`accepted: false`).
async fn report_position(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(report): Json<PositionReport>,
) -> Result<Response, EntityError> {
    let accepted = state
        .feed
        .report(&id, report.latitude, report.longitude)?;

    Ok((StatusCode::ACCEPTED, Json(ReportResponse { accepted })).into_response())
}

/// POST /api/entities/:id/location-error - Location source failure
async fn report_location_error(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(error): Json<LocationError>,
) -> Response {
    let recorded = state.feed.report_failure(&id, &error);
    (StatusCode::ACCEPTED, Json(FailureResponse { recorded })).into_response()
}

/// GET /api/entities/:id/source - Location source status
async fn get_source_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<SourceStatus>, EntityError> {
    if state.session.registry.get(&id).is_none() {
        return Err(EntityError::NotFound);
    }

    Ok(Json(state.feed.status(&id).unwrap_or_default()))
}

/// Entity API error types
#[derive(Debug)]
pub enum EntityError {
    NotFound,
    Validation(String),
}

impl From<IntakeError> for EntityError {
    fn from(e: IntakeError) -> Self {
        EntityError::Validation(e.to_string())
    }
}

impl IntoResponse for EntityError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            EntityError::NotFound => (StatusCode::NOT_FOUND, "Entity not found".to_string()),
            EntityError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}
