// Integration tests for the entity, boundary and alert HTTP APIs

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use geowatch::api::{create_router, ApiState};
use geowatch::geometry::Coordinate;
use geowatch::intake::{IdentityProjection, LocationFeed};
use geowatch::monitor::{FixedClock, Monitor, MonitoringWindow};
use geowatch::Session;
use chrono::NaiveTime;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn create_test_app(session: Arc<Session>, admin_token: Option<&str>) -> Router {
    let state = ApiState {
        session: Arc::clone(&session),
        feed: Arc::new(LocationFeed::new(session, Box::new(IdentityProjection))),
        admin_token: admin_token.map(|t| t.to_string()),
    };
    create_router(state)
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn register(app: &Router, id: &str, name: &str) {
    let (status, _) = send(
        app,
        json_request(
            "PUT",
            &format!("/api/entities/{}", id),
            serde_json::json!({
                "name": name,
                "rollNumber": "R-9",
                "department": "Math",
                "yearOfStudy": "1",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// PUT /api/entities/:id registers a live entity with no position yet.
#[tokio::test]
async fn test_register_entity() {
    let session = Arc::new(Session::default());
    let app = create_test_app(Arc::clone(&session), None);

    register(&app, "s-1", "Dana").await;

    let (status, entity) = send(&app, get("/api/entities/s-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entity["name"], "Dana");
    assert_eq!(entity["rollNumber"], "R-9");
    assert_eq!(entity["isInside"], true);
    assert_eq!(entity["isLiveTracked"], true);
    assert!(entity["position"].is_null());
}

/// Registration without a name is rejected.
#[tokio::test]
async fn test_register_requires_name() {
    let app = create_test_app(Arc::new(Session::default()), None);

    let (status, body) = send(
        &app,
        json_request("PUT", "/api/entities/s-1", serde_json::json!({ "name": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name is required");
}

/// GET /api/entities/:id for an unknown id returns 404.
#[tokio::test]
async fn test_get_unknown_entity_returns_404() {
    let app = create_test_app(Arc::new(Session::default()), None);

    let (status, body) = send(&app, get("/api/entities/ghost")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Entity not found");
}

/// Position reports update the registry; unknown ids are accepted but ignored.
#[tokio::test]
async fn test_report_position() {
    let session = Arc::new(Session::default());
    let app = create_test_app(Arc::clone(&session), None);
    register(&app, "s-1", "Dana").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/entities/s-1/position",
            serde_json::json!({ "latitude": 42.0, "longitude": 17.5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["accepted"], true);
    assert_eq!(
        session.registry.get("s-1").unwrap().position,
        Some(Coordinate::new(42.0, 17.5))
    );

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/entities/ghost/position",
            serde_json::json!({ "latitude": 1.0, "longitude": 1.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["accepted"], false);
    assert_eq!(session.registry.len(), 1);
}

/// Location-source failures are recorded without touching entity state.
#[tokio::test]
async fn test_location_error_recorded() {
    let session = Arc::new(Session::default());
    let app = create_test_app(Arc::clone(&session), None);
    register(&app, "s-1", "Dana").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/entities/s-1/location-error",
            serde_json::json!({ "kind": "permission_denied" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["recorded"], true);

    let (status, source) = send(&app, get("/api/entities/s-1/source")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(source["error_count"], 1);
    assert_eq!(source["last_error"], "location permission denied");

    let entity = session.registry.get("s-1").unwrap();
    assert!(entity.position.is_none());
    assert!(entity.is_inside);
    assert!(session.alerts.is_empty());
}

/// GET /api/boundary returns the default square.
#[tokio::test]
async fn test_get_boundary_default() {
    let app = create_test_app(Arc::new(Session::default()), None);

    let (status, body) = send(&app, get("/api/boundary")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vertices"].as_array().unwrap().len(), 4);
    assert_eq!(body["vertices"][0]["lat"], 10.0);
}

/// PUT /api/boundary with the admin token replaces the polygon.
#[tokio::test]
async fn test_put_boundary_round_trip() {
    let session = Arc::new(Session::default());
    let app = create_test_app(Arc::clone(&session), Some("secret"));
    let triangle = serde_json::json!({
        "vertices": [
            { "lat": 0.0, "lng": 0.0 },
            { "lat": 60.0, "lng": 0.0 },
            { "lat": 30.0, "lng": 60.0 },
        ]
    });

    let mut request = json_request("PUT", "/api/boundary", triangle.clone());
    request
        .headers_mut()
        .insert("Authorization", bearer("secret").parse().unwrap());
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, triangle);

    let (_, fetched) = send(&app, get("/api/boundary")).await;
    assert_eq!(fetched, triangle);
    assert_eq!(session.boundary.get().len(), 3);
}

/// PUT /api/boundary with a wrong or missing token returns 401.
#[tokio::test]
async fn test_put_boundary_requires_token() {
    let session = Arc::new(Session::default());
    let app = create_test_app(Arc::clone(&session), Some("secret"));
    let body = serde_json::json!({
        "vertices": [
            { "lat": 0.0, "lng": 0.0 },
            { "lat": 60.0, "lng": 0.0 },
            { "lat": 30.0, "lng": 60.0 },
        ]
    });

    let (status, _) = send(&app, json_request("PUT", "/api/boundary", body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut request = json_request("PUT", "/api/boundary", body);
    request
        .headers_mut()
        .insert("Authorization", bearer("wrong").parse().unwrap());
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(session.boundary.get().len(), 4);
}

/// PUT /api/boundary with fewer than three vertices returns 400.
#[tokio::test]
async fn test_put_boundary_rejects_invalid() {
    let session = Arc::new(Session::default());
    let app = create_test_app(Arc::clone(&session), None);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/boundary",
            serde_json::json!({ "vertices": [{ "lat": 0.0, "lng": 0.0 }, { "lat": 1.0, "lng": 1.0 }] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid boundary"));
    assert_eq!(session.boundary.get().len(), 4);
}

/// A breach raised by the monitor shows up in /api/alerts and can be acknowledged.
#[tokio::test]
async fn test_alert_listing_and_acknowledge() {
    let session = Arc::new(Session::default());
    let app = create_test_app(Arc::clone(&session), None);
    let monitor = Monitor::new(
        Arc::clone(&session),
        Duration::from_secs(5),
        MonitoringWindow::default(),
    )
    .with_clock(Arc::new(FixedClock(
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    )));

    register(&app, "s-1", "Dana").await;
    send(
        &app,
        json_request(
            "POST",
            "/api/entities/s-1/position",
            serde_json::json!({ "latitude": 95.0, "longitude": 95.0 }),
        ),
    )
    .await;
    monitor.tick();

    let (status, alerts) = send(&app, get("/api/alerts")).await;
    assert_eq!(status, StatusCode::OK);
    let alerts = alerts.as_array().unwrap().clone();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["entityId"], "s-1");
    assert_eq!(alerts[0]["message"], "Dana left the designated boundary.");
    assert_eq!(alerts[0]["read"], false);

    let alert_id = alerts[0]["id"].as_str().unwrap().to_string();
    let (status, acked) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri(format!("/api/alerts/{}/ack", alert_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(acked["read"], true);

    let (_, unread) = send(&app, get("/api/alerts?unread=true")).await;
    assert!(unread.as_array().unwrap().is_empty());
    let (_, read) = send(&app, get("/api/alerts?unread=false")).await;
    assert_eq!(read.as_array().unwrap().len(), 1);
}

/// Acknowledging an unknown alert returns 404.
#[tokio::test]
async fn test_acknowledge_unknown_alert_returns_404() {
    let app = create_test_app(Arc::new(Session::default()), None);

    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/alerts/alert-missing/ack")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Alert not found");
}

/// Entity listing filters by containment.
#[tokio::test]
async fn test_list_entities_inside_filter() {
    let session = Arc::new(Session::default());
    let app = create_test_app(Arc::clone(&session), None);
    register(&app, "in", "Inside").await;
    register(&app, "out", "Outside").await;
    session
        .registry
        .report_position("in", Coordinate::new(50.0, 50.0));
    session
        .registry
        .report_position("out", Coordinate::new(5.0, 5.0));
    session.registry.evaluate(&session.boundary.get());

    let (_, all) = send(&app, get("/api/entities")).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["id"], "in");

    let (_, outside) = send(&app, get("/api/entities?inside=false")).await;
    let outside = outside.as_array().unwrap().clone();
    assert_eq!(outside.len(), 1);
    assert_eq!(outside[0]["id"], "out");
}
