use crate::intake::projection::Projection;
use crate::session::Session;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Position intake errors
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeError {
    /// Raw or projected coordinate is NaN or infinite
    InvalidCoordinate(String),
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::InvalidCoordinate(msg) => write!(f, "invalid coordinate: {}", msg),
        }
    }
}

impl std::error::Error for IntakeError {}

/// Failure reported by a location source (e.g., the device denied access)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum LocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Other(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "location permission denied"),
            LocationError::PositionUnavailable => write!(f, "position unavailable"),
            LocationError::Timeout => write!(f, "location request timed out"),
            LocationError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// Status information for one entity's location source
#[derive(Clone, Debug, Default, Serialize)]
pub struct SourceStatus {
    pub last_report: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub report_count: u64,
    pub error_count: u64,
}

/// Intake for live location reports.
///
/// Projects raw coordinates into the plane and hands them to the registry.
/// Failures from a source are recorded here only; they never touch the
/// registry, the ledger or the monitoring loop.
pub struct LocationFeed {
    session: Arc<Session>,
    projection: Box<dyn Projection>,
    sources: DashMap<String, SourceStatus>,
}

impl LocationFeed {
    pub fn new(session: Arc<Session>, projection: Box<dyn Projection>) -> Self {
        Self {
            session,
            projection,
            sources: DashMap::new(),
        }
    }

    /// Accept a raw position report.
    ///
    /// Returns Ok(false) when the entity is unknown (stale or late report).
    pub fn report(
        &self,
        entity_id: &str,
        raw_latitude: f64,
        raw_longitude: f64,
    ) -> Result<bool, IntakeError> {
        if !raw_latitude.is_finite() || !raw_longitude.is_finite() {
            return Err(IntakeError::InvalidCoordinate(format!(
                "({}, {})",
                raw_latitude, raw_longitude
            )));
        }

        let position = self.projection.project(raw_latitude, raw_longitude);
        if !position.latitude.is_finite() || !position.longitude.is_finite() {
            return Err(IntakeError::InvalidCoordinate(format!(
                "projection produced ({}, {})",
                position.latitude, position.longitude
            )));
        }

        if !self.session.report_position(entity_id, position) {
            return Ok(false);
        }

        let mut status = self.sources.entry(entity_id.to_string()).or_default();
        status.last_report = Some(Utc::now());
        status.report_count += 1;

        debug!(
            entity_id = %entity_id,
            latitude = position.latitude,
            longitude = position.longitude,
            "Position reported"
        );

        Ok(true)
    }

    /// Record a failure from an entity's location source.
    ///
    /// Returns false when the entity is unknown.
    pub fn report_failure(&self, entity_id: &str, error: &LocationError) -> bool {
        if self.session.registry.get(entity_id).is_none() {
            return false;
        }

        let mut status = self.sources.entry(entity_id.to_string()).or_default();
        status.last_error = Some(error.to_string());
        status.error_count += 1;

        warn!(entity_id = %entity_id, error = %error, "Location source failure");
        true
    }

    pub fn status(&self, entity_id: &str) -> Option<SourceStatus> {
        self.sources.get(entity_id).map(|s| s.clone())
    }
}
