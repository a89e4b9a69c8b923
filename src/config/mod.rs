use crate::boundary::Boundary;
use crate::geometry::{BoundaryVertex, Coordinate};
use crate::state::{Entity, EntityProfile};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

// Re-export component config types
pub use crate::intake::ProjectionConfig;
pub use crate::monitor::{MonitorConfig, SimulationConfig};

/// Complete geowatch configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeowatchConfig {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
    #[serde(default)]
    pub api: ApiConfig,
    /// Simulated entities registered at startup
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

/// Initial boundary polygon
#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryConfig {
    pub vertices: Vec<BoundaryVertex>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            vertices: Boundary::default().vertices,
        }
    }
}

impl BoundaryConfig {
    /// Validated boundary built from the configured vertices
    pub fn boundary(&self) -> Result<Boundary, crate::boundary::BoundaryError> {
        Boundary::new(self.vertices.clone())
    }
}

/// Simulated entity seeded at startup
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub profile: EntityProfile,
    pub latitude: f64,
    pub longitude: f64,
}

impl RosterEntry {
    pub fn to_entity(&self) -> Entity {
        Entity::simulated(
            self.profile.clone(),
            Coordinate::new(self.latitude, self.longitude),
        )
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<GeowatchConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: GeowatchConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Load configuration, falling back to defaults when the file does not exist.
///
/// A file that exists but fails to read or parse is still an error.
pub fn load_config_or_default(path: &str) -> Result<GeowatchConfig, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        warn!(path = %path, "Config file not found, using defaults");
        return Ok(GeowatchConfig::default());
    }
    load_config(path)
}
