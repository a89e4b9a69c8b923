// Polygon containment test
pub mod geometry;

// Geofence polygon and its store
pub mod boundary;

// Entity registry and containment state
pub mod state;

// Breach alerts and the alert ledger
pub mod alert;

// Session context and tracker events
pub mod session;

// Monitoring loop
pub mod monitor;

// Live location intake
pub mod intake;

// Configuration
pub mod config;

// HTTP and WebSocket APIs
pub mod api;

// WebSocket subscription management
pub mod subscription;

pub use session::{Session, TrackerEvent};
