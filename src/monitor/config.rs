use crate::monitor::simulation::SimulationError;
use crate::monitor::window::MonitoringWindow;
use serde::Deserialize;
use std::time::Duration;

/// Configuration for the monitoring loop
#[derive(Clone, Debug, Deserialize)]
pub struct MonitorConfig {
    /// Period between evaluation ticks (seconds)
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// Window start, "HH:MM" local time
    #[serde(default = "default_window_start")]
    pub window_start: String,

    /// Window end, "HH:MM" local time, minute inclusive
    #[serde(default = "default_window_end")]
    pub window_end: String,
}

fn default_interval_seconds() -> u64 {
    5
}

fn default_window_start() -> String {
    "09:00".to_string()
}

fn default_window_end() -> String {
    "12:15".to_string()
}

impl MonitorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }

    pub fn window(&self) -> Result<MonitoringWindow, chrono::ParseError> {
        MonitoringWindow::parse(&self.window_start, &self.window_end)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            window_start: default_window_start(),
            window_end: default_window_end(),
        }
    }
}

/// Configuration for simulated movement
#[derive(Clone, Debug, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Largest per-axis move in one tick
    #[serde(default = "default_max_step")]
    pub max_step: f64,

    #[serde(default = "default_plane_min")]
    pub plane_min: f64,

    #[serde(default = "default_plane_max")]
    pub plane_max: f64,

    /// Fixed seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_enabled() -> bool {
    true
}

fn default_max_step() -> f64 {
    1.0
}

fn default_plane_min() -> f64 {
    0.0
}

fn default_plane_max() -> f64 {
    100.0
}

impl SimulationConfig {
    /// Reject step sizes and plane bounds that are NaN or infinite
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (field, value) in [
            ("max_step", self.max_step),
            ("plane_min", self.plane_min),
            ("plane_max", self.plane_max),
        ] {
            if !value.is_finite() {
                return Err(SimulationError::NonFinite(field, value));
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_step: default_max_step(),
            plane_min: default_plane_min(),
            plane_max: default_plane_max(),
            seed: None,
        }
    }
}
