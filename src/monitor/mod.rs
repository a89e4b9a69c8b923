// Periodic monitoring loop: simulate, evaluate, alert

pub mod config;
mod runner;
mod simulation;
mod window;

pub use config::{MonitorConfig, SimulationConfig};
pub use runner::{Monitor, MonitorHandle, TickReport};
pub use simulation::{SimulationError, Simulator};
pub use window::{Clock, FixedClock, LocalClock, MonitoringWindow};
