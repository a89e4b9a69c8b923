use crate::geometry::Coordinate;
use crate::monitor::config::SimulationConfig;
use crate::state::EntityRegistry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Mutex;

/// Simulation setup errors
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Named parameter is NaN or infinite
    NonFinite(&'static str, f64),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::NonFinite(field, value) => {
                write!(f, "{} must be finite, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for SimulationError {}

/// Random-walk driver for entities that are not live tracked.
///
/// Each step moves a position by up to `max_step` on both axes and clamps
/// the result to the plane.
pub struct Simulator {
    rng: Mutex<StdRng>,
    max_step: f64,
    plane_min: f64,
    plane_max: f64,
}

impl Simulator {
    pub fn new(
        max_step: f64,
        plane_min: f64,
        plane_max: f64,
        seed: Option<u64>,
    ) -> Result<Self, SimulationError> {
        Self::from_config(&SimulationConfig {
            enabled: true,
            max_step,
            plane_min,
            plane_max,
            seed,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rng: Mutex::new(rng),
            max_step: config.max_step.abs(),
            plane_min: config.plane_min.min(config.plane_max),
            plane_max: config.plane_max.max(config.plane_min),
        })
    }

    /// One bounded random step, clamped to the plane
    pub fn step(&self, position: Coordinate) -> Coordinate {
        let mut rng = self.rng.lock().expect("simulator rng lock poisoned");
        let d_lat = rng.gen_range(-self.max_step..=self.max_step);
        let d_lng = rng.gen_range(-self.max_step..=self.max_step);

        Coordinate::new(
            (position.latitude + d_lat).clamp(self.plane_min, self.plane_max),
            (position.longitude + d_lng).clamp(self.plane_min, self.plane_max),
        )
    }

    /// Move every simulated entity once. Returns how many moved.
    pub fn refresh(&self, registry: &EntityRegistry) -> usize {
        registry.perturb_simulated(|position| self.step(position))
    }
}
