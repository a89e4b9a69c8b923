// Geofence polygon and the store holding the active one

use crate::geometry::{self, BoundaryVertex, Coordinate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::info;


/// Minimum vertex count for a usable polygon
pub const MIN_VERTICES: usize = 3;

/// Boundary edit errors
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryError {
    /// Fewer than three vertices, or a vertex with a non-finite coordinate
    InvalidBoundary(String),
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryError::InvalidBoundary(msg) => write!(f, "invalid boundary: {}", msg),
        }
    }
}

impl std::error::Error for BoundaryError {}

/// Ordered polygon vertex list. Edges run sequentially and close from the
/// last vertex back to the first. Simplicity is assumed, not checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub vertices: Vec<BoundaryVertex>,
}

impl Boundary {
    /// Validated constructor used by edit surfaces.
    pub fn new(vertices: Vec<BoundaryVertex>) -> Result<Self, BoundaryError> {
        let boundary = Self { vertices };
        boundary.validate()?;
        Ok(boundary)
    }

    /// Checks vertex count and that every coordinate is finite
    pub fn validate(&self) -> Result<(), BoundaryError> {
        if self.vertices.len() < MIN_VERTICES {
            return Err(BoundaryError::InvalidBoundary(format!(
                "expected at least {} vertices, got {}",
                MIN_VERTICES,
                self.vertices.len()
            )));
        }

        if let Some(idx) = self
            .vertices
            .iter()
            .position(|v| !v.lat.is_finite() || !v.lng.is_finite())
        {
            return Err(BoundaryError::InvalidBoundary(format!(
                "vertex {} has a non-finite coordinate",
                idx
            )));
        }

        Ok(())
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        geometry::contains(point, &self.vertices)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl Default for Boundary {
    /// Square covering the middle of the plane
    fn default() -> Self {
        Self {
            vertices: vec![
                BoundaryVertex::new(10.0, 10.0),
                BoundaryVertex::new(90.0, 10.0),
                BoundaryVertex::new(90.0, 90.0),
                BoundaryVertex::new(10.0, 90.0),
            ],
        }
    }
}

/// Holds the active boundary.
///
/// The polygon sits behind an `Arc` so a replacement swaps the whole value
/// at once: a reader holding the result of `current()` keeps observing the
/// polygon it got, never a half-applied edit.
pub struct BoundaryStore {
    current: RwLock<Arc<Boundary>>,
}

impl BoundaryStore {
    pub fn new(initial: Boundary) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Shared handle to the active polygon (cheap, used once per tick)
    pub fn current(&self) -> Arc<Boundary> {
        Arc::clone(&self.current.read().expect("boundary lock poisoned"))
    }

    /// Owned copy of the active polygon
    pub fn get(&self) -> Boundary {
        self.current().as_ref().clone()
    }

    /// Replace the polygon. No validation here; see `Boundary::new`.
    pub fn set(&self, boundary: Boundary) {
        let vertices = boundary.len();
        *self.current.write().expect("boundary lock poisoned") = Arc::new(boundary);
        info!(vertices = vertices, "Boundary replaced");
    }
}

impl Default for BoundaryStore {
    fn default() -> Self {
        Self::new(Boundary::default())
    }
}
