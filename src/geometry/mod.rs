use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Position in the tracking plane (designed range 0-100 per axis, not enforced)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Single polygon vertex of a boundary
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryVertex {
    pub lat: f64,
    pub lng: f64,
}

impl BoundaryVertex {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Even-odd ray casting test.
///
/// Casts a ray from `point` towards increasing latitude and counts edge
/// crossings. Latitude is the x axis, longitude the y axis. The polygon is
/// implicitly closed (last vertex connects back to first).
///
/// Points on the boundary resolve by the half-open comparison: for an
/// axis-aligned rectangle the minimum-latitude and minimum-longitude edges
/// (and their shared vertex) count as inside, the maximum edges as outside.
/// Fewer than 3 vertices never contain anything.
pub fn contains(point: &Coordinate, vertices: &[BoundaryVertex]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let (x, y) = (point.latitude, point.longitude);
    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (vertices[i].lat, vertices[i].lng);
        let (xj, yj) = (vertices[j].lat, vertices[j].lng);

        // Straddle check guards the division: yi == yj never gets here
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }

    inside
}
