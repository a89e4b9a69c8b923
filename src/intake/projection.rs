use crate::geometry::Coordinate;
use serde::{Deserialize, Serialize};

/// Maps raw location-source coordinates into the tracking plane.
///
/// Supplied by whoever owns the location source; the core only stores the
/// projected result.
pub trait Projection: Send + Sync {
    fn project(&self, raw_latitude: f64, raw_longitude: f64) -> Coordinate;
}

/// Raw coordinates are already plane coordinates
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityProjection;

impl Projection for IdentityProjection {
    fn project(&self, raw_latitude: f64, raw_longitude: f64) -> Coordinate {
        Coordinate::new(raw_latitude, raw_longitude)
    }
}

/// Linear map of a geographic bounding box onto the plane.
///
/// `lat_min`/`lng_min` land on `plane_min`, `lat_max`/`lng_max` on
/// `plane_max`. Points outside the box map outside the plane range; they
/// are not clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearProjection {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
    pub plane_min: f64,
    pub plane_max: f64,
}

impl Projection for LinearProjection {
    fn project(&self, raw_latitude: f64, raw_longitude: f64) -> Coordinate {
        Coordinate::new(
            scale(raw_latitude, self.lat_min, self.lat_max, self.plane_min, self.plane_max),
            scale(raw_longitude, self.lng_min, self.lng_max, self.plane_min, self.plane_max),
        )
    }
}

fn scale(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let span = from_max - from_min;
    if span == 0.0 {
        return to_min;
    }
    to_min + (value - from_min) / span * (to_max - to_min)
}

/// Projection selection in the config file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionConfig {
    #[default]
    Identity,
    Linear {
        lat_min: f64,
        lat_max: f64,
        lng_min: f64,
        lng_max: f64,
    },
}

impl ProjectionConfig {
    pub fn build(&self, plane_min: f64, plane_max: f64) -> Box<dyn Projection> {
        match *self {
            ProjectionConfig::Identity => Box::new(IdentityProjection),
            ProjectionConfig::Linear {
                lat_min,
                lat_max,
                lng_min,
                lng_max,
            } => Box::new(LinearProjection {
                lat_min,
                lat_max,
                lng_min,
                lng_max,
                plane_min,
                plane_max,
            }),
        }
    }
}
