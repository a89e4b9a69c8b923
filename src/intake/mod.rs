// Live location intake and coordinate projection

mod feed;
mod projection;

pub use feed::{IntakeError, LocationError, LocationFeed, SourceStatus};
pub use projection::{IdentityProjection, LinearProjection, Projection, ProjectionConfig};
