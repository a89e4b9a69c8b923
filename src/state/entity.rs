use crate::geometry::Coordinate;
use serde::{Deserialize, Serialize};

/// Identity of a tracked person, as captured at registration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProfile {
    /// Unique entity identifier (e.g., "mock-1", a scanned student ID)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub year_of_study: String,
}

/// Entity represents a tracked person and its containment state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub roll_number: String,
    pub department: String,
    pub year_of_study: String,

    /// None until the first location report arrives
    pub position: Option<Coordinate>,

    /// Result of the most recent containment evaluation (optimistic default)
    pub is_inside: bool,

    /// Position comes from real reports rather than the simulation step
    pub is_live_tracked: bool,
}

impl Entity {
    /// Entity driven by external location reports. Starts without a position.
    pub fn live(profile: EntityProfile) -> Self {
        Self::from_profile(profile, None, true)
    }

    /// Entity whose position is perturbed by the monitoring loop
    pub fn simulated(profile: EntityProfile, position: Coordinate) -> Self {
        Self::from_profile(profile, Some(position), false)
    }

    fn from_profile(
        profile: EntityProfile,
        position: Option<Coordinate>,
        is_live_tracked: bool,
    ) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            roll_number: profile.roll_number,
            department: profile.department,
            year_of_study: profile.year_of_study,
            position,
            is_inside: true,
            is_live_tracked,
        }
    }
}

/// Outcome of evaluating one entity against the boundary
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Entity state after the evaluation
    pub entity: Entity,
    pub was_inside: bool,
    /// Inside before, outside now (an exit event)
    pub transitioned: bool,
}

impl Evaluation {
    /// Containment flipped in either direction
    pub fn changed(&self) -> bool {
        self.was_inside != self.entity.is_inside
    }
}
