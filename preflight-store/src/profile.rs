use math::{Length, Position, Speed};
use serde::{Deserialize, Serialize};

use crate::Keyed;

/// A named set of personal or licence-tier limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Profile {
    /// Unique within the profile list.
    pub name:         String,
    /// Descriptive only, e.g. `PPL`.
    #[serde(default)]
    pub licence_tier: String,
    #[serde(default)]
    pub thresholds:   Thresholds,
}

impl Keyed for Profile {
    const KIND: &'static str = "profile";

    fn key(&self) -> &str { &self.name }
}

/// Profile limits. An absent limit leaves that check unconstrained,
/// except the crosswind limit which is treated as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Thresholds {
    pub max_crosswind_kt: Option<f32>,
    pub min_vis_m:        Option<f32>,
    pub min_ceiling_ft:   Option<f32>,
    pub max_da_ft:        Option<f32>,
}

impl Thresholds {
    #[must_use]
    pub fn max_crosswind(&self) -> Option<Speed<f32>> { self.max_crosswind_kt.map(Speed::from_knots) }

    #[must_use]
    pub fn min_visibility(&self) -> Option<Length<f32>> { self.min_vis_m.map(Length::from_meters) }

    #[must_use]
    pub fn min_ceiling(&self) -> Option<Length<f32>> { self.min_ceiling_ft.map(Length::from_feet) }

    #[must_use]
    pub fn max_density_altitude(&self) -> Option<Position<f32>> {
        self.max_da_ft.map(Position::from_amsl_feet)
    }
}
