use math::Speed;
use serde::{Deserialize, Serialize};

use crate::Keyed;

/// Operational limits of an aircraft type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Aircraft {
    /// Type designator, unique within the aircraft list.
    #[serde(rename = "type")]
    pub aircraft_type:             String,
    /// Maximum demonstrated crosswind from the POH, if published.
    pub demonstrated_crosswind_kt: Option<f32>,
    #[serde(default)]
    pub notes:                     String,
}

impl Aircraft {
    #[must_use]
    pub fn demonstrated_crosswind(&self) -> Option<Speed<f32>> {
        self.demonstrated_crosswind_kt.map(Speed::from_knots)
    }
}

impl Keyed for Aircraft {
    const KIND: &'static str = "aircraft";

    fn key(&self) -> &str { &self.aircraft_type }
}
