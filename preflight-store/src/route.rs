use math::{Position, Speed, Temp, Wind};
use serde::{Deserialize, Serialize};

use crate::{Keyed, ScoreSummary, Severity};

/// A planned route between two airfields of the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct RoutePlan {
    pub id:               String,
    /// Departure airfield ident.
    pub dep:              String,
    /// Destination airfield ident.
    pub dest:             String,
    #[serde(default)]
    pub alternates:       Vec<String>,
    #[serde(default)]
    pub cruise_levels_ft: Vec<f32>,
}

impl Keyed for RoutePlan {
    const KIND: &'static str = "route";

    fn key(&self) -> &str { &self.id }
}

/// Inputs for building route summaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct RouteInputs {
    #[serde(default)]
    pub routes:      Vec<RoutePlan>,
    #[serde(default)]
    pub upper_winds: UpperWinds,
    /// Raw SIGMET lines in force.
    #[serde(default)]
    pub sigmets:     Vec<String>,
}

/// Forecast winds and temperatures aloft, lowest level first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct UpperWinds {
    #[serde(default)]
    pub levels: Vec<UpperWindLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct UpperWindLevel {
    pub level_ft:      f32,
    pub wind_dir_deg:  f32,
    pub wind_speed_kt: f32,
    pub temp_c:        f32,
}

impl UpperWindLevel {
    #[must_use]
    pub fn level(&self) -> Position<f32> { Position::from_amsl_feet(self.level_ft) }

    #[must_use]
    pub fn wind(&self) -> Wind { Wind::new(self.wind_dir_deg, Speed::from_knots(self.wind_speed_kt)) }

    #[must_use]
    pub fn temp(&self) -> Temp { Temp::from_celsius(self.temp_c) }
}

/// An upper wind level on a route with the track-relative values.
///
/// Track-relative values are `None` when the track is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct RouteWindLevel {
    #[serde(flatten)]
    pub forecast:        UpperWindLevel,
    pub headwind_kt:     Option<f32>,
    pub ground_speed_kt: Option<f32>,
}

/// A route with its derived briefing values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct RouteSummary {
    #[serde(flatten)]
    pub plan:              RoutePlan,
    /// Initial true track from departure to destination, 0..360.
    pub track_deg:         Option<f32>,
    #[serde(default)]
    pub upper_winds:       Vec<RouteWindLevel>,
    pub freezing_level_ft: Option<f32>,
    #[serde(default)]
    pub sigmet_lines:      Vec<String>,
    #[serde(default)]
    pub flags:             Vec<String>,
    #[serde(default)]
    pub severity:          Severity,
    pub workload:          Option<ScoreSummary>,
    pub stability:         Option<ScoreSummary>,
}
