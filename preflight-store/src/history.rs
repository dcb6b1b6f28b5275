use serde::{Deserialize, Serialize};

use crate::Metar;

/// Number of observations retained per airfield.
pub const HISTORY_LEN: usize = 12;

/// The subset of an observation kept for trend and change detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Snapshot {
    pub timestamp:      Option<String>,
    pub wind_speed_kt:  Option<f32>,
    pub wind_dir_deg:   Option<f32>,
    pub qnh_hpa:        Option<f32>,
    pub temp_c:         Option<f32>,
    pub dewpoint_c:     Option<f32>,
    pub visibility_m:   Option<f32>,
    /// Reported ceiling, or the estimated cloud base if none was reported.
    pub ceiling_ft_est: Option<f32>,
}

impl Snapshot {
    #[must_use]
    pub fn from_metar(metar: &Metar, ceiling_ft_est: Option<f32>) -> Self {
        Self {
            timestamp:     metar.observed_time_utc.clone(),
            wind_speed_kt: metar.wind_speed_kt,
            wind_dir_deg:  metar.wind_dir_deg,
            qnh_hpa:       metar.qnh_hpa,
            temp_c:        metar.temp_c,
            dewpoint_c:    metar.dewpoint_c,
            visibility_m:  metar.visibility_m,
            ceiling_ft_est,
        }
    }
}

/// Observation history of one airfield, oldest first.
pub type History = Vec<Snapshot>;

/// Changes between the two most recent observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Changes {
    pub summary: String,
    /// `None` when there was no earlier observation.
    pub details: Option<ChangeDetails>,
}

/// Deltas between two observations. Missing values count as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ChangeDetails {
    pub wind_speed_delta_kt:         f32,
    pub wind_dir_shift_deg:          f32,
    pub qnh_change_hpa:              f32,
    pub temp_dewpoint_spread_change: f32,
    pub ceiling_category:            Transition<CeilingCategory>,
    pub visibility_category:         Transition<VisibilityCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Transition<T> {
    pub from: T,
    pub to:   T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CeilingCategory {
    Unknown,
    /// Below 500 ft.
    Ifr,
    /// Below 1500 ft.
    Marginal,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VisibilityCategory {
    Unknown,
    /// Below 1000 m.
    VeryLow,
    /// Below 3000 m.
    Low,
    Normal,
}
