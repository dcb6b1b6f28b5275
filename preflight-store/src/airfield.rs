use std::collections::BTreeMap;

use math::navigation::GeoPoint;
use math::{CrosswindSide, Heading, Length, Position, Pressure, Speed, Temp, Wind};
use serde::{Deserialize, Serialize};

use crate::{Changes, Keyed};

/// An airfield with its static data, latest observation and derived values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Airfield {
    /// ICAO or local identifier, unique within the feed.
    pub ident:         String,
    #[serde(default)]
    pub name:          String,
    pub elevation_m:   Option<f32>,
    pub latitude_deg:  Option<f32>,
    pub longitude_deg: Option<f32>,
    #[serde(default)]
    pub runways:       Vec<Runway>,
    /// Latest decoded METAR.
    #[serde(default)]
    pub metar:         Metar,
    /// Raw text of the current TAF, if any.
    #[serde(default)]
    pub taf_raw:       Option<String>,
    /// Values derived from the fields above.
    #[serde(default)]
    pub computed:      Computed,
}

impl Airfield {
    #[must_use]
    pub fn elevation(&self) -> Option<Position<f32>> {
        self.elevation_m.map(Position::from_amsl_meters)
    }

    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.latitude_deg?, self.longitude_deg?))
    }
}

impl Keyed for Airfield {
    const KIND: &'static str = "airfield";

    fn key(&self) -> &str { &self.ident }
}

/// One runway direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Runway {
    /// Runway designator, e.g. `09L`.
    pub designator:           String,
    pub magnetic_heading_deg: f32,
    pub length_m:             Option<f32>,
    #[serde(default)]
    pub surface:              String,
}

impl Runway {
    #[must_use]
    pub fn heading(&self) -> Heading { Heading::from_degrees(self.magnetic_heading_deg) }

    #[must_use]
    pub fn length(&self) -> Option<Length<f32>> { self.length_m.map(Length::from_meters) }
}

/// Decoded METAR fields.
///
/// `None` means the element was not reported.
/// A `None` ceiling means no limiting cloud.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Metar {
    #[serde(alias = "vis_m")]
    pub visibility_m:      Option<f32>,
    pub ceiling_ft:        Option<f32>,
    #[serde(alias = "wind_dir")]
    pub wind_dir_deg:      Option<f32>,
    pub wind_speed_kt:     Option<f32>,
    pub gust_kt:           Option<f32>,
    pub qnh_hpa:           Option<f32>,
    pub temp_c:            Option<f32>,
    pub dewpoint_c:        Option<f32>,
    pub observed_time_utc: Option<String>,
    /// Present weather codes, e.g. `TS`, `-RA`.
    #[serde(default)]
    pub weather_codes:     Vec<String>,
    /// Whether this observation is a SPECI.
    #[serde(default)]
    pub speci:             bool,
    pub raw:               Option<String>,
    /// Other decoded fields carried through unchanged.
    #[serde(flatten)]
    pub extra:             serde_json::Map<String, serde_json::Value>,
}

impl Metar {
    /// The reported wind, unless calm, variable or missing.
    #[must_use]
    pub fn wind(&self) -> Option<Wind> {
        Some(Wind::new(self.wind_dir_deg?, Speed::from_knots(self.wind_speed_kt?)))
    }

    /// Difference between the gust and the mean wind speed.
    #[must_use]
    pub fn gust_spread(&self) -> Option<Speed<f32>> {
        Some(Speed::from_knots(self.gust_kt? - self.wind_speed_kt?))
    }

    #[must_use]
    pub fn visibility(&self) -> Option<Length<f32>> { self.visibility_m.map(Length::from_meters) }

    #[must_use]
    pub fn ceiling(&self) -> Option<Length<f32>> { self.ceiling_ft.map(Length::from_feet) }

    #[must_use]
    pub fn qnh(&self) -> Option<Pressure> { self.qnh_hpa.map(Pressure::from_hpa) }

    #[must_use]
    pub fn temp(&self) -> Option<Temp> { self.temp_c.map(Temp::from_celsius) }

    #[must_use]
    pub fn dewpoint(&self) -> Option<Temp> { self.dewpoint_c.map(Temp::from_celsius) }

    #[must_use]
    pub fn has_weather(&self, code: &str) -> bool {
        self.weather_codes.iter().any(|reported| reported.contains(code))
    }
}

/// Values derived from an airfield's static data and latest observation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Computed {
    #[serde(default)]
    pub density_altitude:           DensityAltitude,
    #[serde(default)]
    pub wind_components_per_runway: Vec<RunwayWind>,
    /// Advisory flag names, simple flags first, then compound flags.
    #[serde(default)]
    pub flags:                      Vec<String>,
    #[serde(default)]
    pub severity:                   Severity,
    #[serde(default)]
    pub qnh_trend:                  QnhTrend,
    pub cloud_base_ft_est:          Option<f32>,
    pub changes:                    Option<Changes>,
    pub workload:                   Option<ScoreSummary>,
    pub stability:                  Option<ScoreSummary>,
    /// Why each flag was raised, keyed by flag name.
    #[serde(default)]
    pub flag_explanations:          BTreeMap<String, FlagExplanation>,
    pub sun:                        Option<SunRecord>,
    #[serde(default)]
    pub taf_time_to_expiry:         TafExpiry,
}

/// The observation and limit behind an advisory flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct FlagExplanation {
    /// Raw input the flag was raised from, e.g. the reported wind.
    pub input:     Option<String>,
    /// The runway with the strongest component, for wind flags.
    pub runway:    Option<String>,
    pub observed:  Option<f32>,
    pub threshold: Option<f32>,
    pub note:      String,
}

/// Daylight at the airfield on the day of the observation, in UTC `HH:MM`.
///
/// Times are `None` when the sun does not cross the horizon that day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct SunRecord {
    pub sunrise:              Option<String>,
    pub sunset:               Option<String>,
    pub civil_twilight_start: Option<String>,
    pub civil_twilight_end:   Option<String>,
    pub is_night:             bool,
}

/// Time left until the current TAF expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TafExpiry {
    /// Hours to expiry rounded to 0.1, negative once expired.
    pub hours:   Option<f32>,
    pub urgency: ExpiryUrgency,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpiryUrgency {
    Ok,
    Amber,
    Red,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct DensityAltitude {
    pub da_ft: Option<f32>,
    pub da_m:  Option<f32>,
}

impl DensityAltitude {
    /// Returns the density altitude as an altitude, if computed.
    #[must_use]
    pub fn altitude(&self) -> Option<Position<f32>> { self.da_ft.map(Position::from_amsl_feet) }
}

/// Wind components for one runway, rounded to 0.1 kt.
///
/// All components are `None` if the wind was not reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct RunwayWind {
    pub runway:              String,
    pub headwind_kt:         Option<f32>,
    /// Absolute crosswind.
    pub crosswind_kt:        Option<f32>,
    pub tailwind_kt:         Option<f32>,
    #[serde(alias = "crosswind_side")]
    pub crosswind_direction: Option<CrosswindSide>,
}

/// Aggregated severity of a set of advisory flags.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Ok,
    Caution,
    Warning,
}

/// Short-term QNH tendency.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QnhTrend {
    Rising,
    Falling,
    #[default]
    Steady,
}

/// A 0..=100 score with its category and main contributors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ScoreSummary {
    pub score:    f32,
    pub category: String,
    /// At most three factor names, largest contribution first.
    #[serde(alias = "top_contributors")]
    pub drivers:  Vec<String>,
}
