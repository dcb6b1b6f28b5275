//! Advisory flags raised from an airfield's conditions.

use std::collections::BTreeMap;

use enum_map::EnumMap;
use itertools::Itertools;
use math::Wind;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use store::{FlagExplanation, RunwayWind, Severity};

use crate::try_log;

#[cfg(test)]
mod tests;

/// Reported when no flag is raised.
pub const LOW_RISK: &str = "LOW_RISK";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    enum_map::Enum,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryFlag {
    CrosswindHigh,
    Tailwind,
    Gusty,
    HighDa,
    LowVis,
    LowCeiling,
    TsRisk,
    QnhFallingFast,
    HighDaShortRwy,
    CrosswindHighGusty,
    LowCeilingNight,
    RapidQnhFallTafDeteriorating,
    ConvectiveRiskHigh,
    #[serde(rename = "TURB_POSSIBLE (TRAINING)")]
    #[strum(serialize = "TURB_POSSIBLE (TRAINING)")]
    TurbPossible,
    #[serde(rename = "ICING_POSSIBLE (TRAINING)")]
    #[strum(serialize = "ICING_POSSIBLE (TRAINING)")]
    IcingPossible,
}

/// Limits at which the simple flags are raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagThresholds {
    pub crosswind_high_kt: f32,
    pub tailwind_kt:       f32,
    pub high_da_ft:        f32,
    pub low_vis_m:         f32,
    pub low_ceiling_ft:    f32,
    /// Gust minus mean wind speed.
    pub gust_spread_kt:    f32,
    /// Runways shorter than this count as short for `HIGH_DA_SHORT_RWY`.
    pub short_runway_m:    f32,
    /// QNH drop between consecutive observations that counts as a rapid fall.
    pub qnh_fall_fast_hpa: f32,
}

impl Default for FlagThresholds {
    fn default() -> Self {
        Self {
            crosswind_high_kt: 15.0,
            tailwind_kt:       5.0,
            high_da_ft:        6000.0,
            low_vis_m:         5000.0,
            low_ceiling_ft:    1500.0,
            gust_spread_kt:    10.0,
            short_runway_m:    1000.0,
            qnh_fall_fast_hpa: 2.0,
        }
    }
}

/// The observed conditions flags are computed from.
#[derive(Debug, Clone, Copy)]
pub struct Conditions<'a> {
    pub components:          &'a [RunwayWind],
    /// The reported surface wind.
    pub wind:                Option<Wind>,
    pub density_altitude_ft: Option<f32>,
    pub visibility_m:        Option<f32>,
    pub ceiling_ft:          Option<f32>,
    pub gust_spread_kt:      Option<f32>,
    /// Present weather codes of the observation.
    pub weather_codes:       &'a [String],
    /// QNH change since the previous observation.
    pub qnh_change_hpa:      Option<f32>,
}

impl Conditions<'_> {
    /// Largest crosswind over all runways, zero if unknown.
    #[must_use]
    pub fn max_crosswind_kt(&self) -> f32 { self.max_crosswind().1 }

    /// Largest tailwind over all runways, zero if unknown.
    #[must_use]
    pub fn max_tailwind_kt(&self) -> f32 { self.max_tailwind().1 }

    fn max_crosswind(&self) -> (Option<&RunwayWind>, f32) {
        max_component(self.components, |component| component.crosswind_kt)
    }

    fn max_tailwind(&self) -> (Option<&RunwayWind>, f32) {
        max_component(self.components, |component| component.tailwind_kt)
    }

    fn thunderstorm(&self) -> bool { self.weather_codes.iter().any(|code| code.contains("TS")) }

    fn wind_text(&self) -> Option<String> {
        self.wind.map(|wind| {
            format!("{:03.0}/{:.0}kt", wind.direction.degrees(), wind.speed.into_knots())
        })
    }
}

/// The runway with the largest component and that component, zero if unknown.
///
/// The first runway wins ties.
fn max_component(
    components: &[RunwayWind],
    get: impl Fn(&RunwayWind) -> Option<f32>,
) -> (Option<&RunwayWind>, f32) {
    components
        .iter()
        .rev()
        .map(|component| (component, OrderedFloat(get(component).unwrap_or(0.0))))
        .max_by_key(|&(_, value)| value)
        .map_or((None, 0.0), |(component, OrderedFloat(value))| (Some(component), value))
}

/// Raises the simple flags.
///
/// Wind flags come first, followed by performance, visibility and weather flags.
/// The order is observable through [`summarize_flags`].
#[must_use]
pub fn compute_flags(conditions: &Conditions, thresholds: &FlagThresholds) -> Vec<AdvisoryFlag> {
    let mut flags = Vec::new();

    if conditions.max_crosswind_kt() >= thresholds.crosswind_high_kt {
        flags.push(AdvisoryFlag::CrosswindHigh);
    }
    if conditions.max_tailwind_kt() >= thresholds.tailwind_kt {
        flags.push(AdvisoryFlag::Tailwind);
    }
    if conditions.gust_spread_kt.is_some_and(|spread| spread >= thresholds.gust_spread_kt) {
        flags.push(AdvisoryFlag::Gusty);
    }
    // a zero density altitude is treated as not computed
    if let Some(da_ft) = conditions.density_altitude_ft
        && da_ft != 0.0
        && da_ft >= thresholds.high_da_ft
    {
        flags.push(AdvisoryFlag::HighDa);
    }
    if conditions.visibility_m.is_some_and(|vis| vis <= thresholds.low_vis_m) {
        flags.push(AdvisoryFlag::LowVis);
    }
    if conditions.ceiling_ft.is_some_and(|ceiling| ceiling <= thresholds.low_ceiling_ft) {
        flags.push(AdvisoryFlag::LowCeiling);
    }
    if conditions.thunderstorm() {
        flags.push(AdvisoryFlag::TsRisk);
    }
    if conditions.qnh_change_hpa.is_some_and(|change| change <= -thresholds.qnh_fall_fast_hpa) {
        flags.push(AdvisoryFlag::QnhFallingFast);
    }

    flags
}

/// Context for flags that combine several conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundContext {
    pub runway_short:      bool,
    pub night:             bool,
    pub taf_deteriorating: bool,
    pub rapid_qnh_fall:    bool,
}

#[must_use]
pub fn compound_flags(flags: &[AdvisoryFlag], context: CompoundContext) -> Vec<AdvisoryFlag> {
    let has = |flag| flags.contains(&flag);
    let mut compounds = Vec::new();

    if has(AdvisoryFlag::HighDa) && context.runway_short {
        compounds.push(AdvisoryFlag::HighDaShortRwy);
    }
    if has(AdvisoryFlag::CrosswindHigh) && has(AdvisoryFlag::Gusty) {
        compounds.push(AdvisoryFlag::CrosswindHighGusty);
    }
    if has(AdvisoryFlag::LowCeiling) && context.night {
        compounds.push(AdvisoryFlag::LowCeilingNight);
    }
    if context.rapid_qnh_fall && context.taf_deteriorating {
        compounds.push(AdvisoryFlag::RapidQnhFallTafDeteriorating);
    }

    compounds
}

/// Explains each of `flags`, keyed by flag name.
#[must_use]
pub fn explain_flags(
    flags: &[AdvisoryFlag],
    conditions: &Conditions,
    context: CompoundContext,
    thresholds: &FlagThresholds,
) -> BTreeMap<String, FlagExplanation> {
    flags
        .iter()
        .map(|&flag| (flag.to_string(), explain(flag, conditions, context, thresholds)))
        .collect()
}

/// The observed value and limit that raised `flag`.
#[must_use]
pub fn explain(
    flag: AdvisoryFlag,
    conditions: &Conditions,
    context: CompoundContext,
    thresholds: &FlagThresholds,
) -> FlagExplanation {
    match flag {
        AdvisoryFlag::CrosswindHigh => {
            let (runway, crosswind) = conditions.max_crosswind();
            FlagExplanation {
                input: conditions.wind_text(),
                runway: runway.map(|runway| runway.runway.clone()),
                observed: Some(crosswind),
                threshold: Some(thresholds.crosswind_high_kt),
                ..explanation("Crosswind affects controllability; headwind is typically helpful.")
            }
        }
        AdvisoryFlag::Tailwind => {
            let (runway, tailwind) = conditions.max_tailwind();
            FlagExplanation {
                input: conditions.wind_text(),
                runway: runway.map(|runway| runway.runway.clone()),
                observed: Some(tailwind),
                threshold: Some(thresholds.tailwind_kt),
                ..explanation("Tailwind reduces performance and increases landing distance.")
            }
        }
        AdvisoryFlag::Gusty => FlagExplanation {
            observed: conditions.gust_spread_kt,
            threshold: Some(thresholds.gust_spread_kt),
            ..explanation("Gust spread increases workload and variability.")
        },
        AdvisoryFlag::HighDa => FlagExplanation {
            observed: conditions.density_altitude_ft,
            threshold: Some(thresholds.high_da_ft),
            ..explanation("High density altitude reduces aircraft performance.")
        },
        AdvisoryFlag::LowVis => FlagExplanation {
            observed: conditions.visibility_m,
            threshold: Some(thresholds.low_vis_m),
            ..explanation("Visibility at or below training minima.")
        },
        AdvisoryFlag::LowCeiling => FlagExplanation {
            observed: conditions.ceiling_ft,
            threshold: Some(thresholds.low_ceiling_ft),
            ..explanation("Ceiling at or below training minima.")
        },
        AdvisoryFlag::TsRisk => FlagExplanation {
            input: Some(conditions.weather_codes.join(" ")),
            ..explanation("Thunderstorm code in METAR.")
        },
        AdvisoryFlag::QnhFallingFast => FlagExplanation {
            observed: conditions.qnh_change_hpa,
            threshold: Some(thresholds.qnh_fall_fast_hpa),
            ..explanation("Rapid QNH fall can indicate deteriorating conditions.")
        },
        AdvisoryFlag::HighDaShortRwy => FlagExplanation {
            observed: conditions.density_altitude_ft,
            threshold: Some(thresholds.short_runway_m),
            ..explanation("High density altitude combined with a short runway.")
        },
        AdvisoryFlag::CrosswindHighGusty => FlagExplanation {
            input: conditions.wind_text(),
            observed: Some(conditions.max_crosswind_kt()),
            threshold: Some(thresholds.crosswind_high_kt),
            ..explanation("Crosswind with gusts increases workload.")
        },
        AdvisoryFlag::LowCeilingNight => FlagExplanation {
            input: context.night.then(|| "night".to_owned()),
            observed: conditions.ceiling_ft,
            threshold: Some(thresholds.low_ceiling_ft),
            ..explanation("Low ceiling during night conditions.")
        },
        AdvisoryFlag::RapidQnhFallTafDeteriorating => FlagExplanation {
            observed: conditions.qnh_change_hpa,
            threshold: Some(thresholds.qnh_fall_fast_hpa),
            ..explanation("Rapid QNH fall with a deteriorating TAF.")
        },
        AdvisoryFlag::ConvectiveRiskHigh
        | AdvisoryFlag::TurbPossible
        | AdvisoryFlag::IcingPossible => explanation("Raised from route hazards."),
    }
}

fn explanation(note: &str) -> FlagExplanation {
    FlagExplanation { input: None, runway: None, observed: None, threshold: None, note: note.into() }
}

/// Flags listed per severity level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityMap {
    pub warning: Vec<AdvisoryFlag>,
    pub caution: Vec<AdvisoryFlag>,
}

impl Default for SeverityMap {
    fn default() -> Self {
        Self {
            warning: vec![
                AdvisoryFlag::CrosswindHigh,
                AdvisoryFlag::LowVis,
                AdvisoryFlag::TsRisk,
                AdvisoryFlag::HighDaShortRwy,
                AdvisoryFlag::CrosswindHighGusty,
                AdvisoryFlag::LowCeilingNight,
                AdvisoryFlag::RapidQnhFallTafDeteriorating,
                AdvisoryFlag::ConvectiveRiskHigh,
            ],
            caution: vec![
                AdvisoryFlag::Tailwind,
                AdvisoryFlag::Gusty,
                AdvisoryFlag::HighDa,
                AdvisoryFlag::LowCeiling,
                AdvisoryFlag::QnhFallingFast,
                AdvisoryFlag::TurbPossible,
                AdvisoryFlag::IcingPossible,
            ],
        }
    }
}

/// The highest severity any flag is listed under.
#[must_use]
pub fn flag_severity(flags: &[AdvisoryFlag], severity: &SeverityMap) -> Severity {
    if flags.iter().any(|flag| severity.warning.contains(flag)) {
        Severity::Warning
    } else if flags.iter().any(|flag| severity.caution.contains(flag)) {
        Severity::Caution
    } else {
        Severity::Ok
    }
}

/// The first flag raised, or [`LOW_RISK`].
#[must_use]
pub fn summarize_flags(flags: &[AdvisoryFlag]) -> &'static str {
    flags.first().map_or(LOW_RISK, |&flag| flag.into())
}

#[must_use]
pub fn flag_counts(flags: &[AdvisoryFlag]) -> EnumMap<AdvisoryFlag, usize> {
    let mut counts = EnumMap::default();
    for &flag in flags {
        counts[flag] += 1;
    }
    counts
}

/// Parses flag names from a feed, skipping unknown names with a warning.
#[must_use]
pub fn parse_flags(names: &[String]) -> Vec<AdvisoryFlag> {
    let mut flags = Vec::with_capacity(names.len());
    for name in names {
        let flag = try_log!(
            name.parse::<AdvisoryFlag>(),
            expect "unknown advisory flag {name:?}"
            or continue
        );
        flags.push(flag);
    }
    flags
}

/// Converts flags into their feed names.
#[must_use]
pub fn flag_names(flags: &[AdvisoryFlag]) -> Vec<String> {
    flags.iter().map(ToString::to_string).collect_vec()
}
