//! Route briefing: winds along the track, freezing level and en-route hazards.

use enum_map::enum_map;
use math::navigation;
use math::{Heading, Speed, Temp};
use store::{Airfield, RoutePlan, RouteSummary, RouteWindLevel, UpperWindLevel, UpperWinds};

use crate::flags::{self, AdvisoryFlag, SeverityMap};
use crate::scores::{
    StabilityFactor, WorkloadFactor, indicator, stability_score, workload_score,
};
use crate::try_log;


/// True airspeed assumed for route ground speed estimates.
pub const DEFAULT_TRUE_AIRSPEED: Speed<f32> = Speed::from_knots(120.0);

/// Upper temperatures in this range are considered icing-prone.
pub const ICING_TEMP_RANGE: (Temp, Temp) = (Temp::from_celsius(-20.0), Temp::WATER_FREEZING);

/// SIGMET phenomena that raise `CONVECTIVE_RISK_HIGH`.
pub const CONVECTIVE_PHENOMENA: [&str; 2] = ["TS", "CB"];

/// SIGMET phenomenon that raises `TURB_POSSIBLE (TRAINING)`.
pub const TURBULENCE_PHENOMENON: &str = "TURB";

/// Inputs shared by all routes of a briefing.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub airfields:     &'a [Airfield],
    pub upper_winds:   &'a UpperWinds,
    /// Raw SIGMET lines in force.
    pub sigmets:       &'a [String],
    pub true_airspeed: Speed<f32>,
    /// Treat the departure as in night conditions regardless of its daylight.
    pub force_night:   bool,
    pub severity:      &'a SeverityMap,
}

/// Initial true track between two airfields.
///
/// `None` if either airfield lacks coordinates or both share the same location.
#[must_use]
pub fn route_track(dep: &Airfield, dest: &Airfield) -> Option<Heading> {
    navigation::initial_bearing(dep.location()?, dest.location()?)
}

/// Forecast levels matching `cruise_levels_ft`, with the wind along `track`.
///
/// Headwind and ground speed are rounded to 0.1 kt, and `None` without a track.
#[must_use]
pub fn route_wind_levels(
    track: Option<Heading>,
    upper_winds: &UpperWinds,
    cruise_levels_ft: &[f32],
    true_airspeed: Speed<f32>,
) -> Vec<RouteWindLevel> {
    upper_winds
        .levels
        .iter()
        .filter(|level| cruise_levels_ft.contains(&level.level_ft))
        .map(|level| {
            let headwind =
                track.map(|track| navigation::headwind_component(level.wind(), track));
            RouteWindLevel {
                forecast:        level.clone(),
                headwind_kt:     headwind.map(|headwind| headwind.round_to_tenths().into_knots()),
                ground_speed_kt: track.map(|track| {
                    navigation::estimated_ground_speed(true_airspeed, level.wind(), track)
                        .round_to_tenths()
                        .into_knots()
                }),
            }
        })
        .collect()
}

/// The lowest listed level at or below 0 °C.
#[must_use]
pub fn freezing_level(upper_winds: &UpperWinds) -> Option<&UpperWindLevel> {
    upper_winds.levels.iter().find(|level| level.temp() <= Temp::WATER_FREEZING)
}

/// En-route hazard flags in a fixed order: convective, turbulence, icing.
#[must_use]
pub fn route_flags(levels: &[RouteWindLevel], sigmets: &[String]) -> Vec<AdvisoryFlag> {
    let mut flags = Vec::new();

    let convective = |line: &String| {
        CONVECTIVE_PHENOMENA.iter().any(|&phenomenon| line.contains(phenomenon))
    };
    if sigmets.iter().any(convective) {
        flags.push(AdvisoryFlag::ConvectiveRiskHigh);
    }
    if sigmets.iter().any(|line| line.contains(TURBULENCE_PHENOMENON)) {
        flags.push(AdvisoryFlag::TurbPossible);
    }
    let (coldest, warmest) = ICING_TEMP_RANGE;
    if levels.iter().any(|level| {
        let temp = level.forecast.temp();
        temp >= coldest && temp <= warmest
    }) {
        flags.push(AdvisoryFlag::IcingPossible);
    }

    flags
}

/// Builds the briefing summary of one planned route.
///
/// Unknown airfield idents are logged; the summary is still built from whatever is known.
#[must_use]
pub fn summarize_route(plan: &RoutePlan, context: &RouteContext) -> RouteSummary {
    let dep = find_airfield(context.airfields, &plan.id, &plan.dep);
    let dest = find_airfield(context.airfields, &plan.id, &plan.dest);
    for alternate in &plan.alternates {
        find_airfield(context.airfields, &plan.id, alternate);
    }

    let track = dep.zip(dest).and_then(|(dep, dest)| route_track(dep, dest));
    let levels =
        route_wind_levels(track, context.upper_winds, &plan.cruise_levels_ft, context.true_airspeed);
    let hazards = route_flags(&levels, context.sigmets);

    let night = context.force_night
        || dep.and_then(|dep| dep.computed.sun.as_ref()).is_some_and(|sun| sun.is_night);
    let convective = hazards.contains(&AdvisoryFlag::ConvectiveRiskHigh);
    let turbulence = hazards.contains(&AdvisoryFlag::TurbPossible);
    let workload = workload_score(&enum_map! {
        WorkloadFactor::Convective => indicator(convective),
        WorkloadFactor::Night => indicator(night),
        WorkloadFactor::RapidChange => indicator(turbulence),
        _ => 0.0,
    });
    let stability = stability_score(&enum_map! {
        StabilityFactor::MetarTafMismatch => indicator(convective),
        _ => 0.0,
    });

    tracing::debug!(route = %plan.id, ?track, flags = ?hazards, "summarized route");

    RouteSummary {
        plan:              plan.clone(),
        track_deg:         track.map(Heading::degrees),
        freezing_level_ft: freezing_level(context.upper_winds).map(|level| level.level_ft),
        upper_winds:       levels,
        sigmet_lines:      context.sigmets.to_vec(),
        severity:          flags::flag_severity(&hazards, context.severity),
        flags:             flags::flag_names(&hazards),
        workload:          Some(workload.summary()),
        stability:         Some(stability.summary()),
    }
}

fn find_airfield<'a>(airfields: &'a [Airfield], route: &str, ident: &str) -> Option<&'a Airfield> {
    let airfield = try_log!(
        store::find_by_key(airfields, ident),
        expect "route {route} references unknown airfield {ident:?}"
        or return None
    );
    Some(airfield)
}
