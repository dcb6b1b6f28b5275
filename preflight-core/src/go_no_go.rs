//! Go/no-go evaluation of one airfield against a training profile and an aircraft.
//!
//! Evaluation is a pure function of its three records.
//! Callers resolve the records themselves and pass fresh copies on every selection change.

use std::fmt;

use math::{Length, Position, Speed};
use ordered_float::OrderedFloat;
use serde::Serialize;
use store::{Aircraft, Airfield, Profile, RunwayWind};


/// Visibility assumed when the METAR does not report one.
pub const UNREPORTED_VISIBILITY_M: f32 = 99_999.0;

/// Density altitude limit assumed when the profile does not set one.
pub const UNCONSTRAINED_DENSITY_ALTITUDE_FT: f32 = 99_999.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("an aircraft must be selected before evaluating go/no-go")]
    MissingAircraft,
    #[error("a training profile must be selected before evaluating go/no-go")]
    MissingProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum Outcome {
    #[serde(rename = "GO")]
    #[strum(serialize = "GO")]
    Go,
    #[serde(rename = "NO-GO")]
    #[strum(serialize = "NO-GO")]
    NoGo,
}

/// A failed check. Variants are declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reason {
    Crosswind { observed: Speed<f32>, limit: Speed<f32> },
    Visibility { observed: Length<f32>, limit: Length<f32> },
    Ceiling { observed: Length<f32>, limit: Length<f32> },
    DensityAltitude { observed: Position<f32>, limit: Position<f32> },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Reason::Crosswind { observed, limit } => write!(
                f,
                "Crosswind {} kt > limit {} kt",
                observed.round_to_tenths().into_knots(),
                limit.round_to_tenths().into_knots(),
            ),
            Reason::Visibility { observed, limit } => write!(
                f,
                "Visibility {} m < limit {} m",
                observed.into_meters().round(),
                limit.into_meters().round(),
            ),
            Reason::Ceiling { observed, limit } => write!(
                f,
                "Ceiling {} ft < limit {} ft",
                observed.round_to_tenths().into_feet(),
                limit.round_to_tenths().into_feet(),
            ),
            Reason::DensityAltitude { observed, limit } => write!(
                f,
                "Density altitude {} ft > limit {} ft",
                observed.amsl().round_to_tenths().into_feet(),
                limit.amsl().round_to_tenths().into_feet(),
            ),
        }
    }
}

/// The limits actually compared against, after applying defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppliedLimits {
    /// Lesser of the profile and aircraft crosswind limits.
    pub crosswind_kt:   f32,
    pub min_vis_m:      f32,
    pub min_ceiling_ft: f32,
    pub max_da_ft:      f32,
}

/// The airfield values that entered the checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observed {
    /// Largest crosswind over all runways, zero if none was computed.
    pub worst_crosswind_kt:  f32,
    pub visibility_m:        Option<f32>,
    pub ceiling_ft:          Option<f32>,
    /// Zero if the density altitude was not computed.
    pub density_altitude_ft: f32,
}

#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub outcome:        Outcome,
    /// Failed checks in the order crosswind, visibility, ceiling, density altitude.
    #[serde_as(as = "Vec<serde_with::DisplayFromStr>")]
    pub reasons:        Vec<Reason>,
    pub limits:         AppliedLimits,
    pub observed:       Observed,
    pub airfield:       String,
    pub profile:        String,
    pub licence_tier:   String,
    pub aircraft:       String,
    pub aircraft_notes: String,
}

/// Resolves the crosswind limit from the profile and the aircraft.
///
/// An absent aircraft limit falls back to the profile limit.
/// An absent profile limit is zero, so the check fails for any crosswind.
#[must_use]
pub fn effective_crosswind_limit(profile: &Profile, aircraft: &Aircraft) -> Speed<f32> {
    let profile_limit = profile.thresholds.max_crosswind().unwrap_or(Speed::ZERO);
    let aircraft_limit = aircraft.demonstrated_crosswind().unwrap_or(profile_limit);
    profile_limit.min(aircraft_limit)
}

/// Largest crosswind component over all runways. Missing components count as zero.
#[must_use]
pub fn worst_crosswind(components: &[RunwayWind]) -> Speed<f32> {
    let worst = components
        .iter()
        .map(|component| OrderedFloat(component.crosswind_kt.unwrap_or(0.0)))
        .max()
        .map_or(0.0, |OrderedFloat(kt)| kt);
    Speed::from_knots(worst.max(0.0))
}

/// Evaluates all four checks and returns the verdict.
#[must_use]
pub fn evaluate(airfield: &Airfield, aircraft: &Aircraft, profile: &Profile) -> Verdict {
    let thresholds = &profile.thresholds;
    let metar = &airfield.metar;

    let crosswind_limit = effective_crosswind_limit(profile, aircraft);
    let crosswind = worst_crosswind(&airfield.computed.wind_components_per_runway);
    let density_altitude =
        airfield.computed.density_altitude.altitude().unwrap_or(Position::SEA_LEVEL);

    let min_visibility = thresholds.min_visibility().unwrap_or(Length::ZERO);
    let min_ceiling = thresholds.min_ceiling().unwrap_or(Length::ZERO);
    let max_density_altitude = thresholds
        .max_density_altitude()
        .unwrap_or(Position::from_amsl_feet(UNCONSTRAINED_DENSITY_ALTITUDE_FT));

    let mut reasons = Vec::new();

    if crosswind > crosswind_limit {
        reasons.push(Reason::Crosswind { observed: crosswind, limit: crosswind_limit });
    }

    let visibility =
        metar.visibility().unwrap_or(Length::from_meters(UNREPORTED_VISIBILITY_M));
    if visibility < min_visibility {
        reasons.push(Reason::Visibility { observed: visibility, limit: min_visibility });
    }

    if let Some(ceiling) = metar.ceiling()
        && ceiling < min_ceiling
    {
        reasons.push(Reason::Ceiling { observed: ceiling, limit: min_ceiling });
    }

    if density_altitude > max_density_altitude {
        reasons.push(Reason::DensityAltitude {
            observed: density_altitude,
            limit:    max_density_altitude,
        });
    }

    let outcome = if reasons.is_empty() { Outcome::Go } else { Outcome::NoGo };
    tracing::debug!(
        airfield = %airfield.ident,
        profile = %profile.name,
        aircraft = %aircraft.aircraft_type,
        %outcome,
        reasons = reasons.len(),
        "evaluated go/no-go",
    );

    Verdict {
        outcome,
        reasons,
        limits: AppliedLimits {
            crosswind_kt:   crosswind_limit.into_knots(),
            min_vis_m:      thresholds.min_vis_m.unwrap_or(0.0),
            min_ceiling_ft: thresholds.min_ceiling_ft.unwrap_or(0.0),
            max_da_ft:      thresholds.max_da_ft.unwrap_or(UNCONSTRAINED_DENSITY_ALTITUDE_FT),
        },
        observed: Observed {
            worst_crosswind_kt:  crosswind.into_knots(),
            visibility_m:        metar.visibility_m,
            ceiling_ft:          metar.ceiling_ft,
            density_altitude_ft: density_altitude.amsl().into_feet(),
        },
        airfield:       airfield.ident.clone(),
        profile:        profile.name.clone(),
        licence_tier:   profile.licence_tier.clone(),
        aircraft:       aircraft.aircraft_type.clone(),
        aircraft_notes: aircraft.notes.clone(),
    }
}

/// Evaluates the current selection.
///
/// Both records must have been resolved by the caller.
pub fn evaluate_selection(
    airfield: &Airfield,
    aircraft: Option<&Aircraft>,
    profile: Option<&Profile>,
) -> Result<Verdict, Error> {
    let aircraft = aircraft.ok_or(Error::MissingAircraft)?;
    let profile = profile.ok_or(Error::MissingProfile)?;
    Ok(evaluate(airfield, aircraft, profile))
}
