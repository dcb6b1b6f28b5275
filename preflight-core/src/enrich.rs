//! Derives the `computed` record of an airfield from its static data and latest METAR.

use enum_map::enum_map;
use jiff::Timestamp;
use jiff::civil::Time;
use jiff::tz::TimeZone;
use math::navigation::GeoPoint;
use math::{Position, Pressure, Temp, Wind, sun};
use store::{Airfield, Computed, DensityAltitude, Runway, RunwayWind, Snapshot, SunRecord};

use crate::changes::{detect_changes, qnh_change, qnh_falling_fast, qnh_trend};
use crate::flags::{
    self, AdvisoryFlag, CompoundContext, Conditions, FlagThresholds, SeverityMap,
};
use crate::scores::{
    StabilityFactor, WorkloadFactor, indicator, stability_score, workload_score,
};
use crate::taf;


/// Wind speed change between observations that counts as a rapid change.
pub const RAPID_WIND_CHANGE_KT: f32 = 10.0;

/// Wind direction shift that saturates the stability wind shift factor.
pub const FULL_WIND_SHIFT_DEG: f32 = 60.0;

/// Inputs of an enrichment besides the airfield itself.
#[derive(Debug, Clone, Copy)]
pub struct EnrichContext<'a> {
    /// Earlier observations of the airfield, oldest first.
    pub history:     &'a [Snapshot],
    /// Time of the enrichment, for daylight and TAF expiry.
    pub now:         Timestamp,
    /// Treat the airfield as in night conditions regardless of daylight.
    pub force_night: bool,
    pub thresholds:  &'a FlagThresholds,
    pub severity:    &'a SeverityMap,
}

/// Result of enriching one airfield.
#[derive(Debug, Clone)]
pub struct Enriched {
    pub computed: Computed,
    /// The latest observation, for the caller to append to the history.
    pub snapshot: Snapshot,
}

/// Wind components for `runway`, rounded to 0.1 kt.
#[must_use]
pub fn runway_wind(runway: &Runway, wind: Option<Wind>) -> RunwayWind {
    let Some(wind) = wind else {
        return RunwayWind {
            runway:              runway.designator.clone(),
            headwind_kt:         None,
            crosswind_kt:        None,
            tailwind_kt:         None,
            crosswind_direction: None,
        };
    };

    let components = math::runway_components(wind, runway.heading());
    RunwayWind {
        runway:              runway.designator.clone(),
        headwind_kt:         Some(components.headwind.round_to_tenths().into_knots()),
        crosswind_kt:        Some(components.crosswind.round_to_tenths().into_knots()),
        tailwind_kt:         Some(components.tailwind.round_to_tenths().into_knots()),
        crosswind_direction: Some(components.side),
    }
}

/// Density altitude in whole feet and metres, if all inputs are known.
#[must_use]
pub fn density_altitude_record(
    elevation: Option<Position<f32>>,
    qnh: Option<Pressure>,
    outside_air_temp: Option<Temp>,
) -> DensityAltitude {
    let (Some(elevation), Some(qnh), Some(outside_air_temp)) = (elevation, qnh, outside_air_temp)
    else {
        return DensityAltitude::default();
    };

    let altitude = math::density_altitude(elevation, qnh, outside_air_temp).amsl();
    DensityAltitude {
        da_ft: Some(altitude.into_feet().round()),
        da_m:  Some(altitude.into_meters().round()),
    }
}

/// Daylight at `location` on the UTC day of `now`.
///
/// Night is the time outside civil twilight.
#[must_use]
pub fn sun_record(location: GeoPoint, now: Timestamp) -> SunRecord {
    let now = now.to_zoned(TimeZone::UTC);
    let daylight = sun::sunrise_sunset(now.date(), location);
    let twilight = sun::civil_twilight(now.date(), location);
    SunRecord {
        sunrise:              daylight.rise.map(clock),
        sunset:               daylight.set.map(clock),
        civil_twilight_start: twilight.rise.map(clock),
        civil_twilight_end:   twilight.set.map(clock),
        is_night:             sun::is_night(now.time(), twilight),
    }
}

fn clock(time: Time) -> String { time.strftime("%H:%M").to_string() }

/// Builds the computed record of `airfield`.
///
/// Existing computed values are ignored and fully replaced.
#[must_use]
pub fn enrich(airfield: &Airfield, context: &EnrichContext) -> Enriched {
    let metar = &airfield.metar;
    let thresholds = context.thresholds;

    let wind = metar.wind();
    let components: Vec<_> =
        airfield.runways.iter().map(|runway| runway_wind(runway, wind)).collect();
    let density_altitude =
        density_altitude_record(airfield.elevation(), metar.qnh(), metar.temp());

    let cloud_base_ft_est = metar
        .temp()
        .zip(metar.dewpoint())
        .map(|(temp, dewpoint)| math::estimated_cloud_base(temp, dewpoint).into_feet().round());
    let snapshot = Snapshot::from_metar(metar, metar.ceiling_ft.or(cloud_base_ft_est));

    let previous = context.history.last();
    let changes = detect_changes(previous, &snapshot);
    let recent: Vec<_> = previous.into_iter().cloned().chain([snapshot.clone()]).collect();
    let trend = qnh_trend(&recent);
    let rapid_qnh_fall = qnh_falling_fast(&recent, thresholds.qnh_fall_fast_hpa);

    let sun = airfield.location().map(|location| sun_record(location, context.now));
    let night = context.force_night || sun.as_ref().is_some_and(|sun| sun.is_night);

    let gust_spread_kt = metar.gust_spread().map(|spread| spread.into_knots());
    let conditions = Conditions {
        components: &components,
        wind,
        density_altitude_ft: density_altitude.da_ft,
        visibility_m: metar.visibility_m,
        ceiling_ft: metar.ceiling_ft,
        gust_spread_kt,
        weather_codes: &metar.weather_codes,
        qnh_change_hpa: qnh_change(&recent),
    };
    let mut advisory = flags::compute_flags(&conditions, thresholds);

    let taf = airfield.taf_raw.as_deref().unwrap_or_default();
    let taf_convective = taf.contains("TS");
    let compound = CompoundContext {
        runway_short: airfield.runways.iter().any(|runway| {
            runway.length_m.is_some_and(|length| length < thresholds.short_runway_m)
        }),
        night,
        taf_deteriorating: taf_convective || taf.contains("TEMPO"),
        rapid_qnh_fall,
    };
    advisory.extend(flags::compound_flags(&advisory, compound));
    let severity = flags::flag_severity(&advisory, context.severity);
    let flag_explanations = flags::explain_flags(&advisory, &conditions, compound, thresholds);
    let taf_time_to_expiry =
        taf::time_to_expiry(taf::taf_valid_to(taf, context.now), context.now);

    let details = changes.details.as_ref();
    let wind_speed_delta = details.map_or(0.0, |details| details.wind_speed_delta_kt);
    let wind_dir_shift = details.map_or(0.0, |details| details.wind_dir_shift_deg);
    let gust_spread = gust_spread_kt.unwrap_or(0.0);

    let workload = workload_score(&enum_map! {
        WorkloadFactor::CrosswindRatio => ratio(conditions.max_crosswind_kt(), thresholds.crosswind_high_kt),
        WorkloadFactor::GustRatio => ratio(gust_spread, thresholds.gust_spread_kt),
        WorkloadFactor::DaRatio => ratio(density_altitude.da_ft.unwrap_or(0.0), thresholds.high_da_ft),
        WorkloadFactor::Convective => indicator(taf_convective),
        WorkloadFactor::Night => indicator(night),
        WorkloadFactor::RapidChange => indicator(wind_speed_delta.abs() >= RAPID_WIND_CHANGE_KT),
    });
    let stability = stability_score(&enum_map! {
        StabilityFactor::WindShift => wind_dir_shift.abs() / FULL_WIND_SHIFT_DEG,
        StabilityFactor::GustSpread => ratio(gust_spread, thresholds.gust_spread_kt),
        StabilityFactor::MetarTafMismatch => indicator(taf_convective && !metar.has_weather("TS")),
        StabilityFactor::QnhFall => indicator(rapid_qnh_fall),
        StabilityFactor::Speci => indicator(metar.speci),
    });

    tracing::debug!(
        ident = %airfield.ident,
        flags = ?advisory,
        %severity,
        workload = workload.score,
        stability = stability.score,
        "enriched airfield"
    );

    Enriched {
        computed: Computed {
            density_altitude,
            wind_components_per_runway: components,
            flags: flags::flag_names(&advisory),
            severity,
            qnh_trend: trend,
            cloud_base_ft_est,
            changes: Some(changes),
            workload: Some(workload.summary()),
            stability: Some(stability.summary()),
            flag_explanations,
            sun,
            taf_time_to_expiry,
        },
        snapshot,
    }
}

/// `value / limit`, or zero if the limit is not positive.
fn ratio(value: f32, limit: f32) -> f32 { if limit > 0.0 { value / limit } else { 0.0 } }

/// Flags of an enriched airfield, skipping names this build does not know.
#[must_use]
pub fn airfield_flags(airfield: &Airfield) -> Vec<AdvisoryFlag> {
    flags::parse_flags(&airfield.computed.flags)
}
