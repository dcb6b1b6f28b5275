//! Commands working on the data feeds.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use jiff::Timestamp;
use math::Speed;
use preflight::changes::record_snapshot;
use preflight::enrich::{EnrichContext, airfield_flags, enrich};
use preflight::flags::{flag_counts, summarize_flags};
use preflight::go_no_go::{Verdict, evaluate_selection};
use preflight::route::{RouteContext, summarize_route};
use serde::Serialize;
use store::{Feed, History, RouteInputs, RouteSummary};

use crate::Config;

/// Evaluates go/no-go at `airfield` for the selected aircraft and profile.
///
/// Unknown aircraft or profile keys are reported as a missing selection.
pub fn go_no_go(
    config: &Config,
    airfield: &str,
    aircraft: Option<&str>,
    profile: Option<&str>,
) -> Result<Verdict> {
    let feed = store::load_feed(&config.feeds.latest)?;
    let aircraft_list = store::load_aircraft(&config.feeds.aircraft)?;
    let profiles = store::load_profiles(&config.feeds.profiles)?;

    let airfield = store::find_by_key(&feed.airfields, airfield)
        .with_context(|| format!("no airfield {airfield:?} in {}", config.feeds.latest.display()))?;
    let aircraft = aircraft.and_then(|key| store::find_by_key(&aircraft_list, key));
    let profile = profile.and_then(|key| store::find_by_key(&profiles, key));

    Ok(evaluate_selection(airfield, aircraft, profile)?)
}

/// Text rendering of a command result. Serializes as the inner value.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Report<T>(pub T);

impl fmt::Display for Report<Verdict> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = &self.0;
        writeln!(
            f,
            "{}: {} (profile {}, aircraft {})",
            verdict.airfield, verdict.outcome, verdict.profile, verdict.aircraft
        )?;
        for reason in &verdict.reasons {
            writeln!(f, "  - {reason}")?;
        }
        if !verdict.aircraft_notes.is_empty() {
            writeln!(f, "  notes: {}", verdict.aircraft_notes)?;
        }
        Ok(())
    }
}

/// Recomputes every airfield and route of the latest feed as of `now`.
///
/// With a configured history file, the history is updated with the new observations.
/// The file lists airfields in ident order.
pub fn enrich_feed(config: &Config, now: Timestamp, force_night: bool) -> Result<Feed> {
    let mut feed = store::load_feed(&config.feeds.latest)?;
    let mut histories = load_histories(config)?;

    for airfield in &mut feed.airfields {
        let history = histories.entry(airfield.ident.clone()).or_default();
        let enriched = enrich(
            airfield,
            &EnrichContext {
                history: history.as_slice(),
                now,
                force_night,
                thresholds: &config.flag_thresholds,
                severity: &config.severity,
            },
        );
        airfield.computed = enriched.computed;
        record_snapshot(history, enriched.snapshot);
    }

    if config.feeds.routes.exists() {
        feed.routes = route_summaries(config, &feed, force_night)?;
    }

    if let Some(path) = &config.feeds.history {
        write_json(path, &histories)?;
    }
    Ok(feed)
}

fn load_histories(config: &Config) -> Result<BTreeMap<String, History>> {
    match &config.feeds.history {
        Some(path) if path.exists() => Ok(store::load_json(path)?),
        _ => Ok(BTreeMap::new()),
    }
}

/// Builds the summaries of the configured routes against the airfields of `feed`.
pub fn route_summaries(
    config: &Config,
    feed: &Feed,
    force_night: bool,
) -> Result<Vec<RouteSummary>> {
    let inputs: RouteInputs = store::load_json(&config.feeds.routes)?;
    store::ensure_unique_keys(&inputs.routes)?;

    let context = RouteContext {
        airfields: &feed.airfields,
        upper_winds: &inputs.upper_winds,
        sigmets: &inputs.sigmets,
        true_airspeed: Speed::from_knots(config.route_tas_kt),
        force_night,
        severity: &config.severity,
    };
    Ok(inputs.routes.iter().map(|plan| summarize_route(plan, &context)).collect())
}

impl fmt::Display for Report<Feed> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut all_flags = Vec::new();
        for airfield in &self.0.airfields {
            let flags = airfield_flags(airfield);
            write!(
                f,
                "{:<6} {:<8} {}",
                airfield.ident,
                airfield.computed.severity.to_string(),
                summarize_flags(&flags)
            )?;
            if let Some(workload) = &airfield.computed.workload {
                write!(f, " | workload {:.0} {}", workload.score, workload.category)?;
            }
            if let Some(stability) = &airfield.computed.stability {
                write!(f, " | stability {:.0} {}", stability.score, stability.category)?;
            }
            writeln!(f)?;
            all_flags.extend(flags);
        }

        let counts = flag_counts(&all_flags);
        let counted: Vec<_> = counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(flag, count)| format!("{flag} x{count}"))
            .collect();
        if !counted.is_empty() {
            writeln!(f, "flags: {}", counted.join(", "))?;
        }

        if !self.0.routes.is_empty() {
            write!(f, "{}", Report(self.0.routes.as_slice()))?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<&[RouteSummary]> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for route in self.0 {
            write!(f, "{} {} -> {}", route.plan.id, route.plan.dep, route.plan.dest)?;
            if let Some(track) = route.track_deg {
                write!(f, " track {track:03.0}")?;
            }
            if let Some(level) = route.freezing_level_ft {
                write!(f, " freezing {level:.0} ft")?;
            }
            writeln!(f, " {} {}", route.severity, route.flags.join(", "))?;

            for level in &route.upper_winds {
                let forecast = &level.forecast;
                write!(
                    f,
                    "  {:>5.0} ft {:03.0}/{:.0} {:+.0}°C",
                    forecast.level_ft, forecast.wind_dir_deg, forecast.wind_speed_kt, forecast.temp_c
                )?;
                if let (Some(headwind), Some(ground_speed)) = (level.headwind_kt, level.ground_speed_kt)
                {
                    write!(f, " headwind {headwind:.1} kt GS {ground_speed:.1} kt")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Writes `value` as pretty JSON to `path`.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("write {}", path.display()))
}
