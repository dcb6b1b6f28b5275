use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use jiff::Timestamp;
use preflight_cli::briefing::{self, Report};
use preflight_cli::{Config, calc, emit};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[clap(version, about)]
struct Options {
    /// Path to the configuration file.
    ///
    /// Defaults to `preflight/config.json` under the user configuration directory.
    #[clap(long, global = true)]
    config:  Option<PathBuf>,
    /// Print results as JSON instead of text.
    #[clap(long, global = true)]
    json:    bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
#[clap(rename_all = "kebab-case")]
enum Command {
    /// ISA temperature at an altitude, and the deviation of an outside air temperature from it.
    Isa {
        #[clap(allow_negative_numbers = true)]
        altitude_ft: f32,
        #[clap(long, allow_negative_numbers = true)]
        oat_c:       Option<f32>,
    },
    /// Pressure altitude from elevation and QNH.
    PressureAltitude {
        #[clap(allow_negative_numbers = true)]
        elevation_m: f32,
        qnh_hpa:     f32,
    },
    /// Density altitude from elevation, QNH and outside air temperature.
    DensityAltitude {
        #[clap(allow_negative_numbers = true)]
        elevation_m: f32,
        qnh_hpa:     f32,
        #[clap(allow_negative_numbers = true)]
        oat_c:       f32,
    },
    /// Estimated true airspeed.
    Tas {
        ias_kt:                f32,
        #[clap(allow_negative_numbers = true)]
        altitude_ft:           f32,
        #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
        isa_deviation_percent: f32,
    },
    /// Temperature lapse rate between two altitudes.
    LapseRate {
        #[clap(allow_negative_numbers = true)]
        lower_ft:     f32,
        #[clap(allow_negative_numbers = true)]
        lower_temp_c: f32,
        #[clap(allow_negative_numbers = true)]
        upper_ft:     f32,
        #[clap(allow_negative_numbers = true)]
        upper_temp_c: f32,
    },
    /// Oxygen index at an altitude.
    Hypoxia {
        #[clap(allow_negative_numbers = true)]
        altitude_ft: f32,
    },
    /// Estimated cabin altitude for a pressurized cruise.
    Cabin {
        cruise_ft:            f32,
        #[clap(allow_negative_numbers = true)]
        destination_ft:       f32,
        max_differential_psi: f32,
        #[clap(long, default_value_t = 500.0)]
        cabin_rate_fpm:       f32,
    },
    /// Go/no-go verdict for an airfield of the latest feed.
    GoNoGo {
        airfield: String,
        #[clap(long)]
        aircraft: Option<String>,
        #[clap(long)]
        profile:  Option<String>,
    },
    /// Recompute airfield and route briefings of the latest feed.
    Enrich {
        /// Apply night factors regardless of daylight at the airfields.
        #[clap(long)]
        night:  bool,
        /// Briefing time, e.g. `2024-03-02T09:00:00Z`. Defaults to the current time.
        #[clap(long)]
        now:    Option<Timestamp>,
        /// Write the enriched feed to this file instead of printing it.
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Route summaries against the latest feed.
    Route {
        /// Apply night factors regardless of daylight at the departure airfield.
        #[clap(long)]
        night: bool,
    },
    /// Write the JSON schema of the feed file.
    Schema {
        output: PathBuf,
        #[clap(long)]
        gzip:   bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PREFLIGHT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let options = Options::parse();
    let json = options.json;

    match options.command {
        Command::Isa { altitude_ft, oat_c } => emit(&calc::isa(altitude_ft, oat_c), json),
        Command::PressureAltitude { elevation_m, qnh_hpa } => {
            emit(&calc::pressure_altitude(elevation_m, qnh_hpa), json)
        }
        Command::DensityAltitude { elevation_m, qnh_hpa, oat_c } => {
            emit(&calc::density_altitude(elevation_m, qnh_hpa, oat_c), json)
        }
        Command::Tas { ias_kt, altitude_ft, isa_deviation_percent } => {
            emit(&calc::true_airspeed(ias_kt, altitude_ft, isa_deviation_percent), json)
        }
        Command::LapseRate { lower_ft, lower_temp_c, upper_ft, upper_temp_c } => {
            emit(&calc::lapse_rate(lower_ft, lower_temp_c, upper_ft, upper_temp_c)?, json)
        }
        Command::Hypoxia { altitude_ft } => emit(&calc::hypoxia(altitude_ft), json),
        Command::Cabin { cruise_ft, destination_ft, max_differential_psi, cabin_rate_fpm } => emit(
            &calc::cabin(cruise_ft, destination_ft, max_differential_psi, cabin_rate_fpm),
            json,
        ),
        Command::GoNoGo { airfield, aircraft, profile } => {
            let config = Config::load(options.config.as_deref())?;
            let verdict = briefing::go_no_go(
                &config,
                &airfield,
                aircraft.as_deref(),
                profile.as_deref(),
            )?;
            emit(&Report(verdict), json)
        }
        Command::Enrich { night, now, output } => {
            let config = Config::load(options.config.as_deref())?;
            let feed = briefing::enrich_feed(&config, now.unwrap_or_else(Timestamp::now), night)?;
            match output {
                Some(path) => briefing::write_json(&path, &feed),
                None => emit(&Report(feed), json),
            }
        }
        Command::Route { night } => {
            let config = Config::load(options.config.as_deref())?;
            let feed = store::load_feed(&config.feeds.latest)?;
            let routes = briefing::route_summaries(&config, &feed, night)?;
            emit(&Report(routes.as_slice()), json)
        }
        Command::Schema { output, gzip } => preflight_cli::json_schema(&output, gzip),
    }
}
