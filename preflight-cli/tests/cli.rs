use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use jiff::Timestamp;
use preflight::go_no_go::Outcome;
use preflight_cli::briefing::{self, Report};
use preflight_cli::{Config, calc, json_schema};
use store::{History, Severity};

const LATEST: &str = r#"{
    "airfields": [
        {
            "ident": "FAGC",
            "name": "Grand Central",
            "elevation_m": 0,
            "latitude_deg": -26.0,
            "longitude_deg": 28.0,
            "runways": [
                {"designator": "09", "magnetic_heading_deg": 90, "length_m": 1800},
                {"designator": "27", "magnetic_heading_deg": 270, "length_m": 1800}
            ],
            "metar": {
                "visibility_m": 9999,
                "ceiling_ft": 4000,
                "wind_dir_deg": 90,
                "wind_speed_kt": 8,
                "qnh_hpa": 1013.25,
                "temp_c": 25,
                "dewpoint_c": 10
            },
            "computed": {
                "density_altitude": {"da_ft": 5000, "da_m": 1524},
                "wind_components_per_runway": [
                    {"runway": "09", "headwind_kt": 8.0, "crosswind_kt": 4.0, "tailwind_kt": 0.0},
                    {"runway": "27", "headwind_kt": 0.0, "crosswind_kt": 4.0, "tailwind_kt": 8.0}
                ]
            }
        },
        {
            "ident": "FASI",
            "elevation_m": 0,
            "latitude_deg": -26.0,
            "longitude_deg": 29.0
        }
    ]
}"#;

const AIRCRAFT: &str = r#"[{"type": "C172", "demonstrated_crosswind_kt": 12, "notes": "Verify MTOW against POH"}]"#;

const PROFILES: &str = r#"[
    {"name": "PPL", "licence_tier": "PPL", "thresholds": {"max_crosswind_kt": 15, "min_vis_m": 5000, "min_ceiling_ft": 1000, "max_da_ft": 8000}},
    {"name": "Student", "licence_tier": "SPL", "thresholds": {"max_crosswind_kt": 10, "min_vis_m": 5000, "min_ceiling_ft": 1500, "max_da_ft": 4000}}
]"#;

const ROUTES: &str = r#"{
    "routes": [{"id": "GC-SI", "dep": "FAGC", "dest": "FASI", "cruise_levels_ft": [4000, 8000]}],
    "upper_winds": {"levels": [
        {"level_ft": 4000, "wind_dir_deg": 270, "wind_speed_kt": 20, "temp_c": 10},
        {"level_ft": 8000, "wind_dir_deg": 270, "wind_speed_kt": 30, "temp_c": -2}
    ]},
    "sigmets": []
}"#;

/// Late morning at the fixture airfields.
fn briefing_time() -> Timestamp { "2024-03-02T09:00:00Z".parse().unwrap() }

fn fixture(config: &str) -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("latest.json"), LATEST).unwrap();
    fs::write(dir.path().join("aircraft.json"), AIRCRAFT).unwrap();
    fs::write(dir.path().join("profiles.json"), PROFILES).unwrap();
    fs::write(dir.path().join("routes.json"), ROUTES).unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, config).unwrap();
    let config = Config::load(Some(&config_path)).unwrap();
    (dir, config)
}

#[test]
fn go_with_permissive_profile() {
    let (_dir, config) = fixture("{}");
    let verdict = briefing::go_no_go(&config, "FAGC", Some("C172"), Some("PPL")).unwrap();
    assert_eq!(verdict.outcome, Outcome::Go);
    assert!(verdict.reasons.is_empty());
    assert_eq!(verdict.limits.crosswind_kt, 12.0);

    let text = Report(verdict).to_string();
    assert!(text.starts_with("FAGC: GO (profile PPL, aircraft C172)"), "{text}");
    assert!(text.contains("notes: Verify MTOW against POH"), "{text}");
}

#[test]
fn no_go_reports_each_failed_check() {
    let (_dir, config) = fixture("{}");
    let verdict = briefing::go_no_go(&config, "FAGC", Some("C172"), Some("Student")).unwrap();
    assert_eq!(verdict.outcome, Outcome::NoGo);
    assert_eq!(verdict.reasons.len(), 1);

    let json = serde_json::to_value(Report(&verdict)).unwrap();
    assert_eq!(json["airfield"], "FAGC");
    assert_eq!(json["reasons"].as_array().unwrap().len(), 1);
}

#[test]
fn missing_selection_is_an_error() {
    let (_dir, config) = fixture("{}");

    let err = briefing::go_no_go(&config, "FAGC", Some("C172"), None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "a training profile must be selected before evaluating go/no-go"
    );

    let err = briefing::go_no_go(&config, "FAGC", Some("PA28"), Some("PPL")).unwrap_err();
    assert_eq!(err.to_string(), "an aircraft must be selected before evaluating go/no-go");
}

#[test]
fn unknown_airfield_is_an_error() {
    let (_dir, config) = fixture("{}");
    let err = briefing::go_no_go(&config, "ZZZZ", Some("C172"), Some("PPL")).unwrap_err();
    assert!(err.to_string().starts_with(r#"no airfield "ZZZZ""#), "{err}");
}

#[test]
fn enrich_recomputes_airfields_and_routes() {
    let (_dir, config) = fixture("{}");
    let feed = briefing::enrich_feed(&config, briefing_time(), false).unwrap();

    let airfield = &feed.airfields[0];
    assert_eq!(airfield.computed.density_altitude.da_ft, Some(1200.0));
    assert_eq!(airfield.computed.density_altitude.da_m, Some(366.0));
    assert_eq!(airfield.computed.wind_components_per_runway[0].headwind_kt, Some(8.0));
    assert_eq!(airfield.computed.wind_components_per_runway[1].tailwind_kt, Some(8.0));
    assert_eq!(airfield.computed.cloud_base_ft_est, Some(6000.0));
    assert_eq!(airfield.computed.flags, ["TAILWIND"]);
    assert_eq!(airfield.computed.severity, Severity::Caution);
    assert!(airfield.computed.changes.as_ref().unwrap().details.is_none());
    assert_eq!(airfield.computed.flag_explanations["TAILWIND"].runway.as_deref(), Some("27"));
    assert!(!airfield.computed.sun.as_ref().unwrap().is_night);

    assert_eq!(feed.routes.len(), 1);
    let route = &feed.routes[0];
    let track = route.track_deg.unwrap();
    assert!((85.0..95.0).contains(&track), "track {track}");
    assert_eq!(route.upper_winds.len(), 2);
    let ground_speed = route.upper_winds[0].ground_speed_kt.unwrap();
    assert!((135.0..145.0).contains(&ground_speed), "ground speed {ground_speed}");
    assert_eq!(route.freezing_level_ft, Some(8000.0));
    assert_eq!(route.flags, ["ICING_POSSIBLE (TRAINING)"]);
    assert_eq!(route.severity, Severity::Caution);

    let text = Report(feed).to_string();
    assert!(text.contains("GC-SI FAGC -> FASI"), "{text}");
}

#[test]
fn enrich_appends_to_configured_history() {
    let (dir, config) = fixture(r#"{"feeds": {"history": "history.json"}}"#);
    let history_path = dir.path().join("history.json");

    briefing::enrich_feed(&config, briefing_time(), false).unwrap();
    let histories: BTreeMap<String, History> =
        store::load_json(&history_path).unwrap();
    assert_eq!(histories["FAGC"].len(), 1);
    assert_eq!(histories["FAGC"][0].qnh_hpa, Some(1013.25));
    assert_eq!(histories["FAGC"][0].ceiling_ft_est, Some(4000.0));

    let feed = briefing::enrich_feed(&config, briefing_time(), false).unwrap();
    let changes = feed.airfields[0].computed.changes.as_ref().unwrap();
    let details = changes.details.as_ref().unwrap();
    assert!(details.wind_speed_delta_kt.abs() < 1e-6);
    assert!(details.qnh_change_hpa.abs() < 1e-6);

    let histories: BTreeMap<String, History> =
        store::load_json(&history_path).unwrap();
    assert_eq!(histories["FAGC"].len(), 2);
}

#[test]
fn history_file_lists_airfields_in_ident_order() {
    let (dir, config) = fixture(r#"{"feeds": {"history": "history.json"}}"#);
    let history_path = dir.path().join("history.json");
    fs::write(&history_path, r#"{"ZZZZ": [], "FASI": []}"#).unwrap();

    briefing::enrich_feed(&config, briefing_time(), false).unwrap();
    let text = fs::read_to_string(&history_path).unwrap();
    let positions: Vec<_> = ["\"FAGC\"", "\"FASI\"", "\"ZZZZ\""]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
    assert!(positions.is_sorted(), "{text}");
}

#[test]
fn enrich_after_dusk_applies_night() {
    let (_dir, config) = fixture("{}");
    let now: Timestamp = "2024-03-02T20:00:00Z".parse().unwrap();
    let feed = briefing::enrich_feed(&config, now, false).unwrap();

    let sun = feed.airfields[0].computed.sun.as_ref().unwrap();
    assert!(sun.is_night);
    assert!(sun.civil_twilight_end.is_some());
    let route = feed.routes[0].workload.as_ref().unwrap();
    assert!(route.drivers.contains(&"night".to_owned()), "{route:?}");
}

#[test]
fn enrich_without_routes_file_keeps_feed_routes() {
    let (dir, config) = fixture("{}");
    fs::remove_file(dir.path().join("routes.json")).unwrap();
    let feed = briefing::enrich_feed(&config, briefing_time(), false).unwrap();
    assert!(feed.routes.is_empty());
}

#[test]
fn enriched_feed_is_written_back() {
    let (dir, config) = fixture("{}");
    let feed = briefing::enrich_feed(&config, briefing_time(), false).unwrap();
    let output = dir.path().join("enriched.json");
    briefing::write_json(&output, &feed).unwrap();

    let reloaded = store::load_feed(&output).unwrap();
    assert_eq!(reloaded.airfields.len(), 2);
    assert_eq!(reloaded.routes.len(), 1);
    assert_eq!(reloaded.airfields[0].computed.density_altitude.da_ft, Some(1200.0));
}

#[test]
fn config_defaults_and_relative_paths() {
    let (dir, config) = fixture(r#"{"route_tas_kt": 95, "feeds": {"aircraft": "/srv/fleet.json"}}"#);
    assert_eq!(config.route_tas_kt, 95.0);
    assert_eq!(config.feeds.latest, dir.path().join("latest.json"));
    assert_eq!(config.feeds.aircraft, Path::new("/srv/fleet.json"));
    assert_eq!(config.feeds.history, None);

    let defaults = Config::default();
    assert_eq!(defaults.route_tas_kt, 120.0);
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("missing.json"))).unwrap_err();
    assert!(err.to_string().starts_with("open configuration"), "{err}");
}

#[test]
fn calculator_reports() {
    assert_eq!(calc::isa(0.0, Some(25.0)).to_string(), "ISA temp: 15.0°C | ISA deviation: 10.0°C");
    assert_eq!(calc::isa(5000.0, None).to_string(), "ISA temp: 5.0°C");
    assert_eq!(
        calc::pressure_altitude(0.0, 1003.25).to_string(),
        "Pressure altitude: 300 ft (91 m)"
    );
    assert_eq!(
        calc::density_altitude(0.0, 1013.25, 25.0).to_string(),
        "Density altitude: 1200 ft (366 m)"
    );
    assert_eq!(
        calc::true_airspeed(100.0, 5000.0, 0.0).to_string(),
        "Estimated TAS: 110.0 kt (training approximation)"
    );
    assert_eq!(
        calc::lapse_rate(0.0, 15.0, 1000.0, 13.0).unwrap().to_string(),
        "Lapse rate: 2.00°C per 1000 ft (temperature change 2.0°C over 1000 ft)"
    );
    assert_eq!(
        calc::hypoxia(9000.0).to_string(),
        "Oxygen index: 70.0 (training scale). Beware trapped gas at altitude."
    );
    assert_eq!(
        calc::cabin(30000.0, 0.0, 5.0, 500.0).to_string(),
        "Estimated cabin altitude: 10000 ft at 500 fpm (training only)"
    );
}

#[test]
fn lapse_rate_rejects_equal_altitudes() {
    let err = calc::lapse_rate(3000.0, 10.0, 3000.0, 5.0).unwrap_err();
    assert_eq!(err.to_string(), "altitude difference must not be zero");
}

#[test]
fn altitude_report_json_omits_label() {
    let json = serde_json::to_value(calc::density_altitude(0.0, 1013.25, 25.0)).unwrap();
    assert_eq!(json["altitude_ft"], 1200.0);
    assert!(json.get("label").is_none());
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[test]
fn gzipped_schema() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("feed.schema.json.gz");
    json_schema(&output, true).unwrap();

    let mut text = String::new();
    flate2::read::GzDecoder::new(BufReader::new(fs::File::open(&output).unwrap()))
        .read_to_string(&mut text)
        .unwrap();
    let schema: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(schema["title"], "Feed");
}
