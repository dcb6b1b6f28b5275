use math::{Speed, Wind};
use store::{RunwayWind, Severity};

use super::{
    AdvisoryFlag, CompoundContext, Conditions, FlagThresholds, SeverityMap, compound_flags,
    compute_flags, explain, explain_flags, flag_counts, flag_names, flag_severity, parse_flags,
    summarize_flags,
};

fn component(crosswind_kt: Option<f32>, tailwind_kt: Option<f32>) -> RunwayWind {
    runway_component("09", crosswind_kt, tailwind_kt)
}

fn runway_component(
    runway: &str,
    crosswind_kt: Option<f32>,
    tailwind_kt: Option<f32>,
) -> RunwayWind {
    RunwayWind {
        runway: runway.into(),
        headwind_kt: Some(0.0),
        crosswind_kt,
        tailwind_kt,
        crosswind_direction: None,
    }
}

fn calm<'a>(components: &'a [RunwayWind]) -> Conditions<'a> {
    Conditions {
        components,
        wind: None,
        density_altitude_ft: None,
        visibility_m: None,
        ceiling_ft: None,
        gust_spread_kt: None,
        weather_codes: &[],
        qnh_change_hpa: None,
    }
}

#[test]
fn no_flags_when_benign() {
    let components = [component(Some(4.0), Some(0.0))];
    assert!(compute_flags(&calm(&components), &FlagThresholds::default()).is_empty());
}

#[test]
fn thresholds_are_inclusive() {
    let thresholds = FlagThresholds::default();
    let components = [component(Some(15.0), Some(5.0))];
    let conditions = Conditions {
        density_altitude_ft: Some(6000.0),
        visibility_m: Some(5000.0),
        ceiling_ft: Some(1500.0),
        gust_spread_kt: Some(10.0),
        qnh_change_hpa: Some(-2.0),
        ..calm(&components)
    };
    assert_eq!(
        compute_flags(&conditions, &thresholds),
        [
            AdvisoryFlag::CrosswindHigh,
            AdvisoryFlag::Tailwind,
            AdvisoryFlag::Gusty,
            AdvisoryFlag::HighDa,
            AdvisoryFlag::LowVis,
            AdvisoryFlag::LowCeiling,
            AdvisoryFlag::QnhFallingFast,
        ]
    );
}

#[test]
fn gusty_summarized_before_ceiling() {
    let components = [component(Some(4.0), Some(0.0))];
    let conditions = Conditions {
        ceiling_ft: Some(900.0),
        gust_spread_kt: Some(14.0),
        ..calm(&components)
    };
    let flags = compute_flags(&conditions, &FlagThresholds::default());
    assert_eq!(flags, [AdvisoryFlag::Gusty, AdvisoryFlag::LowCeiling]);
    assert_eq!(summarize_flags(&flags), "GUSTY");
}

#[test]
fn thunderstorm_in_any_weather_code() {
    let codes = ["-RA".to_owned(), "VCTS".to_owned()];
    let conditions = Conditions { weather_codes: &codes, ..calm(&[]) };
    assert_eq!(compute_flags(&conditions, &FlagThresholds::default()), [AdvisoryFlag::TsRisk]);

    let codes = ["-SHRA".to_owned()];
    let conditions = Conditions { weather_codes: &codes, ..calm(&[]) };
    assert!(compute_flags(&conditions, &FlagThresholds::default()).is_empty());
}

#[test]
fn qnh_fall_below_threshold_not_flagged() {
    let thresholds = FlagThresholds::default();
    for change in [-1.9, 0.0, 3.0] {
        let conditions = Conditions { qnh_change_hpa: Some(change), ..calm(&[]) };
        assert!(compute_flags(&conditions, &thresholds).is_empty(), "{change}");
    }
}

#[test]
fn wind_explanation_names_first_strongest_runway() {
    let components = [
        runway_component("09", Some(18.0), Some(0.0)),
        runway_component("27", Some(18.0), Some(6.0)),
        runway_component("36", Some(3.0), Some(2.0)),
    ];
    let conditions = Conditions {
        wind: Some(Wind::new(350.0, Speed::from_knots(18.0))),
        ..calm(&components)
    };
    let thresholds = FlagThresholds::default();

    let crosswind = explain(
        AdvisoryFlag::CrosswindHigh,
        &conditions,
        CompoundContext::default(),
        &thresholds,
    );
    assert_eq!(crosswind.input.as_deref(), Some("350/18kt"));
    assert_eq!(crosswind.runway.as_deref(), Some("09"));
    assert_eq!(crosswind.observed, Some(18.0));

    let tailwind =
        explain(AdvisoryFlag::Tailwind, &conditions, CompoundContext::default(), &thresholds);
    assert_eq!(tailwind.runway.as_deref(), Some("27"));
    assert_eq!(tailwind.observed, Some(6.0));
    assert_eq!(tailwind.threshold, Some(5.0));
}

#[test]
fn every_raised_flag_is_explained() {
    let conditions = Conditions { ceiling_ft: Some(1000.0), ..calm(&[]) };
    let thresholds = FlagThresholds::default();
    let context = CompoundContext { night: true, ..CompoundContext::default() };
    let mut flags = compute_flags(&conditions, &thresholds);
    flags.extend(compound_flags(&flags, context));

    let explanations = explain_flags(&flags, &conditions, context, &thresholds);
    assert_eq!(explanations.len(), 2);
    let night = &explanations["LOW_CEILING_NIGHT"];
    assert_eq!(night.input.as_deref(), Some("night"));
    assert_eq!(night.observed, Some(1000.0));
    assert_eq!(night.threshold, Some(1500.0));
}

#[test]
fn maxima_taken_over_runways() {
    let components = [component(None, Some(6.0)), component(Some(16.0), None)];
    let conditions = calm(&components);
    assert_eq!(conditions.max_crosswind_kt(), 16.0);
    assert_eq!(conditions.max_tailwind_kt(), 6.0);
}

#[test]
fn zero_density_altitude_never_high() {
    let thresholds = FlagThresholds { high_da_ft: -100.0, ..FlagThresholds::default() };
    let conditions = Conditions { density_altitude_ft: Some(0.0), ..calm(&[]) };
    assert!(compute_flags(&conditions, &thresholds).is_empty());
}

#[test]
fn compound_flags_require_both_sides() {
    let flags = [
        AdvisoryFlag::HighDa,
        AdvisoryFlag::CrosswindHigh,
        AdvisoryFlag::Gusty,
        AdvisoryFlag::LowCeiling,
    ];
    let all = CompoundContext {
        runway_short:      true,
        night:             true,
        taf_deteriorating: true,
        rapid_qnh_fall:    true,
    };
    assert_eq!(
        compound_flags(&flags, all),
        [
            AdvisoryFlag::HighDaShortRwy,
            AdvisoryFlag::CrosswindHighGusty,
            AdvisoryFlag::LowCeilingNight,
            AdvisoryFlag::RapidQnhFallTafDeteriorating,
        ]
    );

    assert_eq!(
        compound_flags(&flags, CompoundContext::default()),
        [AdvisoryFlag::CrosswindHighGusty]
    );
    assert_eq!(
        compound_flags(&[], CompoundContext { runway_short: false, ..all }),
        [AdvisoryFlag::RapidQnhFallTafDeteriorating]
    );
}

#[test]
fn severity_takes_highest_level() {
    let map = SeverityMap::default();
    assert_eq!(flag_severity(&[], &map), Severity::Ok);
    assert_eq!(flag_severity(&[AdvisoryFlag::Tailwind], &map), Severity::Caution);
    assert_eq!(
        flag_severity(&[AdvisoryFlag::Tailwind, AdvisoryFlag::CrosswindHigh], &map),
        Severity::Warning
    );

    assert_eq!(flag_severity(&[AdvisoryFlag::TsRisk], &map), Severity::Warning);
    assert_eq!(flag_severity(&[AdvisoryFlag::QnhFallingFast], &map), Severity::Caution);

    let empty = SeverityMap { warning: Vec::new(), caution: Vec::new() };
    assert_eq!(flag_severity(&[AdvisoryFlag::CrosswindHigh], &empty), Severity::Ok);
}

#[test]
fn summary_is_first_flag() {
    assert_eq!(summarize_flags(&[]), "LOW_RISK");
    assert_eq!(summarize_flags(&[AdvisoryFlag::LowVis, AdvisoryFlag::HighDa]), "LOW_VIS");
    assert_eq!(summarize_flags(&[AdvisoryFlag::IcingPossible]), "ICING_POSSIBLE (TRAINING)");
}

#[test]
fn counts_per_flag() {
    let counts =
        flag_counts(&[AdvisoryFlag::Gusty, AdvisoryFlag::LowVis, AdvisoryFlag::Gusty]);
    assert_eq!(counts[AdvisoryFlag::Gusty], 2);
    assert_eq!(counts[AdvisoryFlag::LowVis], 1);
    assert_eq!(counts[AdvisoryFlag::HighDa], 0);
}

#[test]
fn names_round_trip_through_feed_strings() {
    let names = flag_names(&[AdvisoryFlag::HighDaShortRwy, AdvisoryFlag::TurbPossible]);
    assert_eq!(names, ["HIGH_DA_SHORT_RWY", "TURB_POSSIBLE (TRAINING)"]);

    let mut with_unknown = names.clone();
    with_unknown.insert(1, "VOLCANIC_ASH".into());
    assert_eq!(
        parse_flags(&with_unknown),
        [AdvisoryFlag::HighDaShortRwy, AdvisoryFlag::TurbPossible]
    );
}

#[test]
fn severity_map_from_config_names() {
    let map: SeverityMap =
        serde_json::from_str(r#"{"warning": ["GUSTY", "ICING_POSSIBLE (TRAINING)"]}"#).unwrap();
    assert_eq!(map.warning, [AdvisoryFlag::Gusty, AdvisoryFlag::IcingPossible]);
    // levels missing from the file keep their defaults
    assert_eq!(map.caution, SeverityMap::default().caution);
}
