use bevy_math::Vec2;

use crate::{FEET_PER_METER, Heading, LapseRate, Length, Position, Speed, Temp, TempDelta};

#[test]
fn meters_round_trip_through_feet() {
    let length = Length::from_meters(500.);
    assert_eq!(length.into_feet(), 500. * FEET_PER_METER);
    length.assert_approx(Length::from_feet(1640.42), Length::from_feet(0.01)).unwrap();
    assert!((length.into_meters() - 500.).abs() < 1e-3);
}

#[test]
fn temp_difference_is_delta() {
    let spread = Temp::from_celsius(24.) - Temp::from_celsius(8.);
    assert_eq!(spread.into_celsius(), 16.);
    (Temp::from_celsius(-3.) + TempDelta::from_celsius(5.))
        .assert_approx(Temp::from_celsius(2.), TempDelta::from_celsius(1e-4))
        .unwrap();
    assert!(Temp::from_celsius(-0.5) <= Temp::WATER_FREEZING);
}

#[test]
fn lapse_rate_over_height() {
    let drop = LapseRate::from_celsius_per_kft(2.) * Length::from_feet(3500.);
    assert_eq!(drop.into_celsius(), 2. * (3500. / 1000.));
}

#[test]
fn round_to_tenths_half_away_from_zero() {
    assert_eq!(TempDelta::from_celsius(1.25).round_to_tenths().into_celsius(), 1.3);
    assert_eq!(TempDelta::from_celsius(-1.26).round_to_tenths().into_celsius(), -1.3);
}

#[test]
fn position_difference_is_length() {
    let climb = Position::from_amsl_feet(9500.) - Position::from_amsl_feet(2000.);
    assert_eq!(climb.into_feet(), 7500.);
}

#[test]
fn speed_projection_components() {
    let wind = Speed::from_knots(10.).with_heading(Heading::from_degrees(90.));
    let runway = Heading::from_degrees(180.).into_dir2();
    wind.project_onto_dir(runway).assert_approx(Speed::ZERO, Speed::from_knots(1e-4)).unwrap();
    // a vector pointing east is on the left of a southbound direction
    wind.project_across_dir(runway)
        .assert_approx(Speed::from_knots(-10.), Speed::from_knots(1e-4))
        .unwrap();
}

#[test]
fn parses_vector_speed() {
    let parsed: Speed<Vec2> = serde_json::from_str("[3.0, 4.0]").unwrap();
    parsed
        .project_onto_dir(Heading::from_degrees(0.).into_dir2())
        .assert_approx(Speed::from_knots(4.), Speed::from_knots(1e-6))
        .unwrap();
}
