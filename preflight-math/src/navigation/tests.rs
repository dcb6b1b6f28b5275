use super::{GeoPoint, estimated_ground_speed, headwind_component, initial_bearing};
use crate::{Heading, Speed, Wind};

#[test]
fn bearing_due_east_on_equator() {
    let bearing = initial_bearing(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)).unwrap();
    assert!((bearing.degrees() - 90.0).abs() < 1e-3, "{bearing:?}");
}

#[test]
fn bearing_due_south() {
    let bearing = initial_bearing(GeoPoint::new(-25.0, 28.0), GeoPoint::new(-26.0, 28.0)).unwrap();
    assert!((bearing.degrees() - 180.0).abs() < 1e-3, "{bearing:?}");
}

#[test]
fn bearing_north_west_is_within_one_turn() {
    let bearing = initial_bearing(GeoPoint::new(51.0, 0.0), GeoPoint::new(52.0, -1.0)).unwrap();
    let degrees = bearing.degrees();
    assert!((270.0..360.0).contains(&degrees), "{degrees}");
}

#[test]
fn bearing_between_coincident_points() {
    assert_eq!(initial_bearing(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)), None);
    assert_eq!(initial_bearing(GeoPoint::new(-26.24, 28.15), GeoPoint::new(-26.24, 28.15)), None);
}

#[test]
fn bearing_from_non_finite_point() {
    assert_eq!(initial_bearing(GeoPoint::new(f32::NAN, 0.0), GeoPoint::new(0.0, 1.0)), None);
}

#[test]
fn headwind_on_track() {
    headwind_component(Wind::new(90.0, Speed::from_knots(20.0)), Heading::from_degrees(90.0))
        .assert_approx(Speed::from_knots(20.0), Speed::from_knots(1e-3))
        .unwrap();
}

#[test]
fn tailwind_increases_ground_speed() {
    estimated_ground_speed(
        Speed::from_knots(120.0),
        Wind::new(270.0, Speed::from_knots(15.0)),
        Heading::from_degrees(90.0),
    )
    .assert_approx(Speed::from_knots(135.0), Speed::from_knots(1e-3))
    .unwrap();
}

#[test]
fn crosswind_leaves_ground_speed() {
    estimated_ground_speed(
        Speed::from_knots(100.0),
        Wind::new(180.0, Speed::from_knots(25.0)),
        Heading::from_degrees(90.0),
    )
    .assert_approx(Speed::from_knots(100.0), Speed::from_knots(1e-3))
    .unwrap();
}
