use super::{CrosswindSide, RunwayWindComponents, Wind, runway_components};
use crate::{Heading, Speed};

fn assert_components(actual: RunwayWindComponents, headwind: f32, tailwind: f32, crosswind: f32) {
    let epsilon = Speed::from_knots(1e-3);
    actual.headwind.assert_approx(Speed::from_knots(headwind), epsilon).unwrap();
    actual.tailwind.assert_approx(Speed::from_knots(tailwind), epsilon).unwrap();
    actual.crosswind.assert_approx(Speed::from_knots(crosswind), epsilon).unwrap();
}

#[test]
fn wind_straight_down_the_runway() {
    let components =
        runway_components(Wind::new(270.0, Speed::from_knots(15.0)), Heading::from_degrees(270.0));
    assert_components(components, 15.0, 0.0, 0.0);
}

#[test]
fn wind_from_behind_is_tailwind() {
    let components =
        runway_components(Wind::new(90.0, Speed::from_knots(8.0)), Heading::from_degrees(270.0));
    assert_components(components, 0.0, 8.0, 0.0);
}

#[test]
fn wind_from_the_right() {
    let components =
        runway_components(Wind::new(90.0, Speed::from_knots(12.0)), Heading::from_degrees(360.0));
    assert_components(components, 0.0, 0.0, 12.0);
    assert_eq!(components.side, CrosswindSide::Right);
}

#[test]
fn quartering_wind_from_the_left() {
    // 30 degrees off the nose from the left
    let components =
        runway_components(Wind::new(200.0, Speed::from_knots(20.0)), Heading::from_degrees(230.0));
    assert_components(components, 20.0 * 30f32.to_radians().cos(), 0.0, 10.0);
    assert_eq!(components.side, CrosswindSide::Left);
}

#[test]
fn wraps_across_north() {
    let components =
        runway_components(Wind::new(10.0, Speed::from_knots(10.0)), Heading::from_degrees(350.0));
    assert_components(
        components,
        10.0 * 20f32.to_radians().cos(),
        0.0,
        10.0 * 20f32.to_radians().sin(),
    );
    assert_eq!(components.side, CrosswindSide::Right);
}

#[test]
fn side_names() {
    assert_eq!(CrosswindSide::Left.to_string(), "left");
    assert_eq!("right".parse::<CrosswindSide>().unwrap(), CrosswindSide::Right);
}
