use std::f32::consts::FRAC_1_SQRT_2;

use bevy_math::Vec2;

use super::Heading;

fn assert_degrees(heading: Heading, expect: f32) {
    let actual = heading.degrees();
    assert!((actual - expect).abs() < 1e-3, "expected {expect}°, got {actual}°");
}

#[test]
fn wraps_negative_degrees() { assert_degrees(Heading::from_degrees(-90.), 270.); }

#[test]
fn wraps_multiple_turns() { assert_degrees(Heading::from_degrees(765.), 45.); }

#[test]
fn keeps_south_positive() { assert_degrees(Heading::from_degrees(180.), 180.); }

#[test]
fn into_dir2_east() {
    let dir = Heading::EAST.into_dir2();
    assert!((dir.x - 1.).abs() < 1e-6);
    assert!(dir.y.abs() < 1e-6);
}

#[test]
fn from_vec2_northeast() {
    assert_degrees(Heading::from_vec2(Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)), 45.);
}

#[test]
fn from_zero_vec2_is_north() { assert_degrees(Heading::from_vec2(Vec2::ZERO), 0.); }
