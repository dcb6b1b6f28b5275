//! Great-circle helpers for route planning.

use bevy_math::Vec2;

use crate::{Angle, Heading, Speed, Wind};

#[cfg(test)]
mod tests;

/// A point on the earth surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    pub latitude_deg:  f32,
    pub longitude_deg: f32,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude_deg: f32, longitude_deg: f32) -> Self {
        Self { latitude_deg, longitude_deg }
    }
}

/// Initial great-circle bearing when departing `from` towards `to`.
///
/// The result is a true bearing; [`Heading::degrees`] yields it in `0..360`.
/// Returns `None` if the two points coincide or a coordinate is not finite.
#[must_use]
pub fn initial_bearing(from: GeoPoint, to: GeoPoint) -> Option<Heading> {
    let lat1 = Angle::from_degrees(from.latitude_deg);
    let lat2 = Angle::from_degrees(to.latitude_deg);
    let dlon = Angle::from_degrees(to.longitude_deg - from.longitude_deg);

    let east = dlon.sin() * lat2.cos();
    let north = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let direction = Vec2::new(east, north);
    if !direction.is_finite() || direction.length_squared() == 0.0 {
        return None;
    }
    Some(Heading::from_vec2(direction))
}

/// Headwind experienced when flying along `track`. Negative for a tailwind.
#[must_use]
pub fn headwind_component(wind: Wind, track: Heading) -> Speed<f32> { wind.headwind_along(track) }

/// Ground speed estimate from true airspeed and the wind along the track.
///
/// Drift is ignored.
#[must_use]
pub fn estimated_ground_speed(true_airspeed: Speed<f32>, wind: Wind, track: Heading) -> Speed<f32> {
    true_airspeed - headwind_component(wind, track)
}
