use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use bevy_math::{Dir2, Vec2};

use super::Angle;

#[cfg(test)]
mod tests;

/// An absolute directional bearing, measured clockwise from north.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Heading(
    Angle, // always -PI < heading <= PI
);

impl Heading {
    /// Heading east.
    pub const EAST: Self = Self(Angle::new(FRAC_PI_2));

    /// Returns the heading of the vector, where `+y` is north and `+x` is east.
    ///
    /// A zero vector yields north. A vector with NaN components yields a NaN heading.
    #[must_use]
    pub fn from_vec2(vec: Vec2) -> Self { Self(Angle::new(vec.x.atan2(vec.y))) }

    /// Converts the heading into a direction vector.
    #[must_use]
    pub fn into_dir2(self) -> Dir2 {
        let (x, y) = self.0.0.sin_cos();
        Dir2::from_xy_unchecked(x, y)
    }

    /// Creates a heading from an absolute bearing in degrees.
    ///
    /// Any finite value is accepted; it is wrapped into a single turn.
    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self { Self::from_radians(Angle::from_degrees(degrees)) }

    /// Returns the heading in degrees in the range 0..360.
    #[must_use]
    pub fn degrees(self) -> f32 {
        let degrees = self.0.into_degrees();
        if degrees < 0. { degrees + 360. } else { degrees }
    }

    /// Creates a heading from an absolute bearing in radians.
    #[must_use]
    pub fn from_radians(radians: Angle) -> Self {
        let mut wrapped = radians.into_radians().rem_euclid(Angle::FULL.into_radians());
        if wrapped > PI {
            wrapped -= Angle::FULL.into_radians();
        }
        Self(Angle::from_radians(wrapped))
    }

    /// Returns the heading in radians in the range `-STRAIGHT < value <= STRAIGHT`.
    #[must_use]
    pub fn radians(self) -> Angle { self.0 }
}

impl fmt::Debug for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Heading").field(&self.degrees()).finish()
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03.0}°", self.degrees())
    }
}
