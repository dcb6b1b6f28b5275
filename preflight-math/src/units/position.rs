use std::{fmt, ops};

use super::Length;

/// An altitude above mean sea level.
#[derive(Clone, Copy, PartialEq, PartialOrd, serde::Serialize)]
pub struct Position<T>(pub Length<T>);

impl<'de, T: serde::Deserialize<'de> + super::IsFinite> serde::Deserialize<'de> for Position<T> {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        <Length<T> as serde::Deserialize<'de>>::deserialize(d).map(Self)
    }
}

impl Position<f32> {
    pub const SEA_LEVEL: Self = Self(Length::from_feet(0.));

    #[must_use]
    pub const fn from_amsl_feet(z: f32) -> Self { Position(Length::from_feet(z)) }

    #[must_use]
    pub const fn from_amsl_meters(z: f32) -> Self { Position(Length::from_meters(z)) }

    /// Height above mean sea level.
    #[must_use]
    pub const fn amsl(self) -> Length<f32> { self.0 }

    #[must_use]
    pub fn min(self, other: Self) -> Self { Self(self.0.min(other.0)) }
}

impl fmt::Debug for Position<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position").field("feet", &self.0.into_feet()).finish()
    }
}

impl<T: ops::AddAssign> ops::Add<Length<T>> for Position<T> {
    type Output = Self;

    fn add(mut self, rhs: Length<T>) -> Self::Output {
        self.0 += rhs;
        self
    }
}

impl<T: ops::SubAssign> ops::Sub<Length<T>> for Position<T> {
    type Output = Self;

    fn sub(mut self, rhs: Length<T>) -> Self::Output {
        self.0 -= rhs;
        self
    }
}

impl<T: ops::Sub<Output = T>> ops::Sub for Position<T> {
    type Output = Length<T>;

    fn sub(self, rhs: Self) -> Length<T> { self.0 - rhs.0 }
}
