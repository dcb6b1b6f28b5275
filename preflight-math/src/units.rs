use std::f32::consts::{PI, TAU};
use std::marker::PhantomData;
use std::{cmp, fmt, iter, ops};

use bevy_math::{Dir2, Vec2};

mod heading;
pub use heading::Heading;
mod position;
pub use position::Position;
mod temp;
pub use temp::{Temp, TempBase, TempDelta};

#[cfg(test)]
mod tests;

/// Converts meters to feet.
///
/// Used in both directions so that a round trip does not drift.
pub const FEET_PER_METER: f32 = 3.28084;

/// Rounds to one decimal place, half away from zero.
#[must_use]
pub fn round_tenths(value: f32) -> f32 { (value * 10.).round() / 10. }

pub struct Quantity<T, Base>(pub T, pub PhantomData<Base>);

impl<T, Base> Quantity<T, Base> {
    pub const fn new(value: T) -> Self { Self(value, PhantomData) }
}

impl<T, Base> Default for Quantity<T, Base>
where
    T: Default,
{
    fn default() -> Self { Self(T::default(), PhantomData) }
}

impl<T, Base> Clone for Quantity<T, Base>
where
    T: Clone,
{
    fn clone(&self) -> Self { Self(self.0.clone(), PhantomData) }
}

impl<T, Base> Copy for Quantity<T, Base> where T: Copy {}

impl<T, Base> PartialEq for Quantity<T, Base>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool { self.0 == other.0 }
}

impl<T, Base> PartialOrd for Quantity<T, Base>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> { self.0.partial_cmp(&other.0) }
}

impl<T, Base> ops::Add for Quantity<T, Base>
where
    T: ops::Add<Output = T>,
{
    type Output = Self;

    fn add(self, other: Self) -> Self { Self(self.0 + other.0, PhantomData) }
}

impl<T, Base> ops::AddAssign for Quantity<T, Base>
where
    T: ops::AddAssign,
{
    fn add_assign(&mut self, other: Self) { self.0 += other.0; }
}

impl<T, Base> ops::Sub for Quantity<T, Base>
where
    T: ops::Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, other: Self) -> Self { Self(self.0 - other.0, PhantomData) }
}

impl<T, Base> ops::SubAssign for Quantity<T, Base>
where
    T: ops::SubAssign,
{
    fn sub_assign(&mut self, other: Self) { self.0 -= other.0; }
}

impl<T, Base> ops::Mul<f32> for Quantity<T, Base>
where
    T: ops::Mul<f32, Output = T>,
{
    type Output = Self;

    fn mul(self, other: f32) -> Self { Self(self.0 * other, PhantomData) }
}

impl<T, Base> ops::Div<f32> for Quantity<T, Base>
where
    T: ops::Div<f32, Output = T>,
{
    type Output = Self;

    fn div(self, other: f32) -> Self { Self(self.0 / other, PhantomData) }
}

impl<T, Base> ops::Div for Quantity<T, Base>
where
    T: ops::Div,
{
    type Output = T::Output;

    fn div(self, other: Self) -> Self::Output { self.0 / other.0 }
}

impl<T, Base> ops::Neg for Quantity<T, Base>
where
    T: ops::Neg<Output = T>,
{
    type Output = Self;

    fn neg(self) -> Self { Self(-self.0, PhantomData) }
}

impl<T: Default + ops::Add<Output = T>, Base> iter::Sum for Quantity<T, Base> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |sum, value| sum + value)
    }
}

impl<Base> Quantity<f32, Base> {
    pub const ZERO: Self = Self(0., PhantomData);

    #[must_use]
    pub fn is_positive(self) -> bool { self.0 > 0. }

    #[must_use]
    pub fn is_zero(self) -> bool { self.0 == 0. }

    #[must_use]
    pub fn is_finite(self) -> bool { self.0.is_finite() }

    #[must_use]
    pub fn abs(self) -> Self { Self(self.0.abs(), PhantomData) }

    #[must_use]
    pub fn min(self, other: Self) -> Self { Self(self.0.min(other.0), PhantomData) }

    #[must_use]
    pub fn max(self, other: Self) -> Self { Self(self.0.max(other.0), PhantomData) }

    /// Rounds the raw value to one decimal place.
    ///
    /// Only meaningful for display boundaries and record output;
    /// calculations keep full precision.
    #[must_use]
    pub fn round_to_tenths(self) -> Self { Self(round_tenths(self.0), PhantomData) }

    /// Asserts that the quantity is within `epsilon` of `other`.
    ///
    /// # Errors
    /// If the absolute difference between `self` and `other` is greater than `epsilon`.
    pub fn assert_approx(
        self,
        other: Self,
        epsilon: Self,
    ) -> Result<(), AssertApproxError<Self, Self>>
    where
        Self: fmt::Debug,
    {
        if (self - other).abs() > epsilon || !self.is_finite() {
            Err(AssertApproxError { actual: self, expect: other, epsilon })
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("expected {expect:?} within {epsilon:?}, got {actual:?}")]
pub struct AssertApproxError<T: fmt::Debug, E: fmt::Debug> {
    pub actual:  T,
    pub expect:  T,
    pub epsilon: E,
}

pub struct LengthBase;

/// A vertical or horizontal distance. Internal representation is in feet.
pub type Length<T> = Quantity<T, LengthBase>;

pub struct SpeedBase;

/// A horizontal speed. Internal representation is in knots.
pub type Speed<T> = Quantity<T, SpeedBase>;

pub struct VerticalSpeedBase;

/// A climb or descent rate. Internal representation is in feet per minute.
pub type VerticalSpeed = Quantity<f32, VerticalSpeedBase>;

pub struct PressureBase;

/// An atmospheric pressure. Internal representation is in hectopascals.
pub type Pressure = Quantity<f32, PressureBase>;

pub struct LapseRateBase;

/// Temperature decrease per altitude gained. Internal representation is in °C per 1000 ft.
///
/// Positive values mean the air gets colder with height.
pub type LapseRate = Quantity<f32, LapseRateBase>;

pub struct AngleBase;

/// A relative angle. Internal representation is in radians.
pub type Angle = Quantity<f32, AngleBase>;

impl fmt::Debug for Length<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Length")
            .field("feet", &self.into_feet())
            .field("meters", &self.into_meters())
            .finish()
    }
}

impl fmt::Debug for Speed<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Speed").field("knots", &self.into_knots()).finish()
    }
}

impl fmt::Debug for Speed<Vec2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Speed")
            .field("x.knots", &self.0.x)
            .field("y.knots", &self.0.y)
            .finish()
    }
}

impl fmt::Debug for VerticalSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerticalSpeed").field("fpm", &self.into_fpm()).finish()
    }
}

impl fmt::Debug for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pressure").field("hpa", &self.into_hpa()).finish()
    }
}

impl fmt::Debug for LapseRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LapseRate").field("celsius/1000ft", &self.into_celsius_per_kft()).finish()
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Angle").field("degrees", &self.into_degrees()).finish()
    }
}

impl Length<f32> {
    #[must_use]
    pub const fn from_feet(feet: f32) -> Self { Self(feet, PhantomData) }

    #[must_use]
    pub const fn into_feet(self) -> f32 { self.0 }

    #[must_use]
    pub const fn from_meters(meters: f32) -> Self { Self(meters * FEET_PER_METER, PhantomData) }

    #[must_use]
    pub const fn into_meters(self) -> f32 { self.0 / FEET_PER_METER }
}

impl Speed<f32> {
    #[must_use]
    pub const fn from_knots(knots: f32) -> Self { Self(knots, PhantomData) }

    #[must_use]
    pub const fn into_knots(self) -> f32 { self.0 }

    /// Converts a scalar speed into a vector pointing towards `heading`.
    #[must_use]
    pub fn with_heading(self, heading: Heading) -> Speed<Vec2> {
        Quantity(heading.into_dir2() * self.0, PhantomData)
    }
}

impl Speed<Vec2> {
    /// Returns the vector component along `dir`.
    #[must_use]
    pub fn project_onto_dir(self, dir: Dir2) -> Speed<f32> {
        Quantity(self.0.dot(*dir), PhantomData)
    }

    /// Returns the vector component perpendicular to `dir`.
    ///
    /// The result is positive if the vector points to the right of `dir`
    /// (i.e. clockwise from `dir` when viewed from above).
    #[must_use]
    pub fn project_across_dir(self, dir: Dir2) -> Speed<f32> {
        Quantity(self.0.perp_dot(*dir), PhantomData)
    }
}

impl VerticalSpeed {
    #[must_use]
    pub const fn from_fpm(fpm: f32) -> Self { Self(fpm, PhantomData) }

    #[must_use]
    pub const fn into_fpm(self) -> f32 { self.0 }
}

impl Pressure {
    #[must_use]
    pub const fn from_hpa(hpa: f32) -> Self { Self(hpa, PhantomData) }

    #[must_use]
    pub const fn into_hpa(self) -> f32 { self.0 }
}

impl LapseRate {
    #[must_use]
    pub const fn from_celsius_per_kft(rate: f32) -> Self { Self(rate, PhantomData) }

    #[must_use]
    pub const fn into_celsius_per_kft(self) -> f32 { self.0 }
}

/// Temperature drop over a climb of the given height.
impl ops::Mul<Length<f32>> for LapseRate {
    type Output = TempDelta;

    fn mul(self, height: Length<f32>) -> TempDelta {
        TempDelta::from_celsius(self.0 * (height.into_feet() / 1000.))
    }
}

impl Angle {
    pub const STRAIGHT: Self = Self(PI, PhantomData);
    pub const FULL: Self = Self(TAU, PhantomData);

    #[must_use]
    pub const fn from_radians(radians: f32) -> Self { Self(radians, PhantomData) }

    #[must_use]
    pub const fn into_radians(self) -> f32 { self.0 }

    #[must_use]
    pub const fn from_degrees(degrees: f32) -> Self { Self(degrees.to_radians(), PhantomData) }

    #[must_use]
    pub fn into_degrees(self) -> f32 { self.0.to_degrees() }

    #[must_use]
    pub fn sin(self) -> f32 { self.0.sin() }

    #[must_use]
    pub fn cos(self) -> f32 { self.0.cos() }
}

pub trait IsFinite: Copy {
    fn is_finite(self) -> bool;
}

impl IsFinite for f32 {
    fn is_finite(self) -> bool { f32::is_finite(self) }
}

impl IsFinite for Vec2 {
    fn is_finite(self) -> bool { Vec2::is_finite(self) }
}

impl<T, Base> serde::Serialize for Quantity<T, Base>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T, Base> serde::Deserialize<'de> for Quantity<T, Base>
where
    T: serde::Deserialize<'de> + IsFinite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let value = T::deserialize(deserializer)?;

        if !value.is_finite() {
            return Err(<D::Error as serde::de::Error>::custom("non-finite quantity"));
        }

        Ok(Self(value, PhantomData))
    }
}
