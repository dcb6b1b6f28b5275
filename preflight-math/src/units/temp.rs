use std::marker::PhantomData;
use std::{fmt, ops};

use crate::{AssertApproxError, Quantity};

pub struct TempBase;

/// Difference in temperature.
///
/// Always in °C (which is equivalent to kelvins in terms of deltas).
pub type TempDelta = Quantity<f32, TempBase>;

impl TempDelta {
    #[must_use]
    pub const fn from_celsius(celsius: f32) -> Self { Self(celsius, PhantomData) }

    #[must_use]
    pub const fn into_celsius(self) -> f32 { self.0 }
}

impl fmt::Debug for TempDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempDelta").field("celsius", &self.0).finish()
    }
}

/// Absolute temperature value.
///
/// Stored in °C, the unit every observation and training formula here is expressed in.
#[derive(Clone, Copy, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Temp(pub TempDelta);

impl Temp {
    /// Freezing point of water.
    pub const WATER_FREEZING: Self = Self::from_celsius(0.0);

    #[must_use]
    pub const fn from_celsius(celsius: f32) -> Self { Self(TempDelta::from_celsius(celsius)) }

    #[must_use]
    pub const fn into_celsius(self) -> f32 { self.0.0 }

    /// Asserts that the quantity is within `epsilon` of `other`.
    ///
    /// # Errors
    /// If the absolute difference between `self` and `other` is greater than `epsilon`.
    pub fn assert_approx(
        self,
        other: Temp,
        epsilon: TempDelta,
    ) -> Result<(), AssertApproxError<Self, TempDelta>> {
        if (self - other).abs() > epsilon || !self.0.is_finite() {
            Err(AssertApproxError { actual: self, expect: other, epsilon })
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Temperature").field("celsius", &self.into_celsius()).finish()
    }
}

impl ops::Add<TempDelta> for Temp {
    type Output = Temp;

    fn add(self, rhs: TempDelta) -> Self::Output {
        Temp::from_celsius(self.into_celsius() + rhs.into_celsius())
    }
}

impl ops::Sub<TempDelta> for Temp {
    type Output = Temp;

    fn sub(self, rhs: TempDelta) -> Self::Output {
        Temp::from_celsius(self.into_celsius() - rhs.into_celsius())
    }
}

impl ops::Sub for Temp {
    type Output = TempDelta;

    fn sub(self, rhs: Self) -> Self::Output {
        TempDelta::from_celsius(self.into_celsius() - rhs.into_celsius())
    }
}
