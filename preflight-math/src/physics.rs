//! Training-grade approximations of atmospheric and aircraft performance quantities.
//!
//! Every function here is total over finite inputs except [`lapse_rate`].
//! Out-of-range inputs (e.g. negative altitudes) yield well-defined but physically
//! meaningless outputs; the results are advisory and never certified performance data.

use crate::{LapseRate, Length, Position, Pressure, Speed, Temp, TempDelta, VerticalSpeed};


/// Standard temperature at sea level.
pub const ISA_SEA_LEVEL_TEMPERATURE: Temp = Temp::from_celsius(15.0);

/// Standard pressure at sea level (QNH).
pub const ISA_SEA_LEVEL_PRESSURE: Pressure = Pressure::from_hpa(1013.25);

/// Simplified ISA lapse rate used by the training formulas.
pub const ISA_LAPSE_RATE: LapseRate = LapseRate::from_celsius_per_kft(2.0);

/// Pressure altitude change per hPa of QNH deviation from standard.
pub const FEET_PER_HPA: f32 = 30.0;

/// Density altitude change per °C of deviation from ISA.
pub const DENSITY_ALTITUDE_FEET_PER_CELSIUS: f32 = 120.0;

/// Fractional TAS increase per 1000 ft above sea level.
pub const TAS_GAIN_PER_KFT: f32 = 0.02;

/// Hypoxia index at sea level.
pub const HYPOXIA_INDEX_SEA_LEVEL: f32 = 100.0;

/// Altitude gain that costs one point of hypoxia index.
pub const HYPOXIA_FEET_PER_POINT: f32 = 300.0;

/// The hypoxia index never drops below this value.
pub const HYPOXIA_INDEX_FLOOR: f32 = 10.0;

/// Fraction of cruise altitude used as the cabin altitude heuristic.
pub const CABIN_CRUISE_FRACTION: f32 = 0.6;

/// Cabin altitude allowance above the destination per psi of maximum differential.
pub const CABIN_FEET_PER_PSI: f32 = 2000.0;

/// Cloud base height gained per °C of temperature/dewpoint spread.
pub const CLOUD_BASE_FEET_PER_CELSIUS: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("altitude difference must not be zero")]
    ZeroAltitudeDifference,
}

/// Computes the ISA temperature drop over a climb of `height`.
#[must_use]
pub fn isa_temp_lapse(height: Length<f32>) -> TempDelta { ISA_LAPSE_RATE * height }

/// Standard temperature at the given altitude.
///
/// Not rounded; rounding only happens where the value is displayed.
#[must_use]
pub fn isa_temperature(altitude: Position<f32>) -> Temp {
    ISA_SEA_LEVEL_TEMPERATURE - isa_temp_lapse(altitude.amsl())
}

/// Deviation of the outside air temperature from ISA at the given altitude,
/// rounded to 0.1 °C.
#[must_use]
pub fn isa_deviation(altitude: Position<f32>, outside_air_temp: Temp) -> TempDelta {
    (outside_air_temp - isa_temperature(altitude)).round_to_tenths()
}

/// Pressure altitude of an airfield at `elevation` with the given QNH.
///
/// Higher QNH yields a lower pressure altitude.
#[must_use]
pub fn pressure_altitude(elevation: Position<f32>, qnh: Pressure) -> Position<f32> {
    elevation + Length::from_feet((ISA_SEA_LEVEL_PRESSURE - qnh).into_hpa() * FEET_PER_HPA)
}

/// Density altitude of an airfield at `elevation`.
///
/// The ISA reference temperature is taken at the pressure altitude, not at the elevation.
#[must_use]
pub fn density_altitude(
    elevation: Position<f32>,
    qnh: Pressure,
    outside_air_temp: Temp,
) -> Position<f32> {
    let pressure_altitude = pressure_altitude(elevation, qnh);
    let deviation = outside_air_temp - isa_temperature(pressure_altitude);
    pressure_altitude
        + Length::from_feet(DENSITY_ALTITUDE_FEET_PER_CELSIUS * deviation.into_celsius())
}

/// Linear TAS approximation. Not a substitute for a TAS chart.
///
/// `isa_deviation_percent` scales the result by `1 + value / 100`.
#[must_use]
pub fn estimated_true_airspeed(
    indicated_airspeed: Speed<f32>,
    altitude: Position<f32>,
    isa_deviation_percent: f32,
) -> Speed<f32> {
    let altitude_factor = 1.0 + altitude.amsl().into_feet() / 1000.0 * TAS_GAIN_PER_KFT;
    let temp_factor = 1.0 + isa_deviation_percent / 100.0;
    indicated_airspeed * (altitude_factor * temp_factor)
}

/// A temperature reading at a known altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempSample {
    pub altitude: Position<f32>,
    pub temp:     Temp,
}

/// Observed lapse rate between two temperature readings.
///
/// # Errors
/// [`InvalidInput::ZeroAltitudeDifference`] if both readings are at the same altitude.
pub fn lapse_rate(lower: TempSample, upper: TempSample) -> Result<LapseRate, InvalidInput> {
    let height = upper.altitude - lower.altitude;
    if height.is_zero() {
        return Err(InvalidInput::ZeroAltitudeDifference);
    }

    let temp_drop = lower.temp - upper.temp;
    Ok(LapseRate::from_celsius_per_kft(temp_drop.into_celsius() / height.into_feet() * 1000.0))
}

/// Oxygen availability on a 10..=100 training scale, decreasing with altitude.
#[must_use]
pub fn hypoxia_index(altitude: Position<f32>) -> f32 {
    (HYPOXIA_INDEX_SEA_LEVEL - altitude.amsl().into_feet() / HYPOXIA_FEET_PER_POINT)
        .max(HYPOXIA_INDEX_FLOOR)
}

/// Simplified pressurisation estimate for one flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CabinProfile {
    /// Estimated cabin altitude at cruise.
    pub cabin_altitude: Position<f32>,
    /// Planned cabin climb/descent rate. Carried through for display only.
    pub cabin_rate:     VerticalSpeed,
}

/// Estimates the cabin altitude as the lesser of a cruise-fraction heuristic
/// and the altitude the maximum differential allows above the destination.
#[must_use]
pub fn estimated_cabin_altitude(
    cruise: Position<f32>,
    destination_elevation: Position<f32>,
    max_differential_psi: f32,
    cabin_rate: VerticalSpeed,
) -> CabinProfile {
    let cruise_fraction = Position::from_amsl_feet(cruise.amsl().into_feet() * CABIN_CRUISE_FRACTION);
    let differential_limit =
        destination_elevation + Length::from_feet(max_differential_psi * CABIN_FEET_PER_PSI);
    CabinProfile { cabin_altitude: cruise_fraction.min(differential_limit), cabin_rate }
}

/// Rough cloud base above ground from the temperature/dewpoint spread.
#[must_use]
pub fn estimated_cloud_base(temp: Temp, dewpoint: Temp) -> Length<f32> {
    Length::from_feet((temp - dewpoint).into_celsius() * CLOUD_BASE_FEET_PER_CELSIUS)
}
