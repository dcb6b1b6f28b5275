//! Calculator commands.
//!
//! Reports carry unrounded values; rounding only happens in their text rendering.

use std::fmt;

use anyhow::Result;
use math::{Position, Pressure, Speed, Temp, TempSample, VerticalSpeed};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IsaReport {
    pub altitude_ft: f32,
    pub isa_temp_c:  f32,
    /// Rounded to 0.1 °C.
    pub deviation_c: Option<f32>,
}

impl fmt::Display for IsaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ISA temp: {:.1}°C", self.isa_temp_c)?;
        if let Some(deviation) = self.deviation_c {
            write!(f, " | ISA deviation: {deviation:.1}°C")?;
        }
        Ok(())
    }
}

#[must_use]
pub fn isa(altitude_ft: f32, oat_c: Option<f32>) -> IsaReport {
    let altitude = Position::from_amsl_feet(altitude_ft);
    IsaReport {
        altitude_ft,
        isa_temp_c: math::isa_temperature(altitude).into_celsius(),
        deviation_c: oat_c.map(|oat| {
            math::isa_deviation(altitude, Temp::from_celsius(oat)).into_celsius()
        }),
    }
}

/// An altitude result reported in feet and metres.
#[derive(Debug, Clone, Serialize)]
pub struct AltitudeReport {
    #[serde(skip)]
    pub label:       &'static str,
    pub altitude_ft: f32,
    pub altitude_m:  f32,
}

impl AltitudeReport {
    fn new(label: &'static str, altitude: Position<f32>) -> Self {
        Self {
            label,
            altitude_ft: altitude.amsl().into_feet(),
            altitude_m: altitude.amsl().into_meters(),
        }
    }
}

impl fmt::Display for AltitudeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.0} ft ({:.0} m)", self.label, self.altitude_ft, self.altitude_m)
    }
}

#[must_use]
pub fn pressure_altitude(elevation_m: f32, qnh_hpa: f32) -> AltitudeReport {
    AltitudeReport::new(
        "Pressure altitude",
        math::pressure_altitude(Position::from_amsl_meters(elevation_m), Pressure::from_hpa(qnh_hpa)),
    )
}

#[must_use]
pub fn density_altitude(elevation_m: f32, qnh_hpa: f32, oat_c: f32) -> AltitudeReport {
    AltitudeReport::new(
        "Density altitude",
        math::density_altitude(
            Position::from_amsl_meters(elevation_m),
            Pressure::from_hpa(qnh_hpa),
            Temp::from_celsius(oat_c),
        ),
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct TasReport {
    pub tas_kt: f32,
}

impl fmt::Display for TasReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Estimated TAS: {:.1} kt (training approximation)", self.tas_kt)
    }
}

#[must_use]
pub fn true_airspeed(ias_kt: f32, altitude_ft: f32, isa_deviation_percent: f32) -> TasReport {
    let tas = math::estimated_true_airspeed(
        Speed::from_knots(ias_kt),
        Position::from_amsl_feet(altitude_ft),
        isa_deviation_percent,
    );
    TasReport { tas_kt: tas.into_knots() }
}

#[derive(Debug, Clone, Serialize)]
pub struct LapseRateReport {
    pub lapse_rate_c_per_kft: f32,
    pub temp_change_c:        f32,
    pub altitude_change_ft:   f32,
}

impl fmt::Display for LapseRateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lapse rate: {:.2}°C per 1000 ft (temperature change {:.1}°C over {:.0} ft)",
            self.lapse_rate_c_per_kft, self.temp_change_c, self.altitude_change_ft,
        )
    }
}

pub fn lapse_rate(
    lower_ft: f32,
    lower_temp_c: f32,
    upper_ft: f32,
    upper_temp_c: f32,
) -> Result<LapseRateReport> {
    let lower = TempSample {
        altitude: Position::from_amsl_feet(lower_ft),
        temp:     Temp::from_celsius(lower_temp_c),
    };
    let upper = TempSample {
        altitude: Position::from_amsl_feet(upper_ft),
        temp:     Temp::from_celsius(upper_temp_c),
    };
    let rate = math::lapse_rate(lower, upper)?;

    Ok(LapseRateReport {
        lapse_rate_c_per_kft: rate.into_celsius_per_kft(),
        temp_change_c:        (lower.temp - upper.temp).into_celsius(),
        altitude_change_ft:   (upper.altitude - lower.altitude).into_feet(),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct HypoxiaReport {
    pub index: f32,
}

impl fmt::Display for HypoxiaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Oxygen index: {:.1} (training scale). Beware trapped gas at altitude.",
            self.index
        )
    }
}

#[must_use]
pub fn hypoxia(altitude_ft: f32) -> HypoxiaReport {
    HypoxiaReport { index: math::hypoxia_index(Position::from_amsl_feet(altitude_ft)) }
}

#[derive(Debug, Clone, Serialize)]
pub struct CabinReport {
    pub cabin_altitude_ft: f32,
    pub cabin_rate_fpm:    f32,
}

impl fmt::Display for CabinReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Estimated cabin altitude: {:.0} ft at {} fpm (training only)",
            self.cabin_altitude_ft, self.cabin_rate_fpm
        )
    }
}

#[must_use]
pub fn cabin(
    cruise_ft: f32,
    destination_ft: f32,
    max_differential_psi: f32,
    cabin_rate_fpm: f32,
) -> CabinReport {
    let profile = math::estimated_cabin_altitude(
        Position::from_amsl_feet(cruise_ft),
        Position::from_amsl_feet(destination_ft),
        max_differential_psi,
        VerticalSpeed::from_fpm(cabin_rate_fpm),
    );
    CabinReport {
        cabin_altitude_ft: profile.cabin_altitude.amsl().into_feet(),
        cabin_rate_fpm:    profile.cabin_rate.into_fpm(),
    }
}
