//! Training-grade sunrise, sunset and civil twilight.
//!
//! Times are UTC and truncated to whole minutes.
//! Accuracy is within a few minutes outside polar latitudes.

use jiff::SignedDuration;
use jiff::civil::{Date, Time};

use crate::navigation::GeoPoint;


/// Zenith angle of the sun at sunrise and sunset, including refraction.
pub const SUNRISE_ZENITH_DEG: f64 = 90.833;

/// Zenith angle of the sun at the start and end of civil twilight.
pub const CIVIL_TWILIGHT_ZENITH_DEG: f64 = 96.0;

const J2000: Date = jiff::civil::date(2000, 1, 1);

const OBLIQUITY_DEG: f64 = 23.44;

/// Times at which the sun crosses a zenith angle on one day.
///
/// Both are `None` when the sun stays above or below that angle all day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SunTimes {
    /// Morning crossing.
    pub rise: Option<Time>,
    /// Evening crossing.
    pub set:  Option<Time>,
}

/// Days from the J2000 epoch, noon of 2000-01-01, to the midnight starting `date`.
fn days_since_j2000(date: Date) -> f64 {
    date.duration_since(J2000).as_secs_f64() / 86_400.0 - 0.5
}

/// Mean longitude and ecliptic longitude of the sun, in degrees.
fn solar_longitudes(days: f64) -> (f64, f64) {
    let mean_longitude = (280.46 + 0.985_647_4 * days).rem_euclid(360.0);
    let mean_anomaly = (357.528 + 0.985_600_3 * days).rem_euclid(360.0).to_radians();
    let ecliptic_longitude = mean_longitude
        + 1.915 * mean_anomaly.sin()
        + 0.02 * (2.0 * mean_anomaly).sin();
    (mean_longitude, ecliptic_longitude)
}

fn declination(days: f64) -> f64 {
    let (_, ecliptic_longitude) = solar_longitudes(days);
    (OBLIQUITY_DEG.to_radians().sin() * ecliptic_longitude.rem_euclid(360.0).to_radians().sin())
        .asin()
}

/// Equation of time in minutes.
fn equation_of_time(days: f64) -> f64 {
    let (mean_longitude, ecliptic_longitude) = solar_longitudes(days);
    4.0 * (mean_longitude - ecliptic_longitude)
}

/// Times at which the sun crosses `zenith_deg` at `location` on `date`.
#[must_use]
pub fn sun_times(date: Date, location: GeoPoint, zenith_deg: f64) -> SunTimes {
    let days = days_since_j2000(date);
    let declination = declination(days);
    let equation_of_time = equation_of_time(days);

    let latitude = f64::from(location.latitude_deg).to_radians();
    let longitude_deg = f64::from(location.longitude_deg);
    let cos_hour_angle = (zenith_deg.to_radians().cos() - latitude.sin() * declination.sin())
        / (latitude.cos() * declination.cos());
    // polar day or night, or an invalid location
    if cos_hour_angle.is_nan() || cos_hour_angle.abs() >= 1.0 {
        return SunTimes::default();
    }

    let hour_angle_deg = cos_hour_angle.acos().to_degrees();
    SunTimes {
        rise: time_of_day(720.0 - 4.0 * (longitude_deg + hour_angle_deg) - equation_of_time),
        set:  time_of_day(720.0 - 4.0 * (longitude_deg - hour_angle_deg) - equation_of_time),
    }
}

/// Sunrise and sunset at `location` on `date`.
#[must_use]
pub fn sunrise_sunset(date: Date, location: GeoPoint) -> SunTimes {
    sun_times(date, location, SUNRISE_ZENITH_DEG)
}

/// Start and end of civil twilight at `location` on `date`.
#[must_use]
pub fn civil_twilight(date: Date, location: GeoPoint) -> SunTimes {
    sun_times(date, location, CIVIL_TWILIGHT_ZENITH_DEG)
}

/// Converts minutes after UTC midnight into a time of day, wrapping into a single day.
fn time_of_day(minutes: f64) -> Option<Time> {
    let offset = SignedDuration::try_from_secs_f64(minutes.floor() * 60.0).ok()?;
    Some(Time::midnight().wrapping_add(offset))
}

/// Whether `now` lies outside the daylight between `daylight.rise` and `daylight.set`.
///
/// Daylight may wrap around UTC midnight at far eastern or western longitudes.
/// Always `false` if either time is unknown.
#[must_use]
pub fn is_night(now: Time, daylight: SunTimes) -> bool {
    let (Some(rise), Some(set)) = (daylight.rise, daylight.set) else { return false };
    if rise <= set { now < rise || now >= set } else { now >= set && now < rise }
}
