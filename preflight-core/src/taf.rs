//! TAF validity and time to expiry.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp, ToSpan};
use store::{ExpiryUrgency, TafExpiry};


/// Hours to expiry at or below which the TAF is marked red.
pub const RED_EXPIRY_HOURS: f32 = 1.0;

/// Hours to expiry at or below which the TAF is marked amber.
pub const AMBER_EXPIRY_HOURS: f32 = 2.0;

/// End of the validity period of a raw TAF, e.g. `0212` in `0112/0212`.
#[must_use]
pub fn valid_to_group(raw: &str) -> Option<&str> {
    raw.split_whitespace().find_map(|token| {
        let (from, to) = token.split_once('/')?;
        (is_day_hour(from) && is_day_hour(to)).then_some(to)
    })
}

fn is_day_hour(group: &str) -> bool {
    group.len() == 4 && group.bytes().all(|byte| byte.is_ascii_digit())
}

/// Resolves a `DDHH` group against the time it was read at.
///
/// A day before the reference day falls into the following month.
/// Hour 24 is the midnight ending the day.
#[must_use]
pub fn resolve_day_hour(group: &str, reference: Timestamp) -> Option<Timestamp> {
    if !is_day_hour(group) {
        return None;
    }
    let day: i8 = group[..2].parse().ok()?;
    let hour: i64 = group[2..].parse().ok()?;
    if hour > 24 {
        return None;
    }

    let today = reference.to_zoned(TimeZone::UTC).date();
    let mut month = today.first_of_month();
    if day < today.day() {
        month = month.checked_add(1.month()).ok()?;
    }
    let date = Date::new(month.year(), month.month(), day).ok()?;
    let midnight = date.to_zoned(TimeZone::UTC).ok()?.timestamp();
    midnight.checked_add(SignedDuration::from_hours(hour)).ok()
}

/// End of validity of a raw TAF read at `reference`.
#[must_use]
pub fn taf_valid_to(raw: &str, reference: Timestamp) -> Option<Timestamp> {
    resolve_day_hour(valid_to_group(raw)?, reference)
}

/// Hours from `now` until `end` and their urgency.
#[must_use]
pub fn time_to_expiry(end: Option<Timestamp>, now: Timestamp) -> TafExpiry {
    let Some(end) = end else { return TafExpiry::default() };

    let hours = end.duration_since(now).as_secs_f32() / 3600.0;
    let urgency = if hours <= RED_EXPIRY_HOURS {
        ExpiryUrgency::Red
    } else if hours <= AMBER_EXPIRY_HOURS {
        ExpiryUrgency::Amber
    } else {
        ExpiryUrgency::Ok
    };
    TafExpiry { hours: Some(math::round_tenths(hours)), urgency }
}
