//! Change detection and QNH trends over an airfield's observation history.

use math::Heading;
use store::{
    CeilingCategory, ChangeDetails, Changes, HISTORY_LEN, QnhTrend, Snapshot, Transition,
    VisibilityCategory,
};


pub const NO_PRIOR_DATA: &str = "No prior data";
pub const WIND_QNH_CHANGES: &str = "Wind/QNH changes detected";
pub const MINIMAL_CHANGES: &str = "Minimal changes";

/// QNH change between consecutive samples beyond which the trend is not steady.
pub const QNH_TREND_THRESHOLD_HPA: f32 = 1.0;

#[must_use]
pub fn ceiling_category(ceiling_ft: Option<f32>) -> CeilingCategory {
    match ceiling_ft {
        None => CeilingCategory::Unknown,
        Some(ceiling) if ceiling < 500.0 => CeilingCategory::Ifr,
        Some(ceiling) if ceiling < 1500.0 => CeilingCategory::Marginal,
        Some(_) => CeilingCategory::Normal,
    }
}

#[must_use]
pub fn visibility_category(visibility_m: Option<f32>) -> VisibilityCategory {
    match visibility_m {
        None => VisibilityCategory::Unknown,
        Some(vis) if vis < 1000.0 => VisibilityCategory::VeryLow,
        Some(vis) if vis < 3000.0 => VisibilityCategory::Low,
        Some(_) => VisibilityCategory::Normal,
    }
}

/// Compares the current observation with the previous one.
///
/// Missing values count as zero in the deltas.
/// The wind direction shift is the shortest turn, in `(-180, 180]` degrees.
#[must_use]
pub fn detect_changes(previous: Option<&Snapshot>, current: &Snapshot) -> Changes {
    let Some(previous) = previous else {
        return Changes { summary: NO_PRIOR_DATA.into(), details: None };
    };

    let value = |get: fn(&Snapshot) -> Option<f32>| {
        (get(current).unwrap_or(0.0), get(previous).unwrap_or(0.0))
    };
    let delta = |get: fn(&Snapshot) -> Option<f32>| {
        let (current, previous) = value(get);
        current - previous
    };
    let spread = |snapshot: &Snapshot| {
        snapshot.temp_c.unwrap_or(0.0) - snapshot.dewpoint_c.unwrap_or(0.0)
    };

    let (current_dir, previous_dir) = value(|snapshot| snapshot.wind_dir_deg);
    let details = ChangeDetails {
        wind_speed_delta_kt:         delta(|snapshot| snapshot.wind_speed_kt),
        wind_dir_shift_deg:          Heading::from_degrees(current_dir - previous_dir)
            .radians()
            .into_degrees(),
        qnh_change_hpa:              delta(|snapshot| snapshot.qnh_hpa),
        temp_dewpoint_spread_change: spread(current) - spread(previous),
        ceiling_category:            Transition {
            from: ceiling_category(previous.ceiling_ft_est),
            to:   ceiling_category(current.ceiling_ft_est),
        },
        visibility_category:         Transition {
            from: visibility_category(previous.visibility_m),
            to:   visibility_category(current.visibility_m),
        },
    };

    let summary = if details.wind_speed_delta_kt != 0.0 || details.qnh_change_hpa != 0.0 {
        WIND_QNH_CHANGES
    } else {
        MINIMAL_CHANGES
    };
    Changes { summary: summary.into(), details: Some(details) }
}

/// QNH change between the last two samples, if both reported QNH.
#[must_use]
pub fn qnh_change(history: &[Snapshot]) -> Option<f32> {
    let [.., previous, current] = history else { return None };
    Some(current.qnh_hpa? - previous.qnh_hpa?)
}

/// Trend of the last two samples of `history`, oldest first.
#[must_use]
pub fn qnh_trend(history: &[Snapshot]) -> QnhTrend {
    match qnh_change(history) {
        Some(delta) if delta > QNH_TREND_THRESHOLD_HPA => QnhTrend::Rising,
        Some(delta) if delta < -QNH_TREND_THRESHOLD_HPA => QnhTrend::Falling,
        _ => QnhTrend::Steady,
    }
}

/// Whether QNH dropped by at least `threshold_hpa` between the last two samples.
#[must_use]
pub fn qnh_falling_fast(history: &[Snapshot], threshold_hpa: f32) -> bool {
    qnh_change(history).is_some_and(|delta| delta <= -threshold_hpa)
}

/// Appends `snapshot`, discarding the oldest samples beyond [`HISTORY_LEN`].
pub fn record_snapshot(history: &mut Vec<Snapshot>, snapshot: Snapshot) {
    history.push(snapshot);
    if let Some(excess) = history.len().checked_sub(HISTORY_LEN) {
        history.drain(..excess);
    }
}
