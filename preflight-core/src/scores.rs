//! Pilot workload and weather stability scores.
//!
//! Each factor takes an input in `[0, 1]`; values outside are clamped.

use std::cmp::Reverse;

use enum_map::{EnumArray, EnumMap};
use itertools::Itertools;
use math::round_tenths;
use ordered_float::OrderedFloat;
use serde::Serialize;
use store::ScoreSummary;


/// Number of contributors reported with a score.
pub const TOP_CONTRIBUTORS: usize = 3;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, enum_map::Enum, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkloadFactor {
    /// Crosswind relative to the crosswind limit.
    CrosswindRatio,
    /// Gust spread relative to the gust spread limit.
    GustRatio,
    /// Density altitude relative to the high density altitude threshold.
    DaRatio,
    Convective,
    Night,
    RapidChange,
}

impl WorkloadFactor {
    #[must_use]
    pub const fn weight(self) -> f32 {
        match self {
            Self::CrosswindRatio => 25.0,
            Self::GustRatio => 15.0,
            Self::DaRatio | Self::Convective => 20.0,
            Self::Night | Self::RapidChange => 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum WorkloadCategory {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workload {
    /// 0 to 100, rounded to 0.1.
    pub score:            f32,
    pub category:         WorkloadCategory,
    pub top_contributors: Vec<WorkloadFactor>,
}

impl Workload {
    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            score:    self.score,
            category: self.category.to_string(),
            drivers:  self.top_contributors.iter().map(ToString::to_string).collect(),
        }
    }
}

#[must_use]
pub fn workload_score(inputs: &EnumMap<WorkloadFactor, f32>) -> Workload {
    let contributions = contributions(inputs, WorkloadFactor::weight);
    let total: f32 = contributions.iter().map(|&(_, contribution)| contribution).sum();
    let score = round_tenths(total.min(100.0));

    let category = if score >= 66.0 {
        WorkloadCategory::High
    } else if score >= 33.0 {
        WorkloadCategory::Medium
    } else {
        WorkloadCategory::Low
    };

    Workload { score, category, top_contributors: top(contributions) }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, enum_map::Enum, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StabilityFactor {
    /// Wind direction shift relative to 60 degrees.
    WindShift,
    GustSpread,
    MetarTafMismatch,
    QnhFall,
    Speci,
}

impl StabilityFactor {
    #[must_use]
    pub const fn deduction(self) -> f32 {
        match self {
            Self::WindShift => 25.0,
            Self::GustSpread | Self::MetarTafMismatch | Self::QnhFall => 20.0,
            Self::Speci => 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum StabilityCategory {
    Stable,
    Variable,
    Unstable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stability {
    /// 0 to 100, rounded to 0.1. Higher is more stable.
    pub score:    f32,
    pub category: StabilityCategory,
    pub drivers:  Vec<StabilityFactor>,
}

impl Stability {
    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            score:    self.score,
            category: self.category.to_string(),
            drivers:  self.drivers.iter().map(ToString::to_string).collect(),
        }
    }
}

#[must_use]
pub fn stability_score(inputs: &EnumMap<StabilityFactor, f32>) -> Stability {
    let deductions = contributions(inputs, StabilityFactor::deduction);
    let total: f32 = deductions.iter().map(|&(_, deduction)| deduction).sum();
    let score = round_tenths((100.0 - total).max(0.0));

    let category = if score < 40.0 {
        StabilityCategory::Unstable
    } else if score < 70.0 {
        StabilityCategory::Variable
    } else {
        StabilityCategory::Stable
    };

    Stability { score, category, drivers: top(deductions) }
}

/// Factor input for a condition that is either present or not.
#[must_use]
pub fn indicator(condition: bool) -> f32 { if condition { 1.0 } else { 0.0 } }

/// Weighted non-zero contributions in factor order.
fn contributions<F>(inputs: &EnumMap<F, f32>, weight: impl Fn(F) -> f32) -> Vec<(F, f32)>
where
    F: EnumArray<f32> + Copy,
{
    inputs
        .iter()
        .map(|(factor, &value)| (factor, value.clamp(0.0, 1.0) * weight(factor)))
        .filter(|&(_, contribution)| contribution > 0.0)
        .collect()
}

/// Factors with the largest rounded contributions. Ties keep factor order.
fn top<F: Copy>(contributions: Vec<(F, f32)>) -> Vec<F> {
    contributions
        .into_iter()
        .sorted_by_key(|&(_, contribution)| Reverse(OrderedFloat(round_tenths(contribution))))
        .take(TOP_CONTRIBUTORS)
        .map(|(factor, _)| factor)
        .collect()
}
