use crate::{Heading, Speed};

#[cfg(test)]
mod tests;

/// A reported surface or upper wind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    /// The direction the wind is blowing *from*.
    pub direction: Heading,
    pub speed:     Speed<f32>,
}

impl Wind {
    #[must_use]
    pub fn new(direction_degrees: f32, speed: Speed<f32>) -> Self {
        Self { direction: Heading::from_degrees(direction_degrees), speed }
    }

    /// Component of the wind opposing motion along `track`.
    ///
    /// Negative for a tailwind.
    #[must_use]
    pub fn headwind_along(self, track: Heading) -> Speed<f32> {
        self.speed.with_heading(self.direction).project_onto_dir(track.into_dir2())
    }

    /// Signed component across `track`, positive when the wind comes from the right.
    #[must_use]
    pub fn crosswind_across(self, track: Heading) -> Speed<f32> {
        self.speed.with_heading(self.direction).project_across_dir(track.into_dir2())
    }
}

/// The side of the runway the crosswind blows from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CrosswindSide {
    Left,
    Right,
}

/// Decomposition of a wind against one runway direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunwayWindComponents {
    /// Non-negative; zero when the wind is from behind.
    pub headwind:  Speed<f32>,
    /// Non-negative; zero when the wind is from ahead.
    pub tailwind:  Speed<f32>,
    /// Absolute crosswind.
    pub crosswind: Speed<f32>,
    pub side:      CrosswindSide,
}

/// Splits `wind` into head/tail/cross components relative to `runway`.
#[must_use]
pub fn runway_components(wind: Wind, runway: Heading) -> RunwayWindComponents {
    let along = wind.headwind_along(runway);
    let across = wind.crosswind_across(runway);

    RunwayWindComponents {
        headwind:  along.max(Speed::ZERO),
        tailwind:  (-along).max(Speed::ZERO),
        crosswind: across.abs(),
        side:      if across.is_positive() { CrosswindSide::Right } else { CrosswindSide::Left },
    }
}
