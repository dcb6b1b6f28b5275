#![allow(
    clippy::excessive_precision,
    clippy::unreadable_literal,
    reason = "we don't really want to read the mathematical constants in this file."
)]

mod units;
pub use units::*;

mod physics;
pub use physics::*;

mod wind;
pub use wind::*;

pub mod navigation;
pub mod sun;
