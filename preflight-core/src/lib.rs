//! Preflight briefing logic: go/no-go evaluation, airfield enrichment and route summaries.
//!
//! Every function here is a pure computation over its arguments.

pub mod changes;
pub mod enrich;
pub mod flags;
pub mod go_no_go;
pub mod route;
pub mod scores;
pub mod taf;

pub mod try_log;
pub use try_log::TryLog;
