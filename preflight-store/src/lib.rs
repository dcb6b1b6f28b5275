//! Schema of the feeds consumed by the preflight tools.
//!
//! Record fields mirror the feed JSON and keep the unit in their names.
//! Typed accessors convert them into `math` quantities.

use std::collections::HashSet;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

mod airfield;
pub use airfield::*;

mod aircraft;
pub use aircraft::*;

mod profile;
pub use profile::*;

mod route;
pub use route::*;

mod history;
pub use history::*;


/// Root structure of `latest.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Feed {
    /// Airfields with their latest observation.
    #[serde(alias = "aerodromes")]
    pub airfields: Vec<Airfield>,
    /// Route summaries built from the airfields.
    #[serde(default)]
    pub routes:    Vec<RouteSummary>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed feed {}: {source}", path.display())]
    Json {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate {kind} {key:?}")]
    DuplicateKey { kind: &'static str, key: String },
}

/// Reads a JSON feed from `path`.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let file = fs::File::open(path).map_err(|source| Error::Io { path: path.into(), source })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| Error::Json { path: path.into(), source })
}

/// Reads `latest.json`.
pub fn load_feed(path: &Path) -> Result<Feed, Error> {
    let feed: Feed = load_json(path)?;
    ensure_unique_keys(&feed.airfields)?;
    tracing::debug!(airfields = feed.airfields.len(), routes = feed.routes.len(), "loaded feed");
    Ok(feed)
}

/// Reads the aircraft list.
pub fn load_aircraft(path: &Path) -> Result<Vec<Aircraft>, Error> {
    let aircraft: Vec<Aircraft> = load_json(path)?;
    ensure_unique_keys(&aircraft)?;
    Ok(aircraft)
}

/// Reads the training profile list.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>, Error> {
    let profiles: Vec<Profile> = load_json(path)?;
    ensure_unique_keys(&profiles)?;
    Ok(profiles)
}

/// A record addressed by a string key within its collection.
pub trait Keyed {
    /// Describes the collection for error messages.
    const KIND: &'static str;

    fn key(&self) -> &str;
}

/// Finds the record with the given key.
pub fn find_by_key<'a, T: Keyed>(records: &'a [T], key: &str) -> Option<&'a T> {
    records.iter().find(|record| record.key() == key)
}

/// Rejects collections where two records share the same key.
pub fn ensure_unique_keys<T: Keyed>(records: &[T]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.key()) {
            return Err(Error::DuplicateKey { kind: T::KIND, key: record.key().to_owned() });
        }
    }
    Ok(())
}
