use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use preflight::flags::{FlagThresholds, SeverityMap};
use serde::{Deserialize, Serialize};

/// Tool configuration, read from `config.json`.
///
/// Every field has a default, so partial files are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feeds:           Feeds,
    pub flag_thresholds: FlagThresholds,
    pub severity:        SeverityMap,
    /// True airspeed for route ground speed estimates.
    pub route_tas_kt:    f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds:           Feeds::default(),
            flag_thresholds: FlagThresholds::default(),
            severity:        SeverityMap::default(),
            route_tas_kt:    preflight::route::DEFAULT_TRUE_AIRSPEED.into_knots(),
        }
    }
}

/// Locations of the data feeds.
///
/// Relative paths are resolved against the directory of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Feeds {
    pub latest:   PathBuf,
    pub aircraft: PathBuf,
    pub profiles: PathBuf,
    /// Route plans, upper winds and SIGMETs.
    pub routes:   PathBuf,
    /// Per-airfield observation history. Change detection is skipped when unset.
    pub history:  Option<PathBuf>,
}

impl Default for Feeds {
    fn default() -> Self {
        Self {
            latest:   "latest.json".into(),
            aircraft: "aircraft.json".into(),
            profiles: "profiles.json".into(),
            routes:   "routes.json".into(),
            history:  None,
        }
    }
}

impl Feeds {
    fn resolve(&mut self, base: &Path) {
        for path in [&mut self.latest, &mut self.aircraft, &mut self.profiles, &mut self.routes]
            .into_iter()
            .chain(self.history.as_mut())
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// The default configuration path, `<config dir>/preflight/config.json`.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("preflight");
    path.push("config.json");
    Some(path)
}

impl Config {
    /// Reads the configuration.
    ///
    /// An explicit `path` must exist.
    /// Without one, a missing default file yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no configuration file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let file = fs::File::open(&path)
            .with_context(|| format!("open configuration {}", path.display()))?;
        let mut config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse configuration {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.feeds.resolve(base);
        }
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
