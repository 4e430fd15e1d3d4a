use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::algorithms::intersection::ResolverOptions;
use crate::core::{GeoPoint, Station};
use crate::validation::error::{FixError, FixResult};

/// Fire lookout towers shipped as the default registry (name, latitude, longitude)
pub const BUILTIN_TOWERS: &[(&str, f64, f64)] = &[
    ("MILLER_FIRE_TOWER", 42.88568264, -71.26646328),
    ("WARNER_HILL_TOWER", 42.885653, -71.266487),
    ("BELKNAP_TOWER", 43.51793606, -71.36935549),
    ("BLUE_JOB_TOWER", 43.33145977, -71.11609593),
    ("CARDIGAN_MTN_TOWER", 43.64951863, -71.91418603),
    ("CROYDON_MTN_TOWER", 43.48184384, -72.21935872),
    ("FEDERAL_HILL_TOWER", 42.8047698, -71.63027225),
    ("GREEN_MTN_TOWER", 43.76771484, -71.03700492),
    ("HYLAND_HILL_TOWER", 42.95947877, -72.38431124),
    ("MAGALLOWAY_TOWER", 45.0628438, -71.16248386),
    ("MILAN_HILL_TOWER", 44.57227055, -71.22321721),
    ("OAK_HILL_TOWER", 43.27883633, -71.50583231),
    ("PAWTUCKAWAY_TOWER", 43.10195806, -71.18099417),
    ("PITCHER_MTN_TOWER", 43.09405694826296, -72.13497942946528),
    ("RED_HILL_TOWER", 43.75574388, -71.45796641),
    ("MT_KEARSARGE_TOWER", 43.38324024, -71.85701411),
    ("PROSPECT_FIRE_TOWER", 44.45104479, -71.57117603),
];

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid station '{name}': {reason}")]
    InvalidStation { name: String, reason: String },

    #[error("duplicate station '{0}'")]
    DuplicateStation(String),

    #[error("invalid parameter {parameter}: {reason}")]
    InvalidParameter { parameter: String, reason: String },

    #[error("refusing to overwrite existing file '{0}'")]
    AlreadyExists(String),
}

/// One station entry in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl StationConfig {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// On-disk configuration: resolver options plus the station table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub resolver: ResolverOptions,
    pub stations: Vec<StationConfig>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            resolver: ResolverOptions::default(),
            stations: builtin_stations(),
        }
    }
}

/// The built-in tower table as config entries
pub fn builtin_stations() -> Vec<StationConfig> {
    BUILTIN_TOWERS
        .iter()
        .map(|&(name, lat, lon)| StationConfig::new(name, lat, lon))
        .collect()
}

impl ConfigFile {
    /// Load and validate configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: ConfigFile =
            serde_json::from_str(content).map_err(|source| ConfigError::Parse {
                path: origin.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Write configuration as pretty JSON. Existing files are kept unless `overwrite` is set.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, overwrite: bool) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        if !overwrite && path.as_ref().exists() {
            return Err(ConfigError::AlreadyExists(path_str));
        }

        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path_str,
            source,
        })
    }

    /// Check resolver options and every station entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let epsilon = self.resolver.degeneracy_epsilon;
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "resolver.degeneracy_epsilon".to_string(),
                reason: format!("{} must be a positive finite number", epsilon),
            });
        }

        StationRegistry::from_stations(&self.stations).map(|_| ())
    }

    /// Build the immutable station registry described by this config
    pub fn registry(&self) -> Result<StationRegistry, ConfigError> {
        StationRegistry::from_stations(&self.stations)
    }
}

/// Read-only lookup from station name to location.
///
/// Built once, then only read. Listing order is by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationRegistry {
    stations: BTreeMap<String, GeoPoint>,
}

impl StationRegistry {
    /// Registry holding the built-in tower table
    pub fn builtin() -> Self {
        let stations = BUILTIN_TOWERS
            .iter()
            .map(|&(name, lat, lon)| (name.to_string(), GeoPoint::new(lat, lon)))
            .collect();
        Self { stations }
    }

    /// Build a registry from config entries, rejecting bad coordinates and duplicate names
    pub fn from_stations(entries: &[StationConfig]) -> Result<Self, ConfigError> {
        let mut stations = BTreeMap::new();

        for entry in entries {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(ConfigError::InvalidStation {
                    name: entry.name.clone(),
                    reason: "name is empty".to_string(),
                });
            }

            let location = GeoPoint::try_new(entry.latitude, entry.longitude).map_err(|e| {
                ConfigError::InvalidStation {
                    name: name.to_string(),
                    reason: e.to_string(),
                }
            })?;

            if stations.insert(name.to_string(), location).is_some() {
                return Err(ConfigError::DuplicateStation(name.to_string()));
            }
        }

        Ok(Self { stations })
    }

    pub fn get(&self, name: &str) -> Option<&GeoPoint> {
        self.stations.get(name.trim())
    }

    /// Look up a station by name
    pub fn station(&self, name: &str) -> FixResult<Station> {
        let name = name.trim();
        self.get(name)
            .map(|location| Station::new(name, *location))
            .ok_or_else(|| FixError::UnknownStation(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All stations, sorted by name
    pub fn stations(&self) -> impl Iterator<Item = Station> + '_ {
        self.stations
            .iter()
            .map(|(name, location)| Station::new(name.as_str(), *location))
    }
}
