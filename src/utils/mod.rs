//! Configuration and the station registry

pub mod config;

pub use config::{ConfigError, ConfigFile, StationConfig, StationRegistry};
