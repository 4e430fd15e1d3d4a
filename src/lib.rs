//! Bearing Fix Locator
//!
//! Locates a target on the Earth's surface, such as the smoke of a wildfire,
//! from two or three lookout stations that each report a compass bearing.
//! Lines of sight are treated as great circles; two sightings are resolved
//! to their nearest crossing point, three to the spherical mean of their
//! pairwise crossings.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{GeoPoint, Sighting, Station, UnitVector3};
pub use algorithms::{
    intersect, resolve_three, spherical_mean, Estimate, MeanFallback, Resolver, ResolverOptions,
    TieBreak,
};
pub use validation::{DegeneracyKind, FixError, FixResult};
pub use utils::{ConfigError, ConfigFile, StationConfig, StationRegistry};
pub use api::{
    format_coordinate, maps_search_url, FixFormatter, FixRequest, FixResponse, Locator,
    OutputFormat, SightingInput, StationRef,
};
