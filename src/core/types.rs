//! Core data types for the bearing-fix resolver

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::error::FixError;

/// Point or direction on the unit sphere, in Earth-centred Cartesian coordinates
pub type UnitVector3 = nalgebra::UnitVector3<f64>;

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Build a point without range checks. Use for values already known to be valid.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a point from untrusted values.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]; both must be finite.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, FixError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(FixError::invalid_input(
                "latitude",
                format!("{} is not a latitude in [-90, 90]", lat),
            ));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(FixError::invalid_input(
                "longitude",
                format!("{} is not a longitude in [-180, 180]", lon),
            ));
        }
        Ok(Self { lat, lon })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Named observation post at a fixed position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub location: GeoPoint,
}

impl Station {
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// A station together with the bearing it reports toward the target.
///
/// The bearing is in degrees clockwise from true north. The line of sight is
/// treated as a full great circle, not a ray.
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    pub station: Station,
    pub bearing_deg: f64,
}

impl Sighting {
    pub fn new(station: Station, bearing_deg: f64) -> Self {
        Self {
            station,
            bearing_deg,
        }
    }

    /// Position of the observing station
    pub fn location(&self) -> GeoPoint {
        self.station.location
    }
}
