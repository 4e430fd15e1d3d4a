//! Request and response types for the fix API

use serde::{Deserialize, Serialize};

use crate::core::GeoPoint;

/// How a sighting names its station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationRef {
    /// A name to look up in the station registry
    Named(String),
    /// An ad-hoc observation point
    Coordinate(GeoPoint),
}

impl StationRef {
    /// Display label used in reports
    pub fn label(&self) -> String {
        match self {
            StationRef::Named(name) => name.clone(),
            StationRef::Coordinate(p) => format!("{:.6},{:.6}", p.lat, p.lon),
        }
    }
}

/// One unvalidated sighting as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightingInput {
    pub station: StationRef,
    /// Bearing text, parsed when the fix is computed
    pub bearing: String,
}

impl SightingInput {
    pub fn named(station: impl Into<String>, bearing: impl Into<String>) -> Self {
        Self {
            station: StationRef::Named(station.into()),
            bearing: bearing.into(),
        }
    }

    pub fn at(location: GeoPoint, bearing: impl Into<String>) -> Self {
        Self {
            station: StationRef::Coordinate(location),
            bearing: bearing.into(),
        }
    }
}

/// A request for a bearing fix from two or three sightings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixRequest {
    pub sightings: Vec<SightingInput>,
}

impl FixRequest {
    pub fn new(sightings: Vec<SightingInput>) -> Self {
        Self { sightings }
    }

    pub fn with_sighting(mut self, sighting: SightingInput) -> Self {
        self.sightings.push(sighting);
        self
    }
}

/// Per-station diagnostics for a computed fix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub name: String,
    pub location: GeoPoint,
    /// Bearing as entered, degrees
    pub bearing_deg: f64,
    /// Initial great-circle bearing from the station to the estimate, degrees
    pub bearing_to_estimate_deg: f64,
    /// Great-circle distance from the station to the estimate
    pub distance_km: f64,
    /// Distance of the estimate from this station's line of sight
    pub cross_track_km: f64,
}

/// A computed fix with diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixResponse {
    pub estimate: GeoPoint,
    /// The `"lat, lon"` rendering of `estimate`
    pub formatted: String,
    /// Pairwise intersections the estimate was built from
    pub intersections: Vec<GeoPoint>,
    /// Largest distance from the estimate to any pairwise intersection
    pub spread_km: f64,
    pub stations: Vec<StationReport>,
    /// Set when the zero-resultant fallback replaced the spherical mean
    pub fallback_used: bool,
}

/// Output rendering for a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `"lat, lon"` with 8 decimals
    #[default]
    Text,
    /// Full response as JSON
    Json,
    /// Map search link for the estimate
    MapsUrl,
}
