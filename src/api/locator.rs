//! Synchronous fix API
//!
//! [`Locator`] is the boundary between user input and the geometric core. It
//! resolves station names through an injected [`StationRegistry`], validates
//! bearings, runs the [`Resolver`] and turns the estimate into a
//! [`FixResponse`]. This is the only layer that logs.

use tracing::{debug, info, warn};

use crate::algorithms::great_circle::{
    angular_distance, cross_track_angle, great_circle_normal, initial_bearing, to_cartesian,
};
use crate::algorithms::intersection::{Estimate, Resolver, ResolverOptions};
use crate::api::formatting::format_coordinate;
use crate::api::types::{FixRequest, FixResponse, StationRef, StationReport};
use crate::core::{GeoPoint, Sighting, Station, EARTH_MEAN_RADIUS_KM};
use crate::utils::config::{ConfigError, ConfigFile, StationRegistry};
use crate::validation::error::FixResult;
use crate::validation::input::{check_sighting_count, parse_bearing};

/// Computes bearing fixes against a fixed station registry
#[derive(Debug, Clone)]
pub struct Locator {
    registry: StationRegistry,
    resolver: Resolver,
}

impl Locator {
    pub fn new(registry: StationRegistry, options: ResolverOptions) -> Self {
        Self {
            registry,
            resolver: Resolver::new(options),
        }
    }

    /// Locator over the built-in tower table with default options
    pub fn builtin() -> Self {
        Self::new(StationRegistry::builtin(), ResolverOptions::default())
    }

    pub fn from_config(config: &ConfigFile) -> Result<Self, ConfigError> {
        let registry = config.registry()?;
        if registry.is_empty() {
            warn!("Configuration has no stations; only coordinate sightings will resolve");
        }
        Ok(Self::new(registry, config.resolver))
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Validate a request and turn it into sightings.
    pub fn resolve_sightings(&self, request: &FixRequest) -> FixResult<Vec<Sighting>> {
        check_sighting_count(request.sightings.len())?;

        request
            .sightings
            .iter()
            .enumerate()
            .map(|(index, input)| -> FixResult<Sighting> {
                let station = match &input.station {
                    StationRef::Named(name) => self.registry.station(name)?,
                    StationRef::Coordinate(p) => {
                        Station::new(input.station.label(), GeoPoint::try_new(p.lat, p.lon)?)
                    }
                };
                let bearing = parse_bearing(&format!("bearing {}", index + 1), &input.bearing)?;

                debug!(
                    station = %station.name,
                    lat = station.location.lat,
                    lon = station.location.lon,
                    bearing,
                    "Resolved sighting"
                );
                Ok(Sighting::new(station, bearing))
            })
            .collect()
    }

    /// Compute a fix with diagnostics.
    pub fn locate(&self, request: &FixRequest) -> FixResult<FixResponse> {
        let sightings = self.resolve_sightings(request)?;

        let estimate = self.resolver.resolve(&sightings).map_err(|e| {
            debug!(error = %e, sightings = sightings.len(), "Fix failed");
            e
        })?;

        if estimate.fallback_used {
            warn!(
                estimate = %estimate.point,
                "Intersections cancel out; falling back to the first intersection"
            );
        }

        let response = build_response(&sightings, estimate);
        info!(
            fix = %response.formatted,
            sightings = sightings.len(),
            spread_km = response.spread_km,
            "Computed fix"
        );
        Ok(response)
    }

    /// Compute a fix and return only the `"lat, lon"` string.
    pub fn locate_formatted(&self, request: &FixRequest) -> FixResult<String> {
        Ok(self.locate(request)?.formatted)
    }
}

fn build_response(sightings: &[Sighting], estimate: Estimate) -> FixResponse {
    let target = to_cartesian(&estimate.point);

    // A lone intersection is the estimate itself
    let spread_km = if estimate.intersections.len() < 2 {
        0.0
    } else {
        estimate
            .intersections
            .iter()
            .map(|p| angular_distance(&target, &to_cartesian(p)) * EARTH_MEAN_RADIUS_KM)
            .fold(0.0, f64::max)
    };

    let stations = sightings
        .iter()
        .map(|s| {
            let location = s.location();
            let normal = great_circle_normal(&location, s.bearing_deg);
            StationReport {
                name: s.station.name.clone(),
                location,
                bearing_deg: s.bearing_deg,
                bearing_to_estimate_deg: initial_bearing(&location, &estimate.point),
                distance_km: angular_distance(&to_cartesian(&location), &target)
                    * EARTH_MEAN_RADIUS_KM,
                cross_track_km: cross_track_angle(&target, &normal).abs() * EARTH_MEAN_RADIUS_KM,
            }
        })
        .collect();

    FixResponse {
        formatted: format_coordinate(&estimate.point),
        estimate: estimate.point,
        intersections: estimate.intersections,
        spread_km,
        stations,
        fallback_used: estimate.fallback_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SightingInput;
    use crate::utils::config::StationConfig;
    use crate::validation::error::FixError;

    fn golden_request() -> FixRequest {
        FixRequest::new(vec![
            SightingInput::at(GeoPoint::new(42.885653, -71.266487), "180"),
            SightingInput::at(GeoPoint::new(43.517927, -71.369339), "270"),
        ])
    }

    #[test]
    fn test_golden_fix_string() {
        let locator = Locator::builtin();
        assert_eq!(
            locator.locate_formatted(&golden_request()).unwrap(),
            "43.51788090, -71.26648700"
        );
    }

    #[test]
    fn test_station_reports() {
        let response = Locator::builtin().locate(&golden_request()).unwrap();
        assert_eq!(response.intersections.len(), 1);
        assert_eq!(response.spread_km, 0.0);
        assert!(!response.fallback_used);
        assert_eq!(response.stations.len(), 2);

        let first = &response.stations[0];
        assert_eq!(first.bearing_deg, 180.0);
        // The fix lies due north of the first station, behind its bearing
        let back = first.bearing_to_estimate_deg;
        assert!(back < 1e-6 || back > 360.0 - 1e-6, "bearing {}", back);
        assert!((70.0..71.0).contains(&first.distance_km), "{}", first.distance_km);

        for report in &response.stations {
            assert!(report.cross_track_km < 1e-6);
        }
    }

    #[test]
    fn test_named_three_line_fix() {
        let request = FixRequest::default()
            .with_sighting(SightingInput::named("WARNER_HILL_TOWER", "330"))
            .with_sighting(SightingInput::named("BELKNAP_TOWER", "200"))
            .with_sighting(SightingInput::named("PAWTUCKAWAY_TOWER", "295.5"));

        let response = Locator::builtin().locate(&request).unwrap();
        assert_eq!(response.intersections.len(), 3);
        assert_eq!(response.stations[1].name, "BELKNAP_TOWER");
        assert!(response.spread_km > 0.0);
        assert!(response.estimate.lat > 42.0 && response.estimate.lat < 44.5);
        assert!(response.estimate.lon > -73.0 && response.estimate.lon < -70.0);
    }

    #[test]
    fn test_unknown_station() {
        let request = FixRequest::new(vec![
            SightingInput::named("WARNER_HILL_TOWER", "10"),
            SightingInput::named("ATLANTIS_TOWER", "200"),
        ]);
        assert_eq!(
            Locator::builtin().locate(&request),
            Err(FixError::UnknownStation("ATLANTIS_TOWER".to_string()))
        );
    }

    #[test]
    fn test_missing_bearing() {
        let request = FixRequest::new(vec![
            SightingInput::named("WARNER_HILL_TOWER", "10"),
            SightingInput::named("BELKNAP_TOWER", ""),
        ]);
        assert_eq!(
            Locator::builtin().locate(&request),
            Err(FixError::invalid_input("bearing 2", "is required"))
        );
    }

    #[test]
    fn test_wrong_sighting_count() {
        let request = FixRequest::new(vec![SightingInput::named("WARNER_HILL_TOWER", "10")]);
        assert!(matches!(
            Locator::builtin().locate(&request),
            Err(FixError::InvalidInput { field, .. }) if field == "sightings"
        ));
    }

    #[test]
    fn test_out_of_range_coordinate_station() {
        let request = FixRequest::new(vec![
            SightingInput::at(GeoPoint::new(95.0, 0.0), "10"),
            SightingInput::named("BELKNAP_TOWER", "200"),
        ]);
        assert!(matches!(
            Locator::builtin().locate(&request),
            Err(FixError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_degenerate_sightings() {
        let request = FixRequest::new(vec![
            SightingInput::at(GeoPoint::new(0.0, 0.0), "90"),
            SightingInput::at(GeoPoint::new(0.0, 90.0), "90"),
        ]);
        assert!(matches!(
            Locator::builtin().locate(&request),
            Err(FixError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_from_config_uses_configured_stations() {
        let config = ConfigFile {
            stations: vec![
                StationConfig::new("EAST_POST", 42.885653, -71.266487),
                StationConfig::new("NORTH_POST", 43.517927, -71.369339),
            ],
            ..ConfigFile::default()
        };
        let locator = Locator::from_config(&config).unwrap();
        assert_eq!(locator.registry().len(), 2);

        let request = FixRequest::new(vec![
            SightingInput::named("EAST_POST", "180"),
            SightingInput::named("NORTH_POST", "270"),
        ]);
        assert_eq!(
            locator.locate_formatted(&request).unwrap(),
            "43.51788090, -71.26648700"
        );

        let request = FixRequest::new(vec![
            SightingInput::named("WARNER_HILL_TOWER", "180"),
            SightingInput::named("NORTH_POST", "270"),
        ]);
        assert!(matches!(
            locator.locate(&request),
            Err(FixError::UnknownStation(_))
        ));
    }
}
