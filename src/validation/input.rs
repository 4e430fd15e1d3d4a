//! Parsing and validation of user-supplied sighting input
//!
//! Everything that reaches the resolver has passed through here: bearings are
//! finite and in range, coordinates are on the globe, and the sighting count
//! is two or three.

use crate::api::types::{SightingInput, StationRef};
use crate::core::GeoPoint;
use crate::validation::error::{FixError, FixResult};

/// Fewest sightings that give a fix
pub const MIN_SIGHTINGS: usize = 2;

/// Most sightings the resolver aggregates
pub const MAX_SIGHTINGS: usize = 3;

/// Parse a bearing in degrees.
///
/// Accepts values in [0, 360]; 360 is folded to 0.
pub fn parse_bearing(field: &str, text: &str) -> FixResult<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FixError::invalid_input(field, "is required"));
    }

    let bearing: f64 = text
        .parse()
        .map_err(|_| FixError::invalid_input(field, format!("'{}' is not a number", text)))?;

    if !bearing.is_finite() {
        return Err(FixError::invalid_input(field, "must be a finite number"));
    }
    if !(0.0..=360.0).contains(&bearing) {
        return Err(FixError::invalid_input(
            field,
            format!("{} is outside 0-360 degrees", bearing),
        ));
    }

    Ok(if bearing == 360.0 { 0.0 } else { bearing })
}

/// Parse a `lat,lon` pair in decimal degrees.
pub fn parse_coordinate(text: &str) -> FixResult<GeoPoint> {
    let (lat, lon) = text.split_once(',').ok_or_else(|| {
        FixError::invalid_input("coordinate", format!("'{}' is not a lat,lon pair", text))
    })?;

    let parse = |field: &str, value: &str| -> FixResult<f64> {
        value.trim().parse().map_err(|_| {
            FixError::invalid_input(field, format!("'{}' is not a number", value.trim()))
        })
    };

    GeoPoint::try_new(parse("latitude", lat)?, parse("longitude", lon)?)
}

/// Parse a `STATION:BEARING` sighting spec.
///
/// `STATION` is a registry name or a `lat,lon` pair. The bearing text is kept
/// as-is and validated when the fix is computed.
pub fn parse_sighting_spec(spec: &str) -> FixResult<SightingInput> {
    let (station, bearing) = spec.rsplit_once(':').ok_or_else(|| {
        FixError::invalid_input("sighting", format!("'{}' is not STATION:BEARING", spec))
    })?;

    let station = station.trim();
    if station.is_empty() {
        return Err(FixError::invalid_input("station", "is required"));
    }

    let station = if station.contains(',') {
        StationRef::Coordinate(parse_coordinate(station)?)
    } else {
        StationRef::Named(station.to_string())
    };

    Ok(SightingInput {
        station,
        bearing: bearing.trim().to_string(),
    })
}

/// Check that a fix request carries a usable number of sightings.
pub fn check_sighting_count(count: usize) -> FixResult<()> {
    if (MIN_SIGHTINGS..=MAX_SIGHTINGS).contains(&count) {
        Ok(())
    } else {
        Err(FixError::invalid_input(
            "sightings",
            format!(
                "expected {} or {} sightings, got {}",
                MIN_SIGHTINGS, MAX_SIGHTINGS, count
            ),
        ))
    }
}
