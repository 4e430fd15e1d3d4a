//! Fix output formatting
//!
//! The canonical rendering of a fix is `"{lat}, {lon}"` with eight decimals.
//! On top of that this module builds the map search link, a detailed text
//! report, and JSON.

use crate::api::types::{FixResponse, OutputFormat};
use crate::core::{GeoPoint, COORDINATE_DECIMALS, MAPS_SEARCH_URL};

/// Render a point as `"lat, lon"` with eight decimals.
pub fn format_coordinate(point: &GeoPoint) -> String {
    format!("{}, {}", fixed(point.lat), fixed(point.lon))
}

fn fixed(value: f64) -> String {
    let text = format!("{:.*}", COORDINATE_DECIMALS, value);
    // Values that round to zero never carry a sign
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Map search URL for a point.
pub fn maps_search_url(point: &GeoPoint) -> String {
    format!("{}{}", MAPS_SEARCH_URL, encode_query_component(&format_coordinate(point)))
}

/// Percent-encode everything outside the URI-component unreserved set.
fn encode_query_component(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len() * 3);
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Human-readable report
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Append per-station lines and spread after the coordinate
    pub include_details: bool,
}

impl TextFormatter {
    pub fn format_text(&self, response: &FixResponse) -> String {
        if !self.include_details {
            return response.formatted.clone();
        }

        let mut lines = vec![response.formatted.clone()];
        for station in &response.stations {
            lines.push(format!(
                "  {}: bearing {:.2}°, bearing to fix {:.2}°, {:.3} km away, {:.3} km off line",
                station.name,
                station.bearing_deg,
                station.bearing_to_estimate_deg,
                station.distance_km,
                station.cross_track_km
            ));
        }
        if response.intersections.len() > 1 {
            lines.push(format!(
                "  spread of {} intersections: {:.3} km",
                response.intersections.len(),
                response.spread_km
            ));
        }
        if response.fallback_used {
            lines.push(
                "  spherical mean undefined, using first intersection".to_string(),
            );
        }
        lines.join("\n")
    }
}

/// JSON rendering of the full response
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn format_json(&self, response: &FixResponse) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(response)
        } else {
            serde_json::to_string(response)
        }
    }
}

/// Renders a [`FixResponse`] in the chosen [`OutputFormat`]
#[derive(Debug, Clone, Default)]
pub struct FixFormatter {
    format: OutputFormat,
    details: bool,
}

impl FixFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Include per-station diagnostics in text output
    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    pub fn render(&self, response: &FixResponse) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Text => Ok(TextFormatter {
                include_details: self.details,
            }
            .format_text(response)),
            OutputFormat::Json => JsonFormatter::pretty().format_json(response),
            OutputFormat::MapsUrl => Ok(maps_search_url(&response.estimate)),
        }
    }
}
