//! Numeric tolerances and output parameters

/// Magnitude at or below which a cross product or resultant vector is treated as zero
pub const DEFAULT_DEGENERACY_EPSILON: f64 = 1e-12;

/// Decimal places used when rendering a coordinate
pub const COORDINATE_DECIMALS: usize = 8;

/// Mean Earth radius (IUGG) in kilometres, used only for reporting distances
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

/// Base URL for the "find in maps" search link
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";
