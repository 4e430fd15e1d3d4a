//! Fix API: request/response types, output formatting, and the synchronous locator

pub mod locator;
pub mod types;
pub mod formatting;

pub use types::{FixRequest, FixResponse, OutputFormat, SightingInput, StationRef, StationReport};
pub use locator::Locator;
pub use formatting::{
    format_coordinate, maps_search_url, FixFormatter, JsonFormatter, TextFormatter,
};
