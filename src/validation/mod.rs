//! Error taxonomy and boundary input validation

pub mod error;
pub mod input;

pub use error::{DegeneracyKind, FixError, FixResult};
pub use input::{check_sighting_count, parse_bearing, parse_coordinate, parse_sighting_spec};
