//! Core types and constants for the bearing-fix resolver

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
