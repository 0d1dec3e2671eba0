//! Parsing module for schematic sources
//!
//! Currently only the GAF object reader lives here.

pub mod errors;
pub mod gaf;

pub use errors::*;
pub use gaf::parse_gaf;
