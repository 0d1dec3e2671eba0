//! SVG rendering output
//!
//! Serializes a `RenderTree` to SVG markup, either as a standalone document
//! (with XML declaration) or as a fragment for `innerHTML`.

pub mod document;
pub mod elements;

pub use document::*;
pub use elements::*;
