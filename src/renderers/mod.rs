//! Renderers module for the schematic canvas
//!
//! Converts the in-memory render tree into output markup.

pub mod svg;

pub use svg::{render_document, render_tree};
