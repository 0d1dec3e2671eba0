//! Schematic canvas WASM API
//!
//! - `helpers`: console logging macros, serde conversions, error conversion
//! - `schematic`: `EditorContext` and `Schematic` classes exported to JS
//! - `mount`: keeps a mounted canvas in step with its render tree

pub mod helpers;
mod mount;
pub mod schematic;

pub use schematic::{EditorContext, SchematicView};
