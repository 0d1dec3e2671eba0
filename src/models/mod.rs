//! Data models for the schematic canvas
//!
//! - `render_tree`: arena of SVG nodes, the canonical visual model
//! - `elements`: element kinds and handles returned by the primitive factory
//! - `gaf`: objects imported from GAF sources

pub mod elements;
pub mod gaf;
pub mod render_tree;

pub use elements::*;
pub use gaf::*;
pub use render_tree::{fmt_num, Node, NodeId, RenderTree};
