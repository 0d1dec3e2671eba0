//! Component library seam
//!
//! `append_component` asks a `ComponentLibrary` for the shape of a type hint.
//! No library backend exists yet: `NoLibrary` reports `NotImplemented` for
//! every hint and the canvas falls back to the square marker.

use super::errors::LibraryError;
use serde::{Deserialize, Serialize};

/// Shape used to draw a component
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum ComponentShape {
    /// Fixed-size square at the component origin
    Marker { size: f64 },
    /// Symbol resolved from a library (raw SVG fragment)
    Symbol { name: String, svg: String },
}

pub trait ComponentLibrary {
    fn lookup(&self, type_hint: &str) -> Result<ComponentShape, LibraryError>;
}

/// The only library available today
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLibrary;

impl ComponentLibrary for NoLibrary {
    fn lookup(&self, type_hint: &str) -> Result<ComponentShape, LibraryError> {
        Err(LibraryError::NotImplemented {
            type_hint: type_hint.to_string(),
        })
    }
}

/// Resolve the shape for an optional type hint, falling back to the marker
pub fn resolve_shape(
    library: &dyn ComponentLibrary,
    type_hint: Option<&str>,
    marker_size: f64,
) -> ComponentShape {
    let marker = ComponentShape::Marker { size: marker_size };
    let Some(hint) = type_hint.filter(|h| !h.is_empty()) else {
        return marker;
    };
    match library.lookup(hint) {
        Ok(shape) => shape,
        Err(e) => {
            log::debug!("{}; using marker", e);
            marker
        }
    }
}
