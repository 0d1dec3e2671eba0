//! Error types for the schematic canvas

use crate::models::{ElementKind, NodeId};
use crate::parse::GafError;
use thiserror::Error;

pub type SchematicResult<T> = Result<T, SchematicError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchematicError {
    /// Raw GAF source could not be read
    #[error("GAF import failed: {0}")]
    Gaf(#[from] GafError),

    /// A handle refers to a node that is no longer in the render tree
    #[error("node {0} is not part of the render tree")]
    UnknownNode(NodeId),

    #[error("node {node} is a {found:?} element, expected {expected:?}")]
    WrongKind {
        node: NodeId,
        expected: ElementKind,
        found: ElementKind,
    },
}

/// Failures of the component library seam
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    /// Library-based symbol lookup does not exist yet
    #[error("component library lookup not implemented (requested '{type_hint}')")]
    NotImplemented { type_hint: String },

    #[error("symbol '{0}' not found in library")]
    UnknownSymbol(String),
}
