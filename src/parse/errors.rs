//! Error types for the GAF reader

use thiserror::Error;

pub type GafResult<T> = Result<T, GafError>;

/// Failures the reader cannot recover from
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GafError {
    /// A record whose fields cannot be tokenised (line is 1-based)
    #[error("line {line}: malformed {record} record: {reason}")]
    MalformedRecord {
        line: usize,
        record: char,
        reason: String,
    },

    /// `{` or `[` without a matching close before end of input
    #[error("line {line}: block opened here is never closed")]
    UnterminatedBlock { line: usize },

    /// A record announced more payload lines than the input contains
    #[error("line {line}: expected {expected} more line(s), input ended")]
    UnexpectedEof { line: usize, expected: usize },
}
