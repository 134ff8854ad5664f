//! Error types for the matcher.

use thiserror::Error;

/// Validation failure raised before any candidate is examined.
///
/// Running out of candidates or of time is not an error: both produce a
/// (possibly empty) [`SearchResult`](super::SearchResult).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid target amount '{input}': expected a positive decimal")]
    InvalidTarget { input: String },
}
