//! Error types for parsing and the estimation pipeline.
use std::path::PathBuf;
use thiserror::Error;

/// A single CSV line that could not be turned into a trade observation.
///
/// Non-fatal: the loader logs it, counts it and drops the line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordParseError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("invalid timestamp {value:?}: {reason}")]
    Timestamp { value: String, reason: String },

    #[error("invalid fractional seconds {0:?}")]
    Fraction(String),

    #[error("invalid {field} {value:?}")]
    Number { field: &'static str, value: String },
}

/// Pipeline-level failures.
#[derive(Error, Debug)]
pub enum LagError {
    /// The input could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input was opened but reading it failed part way.
    #[error("failed reading {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The loader produced no valid records.
    #[error("no trades read from {}", path.display())]
    EmptyDataset { path: PathBuf },

    /// One of the two venue groups is empty, so nothing can be matched.
    #[error("not enough trades from both exchanges to estimate lag (A: {venue_a}, B: {venue_b})")]
    InsufficientData { venue_a: usize, venue_b: usize },
}
