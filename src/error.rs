//! Error types for alignment, composition, export and CLI input

use std::path::PathBuf;

use thiserror::Error;

use crate::align::Channel;

/// The decomposition arrays do not form a usable rectangular shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataShapeError {
    #[error("{channel} has {actual} entries but times has {expected}")]
    LengthMismatch {
        channel: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("decomposition result is empty")]
    Empty,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    #[error(transparent)]
    Shape(#[from] DataShapeError),
    #[error("timestamp {0} ms is outside the representable calendar range")]
    TimestampOutOfRange(i64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("channel {0} is missing from the aligned series")]
    MissingChannel(Channel),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to rasterize chart: {0}")]
    Render(String),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("no data rows found")]
    Empty,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecomposeError {
    #[error(transparent)]
    Shape(#[from] DataShapeError),
    #[error("period must be between 2 and half of {len} observations, got {period}")]
    InvalidPeriod { period: usize, len: usize },
}

/// Any failure along the read → decompose → align → compose → export pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Align(#[from] AlignError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Decompose(#[from] DecomposeError),
}
