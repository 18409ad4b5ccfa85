//! Error handling for the gene-disease pipeline.

use std::fmt;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Which kind of input record a field was looked up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A top-level gene record
    Gene,
    /// A phenotype record nested inside a gene
    Phenotype,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gene => write!(f, "gene"),
            Self::Phenotype => write!(f, "phenotype"),
        }
    }
}

/// Specialized error type for the pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error opening, reading or writing a file
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file could not be parsed as JSON
    #[error("Failed to parse {}{}: {source}", .path.display(), .line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    /// An input record does not have the expected structure
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A required field is missing from a gene or phenotype record
    #[error("Missing field '{field}' in {kind} record (gene #{gene_index})")]
    MissingField {
        kind: RecordKind,
        field: String,
        gene_index: usize,
    },

    /// A worker panicked during parallel expansion
    #[error("Worker failed during expansion: {0}")]
    WorkerPanic(String),

    /// The worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A column referenced by an operation is not in the table
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column does not have the expected Arrow type
    #[error("Column '{column}' is not a {expected} array")]
    ColumnType { column: String, expected: String },

    /// A flat row does not have as many cells as the table has columns
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Error from Arrow compute or batch construction
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),
}

impl Error {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
