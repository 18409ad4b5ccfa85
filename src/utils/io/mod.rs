//! IO utilities for persisting the association table
//!
//! The library never writes on its own; these are used by the command line
//! front end when an output path is given.

pub mod csv;
pub mod parquet;

use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

pub use self::csv::write_csv;
pub use self::parquet::write_parquet;

/// Supported output file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Parquet,
    Csv,
}

impl OutputFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("parquet") => Ok(Self::Parquet),
            Some("csv") => Ok(Self::Csv),
            _ => Err(Error::Config(format!(
                "Unsupported output format for {} (expected .parquet or .csv)",
                path.display()
            ))),
        }
    }
}

/// Write `batch` to `path` in the format implied by its extension
pub fn write_table(batch: &RecordBatch, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path)?;
    log_operation_start("Writing association table to", path);
    let start = Instant::now();

    match format {
        OutputFormat::Parquet => write_parquet(batch, path)?,
        OutputFormat::Csv => write_csv(batch, path)?,
    }

    log_operation_complete("wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}
