//! Logging utilities
//!
//! Standardized log lines for file operations and pipeline stages.

use std::path::Path;
use std::time::Duration;

/// Log the start of a file operation
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - File being read or written
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log the completion of a file operation
///
/// # Arguments
/// * `operation` - Past-tense verb for the operation ("loaded", "wrote")
/// * `path` - File that was read or written
/// * `items` - Number of records or rows handled
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, path: &Path, items: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} items ({}) in {:?}",
            operation,
            items,
            path.display(),
            duration
        ),
        None => log::info!("Successfully {} {} items ({})", operation, items, path.display()),
    }
}

/// Log how many rows a pipeline stage kept
pub fn log_stage(stage: &str, rows_before: usize, rows_after: usize) {
    log::debug!(
        "{stage}: kept {rows_after} of {rows_before} rows ({} dropped)",
        rows_before.saturating_sub(rows_after)
    );
}
