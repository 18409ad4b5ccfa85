//! Arrow data handling utilities
//!
//! Helpers for looking up and downcasting columns of record batches.

pub mod array_utils;

// Re-export commonly used functions for convenience
pub use array_utils::{downcast_array, get_column_index, get_string_column};
