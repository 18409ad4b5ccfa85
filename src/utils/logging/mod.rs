//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for logging, console reports, and progress tracking.

pub mod console;
pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::console::{format_count, print_completion, print_step_report};
pub use self::log::{log_operation_complete, log_operation_start, log_stage};
pub use self::progress::{create_main_progress_bar, finish_and_clear};
