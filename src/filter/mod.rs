//! Filtering capabilities for the association table
//!
//! Row filters implement [`BatchFilter`]: they compute a boolean mask over a
//! record batch and keep the rows where it is true.

pub mod association;
pub mod core;

pub use association::{MappingKeyFilter, MinGeneSupportFilter, UncertainNameFilter, coerce_numeric};
pub use core::{BatchFilter, filter_record_batch};
