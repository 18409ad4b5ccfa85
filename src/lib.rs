//! A Rust library for turning nested gene/phenotype records into a curated
//! gene-disease association table.
//!
//! Gene records are expanded into flat rows in parallel, loaded into an Arrow
//! record batch and narrowed by a fixed sequence of filters.

pub mod config;
pub mod error;
pub mod expander;
pub mod filter;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod table;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{ColumnSpec, ExpanderConfig, PipelineConfig};
pub use error::{Error, RecordKind, Result};
pub use models::{Cell, FlatRow, GeneRecord};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Core operations
pub use expander::{expand_genes, rows_for_gene};
pub use loader::load_gene_records;
pub use pipeline::{PipelineOutcome, StepReport, run_filters, run_pipeline};
pub use table::build_association_table;
pub use utils::io::write_table;
