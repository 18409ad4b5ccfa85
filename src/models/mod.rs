//! Domain models for the gene-disease pipeline
//!
//! Gene and phenotype input records, and the flat rows the expander builds from them.

pub mod gene;

// Re-export commonly used types
pub use gene::{Cell, FlatRow, GeneRecord, PhenotypeRecord, association_schema, cell_from_value};
