//! Configuration for the expander and the filter pipeline.

use crate::error::{Error, Result};

/// Default number of genes handed to a worker per scheduling unit
pub const DEFAULT_CHUNKSIZE: usize = 256;

/// Default name of the field holding a gene's phenotype list
pub const DEFAULT_PHEN_KEY: &str = "phenotypes";

/// Environment variable overriding the worker count
pub const MAX_WORKERS_ENV: &str = "GENE_DISEASE_MAX_WORKERS";

/// Environment variable overriding the chunk size
pub const CHUNKSIZE_ENV: &str = "GENE_DISEASE_CHUNKSIZE";

/// Which fields are pulled out of gene and phenotype records, and in what order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Fields read from each gene record
    pub gene_cols: Vec<String>,
    /// Fields read from each phenotype record
    pub phen_cols: Vec<String>,
    /// Field under which a gene's phenotype list is found
    pub phen_key: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            gene_cols: vec![
                "mim_number".to_string(),
                "approved_gene_symbol".to_string(),
                "entrez_gene_id".to_string(),
            ],
            phen_cols: vec![
                "mim_number".to_string(),
                "name".to_string(),
                "mapping_key".to_string(),
            ],
            phen_key: DEFAULT_PHEN_KEY.to_string(),
        }
    }
}

impl ColumnSpec {
    /// Number of cells in each flat row
    #[must_use]
    pub fn width(&self) -> usize {
        self.gene_cols.len() + self.phen_cols.len()
    }

    /// Column names of the association table.
    ///
    /// The leading gene and phenotype fields usually share a name (`mim_number`),
    /// so they get `gene_` and `phen_` prefixes.
    #[must_use]
    pub fn table_column_names(&self) -> Vec<String> {
        let mut names = prefix_first(&self.gene_cols, "gene_");
        names.extend(prefix_first(&self.phen_cols, "phen_"));
        names
    }
}

fn prefix_first(cols: &[String], prefix: &str) -> Vec<String> {
    cols.iter()
        .enumerate()
        .map(|(i, c)| if i == 0 { format!("{prefix}{c}") } else { c.clone() })
        .collect()
}

/// Configuration for the parallel expander
#[derive(Debug, Clone)]
pub struct ExpanderConfig {
    /// Fields to extract
    pub columns: ColumnSpec,
    /// Size of the worker pool; `None` means one worker per CPU
    pub max_workers: Option<usize>,
    /// Genes per scheduling unit
    pub chunksize: usize,
    /// Draw a progress bar while expanding
    pub show_progress: bool,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            columns: ColumnSpec::default(),
            max_workers: None,
            chunksize: DEFAULT_CHUNKSIZE,
            show_progress: false,
        }
    }
}

impl ExpanderConfig {
    /// Worker count actually used for the pool
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        self.max_workers.unwrap_or_else(num_cpus::get)
    }

    /// Check the configuration before any work is scheduled
    pub fn validate(&self) -> Result<()> {
        if self.columns.gene_cols.is_empty() {
            return Err(Error::Config("gene_cols must not be empty".to_string()));
        }
        if self.columns.phen_cols.is_empty() {
            return Err(Error::Config("phen_cols must not be empty".to_string()));
        }
        if self.max_workers == Some(0) {
            return Err(Error::Config("max_workers must be at least 1".to_string()));
        }
        if self.chunksize == 0 {
            return Err(Error::Config("chunksize must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Configuration for the filter pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Gene identifier used in reports
    pub gene_column: String,
    /// Gene identifier used for the support count
    pub support_gene_column: String,
    /// Disease identifier
    pub disease_column: String,
    /// Disease name, dropped after the mapping-key filter
    pub name_column: String,
    /// Mapping key column
    pub mapping_key_column: String,
    /// Names starting with this prefix mark an uncertain association
    pub uncertain_prefix: String,
    /// The only mapping key that survives
    pub retained_mapping_key: f64,
    /// Minimum number of distinct genes a disease needs
    pub min_genes_per_disease: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            gene_column: "gene_mim_number".to_string(),
            support_gene_column: "entrez_gene_id".to_string(),
            disease_column: "phen_mim_number".to_string(),
            name_column: "name".to_string(),
            mapping_key_column: "mapping_key".to_string(),
            uncertain_prefix: "?".to_string(),
            retained_mapping_key: 3.0,
            min_genes_per_disease: 3,
        }
    }
}

/// Read a positive integer from the environment, ignoring unparseable values
#[must_use]
pub fn env_usize(var: &str) -> Option<usize> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}
