//! Row filters for the gene-disease association table

use std::collections::HashSet;

use arrow::array::BooleanArray;
use arrow::record_batch::RecordBatch;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Result;
use crate::filter::core::BatchFilter;
use crate::utils::arrow::get_string_column;

/// Drops rows whose disease name starts with the uncertainty marker.
///
/// Rows with a null name are kept.
#[derive(Debug, Clone)]
pub struct UncertainNameFilter {
    /// Disease name column
    pub column: String,
    /// Marker prefix, `?` in OMIM
    pub prefix: String,
}

impl UncertainNameFilter {
    #[must_use]
    pub fn new(column: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            prefix: prefix.into(),
        }
    }
}

impl BatchFilter for UncertainNameFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let names = get_string_column(batch, &self.column)?;
        Ok(names
            .iter()
            .map(|name| Some(!name.is_some_and(|n| n.starts_with(self.prefix.as_str()))))
            .collect())
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::from([self.column.clone()])
    }
}

/// Parse a cell as a float.
///
/// Surrounding whitespace is ignored and anything unparseable is `None`.
/// Accepts whatever `f64::from_str` does, including `inf` and `NaN`
/// spellings, none of which equal a finite mapping key.
#[must_use]
pub fn coerce_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

/// Keeps rows whose mapping key is numerically equal to the target code.
///
/// Null and non-numeric keys never match.
#[derive(Debug, Clone)]
pub struct MappingKeyFilter {
    /// Mapping key column
    pub column: String,
    /// Code that survives
    pub code: f64,
}

impl MappingKeyFilter {
    #[must_use]
    pub fn new(column: impl Into<String>, code: f64) -> Self {
        Self {
            column: column.into(),
            code,
        }
    }
}

impl BatchFilter for MappingKeyFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let keys = get_string_column(batch, &self.column)?;
        Ok(keys
            .iter()
            .map(|key| Some(key.and_then(coerce_numeric) == Some(self.code)))
            .collect())
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::from([self.column.clone()])
    }
}

/// Keeps rows whose disease is linked to at least `min_genes` distinct genes.
///
/// Counts are taken over the batch being filtered. Null gene identifiers are
/// not counted and rows without a disease identifier are dropped.
#[derive(Debug, Clone)]
pub struct MinGeneSupportFilter {
    /// Disease identifier column to group by
    pub disease_column: String,
    /// Gene identifier column whose distinct values are counted
    pub gene_column: String,
    /// Minimum distinct genes per disease
    pub min_genes: usize,
}

impl MinGeneSupportFilter {
    #[must_use]
    pub fn new(disease_column: impl Into<String>, gene_column: impl Into<String>, min_genes: usize) -> Self {
        Self {
            disease_column: disease_column.into(),
            gene_column: gene_column.into(),
            min_genes,
        }
    }

    /// Distinct gene count for every disease in the batch
    pub fn genes_per_disease(&self, batch: &RecordBatch) -> Result<FxHashMap<String, usize>> {
        let diseases = get_string_column(batch, &self.disease_column)?;
        let genes = get_string_column(batch, &self.gene_column)?;

        let mut groups: FxHashMap<&str, FxHashSet<&str>> = FxHashMap::default();
        for (disease, gene) in diseases.iter().zip(genes.iter()) {
            if let Some(disease) = disease {
                let group = groups.entry(disease).or_default();
                if let Some(gene) = gene {
                    group.insert(gene);
                }
            }
        }

        Ok(groups
            .into_iter()
            .map(|(disease, genes)| (disease.to_string(), genes.len()))
            .collect())
    }
}

impl BatchFilter for MinGeneSupportFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let counts = self.genes_per_disease(batch)?;
        let diseases = get_string_column(batch, &self.disease_column)?;
        Ok(diseases
            .iter()
            .map(|disease| {
                Some(disease.is_some_and(|d| counts.get(d).copied().unwrap_or(0) >= self.min_genes))
            })
            .collect())
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::from([self.disease_column.clone(), self.gene_column.clone()])
    }
}
