//! The gene-disease filter pipeline
//!
//! Expands gene records into the association table, then narrows it in four
//! fixed steps:
//!
//! 1. drop uncertain associations (disease name starting with `?`)
//! 2. keep mapping key 3 only
//! 3. drop the disease name column
//! 4. keep diseases supported by at least 3 distinct genes
//!
//! A [`StepReport`] is produced for the initial table and after steps 1, 2 and 4.

use std::time::Instant;

use arrow::record_batch::RecordBatch;
use log::info;
use serde::Serialize;

use crate::config::{ExpanderConfig, PipelineConfig};
use crate::error::Result;
use crate::expander::expand_genes;
use crate::filter::{BatchFilter, MappingKeyFilter, MinGeneSupportFilter, UncertainNameFilter};
use crate::models::GeneRecord;
use crate::table::{build_association_table, distinct_count, drop_column};
use crate::utils::logging::log_stage;

/// Size and diversity of the table after one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Human-readable step title
    pub step: String,
    /// Number of associations (rows)
    pub rows: usize,
    /// Distinct gene identifiers
    pub unique_genes: usize,
    /// Distinct disease identifiers
    pub unique_diseases: usize,
}

/// Final table plus the report of every step, in order
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Association table after the last step
    pub table: RecordBatch,
    /// One report per reported step, initial table first
    pub reports: Vec<StepReport>,
}

/// Summarize `batch` under the title `step`
pub fn step_report(batch: &RecordBatch, step: &str, config: &PipelineConfig) -> Result<StepReport> {
    Ok(StepReport {
        step: step.to_string(),
        rows: batch.num_rows(),
        unique_genes: distinct_count(batch, &config.gene_column)?,
        unique_diseases: distinct_count(batch, &config.disease_column)?,
    })
}

fn apply(filter: &dyn BatchFilter, batch: &RecordBatch, stage: &str) -> Result<RecordBatch> {
    let filtered = filter.filter(batch)?;
    log_stage(stage, batch.num_rows(), filtered.num_rows());
    Ok(filtered)
}

/// Run the four filter steps over an already built association table.
///
/// `on_report` is called with each report as soon as it is available.
pub fn run_filters<F>(table: RecordBatch, config: &PipelineConfig, mut on_report: F) -> Result<PipelineOutcome>
where
    F: FnMut(&StepReport),
{
    let mut reports = Vec::with_capacity(4);
    let mut record = |report: StepReport| {
        on_report(&report);
        reports.push(report);
    };

    record(step_report(&table, "Initial dataset", config)?);

    let uncertain = UncertainNameFilter::new(&config.name_column, &config.uncertain_prefix);
    let table = apply(&uncertain, &table, "uncertainty filter")?;
    record(step_report(
        &table,
        &format!("After removing uncertain disease names ('{}')", config.uncertain_prefix),
        config,
    )?);

    let mapping = MappingKeyFilter::new(&config.mapping_key_column, config.retained_mapping_key);
    let table = apply(&mapping, &table, "mapping-key filter")?;
    record(step_report(
        &table,
        &format!("After keeping mapping keys = {}", config.retained_mapping_key),
        config,
    )?);

    let table = drop_column(&table, &config.name_column)?;

    let support = MinGeneSupportFilter::new(
        &config.disease_column,
        &config.support_gene_column,
        config.min_genes_per_disease,
    );
    let table = apply(&support, &table, "support filter")?;
    record(step_report(
        &table,
        &format!(
            "After keeping diseases with ≥{} associated genes",
            config.min_genes_per_disease
        ),
        config,
    )?);

    Ok(PipelineOutcome { table, reports })
}

/// Expand `genes`, build the association table and run the filter steps
pub fn run_pipeline<F>(
    genes: &[GeneRecord],
    expander: &ExpanderConfig,
    config: &PipelineConfig,
    on_report: F,
) -> Result<PipelineOutcome>
where
    F: FnMut(&StepReport),
{
    let start = Instant::now();

    let rows = expand_genes(genes, expander)?;
    let table = build_association_table(&rows, &expander.columns.table_column_names())?;
    drop(rows);

    let outcome = run_filters(table, config, on_report)?;
    info!(
        "Pipeline finished with {} associations in {:?}",
        outcome.table.num_rows(),
        start.elapsed()
    );
    Ok(outcome)
}
