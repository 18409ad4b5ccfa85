//! Parallel expansion of gene records into flat association rows
//!
//! Each gene yields one row per phenotype: the gene's selected fields followed
//! by the phenotype's selected fields. Genes are split into ordered chunks and
//! expanded on a dedicated rayon pool; chunk results are collected by index, so
//! the output order is input order no matter which worker finishes first.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use indicatif::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;
use serde_json::Value;

use crate::config::{ColumnSpec, ExpanderConfig};
use crate::error::{Error, RecordKind, Result};
use crate::loader::json_type_name;
use crate::models::{FlatRow, GeneRecord, cell_from_value};
use crate::utils::logging::{create_main_progress_bar, finish_and_clear};

fn extract_cells(
    record: &GeneRecord,
    fields: &[String],
    kind: RecordKind,
    gene_index: usize,
    row: &mut FlatRow,
) -> Result<()> {
    for field in fields {
        let value = record.get(field).ok_or_else(|| Error::MissingField {
            kind,
            field: field.clone(),
            gene_index,
        })?;
        row.push(cell_from_value(value));
    }
    Ok(())
}

/// Build the flat rows for a single gene.
///
/// The gene's fields are read even when it has no phenotypes, so a gene missing
/// a required field fails regardless. An absent phenotype list yields no rows.
pub fn rows_for_gene(gene: &GeneRecord, spec: &ColumnSpec, gene_index: usize) -> Result<Vec<FlatRow>> {
    let mut base = Vec::with_capacity(spec.width());
    extract_cells(gene, &spec.gene_cols, RecordKind::Gene, gene_index, &mut base)?;

    let phenotypes = match gene.get(&spec.phen_key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(Error::InvalidRecord(format!(
                "'{}' of gene #{gene_index} is not a list (found {})",
                spec.phen_key,
                json_type_name(other)
            )));
        }
    };

    phenotypes
        .iter()
        .enumerate()
        .map(|(phen_index, item)| {
            let phen = item.as_object().ok_or_else(|| {
                Error::InvalidRecord(format!(
                    "phenotype #{phen_index} of gene #{gene_index} is not an object (found {})",
                    json_type_name(item)
                ))
            })?;
            let mut row = base.clone();
            extract_cells(phen, &spec.phen_cols, RecordKind::Phenotype, gene_index, &mut row)?;
            Ok(row)
        })
        .collect()
}

fn expand_chunk(
    chunk: &[GeneRecord],
    first_index: usize,
    spec: &ColumnSpec,
    pb: &ProgressBar,
) -> Result<Vec<FlatRow>> {
    let mut rows = Vec::new();
    for (offset, gene) in chunk.iter().enumerate() {
        rows.extend(rows_for_gene(gene, spec, first_index + offset)?);
    }
    pb.inc(chunk.len() as u64);
    Ok(rows)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run `op` on a fresh pool of `workers` threads.
///
/// The pool lives only for this call: its threads are spawned in a
/// `std::thread::scope`, so every worker has been joined before this returns,
/// on success and on failure alike. A panic on any worker comes back as
/// [`Error::WorkerPanic`].
pub(crate) fn run_on_pool<T, F>(workers: usize, op: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    let outcome = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("expander-{i}"))
        .build_scoped(
            |thread| thread.run(),
            |pool| panic::catch_unwind(AssertUnwindSafe(|| pool.install(op))),
        )?;

    outcome.map_err(|payload| Error::WorkerPanic(panic_message(payload.as_ref())))
}

/// Expand all genes into flat rows using a pool of worker threads.
///
/// Rows come out in gene order, then phenotype order within a gene. Any
/// missing field or malformed record aborts the whole expansion.
pub fn expand_genes(genes: &[GeneRecord], config: &ExpanderConfig) -> Result<Vec<FlatRow>> {
    config.validate()?;

    let workers = config.effective_workers();
    let chunksize = config.chunksize;
    let spec = &config.columns;
    info!(
        "Expanding {} genes with {workers} workers (chunksize {chunksize})",
        genes.len()
    );
    let start = Instant::now();

    let pb = create_main_progress_bar(genes.len() as u64, Some("Expanding genes"), config.show_progress);

    let chunks = run_on_pool(workers, || {
        genes
            .par_chunks(chunksize)
            .enumerate()
            .map(|(chunk_idx, chunk)| expand_chunk(chunk, chunk_idx * chunksize, spec, &pb))
            .collect::<Result<Vec<Vec<FlatRow>>>>()
    });
    finish_and_clear(&pb);
    let chunks = chunks??;

    debug!("Collected {} chunks", chunks.len());
    let rows: Vec<FlatRow> = chunks.into_iter().flatten().collect();

    info!(
        "Expanded {} genes into {} rows in {:?}",
        genes.len(),
        rows.len(),
        start.elapsed()
    );
    Ok(rows)
}
