//! The association table
//!
//! Flat rows become an Arrow [`RecordBatch`] with one nullable `Utf8` column per
//! field. The helpers here are the table operations the filter pipeline needs:
//! distinct counts and column removal.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::models::{FlatRow, association_schema};
use crate::utils::arrow::{get_column_index, get_string_column};

/// Build the association table from flat rows.
///
/// Every row must have exactly one cell per column name; row order is kept.
pub fn build_association_table(rows: &[FlatRow], column_names: &[String]) -> Result<RecordBatch> {
    let width = column_names.len();
    if let Some((row, bad)) = rows.iter().find_position(|r| r.len() != width) {
        return Err(Error::RowShape {
            row,
            expected: width,
            actual: bad.len(),
        });
    }

    let columns: Vec<ArrayRef> = (0..width)
        .map(|col| {
            let array: StringArray = rows.iter().map(|r| r[col].as_deref()).collect();
            Arc::new(array) as ArrayRef
        })
        .collect();

    Ok(RecordBatch::try_new(association_schema(column_names), columns)?)
}

/// Number of distinct non-null values in a `Utf8` column
pub fn distinct_count(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    let column = get_string_column(batch, column_name)?;
    let distinct: FxHashSet<&str> = column.iter().flatten().collect();
    Ok(distinct.len())
}

/// Return a copy of `batch` without the named column
pub fn drop_column(batch: &RecordBatch, column_name: &str) -> Result<RecordBatch> {
    let idx = get_column_index(batch, column_name)?;
    let keep: Vec<usize> = (0..batch.num_columns()).filter(|&i| i != idx).collect();
    Ok(batch.project(&keep)?)
}

/// Read a whole `Utf8` column back as owned cells
pub fn column_values(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<String>>> {
    let column = get_string_column(batch, column_name)?;
    Ok((0..column.len())
        .map(|i| (!column.is_null(i)).then(|| column.value(i).to_string()))
        .collect())
}
