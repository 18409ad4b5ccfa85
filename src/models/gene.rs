//! Gene and phenotype records and the flat rows produced from them
//!
//! Input records are kept as loosely typed JSON maps: the expander only needs
//! the fields named by a [`ColumnSpec`](crate::config::ColumnSpec), and those
//! fields may hold integers, strings or nulls depending on the source.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use serde_json::{Map, Value};

/// A gene record: `mim_number`, `approved_gene_symbol`, `entrez_gene_id`,
/// `phenotypes`, plus whatever else the source carries
pub type GeneRecord = Map<String, Value>;

/// A phenotype record nested in a gene's phenotype list
pub type PhenotypeRecord = Map<String, Value>;

/// One scalar cell of a flat row; `None` is a null
pub type Cell = Option<String>;

/// One gene/phenotype pair: gene cells followed by phenotype cells
pub type FlatRow = Vec<Cell>;

/// Render a JSON value as a table cell.
///
/// Strings are kept verbatim, `null` becomes a null cell and every other
/// value keeps its JSON text, so `3` and `"3"` both read back as `3`.
///
/// Distinct counts compare this text, not the typed value: `1` and `"1"` are
/// the same cell while `1` and `1.0` are different ones.
#[must_use]
pub fn cell_from_value(value: &Value) -> Cell {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Arrow schema of the association table: one nullable `Utf8` column per name
#[must_use]
pub fn association_schema(column_names: &[String]) -> Arc<Schema> {
    let fields: Vec<Field> = column_names
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}
