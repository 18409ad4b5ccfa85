//! Gene record loading
//!
//! Reads the serialized gene collection from disk. Two layouts are accepted:
//! a JSON document holding an array of gene objects, or JSON Lines with one
//! gene object per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::GeneRecord;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// On-disk layout of the gene collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A single JSON array of gene objects
    JsonArray,
    /// One JSON gene object per line
    JsonLines,
}

impl InputFormat {
    /// Pick the format from the file extension; anything unknown is read as a JSON array
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jsonl" | "ndjson") => Self::JsonLines,
            _ => Self::JsonArray,
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::io(path, e))
}

fn into_gene(value: Value, index: usize) -> Result<GeneRecord> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::InvalidRecord(format!(
            "gene #{index} is not an object (found {})",
            json_type_name(&other)
        ))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read a JSON array of gene objects
pub fn read_json_array(path: &Path) -> Result<Vec<GeneRecord>> {
    let reader = open(path)?;
    let value: Value = serde_json::from_reader(reader).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        line: None,
        source,
    })?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| into_gene(item, i))
            .collect(),
        other => Err(Error::InvalidRecord(format!(
            "expected an array of genes in {}, found {}",
            path.display(),
            json_type_name(&other)
        ))),
    }
}

/// Read JSON Lines, one gene object per non-blank line
pub fn read_json_lines(path: &Path) -> Result<Vec<GeneRecord>> {
    let reader = open(path)?;
    let mut genes = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            line: Some(line_idx + 1),
            source,
        })?;
        let index = genes.len();
        genes.push(into_gene(value, index)?);
    }

    Ok(genes)
}

/// Load all gene records from `path`, choosing the layout from its extension
pub fn load_gene_records(path: &Path) -> Result<Vec<GeneRecord>> {
    log_operation_start("Loading gene records from", path);
    let start = Instant::now();

    let genes = match InputFormat::from_path(path) {
        InputFormat::JsonArray => read_json_array(path)?,
        InputFormat::JsonLines => read_json_lines(path)?,
    };

    log_operation_complete("loaded", path, genes.len(), Some(start.elapsed()));
    Ok(genes)
}
