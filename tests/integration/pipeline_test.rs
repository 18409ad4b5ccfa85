use std::fs::File;

use crate::utils::{gene, phen, random_genes, three_gene_dataset};
use gene_disease::table::column_values;
use gene_disease::{
    ExpanderConfig, PipelineConfig, build_association_table, expand_genes, load_gene_records,
    run_filters, run_pipeline, write_table,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::json;

fn expander(max_workers: usize) -> ExpanderConfig {
    ExpanderConfig {
        max_workers: Some(max_workers),
        chunksize: 2,
        ..Default::default()
    }
}

/// Three genes sharing disease 10 survive, the uncertain disease 11 does not
#[test]
fn test_end_to_end_three_genes() -> gene_disease::Result<()> {
    let genes = three_gene_dataset();
    let outcome = run_pipeline(&genes, &expander(4), &PipelineConfig::default(), |_| {})?;

    let table = &outcome.table;
    assert_eq!(table.num_rows(), 3);
    assert_eq!(
        column_values(table, "phen_mim_number")?,
        vec![Some("10".to_string()); 3]
    );
    assert_eq!(
        column_values(table, "gene_mim_number")?,
        vec![Some("100".to_string()), Some("200".to_string()), Some("300".to_string())]
    );

    let schema = table.schema();
    let columns: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        columns,
        vec![
            "gene_mim_number",
            "approved_gene_symbol",
            "entrez_gene_id",
            "phen_mim_number",
            "mapping_key"
        ]
    );
    Ok(())
}

/// Each step is reported with its counts, in order
#[test]
fn test_step_reports() -> gene_disease::Result<()> {
    let mut seen = Vec::new();
    let outcome = run_pipeline(
        &three_gene_dataset(),
        &expander(2),
        &PipelineConfig::default(),
        |report| seen.push(report.step.clone()),
    )?;

    let counts: Vec<(usize, usize, usize)> = outcome
        .reports
        .iter()
        .map(|r| (r.rows, r.unique_genes, r.unique_diseases))
        .collect();
    assert_eq!(counts, vec![(4, 3, 2), (3, 3, 1), (3, 3, 1), (3, 3, 1)]);

    assert_eq!(
        seen,
        vec![
            "Initial dataset",
            "After removing uncertain disease names ('?')",
            "After keeping mapping keys = 3",
            "After keeping diseases with ≥3 associated genes",
        ]
    );
    Ok(())
}

/// The support threshold is computed after the earlier filters
#[test]
fn test_support_counted_after_mapping_filter() -> gene_disease::Result<()> {
    // Disease 20 has three genes, but one link has mapping key 2 and is removed first
    let genes = vec![
        gene(1, "A", 1, vec![phen(20, Some("D"), json!(3))]),
        gene(2, "B", 2, vec![phen(20, Some("D"), json!(3))]),
        gene(3, "C", 3, vec![phen(20, Some("D"), json!(2))]),
    ];
    let outcome = run_pipeline(&genes, &expander(2), &PipelineConfig::default(), |_| {})?;
    assert_eq!(outcome.table.num_rows(), 0);
    assert_eq!(outcome.reports[2].rows, 2);
    Ok(())
}

/// The threshold is configurable
#[test]
fn test_min_genes_configurable() -> gene_disease::Result<()> {
    let config = PipelineConfig {
        min_genes_per_disease: 1,
        ..Default::default()
    };
    let genes = vec![gene(1, "A", 1, vec![phen(20, Some("D"), json!("3"))])];
    let outcome = run_pipeline(&genes, &expander(1), &config, |_| {})?;
    assert_eq!(outcome.table.num_rows(), 1);
    Ok(())
}

/// Running the filters on a prebuilt table gives the same result as the full pipeline
#[test]
fn test_worker_count_does_not_change_result() -> gene_disease::Result<()> {
    let genes = random_genes(11, 400, 4);
    let config = PipelineConfig {
        min_genes_per_disease: 2,
        ..Default::default()
    };

    let one = run_pipeline(&genes, &expander(1), &config, |_| {})?;

    let rows = expand_genes(&genes, &expander(8))?;
    let table = build_association_table(
        &rows,
        &ExpanderConfig::default().columns.table_column_names(),
    )?;
    let eight = run_filters(table, &config, |_| {})?;

    assert_eq!(one.reports, eight.reports);
    assert_eq!(one.table, eight.table);
    Ok(())
}

/// Load from JSON Lines, run, and write Parquet and CSV
#[test]
fn test_load_run_and_write() -> gene_disease::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("genes.jsonl");
    let lines: Vec<String> = three_gene_dataset()
        .into_iter()
        .map(|g| serde_json::Value::Object(g).to_string())
        .collect();
    std::fs::write(&input, lines.join("\n")).expect("write input");

    let genes = load_gene_records(&input)?;
    assert_eq!(genes.len(), 3);
    let outcome = run_pipeline(&genes, &expander(2), &PipelineConfig::default(), |_| {})?;

    let parquet_path = dir.path().join("out.parquet");
    write_table(&outcome.table, &parquet_path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&parquet_path).expect("open"))?
        .build()?;
    let rows: usize = reader.map(|b| b.map(|b| b.num_rows())).sum::<Result<usize, _>>()?;
    assert_eq!(rows, 3);

    let csv_path = dir.path().join("out.csv");
    write_table(&outcome.table, &csv_path)?;
    let csv = std::fs::read_to_string(&csv_path).expect("read csv");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("gene_mim_number,approved_gene_symbol,entrez_gene_id,phen_mim_number,mapping_key")
    );
    assert_eq!(lines.count(), 3);
    Ok(())
}
