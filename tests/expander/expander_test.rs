use crate::utils::{gene, phen, phenotype_count, random_genes, three_gene_dataset};
use gene_disease::{ColumnSpec, Error, ExpanderConfig, RecordKind, expand_genes};
use serde_json::json;

fn config(max_workers: usize, chunksize: usize) -> ExpanderConfig {
    ExpanderConfig {
        max_workers: Some(max_workers),
        chunksize,
        ..Default::default()
    }
}

/// Row count equals the total number of phenotypes
#[test]
fn test_row_count_matches_phenotype_total() -> gene_disease::Result<()> {
    let genes = random_genes(7, 500, 6);
    let expected: usize = genes.iter().map(phenotype_count).sum();

    let rows = expand_genes(&genes, &config(4, 16))?;
    assert_eq!(rows.len(), expected);
    assert!(rows.iter().all(|r| r.len() == ColumnSpec::default().width()));
    Ok(())
}

/// Output order does not depend on worker count or chunk size
#[test]
fn test_order_is_independent_of_parallelism() -> gene_disease::Result<()> {
    let genes = random_genes(42, 1_000, 5);

    let sequential = expand_genes(&genes, &config(1, 256))?;
    for (workers, chunksize) in [(8, 1), (8, 7), (3, 256), (8, 10_000)] {
        let parallel = expand_genes(&genes, &config(workers, chunksize))?;
        assert_eq!(
            sequential, parallel,
            "output differs with {workers} workers and chunksize {chunksize}"
        );
    }
    Ok(())
}

/// Rows follow gene order, then phenotype order within each gene
#[test]
fn test_rows_follow_input_order() -> gene_disease::Result<()> {
    let genes = three_gene_dataset();
    let rows = expand_genes(&genes, &config(8, 1))?;

    let keys: Vec<(String, String)> = rows
        .iter()
        .map(|r| (r[0].clone().unwrap(), r[3].clone().unwrap()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("100".to_string(), "10".to_string()),
            ("100".to_string(), "11".to_string()),
            ("200".to_string(), "10".to_string()),
            ("300".to_string(), "10".to_string()),
        ]
    );
    Ok(())
}

/// Empty and absent phenotype lists contribute nothing
#[test]
fn test_empty_and_absent_phenotypes() -> gene_disease::Result<()> {
    let mut without_field = gene(2, "B", 20, vec![]);
    without_field.remove("phenotypes");
    let genes = vec![
        gene(1, "A", 10, vec![]),
        without_field,
        gene(3, "C", 30, vec![phen(5, Some("Z"), json!(3))]),
    ];

    let rows = expand_genes(&genes, &config(2, 1))?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1].as_deref(), Some("C"));
    Ok(())
}

/// A missing phenotype field aborts the whole expansion
#[test]
fn test_missing_phenotype_field_is_fatal() {
    let mut genes = random_genes(3, 200, 3);
    genes.push(gene(
        999,
        "BAD",
        999,
        vec![json!({"mim_number": 1, "name": "no key"})],
    ));

    match expand_genes(&genes, &config(4, 8)) {
        Err(Error::MissingField {
            kind,
            field,
            gene_index,
        }) => {
            assert_eq!(kind, RecordKind::Phenotype);
            assert_eq!(field, "mapping_key");
            assert_eq!(gene_index, 200);
        }
        other => panic!("expected a missing field error, got {other:?}"),
    }
}

/// A null value is not a missing field
#[test]
fn test_null_values_become_null_cells() -> gene_disease::Result<()> {
    let genes = vec![gene(1, "A", 10, vec![phen(5, None, json!(null))])];
    let rows = expand_genes(&genes, &config(1, 1))?;
    assert_eq!(rows[0][4], None);
    assert_eq!(rows[0][5], None);
    Ok(())
}

/// Custom column selections and phenotype keys are honored
#[test]
fn test_custom_column_spec() -> gene_disease::Result<()> {
    let mut g = gene(1, "A", 10, vec![]);
    g.insert(
        "phens".to_string(),
        json!([{"mim_number": 7, "name": "N", "mapping_key": 3}]),
    );
    let config = ExpanderConfig {
        columns: ColumnSpec {
            gene_cols: vec!["approved_gene_symbol".to_string()],
            phen_cols: vec!["name".to_string(), "mim_number".to_string()],
            phen_key: "phens".to_string(),
        },
        max_workers: Some(2),
        ..Default::default()
    };

    let rows = expand_genes(&[g], &config)?;
    assert_eq!(
        rows,
        vec![vec![
            Some("A".to_string()),
            Some("N".to_string()),
            Some("7".to_string())
        ]]
    );
    Ok(())
}

/// No genes, no rows
#[test]
fn test_empty_input() -> gene_disease::Result<()> {
    assert!(expand_genes(&[], &ExpanderConfig::default())?.is_empty());
    Ok(())
}
