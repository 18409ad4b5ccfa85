use arrow::record_batch::RecordBatch;
use gene_disease::{ColumnSpec, GeneRecord, build_association_table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};

/// Build a phenotype record
#[must_use]
pub fn phen(mim: i64, name: Option<&str>, mapping_key: Value) -> Value {
    json!({"mim_number": mim, "name": name, "mapping_key": mapping_key})
}

/// Build a gene record with the given phenotypes
#[must_use]
pub fn gene(mim: i64, symbol: &str, entrez: i64, phenotypes: Vec<Value>) -> GeneRecord {
    let value = json!({
        "mim_number": mim,
        "approved_gene_symbol": symbol,
        "entrez_gene_id": entrez,
        "phenotypes": phenotypes,
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// The three-gene dataset: A and B and C share disease 10, A also has uncertain disease 11
#[must_use]
pub fn three_gene_dataset() -> Vec<GeneRecord> {
    vec![
        gene(
            100,
            "AAA",
            1,
            vec![phen(10, Some("X"), json!(3)), phen(11, Some("?Y"), json!(3))],
        ),
        gene(200, "BBB", 2, vec![phen(10, Some("X"), json!(3))]),
        gene(300, "CCC", 3, vec![phen(10, Some("X"), json!(3))]),
    ]
}

/// Random genes with 0..max_phens phenotypes each; some genes have no phenotype field
#[must_use]
pub fn random_genes(seed: u64, count: usize, max_phens: usize) -> Vec<GeneRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let n = rng.random_range(0..=max_phens);
            let phenotypes = (0..n)
                .map(|j| {
                    let key = rng.random_range(1..=4);
                    phen(
                        rng.random_range(1..50),
                        Some(format!("disease {i}-{j}").as_str()),
                        json!(key),
                    )
                })
                .collect();
            let mut g = gene(i as i64, &format!("G{i}"), 10_000 + i as i64, phenotypes);
            if rng.random_bool(0.1) {
                g.remove("phenotypes");
            }
            g
        })
        .collect()
}

/// Build an association table with the default columns from literal rows
#[must_use]
pub fn table(rows: &[[Option<&str>; 6]]) -> RecordBatch {
    let rows: Vec<Vec<Option<String>>> = rows
        .iter()
        .map(|r| r.iter().map(|c| c.map(str::to_string)).collect())
        .collect();
    build_association_table(&rows, &ColumnSpec::default().table_column_names())
        .expect("valid table")
}

/// Length of a gene's phenotype list, zero when absent
#[must_use]
pub fn phenotype_count(gene: &GeneRecord) -> usize {
    gene.get("phenotypes")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
