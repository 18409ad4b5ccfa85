use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;

use gene_disease::config::{CHUNKSIZE_ENV, MAX_WORKERS_ENV, env_usize};
use gene_disease::utils::logging::{print_completion, print_step_report};
use gene_disease::{ExpanderConfig, PipelineConfig, load_gene_records, run_pipeline, write_table};

#[derive(Parser)]
#[command(name = "gene-disease")]
#[command(about = "Build a curated gene-disease association table from gene/phenotype records")]
#[command(version)]
struct Cli {
    /// Gene records: a JSON array (.json) or JSON Lines (.jsonl, .ndjson)
    input: PathBuf,

    /// Write the final table here (.parquet or .csv)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Write the step reports here as JSON
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Worker threads for the expansion (defaults to the number of CPUs)
    #[arg(long)]
    max_workers: Option<usize>,

    /// Genes handed to a worker at a time
    #[arg(long)]
    chunksize: Option<usize>,

    /// Field holding each gene's phenotype list
    #[arg(long, default_value = "phenotypes")]
    phen_key: String,

    /// Minimum distinct genes a disease needs to be kept
    #[arg(long, default_value_t = 3)]
    min_genes: usize,

    /// Do not draw a progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let start = Instant::now();

    let mut expander = ExpanderConfig {
        max_workers: cli.max_workers.or_else(|| env_usize(MAX_WORKERS_ENV)),
        show_progress: !cli.no_progress,
        ..Default::default()
    };
    if let Some(chunksize) = cli.chunksize.or_else(|| env_usize(CHUNKSIZE_ENV)) {
        expander.chunksize = chunksize;
    }
    expander.columns.phen_key = cli.phen_key;

    let pipeline = PipelineConfig {
        min_genes_per_disease: cli.min_genes,
        ..Default::default()
    };

    let genes = load_gene_records(&cli.input)
        .with_context(|| format!("Failed to load gene records from {}", cli.input.display()))?;

    let outcome = run_pipeline(&genes, &expander, &pipeline, print_step_report)
        .context("Gene-disease pipeline failed")?;
    print_completion();

    if let Some(path) = &cli.report_json {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        serde_json::to_writer_pretty(file, &outcome.reports)
            .with_context(|| format!("Failed to write reports to {}", path.display()))?;
    }

    if let Some(path) = &cli.output {
        write_table(&outcome.table, path)
            .with_context(|| format!("Failed to write association table to {}", path.display()))?;
    }

    info!("Done in {:?}", start.elapsed());
    Ok(())
}
