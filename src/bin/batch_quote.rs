//! Price a CSV of requests in parallel
//!
//! Input columns: `id,base_price,table,down_payment` (table and down_payment
//! may be empty; table takes the same names as the `quote` CLI, such as
//! `full`, `cheia`, `half` or `metade`). Writes one output row per admitted option, or a single row
//! carrying the error for requests that fail validation.

use anyhow::{Context, Result};
use clap::Parser;
use installment_calculator::{CalculatorConfig, PricingRequest, TableSelector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "batch_quote")]
#[command(author, version, about = "Price a CSV of installment requests", long_about = None)]
struct Cli {
    /// Input CSV of requests
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV of options
    #[arg(short, long, default_value = "installment_options.csv")]
    output: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RequestRow {
    id: String,
    base_price: f64,
    #[serde(default)]
    table: Option<TableSelector>,
    #[serde(default)]
    down_payment: Option<f64>,
}

#[derive(Debug, Serialize)]
struct OptionRow {
    id: String,
    table: TableSelector,
    down_payment: f64,
    installments: Option<u32>,
    installment_value: Option<f64>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = CalculatorConfig::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    let engine = config.engine().context("Failed to build pricing engine")?;

    let start = Instant::now();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    let requests: Vec<RequestRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Failed to parse {}", cli.input.display()))?;
    println!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    let priced: Vec<Vec<OptionRow>> = requests
        .par_iter()
        .map(|row| {
            let table = row.table.unwrap_or(config.default_table);
            let request = match row.down_payment {
                Some(down) => PricingRequest::with_down_payment(row.base_price, table, down),
                None => PricingRequest::new(row.base_price, table),
            };
            let down_payment = row.down_payment.unwrap_or(0.0);

            match engine.price(&request) {
                Ok(options) => options
                    .into_iter()
                    .map(|option| OptionRow {
                        id: row.id.clone(),
                        table,
                        down_payment,
                        installments: Some(option.installment_count),
                        installment_value: Some(option.installment_value),
                        error: None,
                    })
                    .collect(),
                Err(e) => vec![OptionRow {
                    id: row.id.clone(),
                    table,
                    down_payment,
                    installments: None,
                    installment_value: None,
                    error: Some(e.to_string()),
                }],
            }
        })
        .collect();

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let mut written = 0usize;
    let mut failed = 0usize;
    for row in priced.iter().flatten() {
        if row.error.is_some() {
            failed += 1;
        }
        writer.serialize(row)?;
        written += 1;
    }
    writer.flush()?;

    println!(
        "Wrote {} rows ({} failed requests) to {} in {:?}",
        written,
        failed,
        cli.output.display(),
        start.elapsed()
    );
    Ok(())
}
