//! Price a product and print the installment options
//!
//! Optionally assembles a customer quote: prints the WhatsApp share link
//! and/or writes the HTML quote document.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use installment_calculator::format::{format_currency, parse_amount};
use installment_calculator::{
    Calculator, CalculatorConfig, InstallmentRange, PricingRequest, Quote, QuoteMetadata, TableSelector,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quote")]
#[command(author, version, about = "Installment plan calculator", long_about = None)]
struct Cli {
    /// Product price, e.g. 1299,90 or 1299.90
    #[arg(short, long, conflicts_with = "keys")]
    price: Option<String>,

    /// Key the price on the calculator instead, e.g. "450*3="
    #[arg(short, long)]
    keys: Option<String>,

    /// Interest table column (full/cheia or half/metade)
    #[arg(short, long)]
    table: Option<TableSelector>,

    /// Down payment amount
    #[arg(short, long)]
    down_payment: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Customer name for the quote
    #[arg(long)]
    customer: Option<String>,

    /// Product or service name for the quote
    #[arg(long)]
    product: Option<String>,

    /// Seller name for the quote
    #[arg(long)]
    seller: Option<String>,

    /// Quote date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// First installment count in the quote
    #[arg(long)]
    from: Option<u32>,

    /// Last installment count in the quote
    #[arg(long)]
    to: Option<u32>,

    /// Print the WhatsApp share link
    #[arg(long)]
    whatsapp: bool,

    /// Write the HTML quote to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Print options as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = CalculatorConfig::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    let engine = config.engine().context("Failed to build pricing engine")?;

    let base_price = match (&cli.price, &cli.keys) {
        (Some(price), _) => parse_amount(price).with_context(|| format!("Unreadable price '{}'", price))?,
        (None, Some(keys)) => {
            let mut calc = Calculator::new();
            calc.press_keys(keys)?;
            calc.value()
        }
        (None, None) => bail!("Provide a price with --price or --keys"),
    };

    let table = cli.table.unwrap_or(config.default_table);
    let request = match &cli.down_payment {
        Some(down) => PricingRequest {
            base_price,
            table,
            has_down_payment: true,
            down_payment: parse_amount(down),
        },
        None => PricingRequest::new(base_price, table),
    };

    let options = engine.price(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else if options.is_empty() {
        println!("No installment plan available: the down payment covers the purchase.");
    } else {
        println!(
            "Price {} on the {} table (rounding: {})",
            format_currency(base_price),
            table,
            engine.policy().rounding
        );
        if request.has_down_payment {
            println!("{:<14} {:<12} {:>16}", "Down payment", "Plan", "Installment");
        } else {
            println!("{:<12} {:>16}", "Plan", "Installment");
        }
        for option in &options {
            if request.has_down_payment {
                println!(
                    "{:<14} {:<12} {:>16}",
                    option.down_payment_display,
                    option.label(),
                    option.value_display()
                );
            } else {
                println!("{:<12} {:>16}", option.label(), option.value_display());
            }
        }
    }

    if !cli.whatsapp && cli.html.is_none() {
        return Ok(());
    }

    let range = InstallmentRange::new(
        cli.from.unwrap_or(config.range_from),
        cli.to.unwrap_or(config.range_to),
    )?;
    let metadata = QuoteMetadata {
        customer_name: cli.customer,
        product_name: cli.product,
        quote_date: Some(cli.date.unwrap_or_else(|| Local::now().date_naive())),
        seller_name: cli.seller,
    };
    let quote = Quote::assemble(metadata, &options, request.has_down_payment, range)?.with_brand(config.brand);

    if cli.whatsapp {
        println!("\n{}", quote.whatsapp_url());
    }
    if let Some(path) = &cli.html {
        fs::write(path, quote.to_html()).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Quote written to {}", path.display());
    }

    Ok(())
}
