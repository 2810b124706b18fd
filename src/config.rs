//! Calculator configuration
//!
//! Loaded from a JSON file; every field has a default so an empty object
//! (or no file at all) gives the standard shop setup.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pricing::{DownPaymentRule, PricingEngine, PricingPolicy, RoundingPolicy};
use crate::quote::{InstallmentRange, QuoteError, DEFAULT_BRAND};
use crate::tables::{load_table, InterestTable, TableError, TableSelector};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid interest table: {0}")]
    Table(#[from] TableError),

    #[error("invalid quote range: {0}")]
    Range(#[from] QuoteError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Rounding applied to installment values
    #[serde(default)]
    pub rounding: RoundingPolicy,

    /// Amount a down payment is compared against for admission
    #[serde(default)]
    pub down_payment_rule: DownPaymentRule,

    /// Table column used when a request doesn't name one
    #[serde(default)]
    pub default_table: TableSelector,

    /// CSV interest table; the standard table is used when absent
    #[serde(default)]
    pub table_path: Option<PathBuf>,

    /// First installment count included in quotes
    #[serde(default = "default_range_from")]
    pub range_from: u32,

    /// Last installment count included in quotes
    #[serde(default = "default_range_to")]
    pub range_to: u32,

    /// Brand line printed at the bottom of quotes
    #[serde(default = "default_brand")]
    pub brand: String,
}

fn default_range_from() -> u32 { 2 }
fn default_range_to() -> u32 { 24 }
fn default_brand() -> String { DEFAULT_BRAND.to_string() }

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingPolicy::default(),
            down_payment_rule: DownPaymentRule::default(),
            default_table: TableSelector::default(),
            table_path: None,
            range_from: default_range_from(),
            range_to: default_range_to(),
            brand: default_brand(),
        }
    }
}

impl CalculatorConfig {
    /// Load from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded config from {} (rounding: {}, down payment rule: {})",
            path.as_ref().display(),
            config.rounding,
            config.down_payment_rule
        );
        Ok(config)
    }

    /// Load from a path if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn policy(&self) -> PricingPolicy {
        PricingPolicy::new(self.rounding, self.down_payment_rule)
    }

    /// Effective interest table: the configured CSV or the standard table
    pub fn interest_table(&self) -> Result<InterestTable, ConfigError> {
        match &self.table_path {
            Some(path) => Ok(load_table(path)?),
            None => Ok(InterestTable::standard()),
        }
    }

    /// Engine built from this configuration
    pub fn engine(&self) -> Result<PricingEngine, ConfigError> {
        Ok(PricingEngine::new(self.interest_table()?, self.policy()))
    }

    /// Quote range from this configuration
    pub fn quote_range(&self) -> Result<InstallmentRange, ConfigError> {
        Ok(InstallmentRange::new(self.range_from, self.range_to)?)
    }
}
