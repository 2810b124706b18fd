//! Interest rate tables and their loading

mod interest;
pub mod loader;

use thiserror::Error;

pub use interest::{InterestTable, RatePair, TableSelector, MAX_INSTALLMENTS, MIN_TABLE_INSTALLMENTS};
pub use loader::{load_table, load_table_from_reader};

/// Problems found while building or loading an interest table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("interest table has no entries")]
    Empty,

    #[error("installment count {0} is outside the supported range 2..=24")]
    CountOutOfRange(u32),

    #[error("installment counts must be contiguous: expected {expected}, found {found}")]
    NonContiguous { expected: u32, found: u32 },

    #[error("invalid rates for {installments}x: full {full_rate}%, half {half_rate}% (need full >= half >= 0)")]
    InvalidRates {
        installments: u32,
        full_rate: f64,
        half_rate: f64,
    },

    #[error("rates must not decrease as installments grow (at {installments}x)")]
    DecreasingRate { installments: u32 },

    #[error("unknown table selector '{0}' (expected full or half)")]
    UnknownSelector(String),

    #[error("failed to parse interest table CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read interest table: {0}")]
    Io(#[from] std::io::Error),
}
