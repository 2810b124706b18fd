//! Installment plan calculator for retail credit sales
//!
//! Given a product price, an optional down payment and one of the two interest
//! table columns, the pricing engine lists the value of each installment for
//! every plan from 1x (cash, after a down payment) to 24x. Results can then be
//! rendered as a customer quote.
//!
//! ```
//! use installment_calculator::{PricingEngine, PricingRequest, TableSelector};
//!
//! let engine = PricingEngine::default();
//! let options = engine.price(&PricingRequest::new(1000.0, TableSelector::Full)).unwrap();
//! assert_eq!(options[0].installment_count, 2);
//! assert_eq!(options[0].value_display(), "R$ 565,00");
//! ```

pub mod calculator;
pub mod config;
pub mod format;
pub mod pricing;
pub mod quote;
pub mod tables;

pub use calculator::{Calculator, CalculatorError, Operator};
pub use config::{CalculatorConfig, ConfigError};
pub use pricing::{
    compute_installment_options, DownPaymentRule, InstallmentOption, PricingEngine, PricingError,
    PricingPolicy, PricingRequest, RoundingPolicy,
};
pub use quote::{InstallmentRange, Quote, QuoteError, QuoteMetadata};
pub use tables::{InterestTable, RatePair, TableError, TableSelector};
