//! Installment pricing: requests, policies and the engine

mod request;
mod policy;
pub mod engine;

use thiserror::Error;

pub use request::{InstallmentOption, PricingRequest};
pub use policy::{round_cents, DownPaymentRule, PricingPolicy, RoundingPolicy};
pub use engine::{compute_installment_options, PricingEngine, BALANCE_EPSILON};

/// Reasons a pricing request cannot be computed. Neither is fatal; callers
/// should prompt for the offending amount again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("product price is missing, invalid or zero")]
    InvalidBasePrice,

    #[error("a down payment greater than zero is required when the down payment option is selected")]
    MissingOrInvalidDownPayment,
}
