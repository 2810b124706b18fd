//! Pricing inputs and outputs

use serde::{Deserialize, Serialize};

use super::PricingError;
use crate::format::{format_currency, parse_amount};
use crate::tables::TableSelector;

/// Input to one pricing calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Product price before interest
    pub base_price: f64,

    /// Which rate column to apply
    #[serde(default)]
    pub table: TableSelector,

    /// Whether the customer pays a down payment (entrada)
    #[serde(default)]
    pub has_down_payment: bool,

    /// Down payment amount; only read when `has_down_payment` is set
    #[serde(default)]
    pub down_payment: Option<f64>,
}

impl PricingRequest {
    /// Request with no down payment
    pub fn new(base_price: f64, table: TableSelector) -> Self {
        Self {
            base_price,
            table,
            has_down_payment: false,
            down_payment: None,
        }
    }

    /// Request with a down payment
    pub fn with_down_payment(base_price: f64, table: TableSelector, down_payment: f64) -> Self {
        Self {
            base_price,
            table,
            has_down_payment: true,
            down_payment: Some(down_payment),
        }
    }

    /// Build a request from user-typed amounts (`"1.234,56"`, `"99.90"`, ...).
    ///
    /// An unreadable price is rejected here. A blank or unreadable down payment
    /// is kept as absent so that validation reports it as missing.
    pub fn from_inputs(
        base_price: &str,
        table: TableSelector,
        has_down_payment: bool,
        down_payment: &str,
    ) -> Result<Self, PricingError> {
        let base_price = parse_amount(base_price).ok_or(PricingError::InvalidBasePrice)?;
        let down_payment = if has_down_payment {
            parse_amount(down_payment)
        } else {
            None
        };
        Ok(Self {
            base_price,
            table,
            has_down_payment,
            down_payment,
        })
    }

    /// Check the request before any computation.
    /// Returns the effective down payment (0 when none is flagged).
    pub fn validate(&self) -> Result<f64, PricingError> {
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(PricingError::InvalidBasePrice);
        }
        if !self.has_down_payment {
            return Ok(0.0);
        }
        match self.down_payment {
            Some(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
            _ => Err(PricingError::MissingOrInvalidDownPayment),
        }
    }
}

/// One admitted installment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentOption {
    /// Down payment formatted for display (R$ 0,00 when none)
    pub down_payment_display: String,
    /// Down payment amount
    pub down_payment: f64,
    /// Number of installments (1 = paid in cash after the down payment)
    pub installment_count: u32,
    /// Value of each installment, already rounded
    pub installment_value: f64,
}

impl InstallmentOption {
    pub(crate) fn new(down_payment: f64, installment_count: u32, installment_value: f64) -> Self {
        Self {
            down_payment_display: format_currency(down_payment),
            down_payment,
            installment_count,
            installment_value,
        }
    }

    /// Label such as `12x`
    pub fn label(&self) -> String {
        crate::format::installment_label(self.installment_count)
    }

    /// Installment value formatted for display
    pub fn value_display(&self) -> String {
        format_currency(self.installment_value)
    }
}
