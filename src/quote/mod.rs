//! Customer quotes built from priced installment options
//!
//! A quote carries the customer metadata and the options selected by an
//! installment range, and renders as share text (WhatsApp / e-mail) or as a
//! printable HTML document.

mod html;
mod text;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::InstallmentOption;
use crate::tables::MAX_INSTALLMENTS;

pub use text::percent_encode;

/// Placeholder for metadata the seller left blank
pub const NOT_INFORMED: &str = "Not informed";

/// Default brand line printed at the bottom of every quote
pub const DEFAULT_BRAND: &str = "SabidoPay Calculadora";

/// Problems assembling a quote from a set of options
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("invalid installment range {from}x to {to}x (expected 1 <= from <= to <= 24)")]
    InvalidRange { from: u32, to: u32 },

    #[error("calculate the installments before generating a quote")]
    NothingCalculated,

    #[error("no installment option found between {from}x and {to}x")]
    NoOptionsInRange { from: u32, to: u32 },
}

/// Who and what the quote is for. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteMetadata {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quote_date: Option<NaiveDate>,
    #[serde(default)]
    pub seller_name: Option<String>,
}

impl QuoteMetadata {
    pub fn customer(&self) -> &str {
        informed(&self.customer_name)
    }

    pub fn product(&self) -> &str {
        informed(&self.product_name)
    }

    pub fn seller(&self) -> &str {
        informed(&self.seller_name)
    }

    /// Quote date as `dd/mm/yyyy`
    pub fn date(&self) -> String {
        self.quote_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| NOT_INFORMED.to_string())
    }
}

fn informed(field: &Option<String>) -> &str {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => NOT_INFORMED,
    }
}

/// Inclusive range of installment counts to include in a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallmentRange {
    from: u32,
    to: u32,
}

impl InstallmentRange {
    pub fn new(from: u32, to: u32) -> Result<Self, QuoteError> {
        if from == 0 || to > MAX_INSTALLMENTS || from > to {
            return Err(QuoteError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> u32 {
        self.from
    }

    pub fn to(&self) -> u32 {
        self.to
    }

    pub fn contains(&self, installments: u32) -> bool {
        (self.from..=self.to).contains(&installments)
    }
}

impl Default for InstallmentRange {
    fn default() -> Self {
        Self { from: 2, to: MAX_INSTALLMENTS }
    }
}

/// Keep the options whose count falls in `range`, ascending by count
pub fn select_options(
    options: &[InstallmentOption],
    range: InstallmentRange,
) -> Result<Vec<InstallmentOption>, QuoteError> {
    if options.is_empty() {
        return Err(QuoteError::NothingCalculated);
    }

    let mut selected: Vec<InstallmentOption> = options
        .iter()
        .filter(|o| range.contains(o.installment_count))
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(QuoteError::NoOptionsInRange { from: range.from, to: range.to });
    }

    selected.sort_by_key(|o| o.installment_count);
    Ok(selected)
}

/// A quote ready to be shared
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub metadata: QuoteMetadata,
    /// Selects the two-column layout with the down payment in the first column
    pub has_down_payment: bool,
    pub options: Vec<InstallmentOption>,
    pub brand: String,
}

impl Quote {
    /// Assemble a quote from priced options, keeping only those in `range`
    pub fn assemble(
        metadata: QuoteMetadata,
        options: &[InstallmentOption],
        has_down_payment: bool,
        range: InstallmentRange,
    ) -> Result<Self, QuoteError> {
        let options = select_options(options, range)?;
        log::debug!(
            "Assembled quote for {} with {} options ({}x..{}x)",
            metadata.customer(),
            options.len(),
            range.from,
            range.to
        );
        Ok(Self {
            metadata,
            has_down_payment,
            options,
            brand: DEFAULT_BRAND.to_string(),
        })
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(count: u32, value: f64) -> InstallmentOption {
        InstallmentOption {
            down_payment_display: "R$ 0,00".to_string(),
            down_payment: 0.0,
            installment_count: count,
            installment_value: value,
        }
    }

    #[test]
    fn test_range_validation() {
        assert!(InstallmentRange::new(1, 24).is_ok());
        assert!(InstallmentRange::new(5, 5).is_ok());
        assert_eq!(
            InstallmentRange::new(0, 10),
            Err(QuoteError::InvalidRange { from: 0, to: 10 })
        );
        assert_eq!(
            InstallmentRange::new(10, 5),
            Err(QuoteError::InvalidRange { from: 10, to: 5 })
        );
        assert!(InstallmentRange::new(2, 25).is_err());

        let default = InstallmentRange::default();
        assert_eq!((default.from(), default.to()), (2, 24));
    }

    #[test]
    fn test_select_options() {
        let options = vec![option(2, 565.0), option(3, 390.0), option(12, 127.5), option(24, 83.75)];

        let selected = select_options(&options, InstallmentRange::new(3, 12).unwrap()).unwrap();
        let counts: Vec<u32> = selected.iter().map(|o| o.installment_count).collect();
        assert_eq!(counts, vec![3, 12]);

        assert_eq!(
            select_options(&options, InstallmentRange::new(13, 23).unwrap()),
            Err(QuoteError::NoOptionsInRange { from: 13, to: 23 })
        );
        assert_eq!(
            select_options(&[], InstallmentRange::default()),
            Err(QuoteError::NothingCalculated)
        );
    }

    #[test]
    fn test_select_sorts_unordered_input() {
        let options = vec![option(24, 83.75), option(2, 565.0)];
        let selected = select_options(&options, InstallmentRange::new(1, 24).unwrap()).unwrap();
        assert_eq!(selected[0].installment_count, 2);
        assert_eq!(selected[1].installment_count, 24);
    }

    #[test]
    fn test_metadata_placeholders() {
        let metadata = QuoteMetadata {
            customer_name: Some("Maria".to_string()),
            product_name: Some("   ".to_string()),
            quote_date: NaiveDate::from_ymd_opt(2024, 3, 7),
            seller_name: None,
        };

        assert_eq!(metadata.customer(), "Maria");
        assert_eq!(metadata.product(), NOT_INFORMED);
        assert_eq!(metadata.seller(), NOT_INFORMED);
        assert_eq!(metadata.date(), "07/03/2024");
        assert_eq!(QuoteMetadata::default().date(), NOT_INFORMED);
    }

    #[test]
    fn test_assemble_applies_range_and_brand() {
        let options = vec![option(1, 0.0), option(2, 565.0), option(3, 390.0)];
        let quote = Quote::assemble(
            QuoteMetadata::default(),
            &options,
            false,
            InstallmentRange::default(),
        )
        .unwrap()
        .with_brand("Loja Central");

        assert_eq!(quote.options.len(), 2);
        assert_eq!(quote.brand, "Loja Central");
    }
}
