//! Rounding and down-payment admission policies
//!
//! Both policies exist in two flavours in the field. The defaults are
//! cent rounding and cash-price admission; the alternatives reproduce the
//! round-up display and the per-rate admission used by older quotes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::engine::BALANCE_EPSILON;

/// How installment values are rounded before they are stored and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round half away from zero to whole cents
    #[default]
    Cents,
    /// Round up to the next whole currency unit (R$ 83,75 becomes R$ 84,00)
    UpToUnit,
}

impl RoundingPolicy {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            RoundingPolicy::Cents => round_cents(value),
            // Float noise within tolerance of a whole value (565.0000000001) stays put
            RoundingPolicy::UpToUnit => (value - BALANCE_EPSILON).ceil().max(0.0),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::Cents => write!(f, "cents"),
            RoundingPolicy::UpToUnit => write!(f, "up_to_unit"),
        }
    }
}

impl FromStr for RoundingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cents" => Ok(RoundingPolicy::Cents),
            "up_to_unit" | "ceil" => Ok(RoundingPolicy::UpToUnit),
            other => Err(format!("unknown rounding policy '{}' (expected cents or up_to_unit)", other)),
        }
    }
}

/// Which amount a down payment is measured against when deciding whether a
/// plan is still worth financing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DownPaymentRule {
    /// Against the cash price. A down payment equal to the price (within
    /// tolerance) yields the single cash option; reaching the price removes
    /// every financed plan; an overpayment yields no options at all.
    #[default]
    CashPrice,
    /// Against each count's interest-inflated total. Financed plans survive
    /// while the down payment is below that count's gross total, and any
    /// down payment at or above the cash price admits the cash option.
    GrossTotal,
}

impl fmt::Display for DownPaymentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownPaymentRule::CashPrice => write!(f, "cash_price"),
            DownPaymentRule::GrossTotal => write!(f, "gross_total"),
        }
    }
}

impl FromStr for DownPaymentRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cash_price" | "cash" => Ok(DownPaymentRule::CashPrice),
            "gross_total" | "gross" => Ok(DownPaymentRule::GrossTotal),
            other => Err(format!("unknown down payment rule '{}' (expected cash_price or gross_total)", other)),
        }
    }
}

/// Policies applied by one pricing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PricingPolicy {
    #[serde(default)]
    pub rounding: RoundingPolicy,
    #[serde(default)]
    pub down_payment_rule: DownPaymentRule,
}

impl PricingPolicy {
    pub fn new(rounding: RoundingPolicy, down_payment_rule: DownPaymentRule) -> Self {
        Self { rounding, down_payment_rule }
    }
}

/// Round to two decimal places, half away from zero
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cents_rounding() {
        assert_abs_diff_eq!(RoundingPolicy::Cents.apply(83.75), 83.75, epsilon = 1e-12);
        assert_abs_diff_eq!(RoundingPolicy::Cents.apply(376.666666), 376.67, epsilon = 1e-12);
        assert_abs_diff_eq!(RoundingPolicy::Cents.apply(10.004), 10.0, epsilon = 1e-12);
        assert_eq!(RoundingPolicy::Cents.apply(0.0), 0.0);
    }

    #[test]
    fn test_up_to_unit_rounding() {
        assert_eq!(RoundingPolicy::UpToUnit.apply(83.75), 84.0);
        assert_eq!(RoundingPolicy::UpToUnit.apply(83.01), 84.0);
        assert_eq!(RoundingPolicy::UpToUnit.apply(565.0), 565.0);
        // Float noise just above a whole value stays put
        assert_eq!(RoundingPolicy::UpToUnit.apply(565.000_000_01), 565.0);
        assert_eq!(RoundingPolicy::UpToUnit.apply(0.0), 0.0);
        // Fractions below half a cent still round up
        assert_eq!(RoundingPolicy::UpToUnit.apply(500.004), 501.0);
        assert_eq!(RoundingPolicy::UpToUnit.apply(0.001), 1.0);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("cents".parse::<RoundingPolicy>().unwrap(), RoundingPolicy::Cents);
        assert_eq!("up-to-unit".parse::<RoundingPolicy>().unwrap(), RoundingPolicy::UpToUnit);
        assert_eq!("CEIL".parse::<RoundingPolicy>().unwrap(), RoundingPolicy::UpToUnit);
        assert!("floor".parse::<RoundingPolicy>().is_err());

        assert_eq!("cash-price".parse::<DownPaymentRule>().unwrap(), DownPaymentRule::CashPrice);
        assert_eq!("gross".parse::<DownPaymentRule>().unwrap(), DownPaymentRule::GrossTotal);
        assert!("net".parse::<DownPaymentRule>().is_err());
    }

    #[test]
    fn test_policy_serde() {
        let policy: PricingPolicy =
            serde_json::from_str(r#"{"rounding": "up_to_unit", "down_payment_rule": "gross_total"}"#).unwrap();
        assert_eq!(policy, PricingPolicy::new(RoundingPolicy::UpToUnit, DownPaymentRule::GrossTotal));

        let defaults: PricingPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, PricingPolicy::default());
    }
}
