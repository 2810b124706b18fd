//! Installment pricing engine

use super::{DownPaymentRule, InstallmentOption, PricingError, PricingPolicy, PricingRequest};
use crate::tables::{InterestTable, MAX_INSTALLMENTS};

/// Absolute tolerance for balance comparisons
pub const BALANCE_EPSILON: f64 = 1e-6;

/// Pricing engine bound to an interest table and pricing policies
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    table: InterestTable,
    policy: PricingPolicy,
}

impl PricingEngine {
    pub fn new(table: InterestTable, policy: PricingPolicy) -> Self {
        Self { table, policy }
    }

    pub fn table(&self) -> &InterestTable {
        &self.table
    }

    pub fn policy(&self) -> PricingPolicy {
        self.policy
    }

    /// Price a single request
    pub fn price(&self, request: &PricingRequest) -> Result<Vec<InstallmentOption>, PricingError> {
        compute_installment_options(request, &self.table, self.policy)
    }
}

/// Compute every admissible installment option for a request.
///
/// For each count `n` in 1..=24 the gross total is `base_price * (1 + r/100)`
/// with `r` taken from the selected table column (0 for the cash case). The
/// down payment is subtracted and the remaining balance is split into `n`
/// equal installments. Counts the down payment already covers are skipped;
/// the cash case is only ever offered as a zero installment once the down
/// payment settles the price. The result is ascending by installment count
/// and may be empty.
pub fn compute_installment_options(
    request: &PricingRequest,
    table: &InterestTable,
    policy: PricingPolicy,
) -> Result<Vec<InstallmentOption>, PricingError> {
    let down_payment = match request.validate() {
        Ok(amount) => amount,
        Err(e) => {
            log::warn!("Rejected pricing request {:?}: {}", request, e);
            return Err(e);
        }
    };

    let mut options = Vec::with_capacity(MAX_INSTALLMENTS as usize);

    for installments in 1..=MAX_INSTALLMENTS {
        let rate = match table.rate(installments, request.table) {
            Some(rate) => rate,
            None => continue,
        };

        let gross_total = request.base_price * (1.0 + rate / 100.0);
        let remaining = gross_total - down_payment;

        match admitted_balance(
            installments,
            request.base_price,
            gross_total,
            down_payment,
            policy.down_payment_rule,
        ) {
            Some(balance) => {
                let per_installment = policy.rounding.apply(balance / installments as f64).max(0.0);
                // A financed plan never rounds down to nothing
                if installments > 1 && per_installment <= 0.0 {
                    log::debug!(
                        "{}x skipped: remaining {:.6} rounds to a zero installment",
                        installments, remaining
                    );
                    continue;
                }
                log::debug!(
                    "{}x at {}%: gross {:.2}, remaining {:.2}, installment {:.2}",
                    installments, rate, gross_total, remaining, per_installment
                );
                options.push(InstallmentOption::new(down_payment, installments, per_installment));
            }
            None => {
                log::debug!(
                    "{}x skipped: down payment {:.2} against gross {:.2}",
                    installments, down_payment, gross_total
                );
            }
        }
    }

    options.sort_by_key(|option| option.installment_count);
    Ok(options)
}

/// Balance left to split into installments, or `None` when the count is not
/// offered. The cash case is admitted with a zero balance.
fn admitted_balance(
    installments: u32,
    base_price: f64,
    gross_total: f64,
    down_payment: f64,
    rule: DownPaymentRule,
) -> Option<f64> {
    let remaining = gross_total - down_payment;

    if installments == 1 {
        let settled = match rule {
            DownPaymentRule::CashPrice => remaining.abs() <= BALANCE_EPSILON,
            DownPaymentRule::GrossTotal => remaining <= BALANCE_EPSILON,
        };
        return settled.then_some(0.0);
    }

    // Never split a non-positive balance
    if remaining <= BALANCE_EPSILON {
        return None;
    }

    let ceiling = match rule {
        DownPaymentRule::CashPrice => base_price,
        DownPaymentRule::GrossTotal => gross_total,
    };
    (down_payment < ceiling - BALANCE_EPSILON).then_some(remaining)
}
