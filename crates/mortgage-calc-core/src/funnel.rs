//! Payment estimates for the purchase and refinance lead funnels.
//!
//! Funnels quote a single illustrative rate and term from configuration and
//! skip program cost rules entirely; figures are rounded to cents for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::compute_monthly_payment;
use crate::down_payment::{resolve_down_payment, DownPaymentType};
use crate::error::MortgageCalcError;
use crate::programs::config::ProgramConfig;
use crate::types::{round_cents, Money, Percent, Years};
use crate::MortgageCalcResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelEstimate {
    pub loan_amount: Money,
    pub rate_pct: Percent,
    pub term_years: Years,
    pub monthly_payment: Money,
}

/// Estimated P&I for a purchase at the illustrative rate.
pub fn estimate_purchase_payment(
    home_price: Money,
    down_payment_pct: Percent,
    config: &ProgramConfig,
) -> MortgageCalcResult<FunnelEstimate> {
    if home_price < Decimal::ZERO {
        return Err(MortgageCalcError::input("home_price", "Home price cannot be negative"));
    }
    let resolved = resolve_down_payment(home_price, down_payment_pct, DownPaymentType::Percent);
    estimate(resolved.loan_amount, config)
}

/// Estimated P&I for refinancing an existing balance at the illustrative rate.
pub fn estimate_refinance_payment(
    loan_balance: Money,
    config: &ProgramConfig,
) -> MortgageCalcResult<FunnelEstimate> {
    estimate(loan_balance, config)
}

fn estimate(loan_amount: Money, config: &ProgramConfig) -> MortgageCalcResult<FunnelEstimate> {
    let rate = config.funnel.illustrative_rate_pct;
    let term = config.funnel.term_years;
    let payment = compute_monthly_payment(loan_amount, rate, term)?;
    Ok(FunnelEstimate {
        loan_amount: round_cents(loan_amount),
        rate_pct: rate,
        term_years: term,
        monthly_payment: round_cents(payment),
    })
}
