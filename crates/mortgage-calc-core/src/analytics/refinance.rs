//! Refinance comparison: payment savings, break-even month, lifetime interest
//! and the balance-weighted blended rate when other debts are consolidated.
//!
//! Monthly savings and lifetime interest savings are always reported side by
//! side. A refinance can lower the payment while costing more interest over
//! the new term, or the reverse.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::{compute_monthly_payment, compute_total_interest};
use crate::error::MortgageCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::MortgageCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An additional debt paid off by the refinance (second lien, card balance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub label: String,
    pub balance: Money,
    pub rate_pct: Percent,
    /// Remaining years if the debt were kept and paid as scheduled.
    pub remaining_term_years: Years,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub current_balance: Money,
    pub current_rate_pct: Percent,
    pub current_remaining_term_years: Years,
    pub new_rate_pct: Percent,
    pub new_term_years: Years,
    /// Closing costs of the refinance.
    #[serde(default)]
    pub refinance_costs: Money,
    /// Roll the closing costs into the new loan instead of paying them in cash.
    #[serde(default)]
    pub finance_costs: bool,
    /// Debts consolidated into the new loan.
    #[serde(default)]
    pub additional_debts: Vec<Debt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceAnalysis {
    /// Current mortgage payment plus payments on every consolidated debt.
    pub current_monthly_payment: Money,
    pub new_monthly_payment: Money,
    pub monthly_savings: Money,
    /// `None` when the new payment is not lower, so costs are never recovered.
    pub break_even_months: Option<u32>,
    pub new_loan_amount: Money,
    pub total_interest_current: Money,
    pub total_interest_new: Money,
    /// Positive when the refinance pays less interest over the full term.
    pub lifetime_interest_savings: Money,
    /// Balance-weighted rate of everything being refinanced, when debts are included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blended_rate_pct: Option<Percent>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `ceil(costs / savings)`, or `None` when there are no positive savings.
///
/// Any positive saving breaks even eventually; counts past `u32::MAX`
/// saturate there.
pub fn break_even_months(refinance_costs: Money, monthly_savings: Money) -> Option<u32> {
    if monthly_savings <= Decimal::ZERO {
        return None;
    }
    let months = refinance_costs
        .max(Decimal::ZERO)
        .checked_div(monthly_savings)
        .and_then(|q| q.ceil().to_u32())
        .unwrap_or(u32::MAX);
    Some(months)
}

/// `Σ(rate·balance) / Σ(balance)` over the primary loan and `debts`; the
/// primary rate when every balance is zero.
pub fn blended_rate(primary_balance: Money, primary_rate_pct: Percent, debts: &[Debt]) -> Percent {
    let total: Money = primary_balance + debts.iter().map(|d| d.balance).sum::<Money>();
    if total <= Decimal::ZERO {
        return primary_rate_pct;
    }
    let weighted: Decimal = primary_balance * primary_rate_pct
        + debts.iter().map(|d| d.balance * d.rate_pct).sum::<Decimal>();
    weighted / total
}

pub fn analyze_refinance(
    input: &RefinanceInput,
) -> MortgageCalcResult<ComputationOutput<RefinanceAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let mut current_payment = compute_monthly_payment(
        input.current_balance,
        input.current_rate_pct,
        input.current_remaining_term_years,
    )?;
    let mut current_interest = compute_total_interest(
        input.current_balance,
        input.current_rate_pct,
        input.current_remaining_term_years,
    )?
    .amount;

    let mut consolidated = Decimal::ZERO;
    for debt in &input.additional_debts {
        current_payment +=
            compute_monthly_payment(debt.balance, debt.rate_pct, debt.remaining_term_years)?;
        current_interest +=
            compute_total_interest(debt.balance, debt.rate_pct, debt.remaining_term_years)?.amount;
        consolidated += debt.balance;
    }

    let financed_costs = if input.finance_costs {
        input.refinance_costs
    } else {
        Decimal::ZERO
    };
    let new_loan_amount = input.current_balance + consolidated + financed_costs;

    let new_payment =
        compute_monthly_payment(new_loan_amount, input.new_rate_pct, input.new_term_years)?;
    let new_interest =
        compute_total_interest(new_loan_amount, input.new_rate_pct, input.new_term_years)?.amount;

    let monthly_savings = current_payment - new_payment;
    let lifetime_interest_savings = current_interest - new_interest;
    let break_even = break_even_months(input.refinance_costs, monthly_savings);

    if break_even.is_none() {
        warnings.push("New payment is not lower than the current payment; no break-even point".into());
    }
    if monthly_savings > Decimal::ZERO && lifetime_interest_savings < Decimal::ZERO {
        warnings.push(
            "Lower monthly payment but more total interest over the new term".into(),
        );
    }
    if monthly_savings < Decimal::ZERO && lifetime_interest_savings > Decimal::ZERO {
        warnings.push(
            "Higher monthly payment but less total interest over the new term".into(),
        );
    }

    let blended_rate_pct = if input.additional_debts.is_empty() {
        None
    } else {
        Some(blended_rate(
            input.current_balance,
            input.current_rate_pct,
            &input.additional_debts,
        ))
    };

    debug!(
        current_payment = %current_payment,
        new_payment = %new_payment,
        savings = %monthly_savings,
        break_even = ?break_even,
        "analyzed refinance"
    );

    let output = RefinanceAnalysis {
        current_monthly_payment: current_payment,
        new_monthly_payment: new_payment,
        monthly_savings,
        break_even_months: break_even,
        new_loan_amount,
        total_interest_current: current_interest,
        total_interest_new: new_interest,
        lifetime_interest_savings,
        blended_rate_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Refinance break-even and lifetime interest comparison",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_input(input: &RefinanceInput) -> MortgageCalcResult<()> {
    if input.refinance_costs < Decimal::ZERO {
        return Err(MortgageCalcError::input(
            "refinance_costs",
            "Refinance costs cannot be negative",
        ));
    }
    for debt in &input.additional_debts {
        if debt.balance < Decimal::ZERO {
            return Err(MortgageCalcError::input(
                "additional_debts",
                format!("Debt '{}' has a negative balance", debt.label),
            ));
        }
    }
    Ok(())
}
