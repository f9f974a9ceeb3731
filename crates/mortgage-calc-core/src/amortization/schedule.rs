//! Month-by-month payoff schedule with optional extra principal.

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::payment::{compute_monthly_payment, validate_loan_parameters};
use crate::error::MortgageCalcError;
use crate::time_value::{monthly_rate, number_of_payments};
use crate::types::{round_cents, with_metadata, ComputationOutput, Money, Percent, Years};
use crate::MortgageCalcResult;

/// Balance below half a cent is treated as paid off.
const BALANCE_EPSILON: Decimal = dec!(0.005);

/// Longest schedule produced row by row: 100 years of monthly payments.
pub const MAX_SCHEDULE_PAYMENTS: u32 = 1200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    pub interest_rate_pct: Percent,
    pub term_years: Years,
    /// Fixed additional principal paid every month.
    #[serde(default)]
    pub extra_monthly_payment: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

/// One month of the schedule, rounded to cents for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment number (1-indexed).
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub extra_principal: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub ending_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffSchedule {
    pub monthly_principal_and_interest: Money,
    pub rows: Vec<ScheduleRow>,
    pub yearly: Vec<YearSummary>,
    pub total_interest: Money,
    pub total_paid: Money,
    pub months_to_payoff: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date_label: Option<String>,
    /// Interest over the contractual schedule with no extra principal.
    pub baseline_total_interest: Money,
    pub interest_saved: Money,
    pub months_saved: u32,
}

/// Unrounded month used while walking the balance down.
struct Period {
    payment: Money,
    principal: Money,
    interest: Money,
    extra: Money,
    balance: Money,
}

/// Build the payoff schedule, then compare it with the no-extra baseline.
pub fn payoff_schedule(
    input: &ScheduleInput,
) -> MortgageCalcResult<ComputationOutput<PayoffSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_parameters(input.principal, input.interest_rate_pct, input.term_years)?;
    if input.extra_monthly_payment < Decimal::ZERO {
        return Err(MortgageCalcError::input(
            "extra_monthly_payment",
            "Extra payment cannot be negative",
        ));
    }

    let max_periods = number_of_payments(input.term_years)
        .ceil()
        .to_u32()
        .filter(|n| *n <= MAX_SCHEDULE_PAYMENTS)
        .ok_or_else(|| {
            MortgageCalcError::loan_parameters(
                "term_years",
                format!("Schedule is limited to {MAX_SCHEDULE_PAYMENTS} monthly payments"),
            )
        })?;

    let payment =
        compute_monthly_payment(input.principal, input.interest_rate_pct, input.term_years)?;
    let r = monthly_rate(input.interest_rate_pct);

    let periods = walk_balance(input.principal, r, payment, input.extra_monthly_payment, max_periods);
    let baseline = walk_balance(input.principal, r, payment, Decimal::ZERO, max_periods);

    let total_interest: Money = periods.iter().map(|p| p.interest).sum();
    let baseline_total_interest: Money = baseline.iter().map(|p| p.interest).sum();
    let months_to_payoff = periods.len() as u32;

    if input.extra_monthly_payment >= input.principal && !input.principal.is_zero() {
        warnings.push("Extra payment retires the whole loan in the first month".into());
    }

    let mut rows = Vec::with_capacity(periods.len());
    for (idx, p) in periods.iter().enumerate() {
        let month = idx as u32 + 1;
        let date = match input.first_payment_date {
            Some(first) => Some(
                first
                    .checked_add_months(Months::new(month - 1))
                    .ok_or_else(|| {
                        MortgageCalcError::input("first_payment_date", "Schedule date out of range")
                    })?,
            ),
            None => None,
        };
        rows.push(ScheduleRow {
            month,
            date,
            payment: round_cents(p.payment),
            principal: round_cents(p.principal),
            interest: round_cents(p.interest),
            extra_principal: round_cents(p.extra),
            balance: round_cents(p.balance),
        });
    }

    let yearly = periods
        .chunks(12)
        .enumerate()
        .map(|(idx, year)| YearSummary {
            year: idx as u32 + 1,
            principal_paid: round_cents(year.iter().map(|p| p.principal + p.extra).sum()),
            interest_paid: round_cents(year.iter().map(|p| p.interest).sum()),
            ending_balance: round_cents(year.last().map(|p| p.balance).unwrap_or_default()),
        })
        .collect();

    let payoff_date_label = rows
        .last()
        .and_then(|row| row.date)
        .map(|d| d.format("%B %Y").to_string());

    let result = PayoffSchedule {
        monthly_principal_and_interest: payment,
        rows,
        yearly,
        total_interest,
        total_paid: input.principal + total_interest,
        months_to_payoff,
        payoff_date_label,
        baseline_total_interest,
        interest_saved: baseline_total_interest - total_interest,
        months_saved: (baseline.len() as u32).saturating_sub(months_to_payoff),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortization schedule with extra principal",
        input,
        warnings,
        elapsed,
        result,
    ))
}

fn walk_balance(
    principal: Money,
    r: Decimal,
    payment: Money,
    extra: Money,
    max_periods: u32,
) -> Vec<Period> {
    let mut periods = Vec::with_capacity(max_periods.min(MAX_SCHEDULE_PAYMENTS) as usize);
    let mut balance = principal;

    for month in 1..=max_periods {
        if balance <= BALANCE_EPSILON {
            break;
        }

        let interest = balance * r;
        let mut scheduled = (payment - interest).max(Decimal::ZERO);
        // The last contractual payment sweeps any rounding residue.
        if scheduled > balance || month == max_periods {
            scheduled = balance;
        }
        let extra_paid = extra.min(balance - scheduled);
        balance -= scheduled + extra_paid;

        periods.push(Period {
            payment: scheduled + interest,
            principal: scheduled,
            interest,
            extra: extra_paid,
            balance,
        });
    }

    periods
}
