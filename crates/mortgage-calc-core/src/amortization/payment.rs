//! Fixed-rate, fixed-term amortization: monthly payment, total interest over
//! the term and the payoff month.
//!
//! Every other calculator in the crate prices its loan through
//! [`compute_monthly_payment`], so the zero-rate branch and the parameter
//! checks here are shared by all programs.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::MortgageCalcError;
use crate::time_value::{annuity_payment, monthly_rate, number_of_payments};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::MortgageCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Total interest paid over the full term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalInterest {
    /// Interest over the term, never negative.
    pub amount: Money,
    /// True when the raw figure came out negative and was clamped to zero.
    pub degenerate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub principal: Money,
    pub interest_rate_pct: Percent,
    pub term_years: Years,
    /// Date of the first monthly payment; drives the payoff label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_principal_and_interest: Money,
    pub total_interest_over_term: Money,
    pub total_paid: Money,
    pub number_of_payments: Decimal,
    /// Month of the final payment, e.g. "March 2056".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date_label: Option<String>,
    /// Total interest was negative before clamping.
    pub degenerate_interest: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly principal and interest for a fully amortizing fixed-rate loan.
///
/// Rejects negative principal, negative rate and non-positive term with
/// [`MortgageCalcError::InvalidLoanParameters`].
pub fn compute_monthly_payment(
    principal: Money,
    annual_rate_pct: Percent,
    term_years: Years,
) -> MortgageCalcResult<Money> {
    validate_loan_parameters(principal, annual_rate_pct, term_years)?;

    let payment = annuity_payment(
        principal,
        monthly_rate(annual_rate_pct),
        number_of_payments(term_years),
    )?;

    debug!(
        principal = %principal,
        rate_pct = %annual_rate_pct,
        term_years = %term_years,
        payment = %payment,
        "computed monthly payment"
    );
    Ok(payment)
}

/// Total interest over the term: `payment * n - principal`.
///
/// A zero rate carries no interest by definition. A negative raw figure is
/// clamped to zero and marked degenerate.
pub fn compute_total_interest(
    principal: Money,
    annual_rate_pct: Percent,
    term_years: Years,
) -> MortgageCalcResult<TotalInterest> {
    let payment = compute_monthly_payment(principal, annual_rate_pct, term_years)?;

    if annual_rate_pct.is_zero() {
        return Ok(TotalInterest {
            amount: Decimal::ZERO,
            degenerate: false,
        });
    }

    let raw = payment
        .checked_mul(number_of_payments(term_years))
        .and_then(|paid| paid.checked_sub(principal))
        .ok_or_else(|| {
            MortgageCalcError::loan_parameters("principal", "Total paid over the term overflows")
        })?;
    if raw < Decimal::ZERO {
        warn!(
            principal = %principal,
            rate_pct = %annual_rate_pct,
            term_years = %term_years,
            raw_interest = %raw,
            "total interest negative; clamped to zero"
        );
        return Ok(TotalInterest {
            amount: Decimal::ZERO,
            degenerate: true,
        });
    }

    Ok(TotalInterest {
        amount: raw,
        degenerate: false,
    })
}

/// Payment, interest and payoff month for a single loan.
pub fn amortize(
    input: &AmortizationInput,
) -> MortgageCalcResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let payment =
        compute_monthly_payment(input.principal, input.interest_rate_pct, input.term_years)?;
    let interest =
        compute_total_interest(input.principal, input.interest_rate_pct, input.term_years)?;
    let n = number_of_payments(input.term_years);

    if interest.degenerate {
        warnings.push(
            "Total interest computed as negative for these inputs; reported as zero".into(),
        );
    }
    if input.principal.is_zero() {
        warnings.push("Principal is zero; there is nothing to amortize".into());
    }

    let payoff_date_label = match input.first_payment_date {
        Some(first) => Some(payoff_date_label(first, n)?),
        None => None,
    };

    let result = AmortizationResult {
        monthly_principal_and_interest: payment,
        total_interest_over_term: interest.amount,
        total_paid: input.principal + interest.amount,
        number_of_payments: n,
        payoff_date_label,
        degenerate_interest: interest.degenerate,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate level-payment amortization",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Label for the month of the last payment, e.g. "March 2056".
///
/// A fractional payment count rounds up to the month that holds the final
/// partial payment.
pub fn payoff_date_label(
    first_payment_date: NaiveDate,
    number_of_payments: Decimal,
) -> MortgageCalcResult<String> {
    let payments = number_of_payments
        .ceil()
        .to_u32()
        .filter(|n| *n > 0)
        .ok_or_else(|| {
            MortgageCalcError::loan_parameters("term_years", "Payment count out of range")
        })?;

    let last = first_payment_date
        .checked_add_months(Months::new(payments - 1))
        .ok_or_else(|| MortgageCalcError::input("first_payment_date", "Payoff date out of range"))?;

    Ok(last.format("%B %Y").to_string())
}

pub(crate) fn validate_loan_parameters(
    principal: Money,
    annual_rate_pct: Percent,
    term_years: Years,
) -> MortgageCalcResult<()> {
    if principal < Decimal::ZERO {
        return Err(MortgageCalcError::loan_parameters(
            "principal",
            "Principal cannot be negative",
        ));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(MortgageCalcError::loan_parameters(
            "interest_rate_pct",
            "Interest rate cannot be negative",
        ));
    }
    if term_years <= Decimal::ZERO {
        return Err(MortgageCalcError::loan_parameters(
            "term_years",
            "Term must be greater than zero",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    #[test]
    fn test_zero_rate_exact() {
        let pmt = compute_monthly_payment(dec!(120000), dec!(0), dec!(10)).unwrap();
        assert_eq!(pmt, dec!(120000) / dec!(120));
    }

    #[test]
    fn test_representative_payment() {
        let pmt = compute_monthly_payment(dec!(400000), dec!(6.5), dec!(30)).unwrap();
        assert_close(pmt, dec!(2528.27), TOL, "400k @ 6.5% / 30y");
    }

    #[test]
    fn test_amortization_identity_representative() {
        let pmt = compute_monthly_payment(dec!(400000), dec!(6.5), dec!(30)).unwrap();
        let interest = compute_total_interest(dec!(400000), dec!(6.5), dec!(30)).unwrap();
        assert!(!interest.degenerate);
        assert_close(
            pmt * dec!(360) - dec!(400000),
            interest.amount,
            dec!(0.000001),
            "identity",
        );
        assert_close(interest.amount, dec!(510177.95), TOL, "total interest");
    }

    #[test]
    fn test_amortization_identity_zero_rate() {
        let pmt = compute_monthly_payment(dec!(180000), dec!(0), dec!(15)).unwrap();
        let interest = compute_total_interest(dec!(180000), dec!(0), dec!(15)).unwrap();
        assert_eq!(pmt, dec!(1000));
        assert_eq!(interest.amount, Decimal::ZERO);
        assert!(!interest.degenerate);
    }

    #[test]
    fn test_zero_principal_zero_payment() {
        let pmt = compute_monthly_payment(Decimal::ZERO, dec!(7), dec!(30)).unwrap();
        assert_eq!(pmt, Decimal::ZERO);
        let interest = compute_total_interest(Decimal::ZERO, dec!(7), dec!(30)).unwrap();
        assert_eq!(interest.amount, Decimal::ZERO);
    }

    #[test]
    fn test_negative_principal_rejected() {
        let err = compute_monthly_payment(dec!(-1), dec!(6), dec!(30)).unwrap_err();
        assert!(matches!(err, MortgageCalcError::InvalidLoanParameters { ref field, .. } if field == "principal"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = compute_monthly_payment(dec!(1000), dec!(-0.5), dec!(30)).unwrap_err();
        assert!(matches!(err, MortgageCalcError::InvalidLoanParameters { ref field, .. } if field == "interest_rate_pct"));
    }

    #[test]
    fn test_non_positive_term_rejected() {
        assert!(compute_monthly_payment(dec!(1000), dec!(5), dec!(0)).is_err());
        assert!(compute_monthly_payment(dec!(1000), dec!(5), dec!(-15)).is_err());
    }

    #[test]
    fn test_payment_overflow_is_typed_error() {
        let err = compute_monthly_payment(dec!(1000000), dec!(60), dec!(100)).unwrap_err();
        assert!(matches!(err, MortgageCalcError::InvalidLoanParameters { ref field, .. } if field == "principal"));
        assert!(compute_total_interest(dec!(1000000), dec!(60), dec!(100)).is_err());
    }

    #[test]
    fn test_shorter_term_higher_payment_less_interest() {
        let p15 = compute_monthly_payment(dec!(300000), dec!(6), dec!(15)).unwrap();
        let p30 = compute_monthly_payment(dec!(300000), dec!(6), dec!(30)).unwrap();
        assert!(p15 > p30);
        let i15 = compute_total_interest(dec!(300000), dec!(6), dec!(15)).unwrap();
        let i30 = compute_total_interest(dec!(300000), dec!(6), dec!(30)).unwrap();
        assert!(i15.amount < i30.amount);
    }

    #[test]
    fn test_payoff_label() {
        let first = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        assert_eq!(payoff_date_label(first, dec!(360)).unwrap(), "March 2056");
        assert_eq!(payoff_date_label(first, dec!(1)).unwrap(), "April 2026");
    }

    #[test]
    fn test_payoff_label_fractional_rounds_up() {
        let first = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(payoff_date_label(first, dec!(12.5)).unwrap(), "January 2027");
    }

    #[test]
    fn test_amortize_envelope() {
        let input = AmortizationInput {
            principal: dec!(400000),
            interest_rate_pct: dec!(6.5),
            term_years: dec!(30),
            first_payment_date: NaiveDate::from_ymd_opt(2026, 4, 1),
        };
        let out = amortize(&input).unwrap();
        let r = &out.result;
        assert_close(r.monthly_principal_and_interest, dec!(2528.27), TOL, "payment");
        assert_eq!(r.number_of_payments, dec!(360));
        assert_eq!(r.payoff_date_label.as_deref(), Some("March 2056"));
        assert_eq!(r.total_paid, dec!(400000) + r.total_interest_over_term);
        assert!(out.warnings.is_empty());
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_amortize_without_date_has_no_label() {
        let input = AmortizationInput {
            principal: dec!(100000),
            interest_rate_pct: dec!(5),
            term_years: dec!(20),
            first_payment_date: None,
        };
        let out = amortize(&input).unwrap();
        assert!(out.result.payoff_date_label.is_none());
    }
}
