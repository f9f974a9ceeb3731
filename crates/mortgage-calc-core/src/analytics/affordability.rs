//! Total monthly housing payment, debt-to-income ratios and the largest loan
//! a borrower's income supports.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::amortization::compute_monthly_payment;
use crate::error::MortgageCalcError;
use crate::time_value::{annuity_present_value, monthly_rate, number_of_payments};
use crate::types::{ratio_pct, with_metadata, ComputationOutput, Money, Percent, Years, MONTHS_PER_YEAR};
use crate::MortgageCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The single "total monthly payment" figure and its components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPaymentSummary {
    pub principal_and_interest: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub hoa: Money,
    pub mortgage_insurance: Money,
    pub total: Money,
}

/// Debt-to-income ratios. `None` means not computable (no positive income),
/// which presentation code shows as a placeholder rather than 0%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityMetrics {
    pub front_end_dti_pct: Option<Percent>,
    pub back_end_dti_pct: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub principal_and_interest: Money,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
    #[serde(default)]
    pub hoa_monthly: Money,
    #[serde(default)]
    pub monthly_mortgage_insurance: Money,
    #[serde(default)]
    pub other_monthly_debts: Money,
    pub gross_monthly_income: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    pub payment: MonthlyPaymentSummary,
    pub dti: AffordabilityMetrics,
}

/// Which DTI limit caps the affordable payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtiConstraint {
    FrontEnd,
    BackEnd,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxLoanInput {
    pub gross_monthly_income: Money,
    #[serde(default)]
    pub other_monthly_debts: Money,
    pub interest_rate_pct: Percent,
    pub term_years: Years,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
    #[serde(default)]
    pub hoa_monthly: Money,
    #[serde(default = "default_front_end_limit")]
    pub front_end_limit_pct: Percent,
    #[serde(default = "default_back_end_limit")]
    pub back_end_limit_pct: Percent,
    /// Cash available for the down payment, added to the loan for the price.
    #[serde(default)]
    pub down_payment: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxLoanOutput {
    pub max_housing_payment: Money,
    pub max_principal_and_interest: Money,
    pub max_loan_amount: Money,
    pub max_home_price: Money,
    pub binding_constraint: DtiConstraint,
}

fn default_front_end_limit() -> Percent {
    dec!(28)
}

fn default_back_end_limit() -> Percent {
    dec!(36)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// P&I + tax/12 + insurance/12 + HOA + mortgage insurance.
pub fn monthly_payment_summary(
    principal_and_interest: Money,
    annual_property_tax: Money,
    annual_insurance: Money,
    hoa_monthly: Money,
    monthly_mortgage_insurance: Money,
) -> MonthlyPaymentSummary {
    let property_tax = annual_property_tax / MONTHS_PER_YEAR;
    let insurance = annual_insurance / MONTHS_PER_YEAR;
    MonthlyPaymentSummary {
        principal_and_interest,
        property_tax,
        insurance,
        hoa: hoa_monthly,
        mortgage_insurance: monthly_mortgage_insurance,
        total: principal_and_interest
            + property_tax
            + insurance
            + hoa_monthly
            + monthly_mortgage_insurance,
    }
}

/// Front-end (housing only) and back-end (housing plus other debts) DTI.
pub fn dti(
    total_monthly_payment: Money,
    other_monthly_debts: Money,
    gross_monthly_income: Money,
) -> AffordabilityMetrics {
    AffordabilityMetrics {
        front_end_dti_pct: ratio_pct(total_monthly_payment, gross_monthly_income),
        back_end_dti_pct: ratio_pct(
            total_monthly_payment + other_monthly_debts,
            gross_monthly_income,
        ),
    }
}

pub fn analyze_affordability(
    input: &AffordabilityInput,
) -> MortgageCalcResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_non_negative(&[
        ("principal_and_interest", input.principal_and_interest),
        ("annual_property_tax", input.annual_property_tax),
        ("annual_insurance", input.annual_insurance),
        ("hoa_monthly", input.hoa_monthly),
        ("monthly_mortgage_insurance", input.monthly_mortgage_insurance),
        ("other_monthly_debts", input.other_monthly_debts),
    ])?;

    let payment = monthly_payment_summary(
        input.principal_and_interest,
        input.annual_property_tax,
        input.annual_insurance,
        input.hoa_monthly,
        input.monthly_mortgage_insurance,
    );
    let metrics = dti(payment.total, input.other_monthly_debts, input.gross_monthly_income);

    if metrics.front_end_dti_pct.is_none() {
        warn!(
            income = %input.gross_monthly_income,
            "DTI not computable without positive income"
        );
        warnings.push("Gross monthly income is not positive; DTI is not computable".into());
    }

    let output = AffordabilityOutput {
        payment,
        dti: metrics,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Total housing payment with front-end and back-end DTI",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Largest loan whose housing payment keeps both DTI ratios within limits.
///
/// The allowed housing payment is the smaller of the front-end cap and the
/// back-end cap net of other debts; tax, insurance and HOA come off the top and
/// the remainder is converted to principal through the annuity present value.
pub fn max_affordable_loan(
    input: &MaxLoanInput,
) -> MortgageCalcResult<ComputationOutput<MaxLoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.gross_monthly_income <= Decimal::ZERO {
        return Err(MortgageCalcError::input(
            "gross_monthly_income",
            "Income must be positive to size a loan",
        ));
    }
    require_non_negative(&[
        ("other_monthly_debts", input.other_monthly_debts),
        ("annual_property_tax", input.annual_property_tax),
        ("annual_insurance", input.annual_insurance),
        ("hoa_monthly", input.hoa_monthly),
        ("front_end_limit_pct", input.front_end_limit_pct),
        ("back_end_limit_pct", input.back_end_limit_pct),
        ("down_payment", input.down_payment),
    ])?;
    // Validates rate and term the same way every payment is validated.
    compute_monthly_payment(Decimal::ZERO, input.interest_rate_pct, input.term_years)?;

    let front_cap = input.gross_monthly_income * input.front_end_limit_pct / dec!(100);
    let back_cap = input.gross_monthly_income * input.back_end_limit_pct / dec!(100)
        - input.other_monthly_debts;
    let (max_housing, binding) = if back_cap < front_cap {
        (back_cap, DtiConstraint::BackEnd)
    } else {
        (front_cap, DtiConstraint::FrontEnd)
    };

    let escrow = (input.annual_property_tax + input.annual_insurance) / MONTHS_PER_YEAR
        + input.hoa_monthly;
    let max_pi = (max_housing - escrow).max(Decimal::ZERO);
    if max_pi.is_zero() {
        warnings.push(
            "Taxes, insurance, HOA and other debts consume the allowed payment; no loan is affordable"
                .into(),
        );
    }

    let max_loan = annuity_present_value(
        max_pi,
        monthly_rate(input.interest_rate_pct),
        number_of_payments(input.term_years),
    )?;

    debug!(
        max_housing = %max_housing,
        max_pi = %max_pi,
        max_loan = %max_loan,
        binding = ?binding,
        "sized maximum affordable loan"
    );

    let output = MaxLoanOutput {
        max_housing_payment: max_housing.max(Decimal::ZERO),
        max_principal_and_interest: max_pi,
        max_loan_amount: max_loan,
        max_home_price: max_loan + input.down_payment,
        binding_constraint: binding,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Maximum loan from DTI limits (annuity present value)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn require_non_negative(values: &[(&str, Money)]) -> MortgageCalcResult<()> {
    for (field, value) in values {
        if *value < Decimal::ZERO {
            return Err(MortgageCalcError::input(field, "Value cannot be negative"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_components() {
        let s = monthly_payment_summary(dec!(2000), dec!(6000), dec!(1800), dec!(50), dec!(100));
        assert_eq!(s.property_tax, dec!(500));
        assert_eq!(s.insurance, dec!(150));
        assert_eq!(s.total, dec!(2800));
    }

    #[test]
    fn test_dti_ratios() {
        let m = dti(dec!(2800), dec!(700), dec!(10000));
        assert_eq!(m.front_end_dti_pct, Some(dec!(28)));
        assert_eq!(m.back_end_dti_pct, Some(dec!(35)));
    }

    #[test]
    fn test_dti_not_computable_without_income() {
        let m = dti(dec!(2800), dec!(700), Decimal::ZERO);
        assert_eq!(m.front_end_dti_pct, None);
        assert_eq!(m.back_end_dti_pct, None);

        let m = dti(dec!(2800), dec!(700), dec!(-100));
        assert_eq!(m.back_end_dti_pct, None);
    }

    #[test]
    fn test_dti_above_hundred_is_valid() {
        let m = dti(dec!(5000), dec!(1000), dec!(4000));
        assert_eq!(m.front_end_dti_pct, Some(dec!(125)));
        assert_eq!(m.back_end_dti_pct, Some(dec!(150)));
    }

    #[test]
    fn test_analyze_warns_when_not_computable() {
        let input = AffordabilityInput {
            principal_and_interest: dec!(2000),
            annual_property_tax: dec!(3600),
            annual_insurance: dec!(1200),
            hoa_monthly: Decimal::ZERO,
            monthly_mortgage_insurance: Decimal::ZERO,
            other_monthly_debts: dec!(300),
            gross_monthly_income: Decimal::ZERO,
        };
        let out = analyze_affordability(&input).unwrap();
        assert_eq!(out.result.payment.total, dec!(2400));
        assert_eq!(out.result.dti.front_end_dti_pct, None);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_analyze_rejects_negative_expense() {
        let input = AffordabilityInput {
            principal_and_interest: dec!(2000),
            annual_property_tax: dec!(-1),
            annual_insurance: Decimal::ZERO,
            hoa_monthly: Decimal::ZERO,
            monthly_mortgage_insurance: Decimal::ZERO,
            other_monthly_debts: Decimal::ZERO,
            gross_monthly_income: dec!(8000),
        };
        assert!(analyze_affordability(&input).is_err());
    }

    fn max_loan_input() -> MaxLoanInput {
        MaxLoanInput {
            gross_monthly_income: dec!(10000),
            other_monthly_debts: dec!(500),
            interest_rate_pct: dec!(6),
            term_years: dec!(30),
            annual_property_tax: dec!(4800),
            annual_insurance: dec!(1200),
            hoa_monthly: Decimal::ZERO,
            front_end_limit_pct: dec!(28),
            back_end_limit_pct: dec!(36),
            down_payment: dec!(50000),
        }
    }

    #[test]
    fn test_max_loan_front_end_binding() {
        let out = max_affordable_loan(&max_loan_input()).unwrap();
        let r = &out.result;
        // front 2800, back 3600 - 500 = 3100 -> front binds
        assert_eq!(r.binding_constraint, DtiConstraint::FrontEnd);
        assert_eq!(r.max_housing_payment, dec!(2800));
        assert_eq!(r.max_principal_and_interest, dec!(2300));
        // The sized loan pays back exactly the allowed P&I.
        let pmt = compute_monthly_payment(r.max_loan_amount, dec!(6), dec!(30)).unwrap();
        assert!((pmt - dec!(2300)).abs() < dec!(0.000001));
        assert_eq!(r.max_home_price, r.max_loan_amount + dec!(50000));
    }

    #[test]
    fn test_max_loan_back_end_binding() {
        let mut input = max_loan_input();
        input.other_monthly_debts = dec!(1500);
        let out = max_affordable_loan(&input).unwrap();
        assert_eq!(out.result.binding_constraint, DtiConstraint::BackEnd);
        assert_eq!(out.result.max_housing_payment, dec!(2100));
    }

    #[test]
    fn test_max_loan_zero_when_debts_consume_budget() {
        let mut input = max_loan_input();
        input.other_monthly_debts = dec!(4000);
        let out = max_affordable_loan(&input).unwrap();
        assert_eq!(out.result.max_loan_amount, Decimal::ZERO);
        assert!(!out.warnings.is_empty());
    }

    #[test]
    fn test_max_loan_requires_income() {
        let mut input = max_loan_input();
        input.gross_monthly_income = Decimal::ZERO;
        assert!(max_affordable_loan(&input).is_err());
    }
}
