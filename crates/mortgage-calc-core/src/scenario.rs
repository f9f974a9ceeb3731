//! End-to-end purchase scenario: the full pipeline a calculator page runs.
//!
//! Raw inputs flow one way through the down payment resolver (with any program
//! floor), the program cost rules, the amortization core on the adjusted loan,
//! the monthly payment roll-up and finally the DTI ratios.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::{compute_monthly_payment, compute_total_interest, payoff_date_label, AmortizationResult};
use crate::analytics::affordability::{dti, monthly_payment_summary, AffordabilityMetrics, MonthlyPaymentSummary};
use crate::down_payment::{resolve_down_payment, resolve_with_minimum, DownPaymentResult, LoanInputs};
use crate::programs::config::ProgramConfig;
use crate::programs::costs::{program_costs, LoanPosition, LoanProgram, ProgramCostBreakdown};
use crate::time_value::number_of_payments;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(flatten)]
    pub loan: LoanInputs,
    pub program: LoanProgram,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
    #[serde(default)]
    pub hoa_monthly: Money,
    /// Zero or absent leaves both DTI ratios not computable.
    #[serde(default)]
    pub gross_monthly_income: Money,
    #[serde(default)]
    pub other_monthly_debts: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub down_payment: DownPaymentResult,
    pub program_costs: ProgramCostBreakdown,
    /// Amortization of the adjusted (fee-inclusive) loan.
    pub amortization: AmortizationResult,
    pub monthly_payment: MonthlyPaymentSummary,
    pub affordability: AffordabilityMetrics,
}

pub fn calculate_scenario(
    input: &ScenarioInput,
    config: &ProgramConfig,
) -> MortgageCalcResult<ComputationOutput<ScenarioOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    config.validate()?;
    let loan = &input.loan;

    let down_payment = match input.program.minimum_down_payment_pct(config) {
        Some(minimum) => resolve_with_minimum(
            loan.home_price,
            loan.down_payment,
            loan.down_payment_type,
            minimum,
        ),
        None => resolve_down_payment(loan.home_price, loan.down_payment, loan.down_payment_type),
    };

    if down_payment.minimum_applied {
        warnings.push(format!(
            "Down payment raised to the program minimum of {}%",
            down_payment.down_payment_pct
        ));
    }
    if loan.home_price.is_zero() {
        warnings.push("Home price is zero; LTV reported as 0".into());
    }
    if down_payment.ltv_pct > dec!(100) {
        warnings.push(format!("LTV of {}% exceeds the home price", down_payment.ltv_pct.round_dp(2)));
    }

    let position = LoanPosition {
        loan_amount: down_payment.loan_amount,
        home_price: loan.home_price,
        ltv_pct: down_payment.ltv_pct,
    };
    let costs = program_costs(&position, &input.program, config, &mut warnings);

    let principal = costs.adjusted_loan_amount;
    let payment = compute_monthly_payment(principal, loan.interest_rate_pct, loan.term_years)?;
    let interest = compute_total_interest(principal, loan.interest_rate_pct, loan.term_years)?;
    if interest.degenerate {
        warnings.push("Total interest computed as negative; reported as zero".into());
    }

    let n = number_of_payments(loan.term_years);
    let amortization = AmortizationResult {
        monthly_principal_and_interest: payment,
        total_interest_over_term: interest.amount,
        total_paid: principal + interest.amount,
        number_of_payments: n,
        payoff_date_label: match input.first_payment_date {
            Some(first) => Some(payoff_date_label(first, n)?),
            None => None,
        },
        degenerate_interest: interest.degenerate,
    };

    let monthly_payment = monthly_payment_summary(
        payment,
        input.annual_property_tax,
        input.annual_insurance,
        input.hoa_monthly,
        costs.monthly_mortgage_insurance,
    );
    let affordability = dti(
        monthly_payment.total,
        input.other_monthly_debts,
        input.gross_monthly_income,
    );
    if input.gross_monthly_income <= Decimal::ZERO {
        warnings.push("No positive income supplied; DTI is not computable".into());
    }

    debug!(
        program = ?costs.program,
        loan_amount = %down_payment.loan_amount,
        adjusted_loan = %principal,
        total_monthly = %monthly_payment.total,
        "calculated purchase scenario"
    );

    let output = ScenarioOutput {
        down_payment,
        program_costs: costs,
        amortization,
        monthly_payment,
        affordability,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        crate::programs::costs::methodology(input.program.kind()),
        input,
        warnings,
        elapsed,
        output,
    ))
}
