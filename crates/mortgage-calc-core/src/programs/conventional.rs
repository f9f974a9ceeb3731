//! Conventional loans: PMI from the credit-tier table, only above 80% LTV.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::programs::config::ProgramConfig;
use crate::programs::costs::{LoanPosition, ProgramCostBreakdown, ProgramKind};
use crate::types::{Money, Percent, MONTHS_PER_YEAR};

/// Private mortgage insurance priced for one loan.
pub(crate) struct PmiQuote {
    pub applies: bool,
    pub annual_rate_pct: Percent,
    pub monthly: Money,
    pub tier_label: String,
}

pub fn costs(
    position: &LoanPosition,
    credit_score: u16,
    config: &ProgramConfig,
    warnings: &mut Vec<String>,
) -> ProgramCostBreakdown {
    let pmi = quote_pmi(position, credit_score, config, warnings);
    ProgramCostBreakdown {
        program: ProgramKind::Conventional,
        base_loan_amount: position.loan_amount,
        upfront_fee_rolled_into_loan: Decimal::ZERO,
        upfront_fee_rate_pct: Decimal::ZERO,
        adjusted_loan_amount: position.loan_amount,
        monthly_mortgage_insurance: pmi.monthly,
        annual_mortgage_insurance_rate_pct: pmi.annual_rate_pct,
        mortgage_insurance_applies: pmi.applies,
        credit_tier: Some(pmi.tier_label),
        is_jumbo: None,
    }
}

/// PMI is charged strictly above the LTV threshold; exactly 80.00% is exempt.
pub(crate) fn quote_pmi(
    position: &LoanPosition,
    credit_score: u16,
    config: &ProgramConfig,
    warnings: &mut Vec<String>,
) -> PmiQuote {
    let matched = config.credit_tiers.lookup(credit_score);

    if position.ltv_pct <= config.mortgage_insurance_ltv_threshold_pct {
        return PmiQuote {
            applies: false,
            annual_rate_pct: Decimal::ZERO,
            monthly: Decimal::ZERO,
            tier_label: matched.tier.label.clone(),
        };
    }

    if matched.below_table {
        warn!(
            credit_score,
            tier = %matched.tier.label,
            "credit score below lowest PMI band"
        );
        warnings.push(format!(
            "Credit score {} is below the lowest PMI band; priced at {}",
            credit_score, matched.tier.label
        ));
    }

    let rate = matched.tier.annual_pmi_rate_pct;
    PmiQuote {
        applies: true,
        annual_rate_pct: rate,
        monthly: position.loan_amount * rate / dec!(100) / MONTHS_PER_YEAR,
        tier_label: matched.tier.label.clone(),
    }
}
