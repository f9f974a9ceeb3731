//! VA loans: funding fee on the base loan, financed, and never any monthly
//! mortgage insurance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::programs::config::ProgramConfig;
use crate::programs::costs::{LoanPosition, ProgramCostBreakdown, ProgramKind, VaFundingFeeUse};
use crate::types::Percent;

pub fn funding_fee_rate_pct(fee_use: VaFundingFeeUse, config: &ProgramConfig) -> Percent {
    match fee_use {
        VaFundingFeeUse::FirstUse => config.va.first_use_fee_pct,
        VaFundingFeeUse::SubsequentUse => config.va.subsequent_use_fee_pct,
        VaFundingFeeUse::Exempt => config.va.exempt_fee_pct,
    }
}

pub fn costs(
    position: &LoanPosition,
    fee_use: VaFundingFeeUse,
    config: &ProgramConfig,
) -> ProgramCostBreakdown {
    let rate = funding_fee_rate_pct(fee_use, config);
    let funding_fee = position.loan_amount * rate / dec!(100);

    ProgramCostBreakdown {
        program: ProgramKind::Va,
        base_loan_amount: position.loan_amount,
        upfront_fee_rolled_into_loan: funding_fee,
        upfront_fee_rate_pct: rate,
        adjusted_loan_amount: position.loan_amount + funding_fee,
        monthly_mortgage_insurance: Decimal::ZERO,
        annual_mortgage_insurance_rate_pct: Decimal::ZERO,
        mortgage_insurance_applies: false,
        credit_tier: None,
        is_jumbo: None,
    }
}
