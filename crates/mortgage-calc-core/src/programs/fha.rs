//! FHA loans: upfront MIP financed into the loan plus a flat annual MIP.
//!
//! The annual premium is a single rate for every LTV band and loan size, a
//! simplification of the federal schedule. A tiered lookup would slot in
//! behind the same signature.

use rust_decimal_macros::dec;

use crate::programs::config::ProgramConfig;
use crate::programs::costs::{LoanPosition, ProgramCostBreakdown, ProgramKind};
use crate::types::MONTHS_PER_YEAR;

pub fn costs(position: &LoanPosition, config: &ProgramConfig) -> ProgramCostBreakdown {
    let fha = &config.fha;
    let upfront_mip = position.loan_amount * fha.upfront_mip_pct / dec!(100);
    let adjusted = position.loan_amount + upfront_mip;
    let monthly_mip = adjusted * fha.annual_mip_pct / dec!(100) / MONTHS_PER_YEAR;

    ProgramCostBreakdown {
        program: ProgramKind::Fha,
        base_loan_amount: position.loan_amount,
        upfront_fee_rolled_into_loan: upfront_mip,
        upfront_fee_rate_pct: fha.upfront_mip_pct,
        adjusted_loan_amount: adjusted,
        monthly_mortgage_insurance: monthly_mip,
        annual_mortgage_insurance_rate_pct: fha.annual_mip_pct,
        mortgage_insurance_applies: true,
        credit_tier: None,
        is_jumbo: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_reference_loan() {
        let position = LoanPosition::new(dec!(337750), dec!(350000));
        let b = costs(&position, &ProgramConfig::default());
        assert_eq!(b.upfront_fee_rolled_into_loan, dec!(5910.625));
        assert_eq!(b.adjusted_loan_amount, dec!(343660.625));
        assert!((b.monthly_mortgage_insurance - dec!(157.51)).abs() < dec!(0.01));
    }

    #[test]
    fn test_mip_charged_regardless_of_ltv() {
        let config = ProgramConfig::default();
        for ltv in [dec!(50), dec!(80), dec!(96.5)] {
            let position = LoanPosition {
                loan_amount: dec!(200000),
                home_price: dec!(250000),
                ltv_pct: ltv,
            };
            let b = costs(&position, &config);
            assert!(b.mortgage_insurance_applies);
            assert!(b.monthly_mortgage_insurance > Decimal::ZERO);
        }
    }
}
