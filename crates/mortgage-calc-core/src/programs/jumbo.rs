//! Jumbo loans: conventional PMI mechanics plus classification against the
//! conforming loan limit. A loan at or below the limit still prices; it is
//! flagged as effectively conventional.

use rust_decimal::Decimal;
use tracing::debug;

use crate::programs::config::ProgramConfig;
use crate::programs::conventional::quote_pmi;
use crate::programs::costs::{LoanPosition, ProgramCostBreakdown, ProgramKind};

pub fn costs(
    position: &LoanPosition,
    credit_score: u16,
    config: &ProgramConfig,
    warnings: &mut Vec<String>,
) -> ProgramCostBreakdown {
    let pmi = quote_pmi(position, credit_score, config, warnings);
    let is_jumbo = position.loan_amount > config.conforming_loan_limit;

    if !is_jumbo {
        debug!(
            loan_amount = %position.loan_amount,
            limit = %config.conforming_loan_limit,
            "jumbo request within conforming limit"
        );
        warnings.push(format!(
            "Loan amount {} is within the conforming limit {}; effectively a conventional loan",
            position.loan_amount, config.conforming_loan_limit
        ));
    }

    ProgramCostBreakdown {
        program: ProgramKind::Jumbo,
        base_loan_amount: position.loan_amount,
        upfront_fee_rolled_into_loan: Decimal::ZERO,
        upfront_fee_rate_pct: Decimal::ZERO,
        adjusted_loan_amount: position.loan_amount,
        monthly_mortgage_insurance: pmi.monthly,
        annual_mortgage_insurance_rate_pct: pmi.annual_rate_pct,
        mortgage_insurance_applies: pmi.applies,
        credit_tier: Some(pmi.tier_label),
        is_jumbo: Some(is_jumbo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs::conventional;
    use rust_decimal_macros::dec;

    #[test]
    fn test_above_limit_is_jumbo() {
        let mut w = Vec::new();
        let position = LoanPosition::new(dec!(1000000), dec!(1250000));
        let b = costs(&position, 760, &ProgramConfig::default(), &mut w);
        assert_eq!(b.is_jumbo, Some(true));
        assert!(!b.mortgage_insurance_applies);
        assert!(w.is_empty());
    }

    #[test]
    fn test_at_limit_is_effectively_conventional() {
        let mut w = Vec::new();
        let position = LoanPosition::new(dec!(806500), dec!(1000000));
        let b = costs(&position, 760, &ProgramConfig::default(), &mut w);
        assert_eq!(b.is_jumbo, Some(false));
        assert_eq!(b.adjusted_loan_amount, dec!(806500));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn test_pmi_threshold_strict() {
        let config = ProgramConfig::default();
        let mut w = Vec::new();
        let at = LoanPosition { loan_amount: dec!(900000), home_price: dec!(1125000), ltv_pct: dec!(80.0) };
        let above = LoanPosition { ltv_pct: dec!(80.01), ..at };
        assert!(!costs(&at, 720, &config, &mut w).mortgage_insurance_applies);
        assert!(costs(&above, 720, &config, &mut w).mortgage_insurance_applies);
    }

    #[test]
    fn test_same_pmi_as_conventional() {
        let config = ProgramConfig::default();
        let mut w = Vec::new();
        let position = LoanPosition::new(dec!(950000), dec!(1000000));
        let jumbo = costs(&position, 700, &config, &mut w);
        let conv = conventional::costs(&position, 700, &config, &mut w);
        assert_eq!(jumbo.monthly_mortgage_insurance, conv.monthly_mortgage_insurance);
    }
}
