//! Debt service coverage for DSCR investor loans, which qualify on the
//! property's rent rather than the borrower's income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::compute_monthly_payment;
use crate::analytics::affordability::{monthly_payment_summary, MonthlyPaymentSummary};
use crate::error::MortgageCalcError;
use crate::programs::ProgramConfig;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::MortgageCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DscrInput {
    /// Gross scheduled monthly rent.
    pub monthly_rent: Money,
    pub loan_amount: Money,
    pub interest_rate_pct: Percent,
    pub term_years: Years,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
    #[serde(default)]
    pub hoa_monthly: Money,
    /// Per-loan override of the configured minimum coverage ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_ratio: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DscrOutput {
    /// Principal, interest, taxes, insurance and association dues.
    pub pitia: MonthlyPaymentSummary,
    /// Rent / PITIA; `None` when PITIA is zero.
    pub dscr: Option<Decimal>,
    pub qualifies: bool,
    /// Minimum ratio applied: the input override or the configured value.
    pub minimum_ratio: Decimal,
    /// Rent needed to reach the minimum ratio.
    pub rent_required_for_minimum: Money,
}

pub fn analyze_dscr(
    input: &DscrInput,
    config: &ProgramConfig,
) -> MortgageCalcResult<ComputationOutput<DscrOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    config.validate()?;
    let minimum_ratio = input.minimum_ratio.unwrap_or(config.dscr.minimum_ratio);

    if input.monthly_rent < Decimal::ZERO {
        return Err(MortgageCalcError::input("monthly_rent", "Rent cannot be negative"));
    }
    if minimum_ratio <= Decimal::ZERO {
        return Err(MortgageCalcError::input(
            "minimum_ratio",
            "Minimum DSCR must be positive",
        ));
    }

    let pi = compute_monthly_payment(input.loan_amount, input.interest_rate_pct, input.term_years)?;
    let pitia = monthly_payment_summary(
        pi,
        input.annual_property_tax,
        input.annual_insurance,
        input.hoa_monthly,
        Decimal::ZERO,
    );

    let dscr = if pitia.total > Decimal::ZERO {
        Some(input.monthly_rent / pitia.total)
    } else {
        warnings.push("Monthly PITIA is zero; DSCR is not computable".into());
        None
    };
    let qualifies = dscr.is_some_and(|ratio| ratio >= minimum_ratio);

    if let Some(ratio) = dscr {
        if ratio < Decimal::ONE {
            warnings.push(format!(
                "Rent covers only {:.2}x of PITIA; the property runs a monthly shortfall",
                ratio
            ));
        }
    }

    debug!(dscr = ?dscr, minimum = %minimum_ratio, qualifies, "computed DSCR");

    let output = DscrOutput {
        rent_required_for_minimum: pitia.total * minimum_ratio,
        pitia,
        dscr,
        qualifies,
        minimum_ratio,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "DSCR: gross monthly rent over PITIA",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(rent: Money) -> DscrInput {
        DscrInput {
            monthly_rent: rent,
            loan_amount: dec!(240000),
            interest_rate_pct: dec!(6),
            term_years: dec!(30),
            annual_property_tax: dec!(3600),
            annual_insurance: dec!(1200),
            hoa_monthly: Decimal::ZERO,
            minimum_ratio: None,
        }
    }

    #[test]
    fn test_qualifying_rent() {
        // PITIA ≈ 1438.92 + 300 + 100 = 1838.92
        let out = analyze_dscr(&input(dec!(2300)), &ProgramConfig::default()).unwrap();
        let r = &out.result;
        assert!((r.pitia.total - dec!(1838.92)).abs() < dec!(0.01));
        assert!(r.dscr.unwrap() > dec!(1.25));
        assert!(r.qualifies);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_shortfall_does_not_qualify() {
        let out = analyze_dscr(&input(dec!(1500)), &ProgramConfig::default()).unwrap();
        assert!(!out.result.qualifies);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_zero_pitia_not_computable() {
        let mut i = input(dec!(1500));
        i.loan_amount = Decimal::ZERO;
        i.annual_property_tax = Decimal::ZERO;
        i.annual_insurance = Decimal::ZERO;
        let out = analyze_dscr(&i, &ProgramConfig::default()).unwrap();
        assert_eq!(out.result.dscr, None);
        assert!(!out.result.qualifies);
    }

    #[test]
    fn test_required_rent_scales_with_minimum() {
        let mut i = input(dec!(2000));
        i.minimum_ratio = Some(dec!(1.25));
        let out = analyze_dscr(&i, &ProgramConfig::default()).unwrap();
        assert_eq!(out.result.minimum_ratio, dec!(1.25));
        assert_eq!(
            out.result.rent_required_for_minimum,
            out.result.pitia.total * dec!(1.25)
        );
    }

    #[test]
    fn test_configured_minimum_applies() {
        // 2000 / 1838.92 ≈ 1.09: passes the default 1.0, fails a 1.25 program
        let default_out = analyze_dscr(&input(dec!(2000)), &ProgramConfig::default()).unwrap();
        assert!(default_out.result.qualifies);
        assert_eq!(default_out.result.minimum_ratio, dec!(1.0));

        let mut config = ProgramConfig::default();
        config.dscr.minimum_ratio = dec!(1.25);
        let strict = analyze_dscr(&input(dec!(2000)), &config).unwrap();
        assert!(!strict.result.qualifies);
        assert_eq!(strict.result.minimum_ratio, dec!(1.25));
    }

    #[test]
    fn test_input_override_beats_config() {
        let mut config = ProgramConfig::default();
        config.dscr.minimum_ratio = dec!(1.25);
        let mut i = input(dec!(2000));
        i.minimum_ratio = Some(dec!(1.05));
        let out = analyze_dscr(&i, &config).unwrap();
        assert!(out.result.qualifies);
        assert_eq!(out.result.minimum_ratio, dec!(1.05));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ProgramConfig::default();
        config.dscr.minimum_ratio = dec!(-1);
        let err = analyze_dscr(&input(dec!(2000)), &config).unwrap_err();
        assert!(matches!(err, MortgageCalcError::InvalidConfig(_)));
    }
}
