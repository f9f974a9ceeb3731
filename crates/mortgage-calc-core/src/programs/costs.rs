use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::down_payment::loan_to_value_pct;
use crate::error::MortgageCalcError;
use crate::programs::config::ProgramConfig;
use crate::programs::{conventional, fha, jumbo, va};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    Conventional,
    Fha,
    Va,
    Jumbo,
}

/// VA funding fee category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaFundingFeeUse {
    #[default]
    FirstUse,
    SubsequentUse,
    /// Service-connected disability and other statutory exemptions.
    Exempt,
}

/// A loan program together with the option that prices it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoanProgram {
    Conventional {
        credit_score: u16,
    },
    Fha,
    Va {
        #[serde(default)]
        funding_fee_use: VaFundingFeeUse,
    },
    Jumbo {
        credit_score: u16,
    },
}

impl LoanProgram {
    pub fn kind(&self) -> ProgramKind {
        match self {
            LoanProgram::Conventional { .. } => ProgramKind::Conventional,
            LoanProgram::Fha => ProgramKind::Fha,
            LoanProgram::Va { .. } => ProgramKind::Va,
            LoanProgram::Jumbo { .. } => ProgramKind::Jumbo,
        }
    }

    /// Program floor on the down payment, if any.
    pub fn minimum_down_payment_pct(&self, config: &ProgramConfig) -> Option<Percent> {
        match self {
            LoanProgram::Fha => Some(config.fha.minimum_down_payment_pct),
            _ => None,
        }
    }
}

/// Base loan, price and LTV every program prices against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPosition {
    pub loan_amount: Money,
    pub home_price: Money,
    pub ltv_pct: Percent,
}

impl LoanPosition {
    pub fn new(loan_amount: Money, home_price: Money) -> Self {
        LoanPosition {
            loan_amount,
            home_price,
            ltv_pct: loan_to_value_pct(loan_amount, home_price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCostBreakdown {
    pub program: ProgramKind,
    /// Loan after down payment, before any financed fee.
    pub base_loan_amount: Money,
    /// FHA upfront MIP or VA funding fee; 0 for conventional and jumbo.
    pub upfront_fee_rolled_into_loan: Money,
    pub upfront_fee_rate_pct: Percent,
    /// Base loan plus any financed upfront fee.
    pub adjusted_loan_amount: Money,
    pub monthly_mortgage_insurance: Money,
    pub annual_mortgage_insurance_rate_pct: Percent,
    pub mortgage_insurance_applies: bool,
    /// PMI credit band used, for conventional and jumbo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_tier: Option<String>,
    /// Jumbo classification against the conforming limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_jumbo: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramCostInput {
    pub loan_amount: Money,
    pub home_price: Money,
    /// Overrides the LTV derived from loan amount and price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ltv_pct: Option<Percent>,
    pub program: LoanProgram,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a loan under one program.
pub fn program_costs(
    position: &LoanPosition,
    program: &LoanProgram,
    config: &ProgramConfig,
    warnings: &mut Vec<String>,
) -> ProgramCostBreakdown {
    let breakdown = match *program {
        LoanProgram::Conventional { credit_score } => {
            conventional::costs(position, credit_score, config, warnings)
        }
        LoanProgram::Fha => fha::costs(position, config),
        LoanProgram::Va { funding_fee_use } => va::costs(position, funding_fee_use, config),
        LoanProgram::Jumbo { credit_score } => {
            jumbo::costs(position, credit_score, config, warnings)
        }
    };

    debug!(
        program = ?breakdown.program,
        ltv_pct = %position.ltv_pct,
        upfront_fee = %breakdown.upfront_fee_rolled_into_loan,
        monthly_mi = %breakdown.monthly_mortgage_insurance,
        "priced program costs"
    );
    breakdown
}

/// Program cost breakdown wrapped in the computation envelope.
pub fn calculate_program_costs(
    input: &ProgramCostInput,
    config: &ProgramConfig,
) -> MortgageCalcResult<ComputationOutput<ProgramCostBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    config.validate()?;
    if input.loan_amount < Decimal::ZERO {
        return Err(MortgageCalcError::loan_parameters(
            "loan_amount",
            "Loan amount cannot be negative; the down payment exceeds the price",
        ));
    }
    if input.home_price < Decimal::ZERO {
        return Err(MortgageCalcError::input("home_price", "Home price cannot be negative"));
    }

    let mut position = LoanPosition::new(input.loan_amount, input.home_price);
    if let Some(ltv) = input.ltv_pct {
        position.ltv_pct = ltv;
    }
    if input.home_price.is_zero() && input.ltv_pct.is_none() {
        warnings.push("Home price is zero; LTV reported as 0".into());
    }

    let breakdown = program_costs(&position, &input.program, config, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology(input.program.kind()),
        input,
        warnings,
        elapsed,
        breakdown,
    ))
}

pub(crate) fn methodology(kind: ProgramKind) -> &'static str {
    match kind {
        ProgramKind::Conventional => "Conventional: credit-tiered PMI above the LTV threshold",
        ProgramKind::Fha => "FHA: financed upfront MIP plus flat annual MIP",
        ProgramKind::Va => "VA: financed funding fee, no monthly mortgage insurance",
        ProgramKind::Jumbo => "Jumbo: credit-tiered PMI with conforming-limit classification",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_program_deserializes_tagged() {
        let p: LoanProgram =
            serde_json::from_str(r#"{"type":"conventional","credit_score":740}"#).unwrap();
        assert_eq!(p, LoanProgram::Conventional { credit_score: 740 });

        let p: LoanProgram = serde_json::from_str(r#"{"type":"va"}"#).unwrap();
        assert_eq!(
            p,
            LoanProgram::Va {
                funding_fee_use: VaFundingFeeUse::FirstUse
            }
        );

        let p: LoanProgram = serde_json::from_str(r#"{"type":"fha"}"#).unwrap();
        assert_eq!(p.kind(), ProgramKind::Fha);
    }

    #[test]
    fn test_only_fha_has_minimum_down() {
        let config = ProgramConfig::default();
        assert_eq!(LoanProgram::Fha.minimum_down_payment_pct(&config), Some(dec!(3.5)));
        assert_eq!(
            LoanProgram::Conventional { credit_score: 700 }.minimum_down_payment_pct(&config),
            None
        );
    }

    #[test]
    fn test_negative_loan_rejected() {
        let input = ProgramCostInput {
            loan_amount: dec!(-10),
            home_price: dec!(100000),
            ltv_pct: None,
            program: LoanProgram::Fha,
        };
        let err = calculate_program_costs(&input, &ProgramConfig::default()).unwrap_err();
        assert!(matches!(err, MortgageCalcError::InvalidLoanParameters { .. }));
    }

    #[test]
    fn test_ltv_override() {
        let input = ProgramCostInput {
            loan_amount: dec!(300000),
            home_price: dec!(400000),
            ltv_pct: Some(dec!(80.01)),
            program: LoanProgram::Conventional { credit_score: 700 },
        };
        let out = calculate_program_costs(&input, &ProgramConfig::default()).unwrap();
        assert!(out.result.mortgage_insurance_applies);
    }

    #[test]
    fn test_zero_price_warns() {
        let input = ProgramCostInput {
            loan_amount: Decimal::ZERO,
            home_price: Decimal::ZERO,
            ltv_pct: None,
            program: LoanProgram::Conventional { credit_score: 700 },
        };
        let out = calculate_program_costs(&input, &ProgramConfig::default()).unwrap();
        assert!(!out.result.mortgage_insurance_applies);
        assert!(out.warnings.iter().any(|w| w.contains("LTV reported as 0")));
    }
}
