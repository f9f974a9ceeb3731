//! Static program metadata: conforming limit, MIP and funding fee rates, the
//! PMI credit-tier table, the DSCR minimum and the lead-funnel illustrative
//! terms.
//!
//! Annual updates (a new conforming limit, a revised fee schedule) are edits
//! to this configuration, not to the program formulas. Every struct carries
//! `#[serde(default)]` so a partial file overrides only the fields it names.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageCalcError;
use crate::programs::credit_tiers::CreditTierTable;
use crate::types::{Money, Percent, Years};
use crate::MortgageCalcResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    /// Largest loan eligible for standard agency backing.
    pub conforming_loan_limit: Money,
    /// Mortgage insurance applies only strictly above this LTV.
    pub mortgage_insurance_ltv_threshold_pct: Percent,
    pub fha: FhaConfig,
    pub va: VaConfig,
    pub credit_tiers: CreditTierTable,
    pub dscr: DscrConfig,
    pub funnel: FunnelConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FhaConfig {
    pub upfront_mip_pct: Percent,
    /// Flat annual MIP, independent of LTV band and loan size.
    pub annual_mip_pct: Percent,
    pub minimum_down_payment_pct: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaConfig {
    pub first_use_fee_pct: Percent,
    pub subsequent_use_fee_pct: Percent,
    pub exempt_fee_pct: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DscrConfig {
    /// Rent / PITIA a DSCR loan must reach to qualify.
    pub minimum_ratio: Decimal,
}

/// Single illustrative rate and term quoted by the purchase and refinance funnels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    pub illustrative_rate_pct: Percent,
    pub term_years: Years,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        ProgramConfig {
            conforming_loan_limit: dec!(806500),
            mortgage_insurance_ltv_threshold_pct: dec!(80),
            fha: FhaConfig::default(),
            va: VaConfig::default(),
            credit_tiers: CreditTierTable::default(),
            dscr: DscrConfig::default(),
            funnel: FunnelConfig::default(),
        }
    }
}

impl Default for FhaConfig {
    fn default() -> Self {
        FhaConfig {
            upfront_mip_pct: dec!(1.75),
            annual_mip_pct: dec!(0.55),
            minimum_down_payment_pct: dec!(3.5),
        }
    }
}

impl Default for VaConfig {
    fn default() -> Self {
        VaConfig {
            first_use_fee_pct: dec!(2.15),
            subsequent_use_fee_pct: dec!(3.3),
            exempt_fee_pct: Decimal::ZERO,
        }
    }
}

impl Default for DscrConfig {
    fn default() -> Self {
        DscrConfig {
            minimum_ratio: dec!(1.0),
        }
    }
}

impl Default for FunnelConfig {
    fn default() -> Self {
        FunnelConfig {
            illustrative_rate_pct: dec!(6.875),
            term_years: dec!(30),
        }
    }
}

impl ProgramConfig {
    /// Reject values the program formulas cannot use.
    pub fn validate(&self) -> MortgageCalcResult<()> {
        if self.conforming_loan_limit <= Decimal::ZERO {
            return Err(MortgageCalcError::InvalidConfig(
                "conforming_loan_limit must be positive".into(),
            ));
        }

        let percentages = [
            ("mortgage_insurance_ltv_threshold_pct", self.mortgage_insurance_ltv_threshold_pct),
            ("fha.upfront_mip_pct", self.fha.upfront_mip_pct),
            ("fha.annual_mip_pct", self.fha.annual_mip_pct),
            ("fha.minimum_down_payment_pct", self.fha.minimum_down_payment_pct),
            ("va.first_use_fee_pct", self.va.first_use_fee_pct),
            ("va.subsequent_use_fee_pct", self.va.subsequent_use_fee_pct),
            ("va.exempt_fee_pct", self.va.exempt_fee_pct),
            ("funnel.illustrative_rate_pct", self.funnel.illustrative_rate_pct),
        ];
        for (name, value) in percentages {
            if value < Decimal::ZERO || value > dec!(100) {
                return Err(MortgageCalcError::InvalidConfig(format!(
                    "{name} must be within 0-100, got {value}"
                )));
            }
        }

        if self.dscr.minimum_ratio <= Decimal::ZERO {
            return Err(MortgageCalcError::InvalidConfig(
                "dscr.minimum_ratio must be positive".into(),
            ));
        }
        if self.funnel.term_years <= Decimal::ZERO {
            return Err(MortgageCalcError::InvalidConfig(
                "funnel.term_years must be positive".into(),
            ));
        }
        Ok(())
    }
}
