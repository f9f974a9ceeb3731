//! Credit-score bands and their annual PMI rates.
//!
//! Held as one ordered table, ascending by the lower bound of each band, and
//! queried once per calculation. Validation on construction (and on
//! deserialization) guarantees a better band never costs more than a worse one.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageCalcError;
use crate::types::Percent;
use crate::MortgageCalcResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditTier {
    /// Display label, e.g. "700-719".
    pub label: String,
    /// Lowest score in the band (inclusive).
    pub min_score: u16,
    /// Annual PMI as a percentage of the loan amount.
    pub annual_pmi_rate_pct: Percent,
}

/// Result of a score lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierMatch<'a> {
    pub tier: &'a CreditTier,
    /// The score sat below every band and was priced at the lowest one.
    pub below_table: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CreditTier>", into = "Vec<CreditTier>")]
pub struct CreditTierTable {
    tiers: Vec<CreditTier>,
}

impl CreditTierTable {
    pub fn new(tiers: Vec<CreditTier>) -> MortgageCalcResult<Self> {
        if tiers.is_empty() {
            return Err(MortgageCalcError::InvalidConfig(
                "credit tier table must contain at least one band".into(),
            ));
        }

        for tier in &tiers {
            if tier.annual_pmi_rate_pct < Decimal::ZERO {
                return Err(MortgageCalcError::InvalidConfig(format!(
                    "credit tier '{}' has a negative PMI rate",
                    tier.label
                )));
            }
        }

        for pair in tiers.windows(2) {
            let (worse, better) = (&pair[0], &pair[1]);
            if better.min_score <= worse.min_score {
                return Err(MortgageCalcError::InvalidConfig(format!(
                    "credit tiers must ascend by min_score: '{}' ({}) follows '{}' ({})",
                    better.label, better.min_score, worse.label, worse.min_score
                )));
            }
            if better.annual_pmi_rate_pct > worse.annual_pmi_rate_pct {
                return Err(MortgageCalcError::InvalidConfig(format!(
                    "credit tier '{}' charges more PMI than worse tier '{}'",
                    better.label, worse.label
                )));
            }
        }

        Ok(CreditTierTable { tiers })
    }

    pub fn tiers(&self) -> &[CreditTier] {
        &self.tiers
    }

    /// Band containing `score`; scores under the first band get the first band.
    pub fn lookup(&self, score: u16) -> TierMatch<'_> {
        match self.tiers.iter().rev().find(|t| t.min_score <= score) {
            Some(tier) => TierMatch {
                tier,
                below_table: false,
            },
            None => TierMatch {
                tier: &self.tiers[0],
                below_table: true,
            },
        }
    }
}

impl TryFrom<Vec<CreditTier>> for CreditTierTable {
    type Error = MortgageCalcError;

    fn try_from(tiers: Vec<CreditTier>) -> Result<Self, Self::Error> {
        CreditTierTable::new(tiers)
    }
}

impl From<CreditTierTable> for Vec<CreditTier> {
    fn from(table: CreditTierTable) -> Self {
        table.tiers
    }
}

impl Default for CreditTierTable {
    fn default() -> Self {
        let band = |label: &str, min_score: u16, rate: Decimal| CreditTier {
            label: label.into(),
            min_score,
            annual_pmi_rate_pct: rate,
        };
        CreditTierTable {
            tiers: vec![
                band("620-679", 620, dec!(1.10)),
                band("680-699", 680, dec!(0.85)),
                band("700-719", 700, dec!(0.65)),
                band("720-739", 720, dec!(0.50)),
                band("740-759", 740, dec!(0.40)),
                band("760+", 760, dec!(0.30)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = CreditTierTable::default();
        assert!(CreditTierTable::new(table.tiers().to_vec()).is_ok());
    }

    #[test]
    fn test_lookup_band_edges() {
        let table = CreditTierTable::default();
        assert_eq!(table.lookup(620).tier.label, "620-679");
        assert_eq!(table.lookup(679).tier.label, "620-679");
        assert_eq!(table.lookup(680).tier.label, "680-699");
        assert_eq!(table.lookup(759).tier.label, "740-759");
        assert_eq!(table.lookup(760).tier.label, "760+");
        assert_eq!(table.lookup(850).tier.label, "760+");
    }

    #[test]
    fn test_lookup_below_table() {
        let table = CreditTierTable::default();
        let m = table.lookup(580);
        assert!(m.below_table);
        assert_eq!(m.tier.label, "620-679");
    }

    #[test]
    fn test_better_credit_never_costs_more() {
        let table = CreditTierTable::default();
        let mut prev = table.lookup(300).tier.annual_pmi_rate_pct;
        for score in 300..=850u16 {
            let rate = table.lookup(score).tier.annual_pmi_rate_pct;
            assert!(rate <= prev, "score {score}");
            prev = rate;
        }
    }

    #[test]
    fn test_rejects_unsorted_bands() {
        let tiers = vec![
            CreditTier { label: "high".into(), min_score: 740, annual_pmi_rate_pct: dec!(0.4) },
            CreditTier { label: "low".into(), min_score: 620, annual_pmi_rate_pct: dec!(1.0) },
        ];
        assert!(matches!(
            CreditTierTable::new(tiers),
            Err(MortgageCalcError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_better_band_costing_more() {
        let tiers = vec![
            CreditTier { label: "low".into(), min_score: 620, annual_pmi_rate_pct: dec!(0.5) },
            CreditTier { label: "high".into(), min_score: 740, annual_pmi_rate_pct: dec!(0.6) },
        ];
        assert!(CreditTierTable::new(tiers).is_err());
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(CreditTierTable::new(Vec::new()).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"[{"label":"a","min_score":700,"annual_pmi_rate_pct":"0.5"},
                      {"label":"b","min_score":650,"annual_pmi_rate_pct":"0.9"}]"#;
        assert!(serde_json::from_str::<CreditTierTable>(bad).is_err());

        let good = r#"[{"label":"a","min_score":620,"annual_pmi_rate_pct":0.9},
                       {"label":"b","min_score":700,"annual_pmi_rate_pct":0.5}]"#;
        let table: CreditTierTable = serde_json::from_str(good).unwrap();
        assert_eq!(table.lookup(710).tier.label, "b");
    }
}
