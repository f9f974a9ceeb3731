use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages as entered on a calculator (6.5 = 6.5%). Never as fractions.
pub type Percent = Decimal;

/// Loan terms in years. Whole years in practice, fractional terms are allowed.
pub type Years = Decimal;

/// Months in a year, used for every annual-to-monthly conversion.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Round a currency amount to cents, half away from zero.
///
/// Only applied where a figure is handed to a display surface; chained
/// calculations keep full precision.
pub fn round_cents(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `numerator / denominator * 100`, or `None` when the denominator is not
/// positive and the ratio has no meaningful value.
pub fn ratio_pct(numerator: Decimal, denominator: Decimal) -> Option<Percent> {
    if denominator <= Decimal::ZERO {
        return None;
    }
    Some(numerator / denominator * dec!(100))
}
