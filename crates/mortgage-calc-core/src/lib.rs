pub mod amortization;
pub mod down_payment;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "programs")]
pub mod programs;

#[cfg(feature = "analytics")]
pub mod analytics;

#[cfg(feature = "scenario")]
pub mod scenario;

#[cfg(feature = "funnel")]
pub mod funnel;

pub use error::MortgageCalcError;
pub use types::*;

/// Standard result type for all mortgage calculations
pub type MortgageCalcResult<T> = Result<T, MortgageCalcError>;
