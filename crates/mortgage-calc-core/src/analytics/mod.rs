pub mod affordability;
pub mod dscr;
pub mod refinance;

pub use affordability::{
    analyze_affordability, dti, max_affordable_loan, monthly_payment_summary,
    AffordabilityInput, AffordabilityMetrics, AffordabilityOutput, DtiConstraint, MaxLoanInput,
    MaxLoanOutput, MonthlyPaymentSummary,
};
pub use dscr::{analyze_dscr, DscrInput, DscrOutput};
pub use refinance::{
    analyze_refinance, blended_rate, break_even_months, Debt, RefinanceAnalysis, RefinanceInput,
};
