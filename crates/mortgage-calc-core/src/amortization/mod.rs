pub mod payment;
pub mod schedule;

pub use payment::{
    amortize, compute_monthly_payment, compute_total_interest, payoff_date_label,
    AmortizationInput, AmortizationResult, TotalInterest,
};
pub use schedule::{
    payoff_schedule, PayoffSchedule, ScheduleInput, ScheduleRow, YearSummary, MAX_SCHEDULE_PAYMENTS,
};
