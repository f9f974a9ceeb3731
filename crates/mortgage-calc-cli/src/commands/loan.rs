use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::amortization::{self, AmortizationInput, ScheduleInput};
use mortgage_calc_core::down_payment::{resolve_down_payment, resolve_with_minimum};
use mortgage_calc_core::programs::{LoanProgram, ProgramConfig};

use super::{default_first_payment_date, DownPaymentKind};
use crate::input;

/// Arguments for the level monthly payment
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (6.5 = 6.5%)
    #[arg(long, alias = "rate")]
    pub interest_rate_pct: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term", default_value = "30")]
    pub term_years: Decimal,

    /// First payment date (YYYY-MM-DD); defaults to the first of next month
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,
}

/// Arguments for the payoff schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub interest_rate_pct: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term", default_value = "30")]
    pub term_years: Decimal,

    /// Additional principal paid every month
    #[arg(long, alias = "extra", default_value = "0")]
    pub extra_monthly_payment: Decimal,

    /// First payment date (YYYY-MM-DD); defaults to the first of next month
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,

    /// Only print the yearly summary instead of every month
    #[arg(long)]
    pub yearly: bool,
}

/// Arguments for down payment resolution
#[derive(Args)]
pub struct DownPaymentArgs {
    /// Home price
    #[arg(long)]
    pub home_price: Decimal,

    /// Down payment, as a percent or dollar amount per --kind
    #[arg(long)]
    pub down_payment: Decimal,

    /// How --down-payment is interpreted
    #[arg(long, value_enum, default_value = "percent")]
    pub kind: DownPaymentKind,

    /// Apply the FHA minimum down payment
    #[arg(long)]
    pub fha: bool,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut amort_input: AmortizationInput =
        match input::from_file_or_stdin(args.input.as_deref())? {
            Some(parsed) => parsed,
            None => AmortizationInput {
                principal: input::required(args.principal, "principal")?,
                interest_rate_pct: input::required(args.interest_rate_pct, "interest-rate-pct")?,
                term_years: args.term_years,
                first_payment_date: args.first_payment_date,
            },
        };
    if amort_input.first_payment_date.is_none() {
        amort_input.first_payment_date = default_first_payment_date();
    }
    let result = amortization::amortize(&amort_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut schedule_input: ScheduleInput =
        match input::from_file_or_stdin(args.input.as_deref())? {
            Some(parsed) => parsed,
            None => ScheduleInput {
                principal: input::required(args.principal, "principal")?,
                interest_rate_pct: input::required(args.interest_rate_pct, "interest-rate-pct")?,
                term_years: args.term_years,
                extra_monthly_payment: args.extra_monthly_payment,
                first_payment_date: args.first_payment_date,
            },
        };
    if schedule_input.first_payment_date.is_none() {
        schedule_input.first_payment_date = default_first_payment_date();
    }
    let result = amortization::payoff_schedule(&schedule_input)?;
    let mut value = serde_json::to_value(result)?;
    if args.yearly {
        if let Some(res) = value.get_mut("result").and_then(Value::as_object_mut) {
            res.remove("rows");
        }
    }
    Ok(value)
}

pub fn run_down_payment(
    args: DownPaymentArgs,
    config: &ProgramConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let resolved = match LoanProgram::Fha.minimum_down_payment_pct(config) {
        Some(minimum) if args.fha => {
            resolve_with_minimum(args.home_price, args.down_payment, args.kind.into(), minimum)
        }
        _ => resolve_down_payment(args.home_price, args.down_payment, args.kind.into()),
    };
    Ok(serde_json::to_value(resolved)?)
}
