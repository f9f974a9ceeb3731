use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::down_payment::LoanInputs;
use mortgage_calc_core::programs::ProgramConfig;
use mortgage_calc_core::scenario::{self, ScenarioInput};

use super::{default_first_payment_date, loan_program, DownPaymentKind, ProgramArg, VaUseArg};
use crate::input;

/// Arguments for a full purchase scenario
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Home price
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Down payment, as a percent or dollar amount per --down-payment-kind
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// How --down-payment is interpreted
    #[arg(long, value_enum, default_value = "percent")]
    pub down_payment_kind: DownPaymentKind,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub interest_rate_pct: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term", default_value = "30")]
    pub term_years: Decimal,

    /// Loan program
    #[arg(long, value_enum, default_value = "conventional")]
    pub program: ProgramArg,

    /// Borrower credit score (conventional and jumbo)
    #[arg(long)]
    pub credit_score: Option<u16>,

    /// VA funding fee category
    #[arg(long, value_enum)]
    pub va_use: Option<VaUseArg>,

    /// Annual property tax
    #[arg(long, alias = "tax", default_value = "0")]
    pub annual_property_tax: Decimal,

    /// Annual homeowners insurance
    #[arg(long, alias = "insurance", default_value = "0")]
    pub annual_insurance: Decimal,

    /// Monthly HOA dues
    #[arg(long, alias = "hoa", default_value = "0")]
    pub hoa_monthly: Decimal,

    /// Gross monthly income, for DTI
    #[arg(long, alias = "income", default_value = "0")]
    pub gross_monthly_income: Decimal,

    /// Other monthly debt payments, for back-end DTI
    #[arg(long, alias = "debts", default_value = "0")]
    pub other_monthly_debts: Decimal,
}

pub fn run_scenario(
    args: ScenarioArgs,
    config: &ProgramConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut scenario_input: ScenarioInput =
        match input::from_file_or_stdin(args.input.as_deref())? {
            Some(parsed) => parsed,
            None => ScenarioInput {
                loan: LoanInputs {
                    home_price: input::required(args.home_price, "home-price")?,
                    down_payment: input::required(args.down_payment, "down-payment")?,
                    down_payment_type: args.down_payment_kind.into(),
                    interest_rate_pct: input::required(
                        args.interest_rate_pct,
                        "interest-rate-pct",
                    )?,
                    term_years: args.term_years,
                },
                program: loan_program(args.program, args.credit_score, args.va_use)?,
                annual_property_tax: args.annual_property_tax,
                annual_insurance: args.annual_insurance,
                hoa_monthly: args.hoa_monthly,
                gross_monthly_income: args.gross_monthly_income,
                other_monthly_debts: args.other_monthly_debts,
                first_payment_date: None,
            },
        };
    if scenario_input.first_payment_date.is_none() {
        scenario_input.first_payment_date = default_first_payment_date();
    }
    let result = scenario::calculate_scenario(&scenario_input, config)?;
    Ok(serde_json::to_value(result)?)
}
