use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::programs::{self, ProgramConfig, ProgramCostInput};

use super::{loan_program, ProgramArg, VaUseArg};
use crate::input;

/// Arguments for loan program costs
#[derive(Args)]
pub struct ProgramCostsArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Base loan amount before any financed fee
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Home price
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Loan program
    #[arg(long, value_enum)]
    pub program: Option<ProgramArg>,

    /// Borrower credit score (conventional and jumbo)
    #[arg(long)]
    pub credit_score: Option<u16>,

    /// VA funding fee category
    #[arg(long, value_enum)]
    pub va_use: Option<VaUseArg>,
}

pub fn run_program_costs(
    args: ProgramCostsArgs,
    config: &ProgramConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let cost_input: ProgramCostInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ProgramCostInput {
            loan_amount: input::required(args.loan_amount, "loan-amount")?,
            home_price: input::required(args.home_price, "home-price")?,
            ltv_pct: None,
            program: loan_program(
                input::required(args.program, "program")?,
                args.credit_score,
                args.va_use,
            )?,
        },
    };
    let result = programs::calculate_program_costs(&cost_input, config)?;
    Ok(serde_json::to_value(result)?)
}
