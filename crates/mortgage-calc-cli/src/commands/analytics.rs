use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::analytics::{
    self, AffordabilityInput, DscrInput, MaxLoanInput, RefinanceInput,
};
use mortgage_calc_core::programs::ProgramConfig;

use crate::input;

/// Arguments for DTI affordability
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly principal and interest
    #[arg(long, alias = "pi")]
    pub principal_and_interest: Option<Decimal>,

    /// Annual property tax
    #[arg(long, alias = "tax", default_value = "0")]
    pub annual_property_tax: Decimal,

    /// Annual homeowners insurance
    #[arg(long, alias = "insurance", default_value = "0")]
    pub annual_insurance: Decimal,

    /// Monthly HOA dues
    #[arg(long, alias = "hoa", default_value = "0")]
    pub hoa_monthly: Decimal,

    /// Monthly PMI or MIP
    #[arg(long, alias = "mi", default_value = "0")]
    pub monthly_mortgage_insurance: Decimal,

    /// Other monthly debt payments
    #[arg(long, alias = "debts", default_value = "0")]
    pub other_monthly_debts: Decimal,

    /// Gross monthly income
    #[arg(long, alias = "income")]
    pub gross_monthly_income: Option<Decimal>,
}

/// Arguments for maximum affordable loan
#[derive(Args)]
pub struct MaxLoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly income
    #[arg(long, alias = "income")]
    pub gross_monthly_income: Option<Decimal>,

    /// Other monthly debt payments
    #[arg(long, alias = "debts", default_value = "0")]
    pub other_monthly_debts: Decimal,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub interest_rate_pct: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term", default_value = "30")]
    pub term_years: Decimal,

    /// Annual property tax
    #[arg(long, alias = "tax", default_value = "0")]
    pub annual_property_tax: Decimal,

    /// Annual homeowners insurance
    #[arg(long, alias = "insurance", default_value = "0")]
    pub annual_insurance: Decimal,

    /// Monthly HOA dues
    #[arg(long, alias = "hoa", default_value = "0")]
    pub hoa_monthly: Decimal,

    /// Front-end DTI limit in percent
    #[arg(long, default_value = "28")]
    pub front_end_limit_pct: Decimal,

    /// Back-end DTI limit in percent
    #[arg(long, default_value = "36")]
    pub back_end_limit_pct: Decimal,

    /// Cash available for the down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,
}

/// Arguments for refinance analysis
#[derive(Args)]
pub struct RefinanceArgs {
    /// Path to JSON input file; required to include consolidated debts
    #[arg(long)]
    pub input: Option<String>,

    /// Current loan balance
    #[arg(long, alias = "balance")]
    pub current_balance: Option<Decimal>,

    /// Current annual rate in percent
    #[arg(long)]
    pub current_rate_pct: Option<Decimal>,

    /// Years remaining on the current loan
    #[arg(long)]
    pub current_remaining_term_years: Option<Decimal>,

    /// New annual rate in percent
    #[arg(long)]
    pub new_rate_pct: Option<Decimal>,

    /// New loan term in years
    #[arg(long, default_value = "30")]
    pub new_term_years: Decimal,

    /// Closing costs of the refinance
    #[arg(long, alias = "costs", default_value = "0")]
    pub refinance_costs: Decimal,

    /// Roll closing costs into the new loan
    #[arg(long)]
    pub finance_costs: bool,
}

/// Arguments for DSCR
#[derive(Args)]
pub struct DscrArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly rent
    #[arg(long, alias = "rent")]
    pub monthly_rent: Option<Decimal>,

    /// Loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub interest_rate_pct: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term", default_value = "30")]
    pub term_years: Decimal,

    /// Annual property tax
    #[arg(long, alias = "tax", default_value = "0")]
    pub annual_property_tax: Decimal,

    /// Annual insurance
    #[arg(long, alias = "insurance", default_value = "0")]
    pub annual_insurance: Decimal,

    /// Monthly HOA dues
    #[arg(long, alias = "hoa", default_value = "0")]
    pub hoa_monthly: Decimal,

    /// Minimum coverage ratio for this loan (defaults to the configured minimum)
    #[arg(long)]
    pub minimum_ratio: Option<Decimal>,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let aff_input: AffordabilityInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AffordabilityInput {
            principal_and_interest: input::required(
                args.principal_and_interest,
                "principal-and-interest",
            )?,
            annual_property_tax: args.annual_property_tax,
            annual_insurance: args.annual_insurance,
            hoa_monthly: args.hoa_monthly,
            monthly_mortgage_insurance: args.monthly_mortgage_insurance,
            other_monthly_debts: args.other_monthly_debts,
            gross_monthly_income: input::required(
                args.gross_monthly_income,
                "gross-monthly-income",
            )?,
        },
    };
    let result = analytics::analyze_affordability(&aff_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_max_loan(args: MaxLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let max_input: MaxLoanInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => MaxLoanInput {
            gross_monthly_income: input::required(
                args.gross_monthly_income,
                "gross-monthly-income",
            )?,
            other_monthly_debts: args.other_monthly_debts,
            interest_rate_pct: input::required(args.interest_rate_pct, "interest-rate-pct")?,
            term_years: args.term_years,
            annual_property_tax: args.annual_property_tax,
            annual_insurance: args.annual_insurance,
            hoa_monthly: args.hoa_monthly,
            front_end_limit_pct: args.front_end_limit_pct,
            back_end_limit_pct: args.back_end_limit_pct,
            down_payment: args.down_payment,
        },
    };
    let result = analytics::max_affordable_loan(&max_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_refinance(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RefinanceInput {
            current_balance: input::required(args.current_balance, "current-balance")?,
            current_rate_pct: input::required(args.current_rate_pct, "current-rate-pct")?,
            current_remaining_term_years: input::required(
                args.current_remaining_term_years,
                "current-remaining-term-years",
            )?,
            new_rate_pct: input::required(args.new_rate_pct, "new-rate-pct")?,
            new_term_years: args.new_term_years,
            refinance_costs: args.refinance_costs,
            finance_costs: args.finance_costs,
            additional_debts: Vec::new(),
        },
    };
    let result = analytics::analyze_refinance(&refi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_dscr(
    args: DscrArgs,
    config: &ProgramConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let dscr_input: DscrInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => DscrInput {
            monthly_rent: input::required(args.monthly_rent, "monthly-rent")?,
            loan_amount: input::required(args.loan_amount, "loan-amount")?,
            interest_rate_pct: input::required(args.interest_rate_pct, "interest-rate-pct")?,
            term_years: args.term_years,
            annual_property_tax: args.annual_property_tax,
            annual_insurance: args.annual_insurance,
            hoa_monthly: args.hoa_monthly,
            minimum_ratio: args.minimum_ratio,
        },
    };
    let result = analytics::analyze_dscr(&dscr_input, config)?;
    Ok(serde_json::to_value(result)?)
}
