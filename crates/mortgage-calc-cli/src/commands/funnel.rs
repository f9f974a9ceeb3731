use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::funnel;
use mortgage_calc_core::programs::ProgramConfig;

#[derive(Args)]
pub struct EstimateArgs {
    #[command(subcommand)]
    pub kind: EstimateKind,
}

#[derive(Subcommand)]
pub enum EstimateKind {
    /// Purchase estimate from price and down payment percent
    Purchase {
        /// Home price
        #[arg(long)]
        home_price: Decimal,

        /// Down payment percent
        #[arg(long, default_value = "20")]
        down_payment_pct: Decimal,
    },
    /// Refinance estimate from the current balance
    Refinance {
        /// Current loan balance
        #[arg(long, alias = "balance")]
        loan_balance: Decimal,
    },
}

pub fn run_estimate(
    args: EstimateArgs,
    config: &ProgramConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let estimate = match args.kind {
        EstimateKind::Purchase {
            home_price,
            down_payment_pct,
        } => funnel::estimate_purchase_payment(home_price, down_payment_pct, config)?,
        EstimateKind::Refinance { loan_balance } => {
            funnel::estimate_refinance_payment(loan_balance, config)?
        }
    };
    Ok(serde_json::to_value(estimate)?)
}
