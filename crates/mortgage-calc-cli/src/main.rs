mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::analytics::{AffordabilityArgs, DscrArgs, MaxLoanArgs, RefinanceArgs};
use commands::funnel::EstimateArgs;
use commands::loan::{DownPaymentArgs, PaymentArgs, ScheduleArgs};
use commands::programs::ProgramCostsArgs;
use commands::scenario::ScenarioArgs;

/// Mortgage payment, loan program and refinance calculations
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "Mortgage payment, loan program and refinance calculations",
    long_about = "A CLI for mortgage calculations with decimal precision. Supports \
                  fixed-rate amortization, down payment resolution, conventional/FHA/VA/jumbo \
                  program costs, DTI affordability, refinance break-even and DSCR."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Program rule overrides (.json, .yaml or .yml)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly P&I, total interest and payoff month for a loan
    Payment(PaymentArgs),
    /// Month-by-month payoff schedule, optionally with extra principal
    Schedule(ScheduleArgs),
    /// Resolve a percent or dollar down payment into loan amount and LTV
    DownPayment(DownPaymentArgs),
    /// Upfront fees and monthly mortgage insurance for a loan program
    ProgramCosts(ProgramCostsArgs),
    /// Full purchase scenario: down payment, program costs, payment and DTI
    Scenario(ScenarioArgs),
    /// Total monthly payment and front/back-end DTI
    Affordability(AffordabilityArgs),
    /// Largest loan that fits DTI limits
    MaxLoan(MaxLoanArgs),
    /// Refinance savings, break-even and lifetime interest comparison
    Refinance(RefinanceArgs),
    /// Debt service coverage ratio for an investment property
    Dscr(DscrArgs),
    /// Quick payment estimate at the illustrative funnel rate
    Estimate(EstimateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Diagnostics go to stderr so stdout stays machine readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match input::config::load_program_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::DownPayment(args) => commands::loan::run_down_payment(args, &config),
        Commands::ProgramCosts(args) => commands::programs::run_program_costs(args, &config),
        Commands::Scenario(args) => commands::scenario::run_scenario(args, &config),
        Commands::Affordability(args) => commands::analytics::run_affordability(args),
        Commands::MaxLoan(args) => commands::analytics::run_max_loan(args),
        Commands::Refinance(args) => commands::analytics::run_refinance(args),
        Commands::Dscr(args) => commands::analytics::run_dscr(args, &config),
        Commands::Estimate(args) => commands::funnel::run_estimate(args, &config),
        Commands::Version => {
            println!("mcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
