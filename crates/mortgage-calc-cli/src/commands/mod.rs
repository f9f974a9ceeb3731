pub mod analytics;
pub mod funnel;
pub mod loan;
pub mod programs;
pub mod scenario;

use chrono::{Datelike, Local, NaiveDate};
use clap::ValueEnum;
use mortgage_calc_core::down_payment::DownPaymentType;
use mortgage_calc_core::programs::{LoanProgram, VaFundingFeeUse};

/// How `--down-payment` is interpreted.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DownPaymentKind {
    Percent,
    Dollar,
}

impl From<DownPaymentKind> for DownPaymentType {
    fn from(kind: DownPaymentKind) -> Self {
        match kind {
            DownPaymentKind::Percent => DownPaymentType::Percent,
            DownPaymentKind::Dollar => DownPaymentType::Dollar,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgramArg {
    Conventional,
    Fha,
    Va,
    Jumbo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VaUseArg {
    FirstUse,
    SubsequentUse,
    Exempt,
}

impl From<VaUseArg> for VaFundingFeeUse {
    fn from(arg: VaUseArg) -> Self {
        match arg {
            VaUseArg::FirstUse => VaFundingFeeUse::FirstUse,
            VaUseArg::SubsequentUse => VaFundingFeeUse::SubsequentUse,
            VaUseArg::Exempt => VaFundingFeeUse::Exempt,
        }
    }
}

/// Build a [`LoanProgram`] from flag values; conventional and jumbo need a score.
pub fn loan_program(
    program: ProgramArg,
    credit_score: Option<u16>,
    va_use: Option<VaUseArg>,
) -> Result<LoanProgram, Box<dyn std::error::Error>> {
    let score = || {
        credit_score.ok_or_else(|| -> Box<dyn std::error::Error> {
            "--credit-score is required for conventional and jumbo programs".into()
        })
    };
    Ok(match program {
        ProgramArg::Conventional => LoanProgram::Conventional {
            credit_score: score()?,
        },
        ProgramArg::Jumbo => LoanProgram::Jumbo {
            credit_score: score()?,
        },
        ProgramArg::Fha => LoanProgram::Fha,
        ProgramArg::Va => LoanProgram::Va {
            funding_fee_use: va_use.map(Into::into).unwrap_or_default(),
        },
    })
}

/// First day of next month, the usual first payment date for a loan closing now.
pub fn default_first_payment_date() -> Option<NaiveDate> {
    let today = Local::now().date_naive();
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}
