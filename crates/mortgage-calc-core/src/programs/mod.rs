pub mod config;
pub mod conventional;
pub mod costs;
pub mod credit_tiers;
pub mod fha;
pub mod jumbo;
pub mod va;

pub use config::{DscrConfig, FhaConfig, FunnelConfig, ProgramConfig, VaConfig};
pub use costs::{
    calculate_program_costs, program_costs, LoanPosition, LoanProgram, ProgramCostBreakdown,
    ProgramCostInput, ProgramKind, VaFundingFeeUse,
};
pub use credit_tiers::{CreditTier, CreditTierTable, TierMatch};
