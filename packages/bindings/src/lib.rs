use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;

use mortgage_calc_core::programs::ProgramConfig;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Program rules from an optional JSON override, validated.
fn program_config(config_json: Option<String>) -> NapiResult<ProgramConfig> {
    let config = match config_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => ProgramConfig::default(),
    };
    config.validate().map_err(to_napi_error)?;
    Ok(config)
}

fn parse_decimal(field: &str, value: &str) -> NapiResult<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| to_napi_error(format!("{}: {}", field, e)))
}

fn to_json<T: Serialize>(value: &T) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// Monthly P&I as a decimal string. Arguments are decimal strings so no
/// precision is lost crossing the JS number boundary.
#[napi]
pub fn compute_monthly_payment(
    principal: String,
    interest_rate_pct: String,
    term_years: String,
) -> NapiResult<String> {
    let payment = mortgage_calc_core::amortization::compute_monthly_payment(
        parse_decimal("principal", &principal)?,
        parse_decimal("interest_rate_pct", &interest_rate_pct)?,
        parse_decimal("term_years", &term_years)?,
    )
    .map_err(to_napi_error)?;
    Ok(payment.to_string())
}

#[napi]
pub fn compute_total_interest(
    principal: String,
    interest_rate_pct: String,
    term_years: String,
) -> NapiResult<String> {
    let interest = mortgage_calc_core::amortization::compute_total_interest(
        parse_decimal("principal", &principal)?,
        parse_decimal("interest_rate_pct", &interest_rate_pct)?,
        parse_decimal("term_years", &term_years)?,
    )
    .map_err(to_napi_error)?;
    to_json(&interest)
}

#[napi]
pub fn amortize(input_json: String) -> NapiResult<String> {
    let input: mortgage_calc_core::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_calc_core::amortization::amortize(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn payoff_schedule(input_json: String) -> NapiResult<String> {
    let input: mortgage_calc_core::amortization::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_calc_core::amortization::payoff_schedule(&input).map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Down payment
// ---------------------------------------------------------------------------

/// Resolve `LoanInputs` JSON into amount, loan amount and LTV.
#[napi]
pub fn resolve_down_payment(input_json: String) -> NapiResult<String> {
    let input: mortgage_calc_core::down_payment::LoanInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    to_json(&input.resolve())
}

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_program_costs(
    input_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let input: mortgage_calc_core::programs::ProgramCostInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = program_config(config_json)?;
    let output = mortgage_calc_core::programs::calculate_program_costs(&input, &config)
        .map_err(to_napi_error)?;
    to_json(&output)
}

/// Built-in program rules, for the UI to show or edit.
#[napi]
pub fn default_program_config() -> NapiResult<String> {
    to_json(&ProgramConfig::default())
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_scenario(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: mortgage_calc_core::scenario::ScenarioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = program_config(config_json)?;
    let output = mortgage_calc_core::scenario::calculate_scenario(&input, &config)
        .map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_affordability(input_json: String) -> NapiResult<String> {
    let input: mortgage_calc_core::analytics::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_calc_core::analytics::analyze_affordability(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn max_affordable_loan(input_json: String) -> NapiResult<String> {
    let input: mortgage_calc_core::analytics::MaxLoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_calc_core::analytics::max_affordable_loan(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn analyze_refinance(input_json: String) -> NapiResult<String> {
    let input: mortgage_calc_core::analytics::RefinanceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_calc_core::analytics::analyze_refinance(&input).map_err(to_napi_error)?;
    to_json(&output)
}

/// DSCR qualification; the minimum ratio comes from `config_json` unless the
/// input overrides it.
#[napi]
pub fn analyze_dscr(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: mortgage_calc_core::analytics::DscrInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = program_config(config_json)?;
    let output =
        mortgage_calc_core::analytics::analyze_dscr(&input, &config).map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Funnel estimates
// ---------------------------------------------------------------------------

#[napi]
pub fn estimate_purchase_payment(
    home_price: String,
    down_payment_pct: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let config = program_config(config_json)?;
    let estimate = mortgage_calc_core::funnel::estimate_purchase_payment(
        parse_decimal("home_price", &home_price)?,
        parse_decimal("down_payment_pct", &down_payment_pct)?,
        &config,
    )
    .map_err(to_napi_error)?;
    to_json(&estimate)
}

#[napi]
pub fn estimate_refinance_payment(
    loan_balance: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let config = program_config(config_json)?;
    let estimate = mortgage_calc_core::funnel::estimate_refinance_payment(
        parse_decimal("loan_balance", &loan_balance)?,
        &config,
    )
    .map_err(to_napi_error)?;
    to_json(&estimate)
}
