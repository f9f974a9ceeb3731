use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageCalcError;
use crate::types::{Money, Percent, Years, MONTHS_PER_YEAR};
use crate::MortgageCalcResult;

/// Monthly periodic rate from an annual percentage: `pct / 100 / 12`.
pub fn monthly_rate(annual_rate_pct: Percent) -> Decimal {
    annual_rate_pct / dec!(100) / MONTHS_PER_YEAR
}

/// Number of monthly payments in a term: `years * 12`.
pub fn number_of_payments(term_years: Years) -> Decimal {
    term_years * MONTHS_PER_YEAR
}

/// Growth factor `(1 + r)^n`.
///
/// Whole payment counts use exact repeated multiplication; fractional counts
/// fall back to `powd`. Overflow of the 96-bit mantissa is reported instead of
/// wrapping or panicking.
pub fn compound_factor(periodic_rate: Decimal, periods: Decimal) -> MortgageCalcResult<Decimal> {
    let base = Decimal::ONE + periodic_rate;
    let factor = if periods.fract().is_zero() {
        let n = periods
            .to_u64()
            .ok_or_else(|| MortgageCalcError::loan_parameters("term_years", "Payment count out of range"))?;
        base.checked_powu(n)
    } else {
        base.checked_powd(periods)
    };

    factor.ok_or_else(|| {
        MortgageCalcError::loan_parameters(
            "interest_rate_pct",
            format!("Compound factor (1 + {periodic_rate})^{periods} overflows"),
        )
    })
}

/// Level payment that fully amortizes `principal` over `periods`.
///
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or exactly `P / n` at a zero rate.
pub fn annuity_payment(
    principal: Money,
    periodic_rate: Decimal,
    periods: Decimal,
) -> MortgageCalcResult<Money> {
    if periods <= Decimal::ZERO {
        return Err(MortgageCalcError::loan_parameters(
            "term_years",
            "Number of payments must be > 0",
        ));
    }

    if periodic_rate.is_zero() {
        return Ok(principal / periods);
    }

    let factor = compound_factor(periodic_rate, periods)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(MortgageCalcError::DivisionByZero {
            context: "annuity payment factor".into(),
        });
    }

    principal
        .checked_mul(periodic_rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| {
            MortgageCalcError::loan_parameters(
                "principal",
                format!("Payment on {principal} over {periods} periods overflows"),
            )
        })
}

/// Principal that a level `payment` retires over `periods`.
///
/// Inverse of [`annuity_payment`]: `PMT * (1 - (1+r)^-n) / r`, or `PMT * n`
/// at a zero rate.
pub fn annuity_present_value(
    payment: Money,
    periodic_rate: Decimal,
    periods: Decimal,
) -> MortgageCalcResult<Money> {
    if periods <= Decimal::ZERO {
        return Err(MortgageCalcError::loan_parameters(
            "term_years",
            "Number of payments must be > 0",
        ));
    }

    if periodic_rate.is_zero() {
        return payment.checked_mul(periods).ok_or_else(|| {
            MortgageCalcError::loan_parameters("payment", "Present value overflows")
        });
    }

    let factor = compound_factor(periodic_rate, periods)?;
    if factor.is_zero() {
        return Err(MortgageCalcError::DivisionByZero {
            context: "present value factor".into(),
        });
    }

    let discount = Decimal::ONE - Decimal::ONE / factor;
    payment
        .checked_mul(discount)
        .and_then(|v| v.checked_div(periodic_rate))
        .ok_or_else(|| {
            MortgageCalcError::loan_parameters(
                "payment",
                format!("Present value of {payment} over {periods} periods overflows"),
            )
        })
}
