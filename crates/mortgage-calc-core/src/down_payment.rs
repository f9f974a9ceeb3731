//! Down payment and loan-to-value resolution.
//!
//! Converts the percentage or dollar down payment a borrower enters into the
//! down payment amount, the base loan amount and the LTV ratio. The loan
//! amount is never clamped: a down payment larger than the price yields a
//! negative loan, which the amortization core rejects.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Money, Percent, Years};

/// How the down payment value was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownPaymentType {
    #[serde(rename = "percent", alias = "%")]
    Percent,
    #[serde(rename = "dollar", alias = "$")]
    Dollar,
}

/// Raw calculator inputs for a purchase loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInputs {
    pub home_price: Money,
    pub down_payment: Decimal,
    pub down_payment_type: DownPaymentType,
    pub interest_rate_pct: Percent,
    pub term_years: Years,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownPaymentResult {
    pub amount: Money,
    pub loan_amount: Money,
    pub ltv_pct: Percent,
    /// Effective down payment as a percentage of price (0 when price is 0).
    pub down_payment_pct: Percent,
    /// A program minimum raised the entered down payment.
    pub minimum_applied: bool,
}

impl LoanInputs {
    pub fn resolve(&self) -> DownPaymentResult {
        resolve_down_payment(self.home_price, self.down_payment, self.down_payment_type)
    }
}

/// Resolve a down payment entry into amount, loan amount and LTV.
pub fn resolve_down_payment(
    home_price: Money,
    value: Decimal,
    kind: DownPaymentType,
) -> DownPaymentResult {
    let amount = match kind {
        DownPaymentType::Percent => percent_to_dollars(home_price, value),
        DownPaymentType::Dollar => value,
    };
    build(home_price, amount, false)
}

/// Resolve a down payment, raising it to `minimum_pct` of the price when the
/// entry falls short.
pub fn resolve_with_minimum(
    home_price: Money,
    value: Decimal,
    kind: DownPaymentType,
    minimum_pct: Percent,
) -> DownPaymentResult {
    let entered = resolve_down_payment(home_price, value, kind);
    let minimum = percent_to_dollars(home_price, minimum_pct);

    if entered.amount < minimum {
        debug!(
            entered = %entered.amount,
            minimum = %minimum,
            minimum_pct = %minimum_pct,
            "down payment raised to program minimum"
        );
        return build(home_price, minimum, true);
    }
    entered
}

/// `price * pct / 100`.
pub fn percent_to_dollars(home_price: Money, pct: Percent) -> Money {
    home_price * pct / dec!(100)
}

/// `amount / price * 100`, or 0 when the price is 0.
pub fn dollars_to_percent(home_price: Money, amount: Money) -> Percent {
    if home_price.is_zero() {
        return Decimal::ZERO;
    }
    amount / home_price * dec!(100)
}

/// `loan / price * 100`, or 0 when the price is 0.
pub fn loan_to_value_pct(loan_amount: Money, home_price: Money) -> Percent {
    if home_price.is_zero() {
        return Decimal::ZERO;
    }
    loan_amount / home_price * dec!(100)
}

fn build(home_price: Money, amount: Money, minimum_applied: bool) -> DownPaymentResult {
    let loan_amount = home_price - amount;
    DownPaymentResult {
        amount,
        loan_amount,
        ltv_pct: loan_to_value_pct(loan_amount, home_price),
        down_payment_pct: dollars_to_percent(home_price, amount),
        minimum_applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_percent_entry() {
        let r = resolve_down_payment(dec!(400000), dec!(20), DownPaymentType::Percent);
        assert_eq!(r.amount, dec!(80000));
        assert_eq!(r.loan_amount, dec!(320000));
        assert_eq!(r.ltv_pct, dec!(80));
        assert_eq!(r.down_payment_pct, dec!(20));
        assert!(!r.minimum_applied);
    }

    #[test]
    fn test_dollar_entry() {
        let r = resolve_down_payment(dec!(500000), dec!(25000), DownPaymentType::Dollar);
        assert_eq!(r.amount, dec!(25000));
        assert_eq!(r.loan_amount, dec!(475000));
        assert_eq!(r.ltv_pct, dec!(95));
        assert_eq!(r.down_payment_pct, dec!(5));
    }

    #[test]
    fn test_zero_price_ltv_is_zero() {
        let r = resolve_down_payment(Decimal::ZERO, dec!(10), DownPaymentType::Percent);
        assert_eq!(r.ltv_pct, Decimal::ZERO);
        assert_eq!(r.down_payment_pct, Decimal::ZERO);
        assert_eq!(r.loan_amount, Decimal::ZERO);
    }

    #[test]
    fn test_oversized_down_payment_gives_negative_loan() {
        let r = resolve_down_payment(dec!(300000), dec!(350000), DownPaymentType::Dollar);
        assert_eq!(r.loan_amount, dec!(-50000));
        assert!(r.ltv_pct < Decimal::ZERO);
    }

    #[test]
    fn test_minimum_applied_for_percent() {
        let r = resolve_with_minimum(dec!(350000), dec!(1), DownPaymentType::Percent, dec!(3.5));
        assert!(r.minimum_applied);
        assert_eq!(r.down_payment_pct, dec!(3.5));
        assert_eq!(r.amount, dec!(12250));
    }

    #[test]
    fn test_minimum_applied_for_dollar() {
        let r = resolve_with_minimum(dec!(200000), dec!(2000), DownPaymentType::Dollar, dec!(3.5));
        assert!(r.minimum_applied);
        assert_eq!(r.amount, dec!(7000));
    }

    #[test]
    fn test_minimum_not_applied_above_floor() {
        let r = resolve_with_minimum(dec!(200000), dec!(10), DownPaymentType::Percent, dec!(3.5));
        assert!(!r.minimum_applied);
        assert_eq!(r.amount, dec!(20000));
    }

    #[test]
    fn test_percent_dollar_round_trip_grid() {
        let prices = [dec!(1), dec!(99999.99), dec!(350000), dec!(806500), dec!(2750000.5)];
        let mut pct = Decimal::ZERO;
        while pct <= dec!(100) {
            for price in prices {
                let dollars = percent_to_dollars(price, pct);
                let back = dollars_to_percent(price, dollars);
                assert!((back - pct).abs() <= dec!(0.01), "price {price} pct {pct} -> {back}");
            }
            pct += dec!(0.25);
        }
    }

    #[test]
    fn test_loan_inputs_resolve() {
        let inputs = LoanInputs {
            home_price: dec!(250000),
            down_payment: dec!(5),
            down_payment_type: DownPaymentType::Percent,
            interest_rate_pct: dec!(6.75),
            term_years: dec!(30),
        };
        assert_eq!(inputs.resolve().loan_amount, dec!(237500));
    }

    #[test]
    fn test_type_accepts_symbols() {
        let t: DownPaymentType = serde_json::from_str("\"%\"").unwrap();
        assert_eq!(t, DownPaymentType::Percent);
        let t: DownPaymentType = serde_json::from_str("\"$\"").unwrap();
        assert_eq!(t, DownPaymentType::Dollar);
    }
}
