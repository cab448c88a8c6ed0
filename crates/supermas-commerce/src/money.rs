//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so menu totals never pick up
//! floating-point drift.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::error::{CommerceError, Result};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    GBP,
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::USD => "$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Shorthand for a euro amount in cents.
    pub fn eur(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::EUR)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use supermas_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(5.5, Currency::EUR);
    /// assert_eq!(price.amount_cents, 550);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "€13.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "13.00").
    ///
    /// Formats from the integer amount so no rounding is involved.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_i64.pow(places);
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let divisor = divisor as u64;
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / divisor,
            abs % divisor,
            width = places as usize
        )
    }

    /// Try to add another Money value.
    pub fn try_add(&self, other: &Money) -> Result<Money> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a quantity, failing on overflow.
    pub fn try_multiply(&self, factor: i64) -> Result<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Sum an iterator of Money values.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Result<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Result<Money>;

    fn add(self, other: Money) -> Result<Money> {
        self.try_add(&other)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(11.0, Currency::EUR).amount_cents, 1100);
        assert_eq!(Money::from_decimal(6.5, Currency::EUR).amount_cents, 650);
        assert_eq!(Money::from_decimal(0.1 + 0.2, Currency::EUR).amount_cents, 30);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::eur(3900).display(), "\u{20ac}39.00");
        assert_eq!(Money::eur(550).display_amount(), "5.50");
        assert_eq!(Money::eur(5).display_amount(), "0.05");
        assert_eq!(Money::eur(-250).display_amount(), "-2.50");
    }

    #[test]
    fn test_money_addition() {
        let total = (Money::eur(1100) + Money::eur(200)).unwrap();
        assert_eq!(total.amount_cents, 1300);
    }

    #[test]
    fn test_money_multiply() {
        assert_eq!(Money::eur(1300).try_multiply(3).unwrap().amount_cents, 3900);
        assert_eq!(Money::eur(i64::MAX).try_multiply(2), Err(CommerceError::Overflow));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let err = Money::eur(100).try_add(&Money::new(100, Currency::GBP)).unwrap_err();
        assert!(matches!(err, CommerceError::CurrencyMismatch { .. }));
    }

    #[test]
    fn test_money_sum() {
        let amounts = [Money::eur(100), Money::eur(250), Money::eur(50)];
        let sum = Money::try_sum(amounts.iter(), Currency::EUR).unwrap();
        assert_eq!(sum.amount_cents, 400);
        assert!(Money::try_sum([].iter(), Currency::EUR).unwrap().is_zero());
    }
}
