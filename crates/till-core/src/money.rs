//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Two sodas at 1.10 stored as floats:                                   │
//! │    1.1 + 1.1 + 1.1 = 3.3000000000000003  ❌ WRONG!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    110 + 110 + 110 = 330 cents, always                                 │
//! │                                                                         │
//! │  Text from the UI ("1.10") is parsed as an exact decimal first,        │
//! │  then converted to cents. It never passes through f64.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::parse("1.50").unwrap();
//! assert_eq!(price.cents(), 150);
//!
//! let total = price * 2;
//! assert_eq!(total.to_string(), "$3.00");
//! assert_eq!(total.to_plain_string(), "3");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Parse Error
// =============================================================================

/// Why a piece of text could not be turned into money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,

    #[error("not a number")]
    NotANumber,

    #[error("more than 2 decimal places")]
    TooPrecise,

    #[error("amount is too large")]
    Overflow,
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: change and differences can be computed without
///   casting; validation rejects negative prices and payments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as the bare cent count**
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► CartEntry.unit_price_cents ──► Cart.total()
///                                                             │
///                        tendered payment ──► change = payment - total
///                                                             │
///                                              Sale.total_cents (frozen)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from an exact decimal amount.
    ///
    /// Returns an error if the decimal has more than two fractional digits
    /// (after trailing zeros are dropped) or does not fit in cents.
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyParseError> {
        let amount = amount.normalize();
        if amount.scale() > 2 {
            return Err(MoneyParseError::TooPrecise);
        }

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or(MoneyParseError::Overflow)
    }

    /// Parses decimal text such as `"1.5"`, `"10"` or `" 2.05 "`.
    ///
    /// Scientific notation, `NaN` and `inf` are not numbers here.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::{Money, MoneyParseError};
    ///
    /// assert_eq!(Money::parse("2.05").unwrap().cents(), 205);
    /// assert_eq!(Money::parse("abc"), Err(MoneyParseError::NotANumber));
    /// assert_eq!(Money::parse("1.999"), Err(MoneyParseError::TooPrecise));
    /// ```
    pub fn parse(text: &str) -> Result<Self, MoneyParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let amount = Decimal::from_str(text).map_err(|_| MoneyParseError::NotANumber)?;
        Money::from_decimal(amount)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, returning `None` if the sum does not fit.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Renders the shortest plain decimal form, without a currency symbol.
    ///
    /// This is the text inventory search matches price queries against.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(150).to_plain_string(), "1.5");
    /// assert_eq!(Money::from_cents(1000).to_plain_string(), "10");
    /// assert_eq!(Money::from_cents(199).to_plain_string(), "1.99");
    /// assert_eq!(Money::from_cents(5).to_plain_string(), "0.05");
    /// ```
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = self.dollars().abs();
        let frac = self.cents_part();

        if frac == 0 {
            format!("{}{}", sign, whole)
        } else if frac % 10 == 0 {
            format!("{}{}.{}", sign, whole, frac / 10)
        } else {
            format!("{}{}.{:02}", sign, whole, frac)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$1.50`.
///
/// ## Note
/// The configured currency symbol is applied by `till-pos` at the
/// presentation boundary; this is the default rendering.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_parse_accepts_plain_decimals() {
        assert_eq!(Money::parse("1.5").unwrap().cents(), 150);
        assert_eq!(Money::parse("1.50").unwrap().cents(), 150);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse(" 0.05 ").unwrap().cents(), 5);
        assert_eq!(Money::parse("0").unwrap().cents(), 0);
        // trailing zeros beyond the cent do not count as precision
        assert_eq!(Money::parse("3.000").unwrap().cents(), 300);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("abc"), Err(MoneyParseError::NotANumber));
        assert_eq!(Money::parse("NaN"), Err(MoneyParseError::NotANumber));
        assert_eq!(Money::parse("inf"), Err(MoneyParseError::NotANumber));
        assert_eq!(Money::parse("1.2.3"), Err(MoneyParseError::NotANumber));
        assert_eq!(Money::parse("0.001"), Err(MoneyParseError::TooPrecise));
    }

    #[test]
    fn test_parse_keeps_sign() {
        // Sign rules belong to validation, parsing just reports the value
        assert_eq!(Money::parse("-2").unwrap().cents(), -200);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(150).to_plain_string(), "1.5");
        assert_eq!(Money::from_cents(1000).to_plain_string(), "10");
        assert_eq!(Money::from_cents(1099).to_plain_string(), "10.99");
        assert_eq!(Money::from_cents(0).to_plain_string(), "0");
        assert_eq!(Money::from_cents(-250).to_plain_string(), "-2.5");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_cents(150);
        assert_eq!(a.checked_add(a), Some(Money::from_cents(300)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    /// 1.10 three times must be exactly 3.30
    #[test]
    fn test_no_float_drift() {
        let price = Money::parse("1.1").unwrap();
        let total: Money = std::iter::repeat(price).take(3).sum();
        assert_eq!(total, Money::parse("3.3").unwrap());
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(150)).unwrap();
        assert_eq!(json, "150");
    }
}
