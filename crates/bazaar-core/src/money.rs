//! # Money Module
//!
//! Provides the `Money` type for item prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "88.88" is parsed digit by digit into 8888 cents.                    │
//! │    Price filters compare cents against cents.                           │
//! │    A float only appears when a price is written into a JSON envelope.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let price = Money::parse_decimal("88.88").unwrap();
//! assert_eq!(price.cents(), 8888);
//! assert_eq!(price.to_string(), "88.88");
//!
//! // Search bounds arrive as whole currency units
//! let floor = Money::from_whole_units(50).unwrap();
//! assert!(price >= floor);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

/// Number of cents in one whole currency unit.
const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Parsing can see negative input; validation rejects it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Ord**: Price filters compare `Money` directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Checks if the value is below zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Returns `None` if the value doesn't fit in cents.
    pub fn from_whole_units(units: i64) -> Option<Self> {
        units.checked_mul(CENTS_PER_UNIT).map(Money)
    }

    /// Parses an exact decimal string such as `"88.88"`, `"1000.0"` or `"-2.5"`.
    ///
    /// ## Rules
    /// - Optional leading `+` or `-`
    /// - Digits, optionally followed by `.` and more digits
    /// - At least one digit overall; no exponents, no separators
    /// - Beyond two fractional digits the value is rounded half away from zero
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("1.005").unwrap().cents(), 101);
    /// assert!(Money::parse_decimal("1e3").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Self, MoneyParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(MoneyParseError::Invalid(input.to_string()));
        }

        let overflow = || MoneyParseError::Overflow(input.to_string());

        let mut cents: i64 = 0;
        for digit in whole.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i64::from(digit - b'0')))
                .ok_or_else(overflow)?;
        }
        cents = cents.checked_mul(CENTS_PER_UNIT).ok_or_else(overflow)?;

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        cents = cents
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in currency units as a float.
    ///
    /// Only for serialization into JSON envelopes; never compute with it.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Shows the value as `units.cents`, e.g. `88.88` or `-2.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / CENTS_PER_UNIT as u64;
        let cents = abs % CENTS_PER_UNIT as u64;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// Failure to read a decimal string as Money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("empty amount")]
    Empty,

    #[error("'{0}' is not a decimal amount")]
    Invalid(String),

    #[error("'{0}' is out of range")]
    Overflow(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("88.88").unwrap().cents(), 8888);
        assert_eq!(Money::parse_decimal("1000.0").unwrap().cents(), 100_000);
        assert_eq!(Money::parse_decimal("1000").unwrap().cents(), 100_000);
        assert_eq!(Money::parse_decimal("0.99").unwrap().cents(), 99);
        assert_eq!(Money::parse_decimal(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse_decimal("2.").unwrap().cents(), 200);
        assert_eq!(Money::parse_decimal(" 13.25 ").unwrap().cents(), 1325);
        assert_eq!(Money::parse_decimal("-2.50").unwrap().cents(), -250);
        assert_eq!(Money::parse_decimal("+7").unwrap().cents(), 700);
    }

    #[test]
    fn test_parse_decimal_rounds_third_digit() {
        assert_eq!(Money::parse_decimal("1.005").unwrap().cents(), 101);
        assert_eq!(Money::parse_decimal("1.004").unwrap().cents(), 100);
        assert_eq!(Money::parse_decimal("-1.005").unwrap().cents(), -101);
        assert_eq!(Money::parse_decimal("0.999").unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(Money::parse_decimal(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse_decimal("   "), Err(MoneyParseError::Empty));
        assert!(matches!(Money::parse_decimal("abc"), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(Money::parse_decimal("1e3"), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(Money::parse_decimal("."), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(Money::parse_decimal("-"), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(Money::parse_decimal("1,000"), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(
            Money::parse_decimal("99999999999999999999"),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_from_whole_units() {
        assert_eq!(Money::from_whole_units(50), Some(Money::from_cents(5_000)));
        assert_eq!(Money::from_whole_units(0), Some(Money::zero()));
        assert_eq!(Money::from_whole_units(i64::MAX), None);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Money::from_cents(8888).as_f64(), 88.88);
        assert_eq!(Money::from_cents(100_000).as_f64(), 1000.0);
        assert_eq!(Money::from_cents(99).as_f64(), 0.99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(8888).to_string(), "88.88");
        assert_eq!(Money::from_cents(200).to_string(), "2.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn test_ordering() {
        assert!(Money::from_cents(5_000) < Money::from_cents(8_888));
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::zero().is_negative());
    }
}
