use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Money amount represented as **whole currency units**.
///
/// The venue bills in a currency without minor units, so every price,
/// line amount, bill total, deposit and wedding cost is an integer count of
/// units. Use this type instead of floats to avoid drift.
///
/// The value is signed only so settlement figures (which subtract deposits)
/// can go below zero; catalog prices, line amounts and reserves are validated
/// to be non-negative where they enter the engine.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_345);
/// assert_eq!(amount.units(), 12345);
/// assert_eq!(amount.to_string(), "12,345₩");
/// ```
///
/// Parsing from user input (accepts `,` thousands separators):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10000".parse::<Money>().unwrap().units(), 10_000);
/// assert_eq!("1,250,000".parse::<Money>().unwrap().units(), 1_250_000);
/// assert!("12.5".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from whole units.
    #[must_use]
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Returns the raw value in whole units.
    #[must_use]
    pub const fn units(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Checked multiplication by a count (returns `None` on overflow).
    #[must_use]
    pub fn checked_mul(self, count: i64) -> Option<Money> {
        self.0.checked_mul(count).map(Money)
    }

    /// Splits the amount in two halves.
    ///
    /// The second half is floored; the first half takes the odd remainder so
    /// both halves always add back up to `self`.
    #[must_use]
    pub const fn halves(self) -> (Money, Money) {
        let floor = self.0.div_euclid(2);
        (Money(self.0 - floor), Money(floor))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}{grouped}₩")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a whole-unit string.
    ///
    /// Accepts an optional leading `-` and `,` as thousands separator;
    /// rejects fractional parts and empty input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim()),
            None => (false, trimmed),
        };
        if rest.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let digits: String = rest.chars().filter(|c| *c != ',').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = digits
            .parse()
            .map_err(|_| EngineError::InvalidAmount("amount too large".to_string()))?;

        Ok(Money(if negative { -units } else { units }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Money::new(0).to_string(), "0₩");
        assert_eq!(Money::new(999).to_string(), "999₩");
        assert_eq!(Money::new(1000).to_string(), "1,000₩");
        assert_eq!(Money::new(1_234_567).to_string(), "1,234,567₩");
        assert_eq!(Money::new(-40_000).to_string(), "-40,000₩");
    }

    #[test]
    fn parse_accepts_separators() {
        assert_eq!("10".parse::<Money>().unwrap().units(), 10);
        assert_eq!(" 1,000 ".parse::<Money>().unwrap().units(), 1000);
        assert_eq!("-50,000".parse::<Money>().unwrap().units(), -50_000);
    }

    #[test]
    fn parse_rejects_fractions_and_garbage() {
        assert!("12.5".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
        assert!("-".parse::<Money>().is_err());
        assert!("12a".parse::<Money>().is_err());
    }

    #[test]
    fn halves_give_remainder_to_first() {
        assert_eq!(Money::new(40_000).halves(), (Money::new(20_000), Money::new(20_000)));
        assert_eq!(Money::new(10_001).halves(), (Money::new(5_001), Money::new(5_000)));
        assert_eq!(Money::ZERO.halves(), (Money::ZERO, Money::ZERO));
    }

    #[test]
    fn checked_mul_detects_overflow() {
        assert_eq!(Money::new(10_000).checked_mul(3), Some(Money::new(30_000)));
        assert_eq!(Money::new(i64::MAX).checked_mul(2), None);
    }
}
