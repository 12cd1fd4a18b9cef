//! Amount type for monetary values stored with two decimal places.
//!
//! This module provides the `Amount` type which wraps `Decimal`. Every `Amount` is rounded to
//! cents when it is constructed, so the value held is always the value that will be written.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use tracing::debug;

/// The number of decimal places that amounts are stored with.
const SCALE: u32 = 2;

/// Represents a dollar amount rounded to cents.
///
/// Rounding uses the banker's rule (round half to even), so `0.125` becomes `0.12` and `0.135`
/// becomes `0.14`.
///
/// # Examples
///
/// Parsing from user input, with or without a dollar sign:
/// ```
/// # use spendlog::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,250.5").unwrap();
/// assert_eq!(amount.to_string(), "1250.50");
/// ```
///
/// Parsing stored data never fails, garbage becomes zero:
/// ```
/// # use spendlog::model::Amount;
/// let amount = Amount::parse_lenient("twelve");
/// assert_eq!(amount.to_string(), "0.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    /// The numerical value, always with a scale of two.
    value: Decimal,
}

impl Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

impl Amount {
    /// `0.00`.
    pub const ZERO: Amount = Amount {
        value: Decimal::from_parts(0, 0, 0, false, SCALE),
    };

    /// The largest amount that can be held with two decimal places.
    pub const MAX: Amount = Amount {
        value: Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX, false, SCALE),
    };

    /// The smallest (most negative) amount that can be held with two decimal places.
    pub const MIN: Amount = Amount {
        value: Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX, true, SCALE),
    };

    /// Creates a new Amount from a Decimal value, rounding it to two decimal places. Values too
    /// large to be held with two decimal places saturate at `Amount::MAX` or `Amount::MIN`.
    pub fn new(value: Decimal) -> Self {
        Self::try_new(value).unwrap_or_else(|| {
            if value.is_sign_negative() {
                Amount::MIN
            } else {
                Amount::MAX
            }
        })
    }

    /// Like `new`, but returns `None` when `value` cannot be held with two decimal places.
    pub fn try_new(value: Decimal) -> Option<Self> {
        let mut rounded = value.round_dp(SCALE);
        if rounded.is_zero() {
            // Drop the sign of negative zero.
            return Some(Amount::ZERO);
        }
        rounded.rescale(SCALE);
        if rounded.scale() != SCALE {
            return None;
        }
        Some(Self { value: rounded })
    }

    /// Parses a stored amount the way the record file is read: surrounding whitespace is ignored,
    /// plain and scientific notation are accepted, and anything else (including an empty cell)
    /// becomes zero.
    pub fn parse_lenient(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Amount::ZERO;
        }
        match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
            Ok(value) => Amount::try_new(value).unwrap_or_else(|| {
                debug!("Out of range amount '{trimmed}' coerced to 0.00");
                Amount::ZERO
            }),
            Err(e) => {
                debug!("Unparseable amount '{trimmed}' coerced to 0.00: {e}");
                Amount::ZERO
            }
        }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.value().is_sign_negative() && !self.is_zero()
    }

    /// Formats the amount for display with a dollar sign and thousands separators, e.g.
    /// `$1,234.50`.
    pub fn to_currency(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.value().abs();
        format!(
            "{sign}${}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }

    /// The text that keyword search matches against. This is the shortest decimal form with at
    /// least one fractional digit: `12.50` is `12.5` and `12.00` is `12.0`.
    pub fn search_text(&self) -> String {
        let normalized = self.value.normalize();
        if normalized.scale() == 0 {
            format!("{normalized}.0")
        } else {
            normalized.to_string()
        }
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

/// Strict parsing for user input. Accepts an optional leading `-`, an optional `$` and comma
/// thousands separators.
impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Remove dollar sign if present
        let without_dollar = if let Some(after_minus) = trimmed.strip_prefix('-') {
            match after_minus.strip_prefix('$') {
                Some(after_dollar) => format!("-{after_dollar}"),
                None => trimmed.to_string(),
            }
        } else if let Some(after_dollar) = trimmed.strip_prefix('$') {
            after_dollar.to_string()
        } else {
            trimmed.to_string()
        };

        // Remove commas (thousand separators)
        let without_commas = without_dollar.replace(',', "");

        let value = Decimal::from_str(&without_commas).map_err(AmountError)?;
        Amount::try_new(value).ok_or_else(|| {
            AmountError(rust_decimal::Error::ErrorString(format!(
                "'{trimmed}' is too large to be held with two decimal places"
            )))
        })
    }
}

/// The storage form: always two decimal places and no dollar sign, e.g. `12.50`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    /// Saturates at `Amount::MAX` or `Amount::MIN` instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.value.saturating_add(rhs.value))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<Decimal> for Amount {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Self::Output {
        self.value * rhs
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
