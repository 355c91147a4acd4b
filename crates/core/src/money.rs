//! Fixed-point currency amount.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_object::ValueObject;

const MINOR_PER_MAJOR: i64 = 100;

/// Signed amount in minor units (cents), two decimal places.
///
/// Arithmetic is exact and checked: there is no rounding and no silent
/// wrap-around. Text input with more than two fractional digits is rejected
/// rather than rounded.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `from_major(5000)` is `5000.00`.
    ///
    /// Returns `None` if the value does not fit.
    pub fn from_major(units: i64) -> Option<Self> {
        units.checked_mul(MINOR_PER_MAJOR).map(Self)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn checked_neg(self) -> Option<Money> {
        self.0.checked_neg().map(Money)
    }

    /// Renders the magnitude only (no sign), e.g. `1200.00`.
    pub fn display_abs(self) -> impl core::fmt::Display {
        Magnitude(self.0.unsigned_abs())
    }
}

struct Magnitude(u64);

impl core::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let per = MINOR_PER_MAJOR as u64;
        write!(f, "{}.{:02}", self.0 / per, self.0 % per)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{}", self.display_abs())
    }
}

/// Failure to parse a textual amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseMoneyError {
    #[error("empty amount")]
    Empty,

    #[error("malformed amount: {0:?}")]
    Malformed(String),

    #[error("too many decimal places (at most 2): {0:?}")]
    TooPrecise(String),

    #[error("amount out of range: {0:?}")]
    OutOfRange(String),
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(ParseMoneyError::Malformed(text.to_string()));
        }
        if fraction.len() > 2 {
            return Err(ParseMoneyError::TooPrecise(text.to_string()));
        }

        let out_of_range = || ParseMoneyError::OutOfRange(text.to_string());

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| out_of_range())? * 10,
            _ => fraction.parse().map_err(|_| out_of_range())?,
        };

        let cents = whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(out_of_range)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}
