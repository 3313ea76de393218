//! Currency amounts in minor units.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const CENTS_PER_UNIT: i64 = 100;

/// Amount of money in the smallest currency unit (cents).
///
/// Integer arithmetic keeps salary computations exact; percentage increases round
/// half-up to the cent.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units (e.g. `200_000` for a cap of 200,000.00).
    pub fn from_major(units: i64) -> DomainResult<Self> {
        units
            .checked_mul(CENTS_PER_UNIT)
            .map(Self)
            .ok_or_else(|| DomainError::validation(format!("amount {units} is out of range")))
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `self * (1 + percent / 100)`, rounded half-up to the cent.
    pub fn increased_by_percent(self, percent: u32) -> DomainResult<Self> {
        let numerator = i128::from(self.0) * (100 + i128::from(percent));
        let rounded = if numerator >= 0 {
            (numerator + 50) / 100
        } else {
            -((-numerator + 50) / 100)
        };
        i64::try_from(rounded)
            .map(Self)
            .map_err(|_| DomainError::invariant(format!("{self} raised by {percent}% overflows")))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = CENTS_PER_UNIT as u64;
        write!(f, "{sign}{}.{:02}", abs / per, abs % per)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parses `"120000"`, `"120000.5"` or `"120000.50"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::validation(format!("invalid amount: '{s}'"));

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if digits.contains('.') && fraction.is_empty() {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }
}
