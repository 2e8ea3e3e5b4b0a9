use std::fmt;
use std::ops::{Add, Mul};

use serde::{Serialize, Serializer};

/// US-dollar amount held as exact integer cents.
///
/// Catalog and labor rates are whole dollars and the only fraction applied is the 50%
/// equipment deposit, so every value the estimate produces is representable without
/// rounding. Arithmetic saturates instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: u64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn from_dollars(dollars: u64) -> Self {
        Self {
            cents: dollars.saturating_mul(100),
        }
    }

    pub fn cents(self) -> u64 {
        self.cents
    }

    pub fn is_zero(self) -> bool {
        self.cents == 0
    }

    /// Share of the amount; a sub-cent remainder is dropped, which whole-dollar
    /// amounts at 50% never produce.
    pub fn percent(self, percent: u64) -> Money {
        Money::from_cents(self.cents.saturating_mul(percent) / 100)
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money::from_cents(self.cents.saturating_sub(other.cents))
    }

    /// Plain `1234.50` rendering used on the wire.
    pub fn to_decimal_string(self) -> String {
        format!("{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, rhs: u64) -> Money {
        Money::from_cents(self.cents.saturating_mul(rhs))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.cents / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (index, digit) in dollars.chars().enumerate() {
            if index > 0 && (dollars.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        write!(f, "${}.{:02}", grouped, self.cents % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_groups_thousands_and_keeps_cents() {
        assert_eq!(Money::from_cents(104_000).to_string(), "$1,040.00");
        assert_eq!(Money::from_cents(5_050).to_string(), "$50.50");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "$1,234,567.89");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn half_of_whole_dollars_is_exact() {
        assert_eq!(Money::from_dollars(105).percent(50), Money::from_cents(5_250));
        assert_eq!(Money::from_dollars(100).percent(50).to_decimal_string(), "50.00");
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(2_507)).expect("serializes");
        assert_eq!(json, "\"25.07\"");
    }
}
