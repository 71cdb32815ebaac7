use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

/// An exact amount of currency, held in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money {
    cents: u64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn cents(&self) -> u64 {
        self.cents
    }

    pub fn times(&self, count: usize) -> Money {
        Money::from_cents(self.cents.saturating_mul(count as u64))
    }

    /// The amount with two decimals and no currency sign, e.g. `20.00`.
    pub fn amount(&self) -> String {
        format!("{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.amount())
    }
}

impl FromStr for Money {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidMoney(s.to_string());
        let trimmed = s.trim().trim_start_matches('$');

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        if whole.is_empty()
            || fraction.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Money::from_cents)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Money {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.amount()
    }
}

#[cfg(test)]
mod tests {
    use super::Money;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(2000).to_string(), "$20.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(1250).amount(), "12.50");
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("10.00".parse::<Money>().unwrap(), Money::from_cents(1000));
        assert_eq!("10".parse::<Money>().unwrap(), Money::from_cents(1000));
        assert_eq!("7.5".parse::<Money>().unwrap(), Money::from_cents(750));
        assert_eq!("$3.25".parse::<Money>().unwrap(), Money::from_cents(325));
        assert!("".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("-1.00".parse::<Money>().is_err());
        assert!("ten".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_times() {
        assert_eq!(Money::from_cents(1000).times(2), Money::from_cents(2000));
        assert_eq!(Money::from_cents(1000).times(0), Money::ZERO);
    }

    #[test]
    fn test_money_serde_as_string() {
        let json = serde_json::to_string(&Money::from_cents(1000)).unwrap();
        assert_eq!(json, "\"10.00\"");
        let back: Money = serde_json::from_str("\"15.50\"").unwrap();
        assert_eq!(back, Money::from_cents(1550));
    }
}
