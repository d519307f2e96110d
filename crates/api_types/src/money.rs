use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Errors produced while parsing an [`Amount`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("too many decimals: {0}")]
    TooManyDecimals(String),
    #[error("amount too large")]
    Overflow,
}

/// Exact money amount with two decimals, held as integer **minor units**.
///
/// On the wire an amount is a decimal string (`"12.50"`). Deserialization also
/// accepts a JSON number, which is read through its decimal representation so
/// that `12.5` and `"12.50"` are the same amount.
///
/// ```rust
/// use api_types::Amount;
///
/// let amount: Amount = "10,5".parse().unwrap();
/// assert_eq!(amount.minor(), 1050);
/// assert_eq!(amount.to_string(), "10.50");
/// assert!("12.345".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from minor units (cents).
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`; rejects more than two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::Invalid(s.trim().to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim().replace(',', ".");
        if rest.is_empty() {
            return Err(AmountError::Empty);
        }

        let (units_str, fraction_str) = match rest.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (rest.as_str(), ""),
        };

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !fraction_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| AmountError::Overflow)?;
        let fraction: i64 = match fraction_str.len() {
            0 => 0,
            1 => fraction_str.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => fraction_str.parse::<i64>().map_err(|_| invalid())?,
            _ => return Err(AmountError::TooManyDecimals(trimmed.to_string())),
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .ok_or(AmountError::Overflow)?;

        if negative {
            total.checked_neg().map(Self).ok_or(AmountError::Overflow)
        } else {
            Ok(Self(total))
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct AmountVisitor;

impl de::Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal amount with at most two decimals")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        v.checked_mul(100)
            .map(Amount)
            .ok_or_else(|| E::custom(AmountError::Overflow))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(AmountError::Overflow))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() {
            return Err(E::custom(AmountError::Invalid(v.to_string())));
        }
        v.to_string().parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_minor_units() {
        assert_eq!(Amount::from_minor(0).to_string(), "0.00");
        assert_eq!(Amount::from_minor(7).to_string(), "0.07");
        assert_eq!(Amount::from_minor(1050).to_string(), "10.50");
        assert_eq!(Amount::from_minor(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Amount>().unwrap().minor(), 1000);
        assert_eq!("10.5".parse::<Amount>().unwrap().minor(), 1050);
        assert_eq!("10,50".parse::<Amount>().unwrap().minor(), 1050);
        assert_eq!("-0.01".parse::<Amount>().unwrap().minor(), -1);
        assert_eq!("  2.30 ".parse::<Amount>().unwrap().minor(), 230);
    }

    #[test]
    fn parse_rejects_garbage_and_extra_decimals() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert!("12.345".parse::<Amount>().is_err());
        assert!("1.2.3".parse::<Amount>().is_err());
        assert!("abc".parse::<Amount>().is_err());
    }

    #[test]
    fn json_accepts_strings_and_numbers() {
        let from_str: Amount = serde_json::from_str("\"12.50\"").unwrap();
        let from_float: Amount = serde_json::from_str("12.5").unwrap();
        let from_int: Amount = serde_json::from_str("12").unwrap();
        assert_eq!(from_str.minor(), 1250);
        assert_eq!(from_float.minor(), 1250);
        assert_eq!(from_int.minor(), 1200);
        assert_eq!(serde_json::to_string(&from_str).unwrap(), "\"12.50\"");
    }
}
