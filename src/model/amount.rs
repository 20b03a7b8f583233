use crate::Result;
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A signed dollar amount. Wraps a `Decimal` so that arithmetic and comparisons are exact, and
/// handles the `$`-prefixed string format used by the seed data, e.g. `$50.00` and `-$12.40`.
#[derive(
    Default, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self(Decimal::ZERO));
        }
        // Accept both "-$50.00" and "$-50.00" along with unprefixed values.
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let value = Decimal::from_str(rest.trim())
            .with_context(|| format!("Unable to parse '{s}' as a dollar amount"))?;
        Ok(Self(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_negative() {
            write!(f, "-${:.2}", -self.0)
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_without_dollar_sign() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_negative() {
        let amount = Amount::from_str("-$50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("-50.00").unwrap());
        let amount = Amount::from_str("$-50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("-50.00").unwrap());
    }

    #[test]
    fn test_parse_empty_string() {
        let amount = Amount::from_str("").unwrap();
        assert_eq!(amount.value(), Decimal::ZERO);
    }

    #[test]
    fn test_display_positive() {
        let amount = Amount::new(Decimal::from_str("50.00").unwrap());
        assert_eq!(amount.to_string(), "$50.00");
    }

    #[test]
    fn test_display_negative() {
        let amount = Amount::new(Decimal::from_str("-50.00").unwrap());
        assert_eq!(amount.to_string(), "-$50.00");
    }

    #[test]
    fn test_parse_bad_input() {
        assert!(Amount::from_str("fifty bucks").is_err());
    }
}
