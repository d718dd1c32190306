//! Base-unit balance arithmetic for the wallet assertions.
//!
//! The app denominates balances in base units of an 18-decimal token. The
//! scenarios only ever compare balances and render small round amounts, so
//! a `u128` newtype covers the whole range the suite touches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Decimal places of the token.
pub const DECIMALS: u32 = 18;

/// One whole token in base units.
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// A wallet balance in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(u128);

impl Balance {
    pub const ZERO: Balance = Balance(0);

    /// Minimum sender balance the transfer scenarios require. Below this the
    /// suite asks the faucet for a top-up before sending.
    pub const MIN_WORKING: Balance = Balance(UNIT);

    pub const fn from_base_units(units: u128) -> Self {
        Balance(units)
    }

    pub const fn base_units(self) -> u128 {
        self.0
    }

    /// Parse a decimal token amount, e.g. `"0.1"` or `"1"`.
    pub fn from_decimal_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAmount("empty amount".into()));
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };

        if frac_part.len() as u32 > DECIMALS {
            return Err(Error::InvalidAmount(format!(
                "more than {} fractional digits: {}",
                DECIMALS, s
            )));
        }

        let parse_digits = |part: &str, what: &str| -> Result<u128> {
            if part.is_empty() {
                return Ok(0);
            }
            part.parse::<u128>()
                .map_err(|_| Error::InvalidAmount(format!("invalid {} part: {}", what, s)))
        };

        let int = parse_digits(int_part, "integer")?;
        let mut frac = parse_digits(frac_part, "fractional")?;
        for _ in frac_part.len() as u32..DECIMALS {
            frac = frac
                .checked_mul(10)
                .ok_or_else(|| Error::InvalidAmount(format!("amount out of range: {}", s)))?;
        }

        int.checked_mul(UNIT)
            .and_then(|units| units.checked_add(frac))
            .map(Balance)
            .ok_or_else(|| Error::InvalidAmount(format!("amount out of range: {}", s)))
    }

    /// Parse a JSON-RPC hex quantity, e.g. `"0xde0b6b3a7640000"`.
    pub fn from_hex_quantity(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| Error::InvalidAmount(format!("missing 0x prefix: {}", s)))?;
        if digits.is_empty() {
            return Err(Error::InvalidAmount(format!("empty hex quantity: {}", s)));
        }
        u128::from_str_radix(digits, 16)
            .map(Balance)
            .map_err(|_| Error::InvalidAmount(format!("invalid hex quantity: {}", s)))
    }

    pub fn checked_add(self, other: Balance) -> Option<Balance> {
        self.0.checked_add(other.0).map(Balance)
    }

    pub fn checked_sub(self, other: Balance) -> Option<Balance> {
        self.0.checked_sub(other.0).map(Balance)
    }

    /// The amount as it is typed into the app's amount field. The input
    /// keyboard uses a decimal comma, so `0.1` becomes `"0,1"`.
    pub fn keystrokes(self) -> String {
        self.to_string().replace('.', ",")
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = self.0 / UNIT;
        let frac = self.0 % UNIT;
        if frac == 0 {
            return write!(f, "{}", int);
        }
        let frac = format!("{:018}", frac);
        write!(f, "{}.{}", int, frac.trim_end_matches('0'))
    }
}

impl FromStr for Balance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Balance::from_decimal_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractional_amount() {
        let b = Balance::from_decimal_str("0.1").unwrap();
        assert_eq!(b.base_units(), UNIT / 10);
    }

    #[test]
    fn parses_whole_amount() {
        assert_eq!(Balance::from_decimal_str("1").unwrap(), Balance(UNIT));
        assert_eq!(Balance::from_decimal_str("2.5").unwrap(), Balance(UNIT * 5 / 2));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(Balance::from_decimal_str("").is_err());
        assert!(Balance::from_decimal_str("1.2.3").is_err());
        assert!(Balance::from_decimal_str("abc").is_err());
        // 19 fractional digits
        assert!(Balance::from_decimal_str("0.1234567890123456789").is_err());
    }

    #[test]
    fn displays_trimmed_decimal() {
        assert_eq!(Balance::from_base_units(UNIT / 10).to_string(), "0.1");
        assert_eq!(Balance::from_base_units(UNIT).to_string(), "1");
        assert_eq!(Balance::from_base_units(UNIT * 3 / 2).to_string(), "1.5");
        assert_eq!(Balance::ZERO.to_string(), "0");
    }

    #[test]
    fn keystrokes_use_decimal_comma() {
        let b = Balance::from_decimal_str("0.1").unwrap();
        assert_eq!(b.keystrokes(), "0,1");
        assert_eq!(Balance::from_base_units(UNIT).keystrokes(), "1");
    }

    #[test]
    fn decodes_hex_quantity() {
        assert_eq!(
            Balance::from_hex_quantity("0xde0b6b3a7640000").unwrap(),
            Balance(UNIT)
        );
        assert_eq!(Balance::from_hex_quantity("0x0").unwrap(), Balance::ZERO);
        assert!(Balance::from_hex_quantity("de0b6b3a7640000").is_err());
        assert!(Balance::from_hex_quantity("0x").is_err());
    }

    #[test]
    fn working_balance_threshold_is_one_unit() {
        assert_eq!(Balance::MIN_WORKING.base_units(), 1_000_000_000_000_000_000);
        let below = Balance::from_base_units(UNIT - 1);
        assert!(below < Balance::MIN_WORKING);
        assert!(Balance::from_base_units(UNIT) >= Balance::MIN_WORKING);
    }

    #[test]
    fn checked_arithmetic() {
        let one = Balance::from_base_units(UNIT);
        let tenth = Balance::from_base_units(UNIT / 10);
        assert_eq!(one.checked_sub(tenth), Some(Balance(UNIT - UNIT / 10)));
        assert_eq!(tenth.checked_sub(one), None);
        assert_eq!(Balance(u128::MAX).checked_add(one), None);
    }
}
