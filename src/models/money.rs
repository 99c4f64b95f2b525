//! Money type for representing currency amounts
//!
//! Internally stores amounts in centavos (i64) to avoid floating-point
//! precision issues. Decimal conversion happens only at the file-format
//! boundary, in both directions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as centavos (hundredths of a real)
///
/// Using i64 minor units keeps arithmetic exact and makes the CSV
/// export/import round-trip lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from centavos
    ///
    /// # Examples
    /// ```
    /// use onedrip_cli::models::Money;
    /// let amount = Money::from_cents(15000); // R$ 150,00
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in centavos
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole-unit portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the centavos portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a decimal amount string into centavos
    ///
    /// Accepts both `.` and `,` as the decimal separator (Brazilian inputs
    /// use the comma convention), an optional leading `R$`, and a leading
    /// minus sign: "150,00", "150.00", "R$ 150,00", "150", "-10,5".
    pub fn parse_decimal(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix("R$").unwrap_or(s).trim_start();

        // Normalize the locale decimal comma before numeric parsing
        let normalized = s.replace(',', ".");

        let cents = if normalized.contains('.') {
            let parts: Vec<&str> = normalized.split('.').collect();
            if parts.len() != 2 {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }

            let units: i64 = parts[0]
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

            // Pad or truncate the fraction to 2 digits
            let fraction = parts[1];
            let cents: i64 = match fraction.len() {
                0 => 0,
                1 => {
                    fraction
                        .parse::<i64>()
                        .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                        * 10
                }
                _ => fraction
                    .get(..2)
                    .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?,
            };

            units * 100 + cents
        } else {
            // Integer format - whole units
            normalized
                .parse::<i64>()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                * 100
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Lenient variant of [`parse_decimal`](Self::parse_decimal): malformed
    /// input degrades to zero instead of failing, so a broken row can still
    /// be rendered in an import preview.
    pub fn parse_decimal_or_zero(s: &str) -> Self {
        Self::parse_decimal(s).unwrap_or_else(|_| Self::zero())
    }

    /// Render as a plain decimal string with two fraction digits ("150.00")
    ///
    /// This is the file-format representation used by the CSV exporter.
    pub fn to_decimal_string(&self) -> String {
        if self.is_negative() {
            format!("-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.units(), self.cents_part())
        }
    }

    /// Format with a currency symbol and the Brazilian decimal comma
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{} {},{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{} {},{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("R$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(15050);
        assert_eq!(m.cents(), 15050);
        assert_eq!(m.units(), 150);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_parse_comma_separator() {
        assert_eq!(Money::parse_decimal("150,00").unwrap().cents(), 15000);
        assert_eq!(Money::parse_decimal("150,5").unwrap().cents(), 15050);
        assert_eq!(Money::parse_decimal("0,05").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_dot_separator() {
        assert_eq!(Money::parse_decimal("150.00").unwrap().cents(), 15000);
        assert_eq!(Money::parse_decimal("150.5").unwrap().cents(), 15050);
    }

    #[test]
    fn test_parse_integer_and_symbol() {
        assert_eq!(Money::parse_decimal("150").unwrap().cents(), 15000);
        assert_eq!(Money::parse_decimal("R$ 150,00").unwrap().cents(), 15000);
        assert_eq!(Money::parse_decimal("-10,50").unwrap().cents(), -1050);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal("1,2,3").is_err());
        assert!(Money::parse_decimal("").is_err());
        // Multi-byte garbage in the fraction must fail, not panic
        assert!(Money::parse_decimal("150,5ç").is_err());
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(Money::parse_decimal_or_zero("abc").cents(), 0);
        assert_eq!(Money::parse_decimal_or_zero("").cents(), 0);
        assert_eq!(Money::parse_decimal_or_zero("150,00").cents(), 15000);
    }

    #[test]
    fn test_decimal_string_round_trip() {
        let m = Money::from_cents(15000);
        assert_eq!(m.to_decimal_string(), "150.00");
        assert_eq!(Money::parse_decimal(&m.to_decimal_string()).unwrap(), m);

        let n = Money::from_cents(5);
        assert_eq!(n.to_decimal_string(), "0.05");
        assert_eq!(Money::parse_decimal(&n.to_decimal_string()).unwrap(), n);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(15000)), "R$ 150,00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-R$ 10,50");
        assert_eq!(format!("{}", Money::from_cents(5)), "R$ 0,05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(15000);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "15000");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
