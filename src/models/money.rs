//! Money type for representing Rupiah amounts
//!
//! Amounts are whole Rupiah stored as i64. Display uses the Indonesian
//! convention of dots as thousands separators ("Rp 1.500.000").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A signed amount of whole Rupiah
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from whole Rupiah
    ///
    /// # Examples
    /// ```
    /// use kantong::models::Money;
    /// let amount = Money::from_rupiah(15_000);
    /// assert_eq!(amount.to_string(), "Rp 15.000");
    /// ```
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Self(rupiah)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in whole Rupiah
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parse an amount typed by a user
    ///
    /// Accepts "15000", "15.000", "Rp 15.000", "Rp15,000" and a leading minus.
    /// Dots and commas are treated as thousands separators.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, trimmed),
        };

        let rest = rest
            .strip_prefix("Rp")
            .or_else(|| rest.strip_prefix("rp"))
            .unwrap_or(rest)
            .trim_start();

        let digits: String = rest.chars().filter(|c| *c != '.' && *c != ',').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value: i64 = digits
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, e.g. `Rp 1.500.000` or `-Rp 100.000`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let grouped = group_thousands(self.0.unsigned_abs());
        if self.is_negative() {
            format!("-{} {}", symbol, grouped)
        } else {
            format!("{} {}", symbol, grouped)
        }
    }
}

/// Insert a dot between every group of three digits
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Format a fractional Rupiah amount with two decimals, e.g. `Rp 12.500,50`
pub fn format_rupiah_decimal(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let body = format!("Rp {},{:02}", group_thousands(cents / 100), cents % 100);
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a percentage with two decimals, e.g. `25.00%`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("Rp"))
    }
}

// Arithmetic saturates at the i64 bounds instead of overflowing

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
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
            MoneyParseError::InvalidFormat(s) => write!(f, "Nominal tidak valid: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupiah(1_500_000).to_string(), "Rp 1.500.000");
        assert_eq!(Money::from_rupiah(0).to_string(), "Rp 0");
        assert_eq!(Money::from_rupiah(999).to_string(), "Rp 999");
        assert_eq!(Money::from_rupiah(-100_000).to_string(), "-Rp 100.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupiah(1000);
        let b = Money::from_rupiah(500);

        assert_eq!((a + b).rupiah(), 1500);
        assert_eq!((a - b).rupiah(), 500);
        assert_eq!((b - a).rupiah(), -500);
        assert_eq!((-a).rupiah(), -1000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_rupiah(i64::MAX);
        let min = Money::from_rupiah(i64::MIN);

        assert_eq!(max + Money::from_rupiah(1), max);
        assert_eq!(min - Money::from_rupiah(1), min);
        assert_eq!(Money::from_rupiah(-1) - max, min);
        assert_eq!(-min, max);
        assert_eq!(min.abs(), max);

        let mut total = max;
        total += max;
        assert_eq!(total, max);

        let sum: Money = vec![max, max, Money::from_rupiah(5)].into_iter().sum();
        assert_eq!(sum, max);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("15000").unwrap().rupiah(), 15_000);
        assert_eq!(Money::parse("15.000").unwrap().rupiah(), 15_000);
        assert_eq!(Money::parse("Rp 1.500.000").unwrap().rupiah(), 1_500_000);
        assert_eq!(Money::parse("-Rp 2.000").unwrap().rupiah(), -2_000);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("12a").is_err());
    }

    #[test]
    fn test_decimal_and_percent_format() {
        assert_eq!(format_rupiah_decimal(12_500.5), "Rp 12.500,50");
        assert_eq!(format_rupiah_decimal(0.0), "Rp 0,00");
        assert_eq!(format_percent(25.0), "25.00%");
        assert_eq!(format_percent(-3.456), "-3.46%");
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![Money::from_rupiah(100), Money::from_rupiah(200)]
            .into_iter()
            .sum();
        assert_eq!(total.rupiah(), 300);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_rupiah(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
