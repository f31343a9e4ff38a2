//! Transaction identifiers
//!
//! Transactions are numbered sequentially and rendered as `T` followed by a
//! zero-padded number (`T0001`). Budget categories are numbered per month and
//! use a plain `u32`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequential transaction identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u32);

impl TransactionId {
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    pub const fn number(&self) -> u32 {
        self.0
    }

    /// The identifier following this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{:04}", self.0)
    }
}

/// Error returned for identifiers not of the form `T` + digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIdParseError(pub String);

impl fmt::Display for TransactionIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID transaksi tidak valid: {}", self.0)
    }
}

impl std::error::Error for TransactionIdParseError {}

impl FromStr for TransactionId {
    type Err = TransactionIdParseError;

    /// Accepts `T0001`, `t0001` or a bare number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('T')
            .or_else(|| s.strip_prefix('t'))
            .unwrap_or(s);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TransactionIdParseError(s.to_string()));
        }

        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| TransactionIdParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(TransactionId::new(1).to_string(), "T0001");
        assert_eq!(TransactionId::new(42).to_string(), "T0042");
        assert_eq!(TransactionId::new(12345).to_string(), "T12345");
    }

    #[test]
    fn test_parse() {
        assert_eq!("T0007".parse::<TransactionId>().unwrap().number(), 7);
        assert_eq!("t12".parse::<TransactionId>().unwrap().number(), 12);
        assert_eq!("15".parse::<TransactionId>().unwrap().number(), 15);
        assert!("X0001".parse::<TransactionId>().is_err());
        assert!("T".parse::<TransactionId>().is_err());
        assert!("T00a1".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_next() {
        assert_eq!(TransactionId::new(9).next(), TransactionId::new(10));
    }
}
