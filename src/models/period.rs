//! Calendar month used as the active budgeting period
//!
//! Budget categories and analysis snapshots are stored per month. The year is
//! not part of the period: transactions dated in March of any year belong to
//! month 3.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const MONTH_SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// A calendar month, 1 (Januari) through 12 (Desember)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    /// Create a month, returning None outside 1..=12
    pub fn new(number: u8) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    /// The month component of a date
    pub fn of(date: chrono::NaiveDate) -> Self {
        // chrono guarantees 1..=12
        Self(date.month() as u8)
    }

    /// All twelve months in calendar order
    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Indonesian month name ("Maret")
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.0 - 1)]
    }

    /// Three-letter month name ("Mar")
    pub fn short_name(&self) -> &'static str {
        MONTH_SHORT_NAMES[usize::from(self.0 - 1)]
    }

    /// Two-digit code used in file names ("03")
    pub fn code(&self) -> String {
        format!("{:02}", self.0)
    }

    /// The previous month, wrapping Januari to Desember
    pub fn prev(&self) -> Self {
        if self.0 == 1 {
            Self(12)
        } else {
            Self(self.0 - 1)
        }
    }

    /// The next month, wrapping Desember to Januari
    pub fn next(&self) -> Self {
        if self.0 == 12 {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl TryFrom<u8> for Month {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Month::new(value).ok_or_else(|| format!("Bulan tidak valid: {}", value))
    }
}

impl FromStr for Month {
    type Err = String;

    /// Accepts a number ("3", "03") or a full or short Indonesian name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(number) = s.parse::<u8>() {
            return Month::try_from(number);
        }

        Month::all()
            .find(|m| m.name().eq_ignore_ascii_case(s) || m.short_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Bulan tidak valid: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bounds() {
        assert!(Month::new(0).is_none());
        assert!(Month::new(13).is_none());
        assert_eq!(Month::new(12).unwrap().name(), "Desember");
    }

    #[test]
    fn test_wrap_around() {
        let jan = Month::new(1).unwrap();
        let dec = Month::new(12).unwrap();
        assert_eq!(jan.prev(), dec);
        assert_eq!(dec.next(), jan);
        assert_eq!(Month::new(5).unwrap().prev().number(), 4);
    }

    #[test]
    fn test_names_and_code() {
        let aug = Month::new(8).unwrap();
        assert_eq!(aug.name(), "Agustus");
        assert_eq!(aug.short_name(), "Agu");
        assert_eq!(aug.code(), "08");
        assert_eq!(aug.to_string(), "Agustus");
    }

    #[test]
    fn test_parse() {
        assert_eq!("3".parse::<Month>().unwrap().number(), 3);
        assert_eq!("03".parse::<Month>().unwrap().number(), 3);
        assert_eq!("maret".parse::<Month>().unwrap().number(), 3);
        assert_eq!("Okt".parse::<Month>().unwrap().number(), 10);
        assert!("13".parse::<Month>().is_err());
        assert!("Smarch".parse::<Month>().is_err());
    }

    #[test]
    fn test_of_date_ignores_year() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let b = NaiveDate::from_ymd_opt(1999, 3, 1).unwrap();
        assert_eq!(Month::of(a), Month::of(b));
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Month>("13").is_err());
        assert_eq!(serde_json::from_str::<Month>("7").unwrap().number(), 7);
    }
}
