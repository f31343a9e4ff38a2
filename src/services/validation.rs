//! Input validation rules shared by the services
//!
//! Each check returns `KantongError::Validation` with the message shown to
//! the user.

use chrono::NaiveDate;

use crate::error::{KantongError, KantongResult};
use crate::models::{Money, Month, MAX_CATEGORY_NAME_LENGTH};
use crate::storage::codec::DELIMITER;

/// Maximum length of a transaction note
pub const MAX_NOTE_LENGTH: usize = 50;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

fn invalid(message: impl Into<String>) -> KantongError {
    KantongError::Validation(message.into())
}

/// Parse and validate a `dd-mm-yyyy` date typed by the user
///
/// The text must be exactly ten characters with dashes at positions 2 and 5
/// and digits elsewhere, name a real calendar day, and have a year within
/// 1900..=2100.
pub fn parse_date(input: &str) -> KantongResult<NaiveDate> {
    let bad = || invalid("Tanggal tidak valid");
    let bytes = input.as_bytes();

    if bytes.len() != 10 || bytes[2] != b'-' || bytes[5] != b'-' {
        return Err(bad());
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !digits_ok {
        return Err(bad());
    }

    let day: u32 = input[0..2].parse().map_err(|_| bad())?;
    let month: u32 = input[3..5].parse().map_err(|_| bad())?;
    let year: i32 = input[6..10].parse().map_err(|_| bad())?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(bad());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(bad)
}

/// Require the date to fall in the active month
pub fn ensure_in_month(date: NaiveDate, month: Month) -> KantongResult<()> {
    if Month::of(date) == month {
        Ok(())
    } else {
        Err(invalid(format!(
            "Anda memasukkan {} yang berbeda dari bulan terpilih! Input tidak valid!",
            date.format(crate::models::DATE_FORMAT)
        )))
    }
}

/// Validate a budget category name, returning it trimmed
pub fn category_name(name: &str) -> KantongResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("Nama pos tidak boleh kosong"));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(invalid(format!(
            "Nama pos terlalu panjang (max {} karakter)",
            MAX_CATEGORY_NAME_LENGTH
        )));
    }
    if name.contains(DELIMITER) {
        return Err(invalid("Nama pos tidak boleh mengandung karakter |"));
    }
    if has_control(name) {
        return Err(invalid("Nama pos tidak boleh mengandung baris baru"));
    }
    Ok(name.to_string())
}

/// A category budget must be positive
pub fn category_budget(budget: Money) -> KantongResult<()> {
    if budget.is_positive() {
        Ok(())
    } else {
        Err(invalid("Nominal anggaran harus lebih dari 0"))
    }
}

/// A transaction must name a category
pub fn category_reference(name: &str) -> KantongResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("Pos anggaran harus dipilih"));
    }
    if name.contains(DELIMITER) {
        return Err(invalid("Nama pos tidak boleh mengandung karakter |"));
    }
    if has_control(name) {
        return Err(invalid("Nama pos tidak boleh mengandung baris baru"));
    }
    Ok(name.to_string())
}

/// A transaction amount must be positive
pub fn amount(amount: Money) -> KantongResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(invalid("Nominal harus lebih dari 0"))
    }
}

/// Validate an optional note, returning it trimmed
pub fn note(note: &str) -> KantongResult<String> {
    let note = note.trim();
    if note.chars().count() > MAX_NOTE_LENGTH {
        return Err(invalid(format!(
            "Deskripsi terlalu panjang (max {} karakter)",
            MAX_NOTE_LENGTH
        )));
    }
    if note.contains(DELIMITER) {
        return Err(invalid("Deskripsi tidak boleh mengandung karakter |"));
    }
    if has_control(note) {
        return Err(invalid("Deskripsi tidak boleh mengandung baris baru"));
    }
    Ok(note.to_string())
}

/// Records are one per line, so line breaks and other control characters
/// cannot be stored.
fn has_control(text: &str) -> bool {
    text.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dates() {
        assert_eq!(
            parse_date("05-03-2025").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
        );
        assert!(parse_date("29-02-2024").is_ok());
        assert!(parse_date("01-01-1900").is_ok());
        assert!(parse_date("31-12-2100").is_ok());
    }

    #[test]
    fn test_invalid_dates() {
        for input in [
            "",
            "5-3-2025",
            "05/03/2025",
            "05-03-25",
            "aa-03-2025",
            "00-00-0000",
            "29-02-2023",
            "31-04-2025",
            "01-13-2025",
            "00-01-2025",
            "01-01-1899",
            "01-01-2101",
            "05-03-2025 ",
        ] {
            let err = parse_date(input).unwrap_err();
            assert_eq!(err.user_message(), "Tanggal tidak valid", "input {:?}", input);
        }
    }

    #[test]
    fn test_ensure_in_month() {
        let date = parse_date("15-03-2025").unwrap();
        assert!(ensure_in_month(date, Month::new(3).unwrap()).is_ok());

        let err = ensure_in_month(date, Month::new(4).unwrap()).unwrap_err();
        assert!(err.user_message().contains("15-03-2025"));
    }

    #[test]
    fn test_category_name_rules() {
        assert_eq!(category_name("  Makan ").unwrap(), "Makan");
        assert!(category_name("   ").is_err());
        assert!(category_name("a|b").is_err());
        assert!(category_name(&"x".repeat(20)).is_ok());
        assert!(category_name(&"x".repeat(21)).is_err());
    }

    #[test]
    fn test_amount_rules() {
        assert!(amount(Money::from_rupiah(1)).is_ok());
        assert_eq!(
            amount(Money::zero()).unwrap_err().user_message(),
            "Nominal harus lebih dari 0"
        );
        assert!(category_budget(Money::from_rupiah(-5)).is_err());
    }

    #[test]
    fn test_category_reference() {
        assert_eq!(
            category_reference("").unwrap_err().user_message(),
            "Pos anggaran harus dipilih"
        );
        assert_eq!(category_reference(" Makan ").unwrap(), "Makan");
    }

    #[test]
    fn test_note_rules() {
        assert_eq!(note("").unwrap(), "");
        assert!(note(&"n".repeat(50)).is_ok());
        assert!(note(&"n".repeat(51)).is_err());
        assert!(note("beli | jual").is_err());
    }

    #[test]
    fn test_line_breaks_rejected() {
        assert_eq!(
            note("beli\nT0009").unwrap_err().user_message(),
            "Deskripsi tidak boleh mengandung baris baru"
        );
        assert!(note("beli\rjual").is_err());
        assert!(note("beli\tjual").is_err());
        assert!(category_name("Ma\nkan").is_err());
        assert!(category_reference("Ma\r\nkan").is_err());
        // Trailing newlines are trimmed away, not rejected
        assert_eq!(note("beli\n").unwrap(), "beli");
    }
}
