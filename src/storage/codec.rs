//! Pipe-delimited record codec
//!
//! Every persisted record is one line of `|`-separated fields. Fields are
//! trimmed on read and written verbatim; there is no escaping, so text
//! fields must never contain `|` (validation rejects it before saving).
//!
//! | Record      | Layout                                                                  |
//! |-------------|-------------------------------------------------------------------------|
//! | Transaction | `id|dd-mm-yyyy|Pemasukan or Pengeluaran|category|amount|note`           |
//! | Category    | `number|name|budget|realized|remaining|count|status`                    |
//! | Analysis    | `income|expense|avg|pct|balance|condition|conclusion|n_expense|n_income` |

use chrono::NaiveDate;

use crate::error::{KantongError, KantongResult};
use crate::models::{
    Category, CategoryStatus, Conclusion, FinancialCondition, Money, MonthlyAnalysis,
    Transaction, TransactionId, TransactionKind, DATE_FORMAT,
};

/// Field delimiter
pub const DELIMITER: char = '|';

/// How malformed numeric fields are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Read the leading number of a field, or zero if there is none
    #[default]
    Lenient,
    /// Reject the whole line
    Strict,
}

/// A record that can be stored as one delimited line
pub trait LineRecord: Sized {
    /// Name used in error messages
    const RECORD_NAME: &'static str;

    /// Fewest fields a line may have
    const MIN_FIELDS: usize;

    /// Build a record from trimmed fields (at least `MIN_FIELDS` of them)
    fn from_fields(fields: &[&str], mode: ParseMode) -> KantongResult<Self>;

    /// Fields in file order
    fn to_fields(&self) -> Vec<String>;
}

/// Split a line into trimmed fields
pub fn split_fields(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\r', '\n'])
        .split(DELIMITER)
        .map(str::trim)
        .collect()
}

/// Decode one line
pub fn parse_line<T: LineRecord>(line: &str, mode: ParseMode) -> KantongResult<T> {
    let fields = split_fields(line);
    if fields.len() < T::MIN_FIELDS {
        return Err(KantongError::Parse(format!(
            "{} record needs at least {} fields, found {}: {}",
            T::RECORD_NAME,
            T::MIN_FIELDS,
            fields.len(),
            line
        )));
    }
    T::from_fields(&fields, mode)
}

/// Encode one record as a line (without the trailing newline)
pub fn format_line<T: LineRecord>(record: &T) -> String {
    record.to_fields().join("|")
}

/// Decode a file's lines
///
/// Lenient mode skips lines that cannot be decoded; strict mode fails on the
/// first one.
pub fn decode_all<T: LineRecord>(lines: &[String], mode: ParseMode) -> KantongResult<Vec<T>> {
    let mut records = Vec::with_capacity(lines.len());
    for line in lines {
        match parse_line::<T>(line, mode) {
            Ok(record) => records.push(record),
            Err(_) if mode == ParseMode::Lenient => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(records)
}

/// Encode records as lines
pub fn encode_all<T: LineRecord>(records: &[T]) -> Vec<String> {
    records.iter().map(format_line).collect()
}

// === Field decoders ===

fn malformed(record: &str, field: &str, value: &str) -> KantongError {
    KantongError::Parse(format!("{} field '{}' is malformed: '{}'", record, field, value))
}

/// Leading signed integer of a string, like C `strtoll`
fn leading_integer(value: &str) -> i64 {
    let mut chars = value.chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut total: i64 = 0;
    for c in chars {
        match c.to_digit(10) {
            Some(d) => total = total.saturating_mul(10).saturating_add(i64::from(d)),
            None => break,
        }
    }

    if negative {
        -total
    } else {
        total
    }
}

/// Leading decimal number of a string, like C `atof`
fn leading_float(value: &str) -> f64 {
    let end = value
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    // Shrink until the prefix parses ("1.2.3" -> "1.2")
    let mut prefix = &value[..end];
    while !prefix.is_empty() {
        if let Ok(v) = prefix.parse::<f64>() {
            return v;
        }
        prefix = &prefix[..prefix.len() - 1];
    }
    0.0
}

fn decode_int(record: &str, field: &str, value: &str, mode: ParseMode) -> KantongResult<i64> {
    match value.parse::<i64>() {
        Ok(v) => Ok(v),
        Err(_) if mode == ParseMode::Lenient => Ok(leading_integer(value)),
        Err(_) => Err(malformed(record, field, value)),
    }
}

fn decode_unsigned(record: &str, field: &str, value: &str, mode: ParseMode) -> KantongResult<i64> {
    let v = decode_int(record, field, value, mode)?;
    if v < 0 {
        return match mode {
            ParseMode::Lenient => Ok(0),
            ParseMode::Strict => Err(malformed(record, field, value)),
        };
    }
    Ok(v)
}

fn decode_count(record: &str, field: &str, value: &str, mode: ParseMode) -> KantongResult<u32> {
    let v = decode_unsigned(record, field, value, mode)?;
    Ok(u32::try_from(v).unwrap_or(u32::MAX))
}

fn decode_float(record: &str, field: &str, value: &str, mode: ParseMode) -> KantongResult<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ if mode == ParseMode::Lenient => Ok(leading_float(value)),
        _ => Err(malformed(record, field, value)),
    }
}

/// Parse a `dd-mm-yyyy` date
pub fn decode_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

// === Record implementations ===

impl LineRecord for Transaction {
    const RECORD_NAME: &'static str = "Transaction";
    const MIN_FIELDS: usize = 5;

    fn from_fields(fields: &[&str], mode: ParseMode) -> KantongResult<Self> {
        let id = fields[0]
            .parse::<TransactionId>()
            .map_err(|_| malformed(Self::RECORD_NAME, "id", fields[0]))?;

        let date =
            decode_date(fields[1]).ok_or_else(|| malformed(Self::RECORD_NAME, "date", fields[1]))?;

        // Unknown kinds are written back as Pengeluaran, so read them that way
        let kind = match TransactionKind::from_label(fields[2]) {
            Some(kind) => kind,
            None if mode == ParseMode::Lenient => TransactionKind::Expense,
            None => return Err(malformed(Self::RECORD_NAME, "kind", fields[2])),
        };

        let amount = decode_unsigned(Self::RECORD_NAME, "amount", fields[4], mode)?;

        Ok(Transaction {
            id,
            date,
            kind,
            category: fields[3].to_string(),
            amount: Money::from_rupiah(amount),
            note: fields.get(5).map(|s| s.to_string()).unwrap_or_default(),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date_string(),
            self.kind.label().to_string(),
            self.category.clone(),
            self.amount.rupiah().to_string(),
            self.note.clone(),
        ]
    }
}

impl LineRecord for Category {
    const RECORD_NAME: &'static str = "Category";
    const MIN_FIELDS: usize = 7;

    fn from_fields(fields: &[&str], mode: ParseMode) -> KantongResult<Self> {
        let name = Self::RECORD_NAME;
        let number = decode_count(name, "number", fields[0], mode)?;
        let budget = decode_unsigned(name, "budget", fields[2], mode)?;
        let realized = decode_unsigned(name, "realized", fields[3], mode)?;
        let remaining = decode_int(name, "remaining", fields[4], mode)?;
        let count = decode_count(name, "count", fields[5], mode)?;
        let status = decode_int(name, "status", fields[6], mode)?;

        if mode == ParseMode::Strict && status != 0 && status != 1 {
            return Err(malformed(name, "status", fields[6]));
        }

        Ok(Category {
            number,
            name: fields[1].to_string(),
            budget: Money::from_rupiah(budget),
            realized: Money::from_rupiah(realized),
            remaining: Money::from_rupiah(remaining),
            transaction_count: count,
            status: CategoryStatus::from_code(status),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.number.to_string(),
            self.name.clone(),
            self.budget.rupiah().to_string(),
            self.realized.rupiah().to_string(),
            self.remaining.rupiah().to_string(),
            self.transaction_count.to_string(),
            self.status.code().to_string(),
        ]
    }
}

impl LineRecord for MonthlyAnalysis {
    const RECORD_NAME: &'static str = "Analysis";
    const MIN_FIELDS: usize = 9;

    fn from_fields(fields: &[&str], mode: ParseMode) -> KantongResult<Self> {
        let name = Self::RECORD_NAME;
        let income = decode_unsigned(name, "income", fields[0], mode)?;
        let expense = decode_unsigned(name, "expense", fields[1], mode)?;
        let average = decode_float(name, "average", fields[2], mode)?;
        let percent = decode_float(name, "percent", fields[3], mode)?;
        let balance = decode_int(name, "balance", fields[4], mode)?;
        let condition_code = decode_int(name, "condition", fields[5], mode)?;
        let conclusion_code = decode_int(name, "conclusion", fields[6], mode)?;
        let expense_count = decode_count(name, "expense_count", fields[7], mode)?;
        let income_count = decode_count(name, "income_count", fields[8], mode)?;

        let condition = match FinancialCondition::from_code(condition_code) {
            Some(c) => c,
            None if mode == ParseMode::Lenient => FinancialCondition::default(),
            None => return Err(malformed(name, "condition", fields[5])),
        };
        let conclusion = match Conclusion::from_code(conclusion_code) {
            Some(c) => c,
            None if mode == ParseMode::Lenient => Conclusion::default(),
            None => return Err(malformed(name, "conclusion", fields[6])),
        };

        Ok(MonthlyAnalysis {
            total_income: Money::from_rupiah(income),
            total_expense: Money::from_rupiah(expense),
            average_expense: average,
            remaining_percent: percent,
            balance: Money::from_rupiah(balance),
            condition,
            conclusion,
            expense_count,
            income_count,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.total_income.rupiah().to_string(),
            self.total_expense.rupiah().to_string(),
            format!("{:.2}", self.average_expense),
            format!("{:.2}", self.remaining_percent),
            self.balance.rupiah().to_string(),
            self.condition.code().to_string(),
            self.conclusion.code().to_string(),
            self.expense_count.to_string(),
            self.income_count.to_string(),
        ]
    }
}
