//! Transaction display formatting
//!
//! Tables and detail views for transactions in terminal output.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tanggal")]
    date: String,
    #[tabled(rename = "Jenis")]
    kind: &'static str,
    #[tabled(rename = "Pos")]
    category: String,
    #[tabled(rename = "Nominal")]
    amount: String,
    #[tabled(rename = "Deskripsi")]
    note: String,
}

/// Short kind marker used in list views
pub fn kind_marker(txn: &Transaction) -> &'static str {
    if txn.is_income() {
        "In"
    } else {
        "Out"
    }
}

/// Format transactions as a table
pub fn format_transaction_table(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "Belum ada transaksi.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.date_string(),
        kind: kind_marker(txn),
        category: txn.category.clone(),
        amount: txn.amount.format_with_symbol(symbol),
        note: if txn.note.is_empty() {
            "-".to_string()
        } else {
            txn.note.clone()
        },
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format the income/expense summary shown under a transaction list
pub fn format_transaction_summary(transactions: &[Transaction], symbol: &str) -> String {
    let income: Money = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let expense: Money = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    let income_count = transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = transactions.len() - income_count;

    let mut output = String::new();
    output.push_str(&format!(
        "Total Pemasukan   : {} ({} transaksi)\n",
        income.format_with_symbol(symbol),
        income_count
    ));
    output.push_str(&format!(
        "Total Pengeluaran : {} ({} transaksi)\n",
        expense.format_with_symbol(symbol),
        expense_count
    ));
    output.push_str(&format!(
        "Saldo             : {}\n",
        (income - expense).format_with_symbol(symbol)
    ));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaksi: {}\n", txn.id));
    output.push_str(&format!("Tanggal:   {}\n", txn.date_string()));
    output.push_str(&format!("Jenis:     {}\n", txn.kind));
    output.push_str(&format!("Pos:       {}\n", txn.category));
    output.push_str(&format!(
        "Nominal:   {}\n",
        txn.amount.format_with_symbol(symbol)
    ));

    if !txn.note.is_empty() {
        output.push_str(&format!("Deskripsi: {}\n", txn.note));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, TransactionKind};
    use chrono::NaiveDate;

    fn txn(id: u32, kind: TransactionKind, amount: i64, note: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            kind,
            category: "Makan".into(),
            amount: Money::from_rupiah(amount),
            note: note.into(),
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], "Rp"), "Belum ada transaksi.\n");
    }

    #[test]
    fn test_table_contents() {
        let output = format_transaction_table(
            &[
                txn(1, TransactionKind::Expense, 25_000, "nasi"),
                txn(2, TransactionKind::Income, 1_000_000, ""),
            ],
            "Rp",
        );
        assert!(output.contains("T0001"));
        assert!(output.contains("05-03-2025"));
        assert!(output.contains("Out"));
        assert!(output.contains("In"));
        assert!(output.contains("Rp 1.000.000"));
        assert!(output.contains("nasi"));
    }

    #[test]
    fn test_summary() {
        let output = format_transaction_summary(
            &[
                txn(1, TransactionKind::Expense, 25_000, ""),
                txn(2, TransactionKind::Income, 100_000, ""),
                txn(3, TransactionKind::Expense, 5_000, ""),
            ],
            "Rp",
        );
        assert!(output.contains("Rp 100.000 (1 transaksi)"));
        assert!(output.contains("Rp 30.000 (2 transaksi)"));
        assert!(output.contains("Saldo             : Rp 70.000"));
    }

    #[test]
    fn test_details_skip_empty_note() {
        let output = format_transaction_details(&txn(1, TransactionKind::Expense, 1, ""), "Rp");
        assert!(output.contains("Pengeluaran"));
        assert!(!output.contains("Deskripsi"));
    }
}
