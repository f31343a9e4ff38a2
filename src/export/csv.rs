//! CSV Export functionality
//!
//! Exports a month's transactions or categories to CSV.

use std::io::Write;

use crate::error::KantongResult;
use crate::models::Month;
use crate::services::{CategoryService, LedgerService};
use crate::storage::Storage;

/// Export the month's transactions to CSV
pub fn export_transactions_csv<W: Write>(
    storage: &Storage,
    month: Month,
    writer: W,
) -> KantongResult<usize> {
    let transactions = LedgerService::new(storage).list(Some(month))?;

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["ID", "Tanggal", "Jenis", "Pos", "Nominal", "Deskripsi"])?;

    for txn in &transactions {
        out.write_record([
            txn.id.to_string(),
            txn.date_string(),
            txn.kind.label().to_string(),
            txn.category.clone(),
            txn.amount.rupiah().to_string(),
            txn.note.clone(),
        ])?;
    }

    out.flush()?;
    Ok(transactions.len())
}

/// Export the month's categories, with fresh derived fields, to CSV
pub fn export_categories_csv<W: Write>(
    storage: &Storage,
    month: Month,
    writer: W,
) -> KantongResult<usize> {
    let categories = CategoryService::new(storage).list(month)?;

    let mut out = csv::Writer::from_writer(writer);
    out.write_record([
        "No",
        "Pos",
        "Anggaran",
        "Realisasi",
        "Sisa",
        "Transaksi",
        "Status",
    ])?;

    for category in &categories {
        out.write_record([
            category.number.to_string(),
            category.name.clone(),
            category.budget.rupiah().to_string(),
            category.realized.rupiah().to_string(),
            category.remaining.rupiah().to_string(),
            category.transaction_count.to_string(),
            category.status.label().to_string(),
        ])?;
    }

    out.flush()?;
    Ok(categories.len())
}
