//! Transaction CLI commands
//!
//! Implements CLI commands for recording and browsing transactions.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{
    format_transaction_details, format_transaction_summary, format_transaction_table,
};
use crate::error::{KantongError, KantongResult};
use crate::models::{Money, Month, TransactionId, TransactionKind};
use crate::services::{CategoryService, LedgerService, NewTransaction, TransactionPatch};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List the month's transactions
    List {
        /// Show transactions of every month
        #[arg(long)]
        all: bool,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (e.g. T0001)
        id: String,
    },
    /// Record a new transaction
    Add {
        /// Date (dd-mm-yyyy)
        date: String,
        /// Kind: pemasukan or pengeluaran
        kind: String,
        /// Budget category name
        category: String,
        /// Amount in rupiah (e.g. 25000 or 25.000)
        amount: String,
        /// Optional description
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New date (dd-mm-yyyy)
        #[arg(short, long)]
        date: Option<String>,
        /// New kind
        #[arg(short, long)]
        kind: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_id(id: &str) -> KantongResult<TransactionId> {
    id.parse::<TransactionId>()
        .map_err(|e| KantongError::Validation(e.to_string()))
}

fn parse_amount(amount: &str) -> KantongResult<Money> {
    Money::parse(amount).map_err(|_| {
        KantongError::Validation("Nominal tidak valid! Harus berupa angka lebih dari 0".into())
    })
}

fn parse_kind(kind: &str) -> KantongResult<TransactionKind> {
    kind.parse::<TransactionKind>()
        .map_err(|_| KantongError::Validation("Jenis transaksi tidak valid".into()))
}

/// Handle a transaction command for the selected month
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    month: Month,
    cmd: TransactionCommands,
) -> KantongResult<()> {
    let ledger = LedgerService::new(storage).with_limit(settings.max_transactions);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::List { all } => {
            let transactions = ledger.list(if all { None } else { Some(month) })?;

            if all {
                println!("Semua Transaksi");
            } else {
                println!("Transaksi Bulan {}", month);
            }
            print!("{}", format_transaction_table(&transactions, symbol));
            println!();
            print!("{}", format_transaction_summary(&transactions, symbol));
        }

        TransactionCommands::Show { id } => {
            let txn = ledger.get(parse_id(&id)?)?;
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::Add {
            date,
            kind,
            category,
            amount,
            note,
        } => {
            // Date first, then the category of the month the date falls in
            let txn_month = Month::of(crate::services::validation::parse_date(date.trim())?);
            let kind = parse_kind(&kind)?;
            let categories = CategoryService::new(storage);
            if !category.trim().is_empty() && !categories.exists(txn_month, &category)? {
                return Err(KantongError::category_not_found(format!(
                    "{} (bulan {})",
                    category.trim(),
                    txn_month
                )));
            }
            let amount = parse_amount(&amount)?;

            let txn = ledger.add(NewTransaction {
                date,
                kind,
                category,
                amount,
                note,
            })?;

            println!("Transaksi berhasil ditambahkan");
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::Edit {
            id,
            date,
            kind,
            category,
            amount,
            note,
        } => {
            let patch = TransactionPatch {
                date,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                category,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                note,
            };

            if patch.is_empty() {
                println!("Tidak ada perubahan");
                return Ok(());
            }

            let updated = ledger.edit(parse_id(&id)?, patch)?;
            println!("Transaksi {} berhasil diperbarui", updated.id);
            print!("{}", format_transaction_details(&updated, symbol));
        }

        TransactionCommands::Delete { id, force } => {
            let txn = ledger.get(parse_id(&id)?)?;

            if !force {
                println!("Transaksi yang akan dihapus:");
                print!("{}", format_transaction_details(&txn, symbol));
                println!();
                println!("Gunakan --force untuk mengonfirmasi penghapusan");
                return Ok(());
            }

            let deleted = ledger.delete(txn.id)?;
            println!(
                "Transaksi {} dihapus ({} {})",
                deleted.id,
                deleted.date_string(),
                deleted.category
            );
        }
    }

    Ok(())
}
