//! Category CLI commands
//!
//! Implements CLI commands for a month's budget categories.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::category::{
    format_category_details, format_category_table, format_month_summary,
};
use crate::error::{KantongError, KantongResult};
use crate::models::{Category, Money, Month};
use crate::services::{BudgetService, CategoryPatch, CategoryService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List the month's categories with realized spend
    List,
    /// Show one category
    Show {
        /// Category name or number
        category: String,
    },
    /// Add a category
    Add {
        /// Category name (max 20 characters)
        name: String,
        /// Monthly budget in rupiah
        budget: String,
    },
    /// Edit a category
    Edit {
        /// Category name or number
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New budget
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// Delete a category with no transactions
    Delete {
        /// Category name or number
        category: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Recalculate realized spend for the month
    Refresh,
    /// Copy categories from another month into the selected month
    Copy {
        /// Source month (defaults to the previous month)
        #[arg(long)]
        from: Option<Month>,
        /// Replace categories the month already has
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_budget(budget: &str) -> KantongResult<Money> {
    Money::parse(budget).map_err(|_| {
        KantongError::Validation("Nominal tidak valid! Harus berupa angka lebih dari 0".into())
    })
}

fn find(service: &CategoryService, month: Month, identifier: &str) -> KantongResult<Category> {
    service
        .find(month, identifier)?
        .ok_or_else(|| KantongError::category_not_found(identifier.trim()))
}

/// Handle a category command for the selected month
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    month: Month,
    cmd: CategoryCommands,
) -> KantongResult<()> {
    let service = CategoryService::new(storage).with_limit(settings.max_categories);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CategoryCommands::List => {
            let categories = service.list(month)?;
            print!("{}", format_category_table(month, &categories, symbol));
            if !categories.is_empty() {
                let summary = BudgetService::new(storage).month_summary(month)?;
                println!();
                print!("{}", format_month_summary(&summary, symbol));
            }
        }

        CategoryCommands::Show { category } => {
            let found = find(&service, month, &category)?;
            let fresh = BudgetService::new(storage).recalculate(month, found.number)?;
            print!("{}", format_category_details(&fresh, symbol));
        }

        CategoryCommands::Add { name, budget } => {
            let category = service.add(month, &name, parse_budget(&budget)?)?;
            println!("Pos anggaran berhasil ditambahkan ke bulan {}", month);
            print!("{}", format_category_details(&category, symbol));
        }

        CategoryCommands::Edit {
            category,
            name,
            budget,
        } => {
            let found = find(&service, month, &category)?;
            let patch = CategoryPatch {
                name,
                budget: budget.as_deref().map(parse_budget).transpose()?,
            };

            if patch.is_empty() {
                println!("Tidak ada perubahan");
                return Ok(());
            }

            let updated = service.edit(month, found.number, patch)?;
            println!("Pos anggaran berhasil diperbarui");
            print!("{}", format_category_details(&updated, symbol));
        }

        CategoryCommands::Delete { category, force } => {
            let found = find(&service, month, &category)?;

            if !force {
                println!("Pos anggaran yang akan dihapus:");
                print!("{}", format_category_details(&found, symbol));
                println!();
                println!("Gunakan --force untuk mengonfirmasi penghapusan");
                return Ok(());
            }

            let deleted = service.delete(month, found.number)?;
            println!("Pos '{}' dihapus", deleted.name);
        }

        CategoryCommands::Refresh => {
            let categories = service.refresh(month)?;
            println!(
                "{} pos anggaran bulan {} diperbarui",
                categories.len(),
                month
            );
        }

        CategoryCommands::Copy { from, force } => {
            let source = from.unwrap_or_else(|| month.prev());

            if !force && !storage.categories.load(month)?.is_empty() {
                println!(
                    "Bulan {} sudah memiliki pos anggaran. Gunakan --force untuk menimpanya.",
                    month
                );
                return Ok(());
            }

            let count = service.copy_from(month, source)?;
            println!(
                "{} pos anggaran disalin dari {} ke {}",
                count, source, month
            );
        }
    }

    Ok(())
}
