//! Category display formatting
//!
//! Formats a month's budget categories and their totals for terminal output.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Category, Month};
use crate::services::MonthSummary;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "No")]
    number: u32,
    #[tabled(rename = "Pos")]
    name: String,
    #[tabled(rename = "Anggaran")]
    budget: String,
    #[tabled(rename = "Realisasi")]
    realized: String,
    #[tabled(rename = "Sisa")]
    remaining: String,
    #[tabled(rename = "Transaksi")]
    count: u32,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format a month's categories as a table
pub fn format_category_table(month: Month, categories: &[Category], symbol: &str) -> String {
    if categories.is_empty() {
        return format!("Belum ada pos anggaran untuk bulan {}.\n", month);
    }

    let rows = categories.iter().map(|c| CategoryRow {
        number: c.number,
        name: c.name.clone(),
        budget: c.budget.format_with_symbol(symbol),
        realized: c.realized.format_with_symbol(symbol),
        remaining: c.remaining.format_with_symbol(symbol),
        count: c.transaction_count,
        status: c.status.label(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..5)).with(Alignment::right()));

    format!("Pos Anggaran {}\n{}\n", month, table)
}

/// Format the budget totals of a month
pub fn format_month_summary(summary: &MonthSummary, symbol: &str) -> String {
    format!(
        "Total Anggaran  : {}\nTotal Realisasi : {}\nTotal Sisa      : {}\nPos melebihi anggaran: {} dari {}\n",
        summary.total_budget.format_with_symbol(symbol),
        summary.total_realized.format_with_symbol(symbol),
        summary.total_remaining.format_with_symbol(symbol),
        summary.unsafe_count,
        summary.category_count
    )
}

/// Format one category in detail
pub fn format_category_details(category: &Category, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pos:        {}. {}\n", category.number, category.name));
    output.push_str(&format!(
        "Anggaran:   {}\n",
        category.budget.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Realisasi:  {} ({:.1}%)\n",
        category.realized.format_with_symbol(symbol),
        category.usage_percent()
    ));
    output.push_str(&format!(
        "Sisa:       {}\n",
        category.remaining.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Transaksi:  {}\n", category.transaction_count));
    output.push_str(&format!("Status:     {}\n", category.status));

    output
}
