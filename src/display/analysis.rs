//! Monthly analysis display formatting

use crate::models::money::{format_percent, format_rupiah_decimal};
use crate::models::{Month, MonthlyAnalysis};

/// Format a month's analysis snapshot as a report
pub fn format_analysis_report(month: Month, analysis: &MonthlyAnalysis, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Analisis Keuangan - {}\n", month));
    output.push_str(&"=".repeat(40));
    output.push('\n');

    output.push_str(&format!(
        "Total Pemasukan       : {} ({} transaksi)\n",
        analysis.total_income.format_with_symbol(symbol),
        analysis.income_count
    ));
    output.push_str(&format!(
        "Total Pengeluaran     : {} ({} transaksi)\n",
        analysis.total_expense.format_with_symbol(symbol),
        analysis.expense_count
    ));
    output.push_str(&format!(
        "Rata-rata Pengeluaran : {}\n",
        format_rupiah_decimal(analysis.average_expense)
    ));
    output.push_str(&format!(
        "Saldo Akhir           : {}\n",
        analysis.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Persentase Sisa       : {}\n",
        format_percent(analysis.remaining_percent)
    ));
    output.push('\n');
    output.push_str(&format!("Kondisi    : {}\n", analysis.condition));
    output.push_str(&format!("Kesimpulan : {}\n", analysis.conclusion));
    output.push_str(&format!("  {}\n", analysis.conclusion.description()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_report_contents() {
        let analysis = MonthlyAnalysis::from_totals(
            Money::from_rupiah(2_000_000),
            Money::from_rupiah(1_000_000),
            1,
            4,
        );
        let output = format_analysis_report(Month::new(5).unwrap(), &analysis, "Rp");

        assert!(output.starts_with("Analisis Keuangan - Mei"));
        assert!(output.contains("Rp 2.000.000 (1 transaksi)"));
        assert!(output.contains("Rp 250.000,00"));
        assert!(output.contains("50.00%"));
        assert!(output.contains("SURPLUS"));
        assert!(output.contains("HEMAT"));
    }
}
