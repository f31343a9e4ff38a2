//! Analysis CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::analysis::format_analysis_report;
use crate::error::KantongResult;
use crate::models::Month;
use crate::services::AnalysisService;
use crate::storage::Storage;

/// Analysis subcommands
#[derive(Subcommand)]
pub enum AnalysisCommands {
    /// Show the stored analysis of the month
    Show,
    /// Recompute and store the month's analysis
    Refresh,
}

/// Handle an analysis command for the selected month
pub fn handle_analysis_command(
    storage: &Storage,
    settings: &Settings,
    month: Month,
    cmd: AnalysisCommands,
) -> KantongResult<()> {
    let service = AnalysisService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AnalysisCommands::Show => match service.load(month)? {
            Some(stored) => {
                print!("{}", format_analysis_report(month, &stored, symbol));
                if !service.compute(month)?.same_totals(&stored) {
                    println!();
                    println!(
                        "Transaksi berubah sejak analisis terakhir. Jalankan 'kantong analysis refresh'."
                    );
                }
            }
            None => {
                println!("Belum ada analisis untuk bulan {}.", month);
                println!("Jalankan 'kantong analysis refresh' untuk menghitungnya.");
            }
        },

        AnalysisCommands::Refresh => {
            let analysis = service.refresh(month)?;
            println!("Analisis berhasil diperbarui");
            println!();
            print!("{}", format_analysis_report(month, &analysis, symbol));
        }
    }

    Ok(())
}
