//! CLI command for data export

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{KantongError, KantongResult};
use crate::export::{csv, json};
use crate::models::Month;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV of the month's transactions
    Csv,
    /// CSV of the month's categories
    CategoriesCsv,
    /// JSON with transactions, categories and analysis
    Json,
}

/// Arguments of `kantong export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (stdout when omitted)
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

fn write_export<W: Write>(
    storage: &Storage,
    month: Month,
    args: &ExportArgs,
    writer: &mut W,
) -> KantongResult<usize> {
    match args.format {
        ExportFormat::Csv => csv::export_transactions_csv(storage, month, writer),
        ExportFormat::CategoriesCsv => csv::export_categories_csv(storage, month, writer),
        ExportFormat::Json => {
            json::export_month_json(storage, month, writer, args.pretty)?;
            Ok(1)
        }
    }
}

/// Handle the export command for the selected month
pub fn handle_export_command(storage: &Storage, month: Month, args: ExportArgs) -> KantongResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                KantongError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            let count = write_export(storage, month, &args, &mut writer)?;
            writer.flush()?;

            match args.format {
                ExportFormat::Json => {
                    println!("Data bulan {} diekspor ke: {}", month, path.display())
                }
                _ => println!("{} baris diekspor ke: {}", count, path.display()),
            }
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_export(storage, month, &args, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}
