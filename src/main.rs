use anyhow::Result;
use clap::{Parser, Subcommand};

use kantong::cli::{
    handle_analysis_command, handle_category_command, handle_export_command,
    handle_transaction_command, AnalysisCommands, CategoryCommands, ExportArgs,
    TransactionCommands,
};
use kantong::config::{paths::KantongPaths, settings::Settings};
use kantong::models::Month;
use kantong::storage::Storage;

#[derive(Parser)]
#[command(
    name = "kantong",
    version,
    about = "Terminal-based personal finance tracker for students",
    long_about = "Kantong records income and expense transactions, tracks monthly \
                  budget categories (pos anggaran) and summarizes how healthy each \
                  month's finances are."
)]
struct Cli {
    /// Month to work on: number (1-12) or name; defaults to the current month
    #[arg(short, long, global = true)]
    month: Option<Month>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget category (pos anggaran) commands
    #[command(subcommand, alias = "pos")]
    Category(CategoryCommands),

    /// Monthly financial analysis
    #[command(subcommand)]
    Analysis(AnalysisCommands),

    /// Export a month's data
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let month = cli.month.unwrap_or_else(Month::current);

    let paths = KantongPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone(), settings.parse_mode())?;

    match cli.command {
        None | Some(Commands::Tui) => {
            kantong::tui::run_tui(&storage, &settings, &paths, month)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, month, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, month, cmd)?;
        }
        Some(Commands::Analysis(cmd)) => {
            handle_analysis_command(&storage, &settings, month, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, month, args)?;
        }
        Some(Commands::Config) => {
            println!("Kantong Configuration");
            println!("=====================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Transaction file:  {}", paths.transactions_file().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Max transactions: {}", settings.max_transactions);
            println!("  Max categories:   {}", settings.max_categories);
            println!("  Strict parsing:   {}", settings.strict_parsing);
            println!(
                "  Copy categories:  {}",
                settings.copy_previous_categories
            );
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!(
                "  Audit entries:    {}",
                storage.audit().entry_count().unwrap_or(0)
            );
        }
    }

    Ok(())
}
