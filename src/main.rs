use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetbook::cli::{
    handle_audit_command, handle_budget_command, handle_export_command, handle_report_command,
    handle_rule_command, handle_transaction_command, BudgetCommands, ExportArgs, ReportCommands,
    RuleCommands, TransactionCommands,
};
use budgetbook::config::{paths::BudgetbookPaths, settings::Settings};
use budgetbook::display::DisplayStyle;
use budgetbook::logging::init_tracing;
use budgetbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budgetbook",
    author = "Kaylee Beyene",
    version,
    about = "Rule-based transaction categorization and monthly budget tracking",
    long_about = "budgetbook records your transactions, files each one under a category \
                  using prioritized description rules, and keeps monthly category totals \
                  that are checked against the budgets you set."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record, list and recategorize transactions
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Manage categorization rules
    #[command(subcommand)]
    Rule(RuleCommands),

    /// Manage monthly budgets
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Category totals
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export a month as JSON, YAML or CSV
    Export(ExportArgs),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the default config.json if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    let storage = Storage::new(paths.clone(), &settings)?;
    let mut ledger = storage.load_ledger()?;
    let style = DisplayStyle::from_settings(&settings);

    tracing::debug!(
        base_dir = %paths.base_dir().display(),
        transactions = ledger.transaction_count(),
        "ledger loaded"
    );

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &mut ledger, &style, cmd)?;
        }
        Some(Commands::Rule(cmd)) => {
            handle_rule_command(&storage, &mut ledger, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &mut ledger, &style, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&ledger, &style, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&ledger, args)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Config { init }) => {
            if init && !paths.settings_file().exists() {
                settings.save(&paths)?;
                println!("Wrote {}", paths.settings_file().display());
                println!();
            }
            println!("budgetbook Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Log filter:      {}", settings.log_filter);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            println!();
            println!(
                "Ledger: {} transaction(s), {} rule(s), {} budget(s)",
                ledger.transaction_count(),
                ledger.rules().len(),
                ledger.budgets().len()
            );
            for path in storage.store().corrupt_files() {
                println!("Warning: {} is not valid JSON", path.display());
            }
        }
        None => {
            println!("budgetbook - transaction categorization and budget tracking");
            println!();
            println!("Run 'budgetbook --help' for usage information.");
        }
    }

    Ok(())
}
