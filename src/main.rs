use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use famfin::cli::{
    handle_budget_command, handle_category_command, handle_cost_center_command,
    handle_export_command, handle_report_command, handle_transaction_command,
};
use famfin::config::{FamfinPaths, Settings};
use famfin::storage::init::needs_initialization;
use famfin::storage::{initialize_storage, Storage, SHARED_BUCKET_NAME};

/// Environment variable holding the log filter (e.g. `famfin=debug`)
const LOG_ENV: &str = "FAMFIN_LOG";

#[derive(Parser)]
#[command(
    name = "famfin",
    version,
    about = "Family finance: income distribution and expense splitting",
    long_about = "famfin distributes a monthly income across needs, wants and \
                  investments, and tracks which family member is responsible \
                  for each expense, from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data files with default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Category management commands
    #[command(subcommand)]
    Category(famfin::cli::CategoryCommands),

    /// Cost center (responsible party) commands
    #[command(subcommand, name = "cost-center", alias = "cc")]
    CostCenter(famfin::cli::CostCenterCommands),

    /// Budget distribution commands
    #[command(subcommand)]
    Budget(famfin::cli::BudgetCommands),

    /// Transaction management commands
    #[command(subcommand, name = "txn", alias = "transaction")]
    Transaction(famfin::cli::TransactionCommands),

    /// Reports
    #[command(subcommand)]
    Report(famfin::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(famfin::cli::ExportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_storage(paths: FamfinPaths) -> Result<Storage> {
    let storage = Storage::new(paths)?;
    storage.load_all()?;
    Ok(storage)
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FamfinPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("famfin - family finance allocation");
            println!();
            println!("Run 'famfin --help' for usage information.");
            if needs_initialization(&paths) {
                println!("Run 'famfin init' to get started.");
            }
            return Ok(());
        }
    };

    match command {
        Commands::Init => {
            println!("Initializing famfin at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.setup_completed = true;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories have been created:");
            println!("  - Needs (Housing, Groceries, Transportation, Health)");
            println!("  - Wants (Dining Out, Entertainment, Shopping)");
            println!("  - Investments (Emergency Fund, Retirement)");
            println!("and a '{}' cost center bucket.", SHARED_BUCKET_NAME);
            println!();
            println!("Run 'famfin cost-center add NAME --default-split PCT' to add family members.");
        }
        Commands::Config => {
            let allocation = &settings.allocation;
            println!("famfin Configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:            {}", settings.currency_symbol);
            println!(
                "  Needs share of remainder:   {}%",
                allocation.needs_share_of_remaining
            );
            println!(
                "  Default investment rate:    {}%",
                allocation.default_investment_percentage
            );
            println!(
                "  Maximum investment rate:    {}%",
                allocation.max_investment_percentage
            );
            println!("  Validation tolerance:       {}", allocation.tolerance);
            println!("  Setup completed:            {}", settings.setup_completed);
        }
        Commands::Category(cmd) => handle_category_command(&open_storage(paths)?, cmd)?,
        Commands::CostCenter(cmd) => handle_cost_center_command(&open_storage(paths)?, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&open_storage(paths)?, &settings, cmd)?,
        Commands::Transaction(cmd) => handle_transaction_command(&open_storage(paths)?, cmd)?,
        Commands::Report(cmd) => handle_report_command(&open_storage(paths)?, cmd)?,
        Commands::Export(cmd) => handle_export_command(&open_storage(paths)?, cmd)?,
        Commands::History { limit } => {
            let storage = open_storage(paths)?;
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}
