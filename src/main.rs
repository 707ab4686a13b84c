use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bankbook::audit::AuditLogger;
use bankbook::cli::{handle_balance, handle_init};
use bankbook::config::{paths::BankbookPaths, settings::Settings};
use bankbook::storage;

#[derive(Parser)]
#[command(
    name = "bankbook",
    version,
    about = "Terminal-based personal finance ledger",
    long_about = "Bankbook keeps a wallet of bank accounts as plain CSV and JSON \
                  files and lets you browse, edit and reconcile statements and \
                  their operations from the terminal."
)]
struct Cli {
    /// Data directory holding the wallet (also BANKBOOK_DATA_DIR)
    #[arg(long, global = true, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Wallet name to use when the directory has none recorded
    #[arg(long, global = true, value_name = "NAME")]
    wallet: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive browser (the default)
    #[command(alias = "ui")]
    Tui,

    /// Create a fresh wallet skeleton
    Init {
        /// Name of the new wallet
        #[arg(long, default_value = "wallet")]
        name: String,
    },

    /// Print the wallet balance summary
    Balance,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BankbookPaths::resolve(cli.dir)?;
    let settings = Settings::load_or_create(&paths)?;
    let fallback_name = cli.wallet.unwrap_or_else(|| "wallet".to_string());

    match cli.command {
        Some(Commands::Init { name }) => {
            handle_init(&paths, &settings, &name)?;
        }
        Some(Commands::Balance) => {
            handle_balance(&paths, &settings, &fallback_name)?;
        }
        Some(Commands::Config) => {
            println!("Bankbook Configuration");
            println!("======================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Confirm remove:  {}", settings.confirm_remove);
        }
        Some(Commands::Tui) | None => {
            let mut wallet = storage::load_wallet(&paths, &fallback_name)?;
            let audit = AuditLogger::new(paths.audit_log());
            bankbook::tui::run_tui(&paths, &settings, &audit, &mut wallet)?;
        }
    }

    Ok(())
}
