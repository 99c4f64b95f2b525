use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use onedrip_cli::audit::AuditLogger;
use onedrip_cli::cli::{
    handle_backup_command, handle_budget_command, handle_export_command, handle_import_command,
    handle_status_command, BackupFormat, BudgetCommands,
};
use onedrip_cli::config::{paths::OneDripPaths, settings::Settings};
use onedrip_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "onedrip",
    version,
    about = "Budget manager for repair-shop businesses",
    long_about = "OneDrip CLI manages repair-service budgets (quotes) from the \
                  terminal: create and track quotes, export them as CSV, and \
                  import CSV files with row-by-row validation and an explicit \
                  confirmation step."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget management commands
    #[command(subcommand, alias = "orcamento")]
    Budget(BudgetCommands),

    /// Import budgets from a CSV file
    Import {
        /// Path to the CSV file
        file: String,

        /// Import without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Export budgets to a CSV file
    Export {
        /// Output directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a full-database backup
    Backup {
        /// Output directory (defaults to the backup directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Backup format
        #[arg(short, long, value_enum, default_value = "json")]
        format: BackupFormat,
    },

    /// Show storage counts and recent import/export activity
    Status,

    /// Initialize the local database
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = OneDripPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let audit = AuditLogger::new(paths.audit_log());

    match cli.command {
        Commands::Budget(cmd) => handle_budget_command(&storage, &audit, cmd)?,
        Commands::Import { file, yes } => {
            handle_import_command(&storage, &settings, &audit, &file, yes)?
        }
        Commands::Export { output } => handle_export_command(&storage, &audit, output)?,
        Commands::Backup { output, format } => {
            handle_backup_command(&storage, &settings, output, format)?
        }
        Commands::Status => handle_status_command(&storage)?,
        Commands::Init => {
            settings.setup_completed = true;
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Banco de dados inicializado em: {}", paths.base_dir().display());
        }
        Commands::Config => {
            println!("Diretório base:   {}", paths.base_dir().display());
            println!("Dados:            {}", paths.data_dir().display());
            println!("Backups:          {}", paths.backup_dir().display());
            println!("Log de auditoria: {}", paths.audit_log().display());
            println!();
            println!("Moeda:            {}", settings.currency_symbol);
            println!("Formato de data:  {}", settings.date_format);
            println!(
                "Backups mantidos: {}",
                settings.backup_retention.keep_count
            );
            println!(
                "Setup concluído:  {}",
                if settings.setup_completed { "sim" } else { "não" }
            );
        }
    }

    Ok(())
}
