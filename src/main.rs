use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use studyvault::backup::TRACKED_KEYS;
use studyvault::cli::{
    handle_backup_command, handle_log_command, handle_store_command, BackupCommands,
    StoreCommands,
};
use studyvault::config::{paths::AppPaths, settings::Settings};
use studyvault::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "studyvault",
    author = "Kaylee Beyene",
    version,
    about = "Local progress store and backup manager for a self-paced course",
    long_about = "StudyVault keeps the course site's saved state (progress, notes, \
                  streaks, theme and the rest) in a local key-value store, and \
                  exports, restores or erases all of it in one step."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "STUDYVAULT_JSON_LOGS")]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Backup(BackupCommands),

    #[command(flatten)]
    Store(StoreCommands),

    /// Show recent backup activity
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs, cli.verbose, cli.quiet);

    // Initialize paths and settings
    let paths = AppPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    paths.ensure_directories()?;

    tracing::debug!(base_dir = %paths.base_dir().display(), "paths resolved");

    match cli.command {
        Some(Commands::Backup(cmd)) => handle_backup_command(&paths, &settings, cmd)?,
        Some(Commands::Store(cmd)) => handle_store_command(&paths, cmd)?,
        Some(Commands::Log { limit }) => handle_log_command(&paths, limit)?,
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
                tracing::info!(path = %paths.settings_file().display(), "default settings written");
            }
            println!("StudyVault Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Storage file:     {}", paths.storage_file().display());
            println!("Offline caches:   {}", paths.offline_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Product name:   {}", settings.product_name);
            println!("  Key prefix:     {}", settings.key_prefix);
            match &settings.export_dir {
                Some(dir) => println!("  Export dir:     {}", dir.display()),
                None => println!("  Export dir:     (current directory)"),
            }
            println!("  Audit enabled:  {}", settings.audit_enabled);
            println!();
            println!("Tracked keys: {}", TRACKED_KEYS.join(", "));
        }
        None => {
            println!("StudyVault - course progress backup");
            println!();
            println!("Run 'studyvault --help' for usage information.");
            println!("Run 'studyvault export' to back up your progress.");
        }
    }

    Ok(())
}
