use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: String,
    /// Create the config file if it does not exist or is broken.
    #[arg(long)]
    pub create_config: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List executed and pending schema files.
    Status,
    /// Apply every pending schema file.
    Migrate,
    /// Remove the most recent ledger record (schema changes stay).
    Rollback,
    /// Print the full migration ledger.
    History,
    /// Connect and probe the configured database.
    Health,
}
