use std::process::exit;
use std::sync::Arc;
use clap::Parser;
use log::{error, info, warn};
use tokio::runtime::Builder;
use carebase::config::structs::configuration::Configuration;
use carebase::database::errors::DatabaseError;
use carebase::database::structs::database_connector::DatabaseConnector;
use carebase::database::traits::database_backend::DatabaseBackend;
use carebase::logging::logging::setup_logging;
use carebase::logging::structs::log_forwarder::LogForwarder;
use carebase::logging::traits::logger::Logger;
use carebase::migrations::structs::migration_manager::MigrationManager;
use carebase::structs::{Cli, Command};

#[tracing::instrument(level = "debug")]
fn main() -> std::io::Result<()>
{
    let args = Cli::parse();

    let config = match Configuration::load_from_file(&args.config, args.create_config) {
        Ok(config) => Arc::new(config),
        Err(error) => {
            eprintln!("[CONFIG] {}", error);
            exit(101)
        }
    };

    if let Err(error) = setup_logging(&config) {
        eprintln!("[BOOT] Unable to initialize logging: {}", error);
    }

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let code = Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let logger: Arc<dyn Logger> = Arc::new(LogForwarder::default());
            let database = Arc::new(DatabaseConnector::new(&config.database, logger.clone()));

            let code = match run(args.command, config.clone(), database.clone(), logger).await {
                Ok(()) => 0,
                Err(error) => {
                    error!("[BOOT] {:?} failed: {}", args.command, error);
                    1
                }
            };

            if let Err(error) = database.disconnect().await {
                warn!("[BOOT] Disconnect failed: {}", error);
            }
            code
        });

    info!("[BOOT] Shutdown complete");
    exit(code)
}

async fn run(command: Command, config: Arc<Configuration>, database: Arc<DatabaseConnector>, logger: Arc<dyn Logger>) -> Result<(), DatabaseError>
{
    if command == Command::Health {
        let Some(status) = database.connect().await? else {
            return Err(DatabaseError::ConnectionError(String::from("database is unreachable")));
        };
        println!("engine:      {:?}", status.engine);
        println!("server time: {}", status.server_time);
        println!("version:     {}", status.version);
        if let Some(stats) = database.pool_stats() {
            println!("pool:        size={} idle={} waiting={}", stats.size, stats.idle, stats.waiting);
        }
        return Ok(());
    }

    let manager = MigrationManager::new(database, config.migrations.clone(), logger)?;
    match command {
        Command::Status => {
            let status = manager.status().await?;
            println!("{} of {} migrations executed", status.executed.len(), status.total);
            for name in &status.executed {
                println!("  [x] {}", name);
            }
            for name in &status.pending {
                println!("  [ ] {}", name);
            }
        }
        Command::Migrate => {
            let applied = manager.migrate().await?;
            if applied.is_empty() {
                println!("Nothing to migrate");
            }
            for name in &applied {
                println!("Applied {}", name);
            }
        }
        Command::Rollback => {
            match manager.rollback().await? {
                Some(name) => println!("Removed {} from the ledger (schema changes were not undone)", name),
                None => println!("Ledger is empty, nothing to roll back"),
            }
        }
        Command::History => {
            for record in manager.records().await? {
                println!("{:>4}  {}  {}", record.id, record.applied_at, record.name);
            }
        }
        Command::Health => {}
    }
    Ok(())
}
