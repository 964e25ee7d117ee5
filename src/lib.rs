//! # Carebase
//!
//! Data-access layer and schema migration runner for a healthcare platform.
//!
//! ## Overview
//!
//! Carebase hides the choice of database engine behind one facade. Production
//! deployments talk to PostgreSQL through a bounded connection pool; local
//! development and tests run against a single SQLite file or an in-memory
//! database. Callers write SQL with `$N` placeholders once and get the same
//! result shape from either engine.
//!
//! ## Features
//!
//! - **Dual engine**: PostgreSQL (pooled, retrying connect, slow-query warnings)
//!   and SQLite (single connection, foreign keys enforced)
//! - **Transactions**: closure-scoped, committed on `Ok`, rolled back on `Err`
//! - **Migrations**: ordered `*.sql` files tracked in a ledger table, one
//!   transaction per file
//! - **Graceful shutdown**: bounded drain of in-flight PostgreSQL work
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use carebase::config::structs::configuration::Configuration;
//! use carebase::database::structs::database_connector::DatabaseConnector;
//! use carebase::database::traits::database_backend::DatabaseBackend;
//! use carebase::logging::structs::log_forwarder::LogForwarder;
//! use carebase::migrations::structs::migration_manager::MigrationManager;
//!
//! let config = Configuration::load_from_file("config.toml", false)?;
//! let logger = Arc::new(LogForwarder::default());
//! let database = Arc::new(DatabaseConnector::new(&config.database, logger.clone()));
//! database.connect().await?;
//!
//! let migrations = MigrationManager::new(database.clone(), config.migrations.clone(), logger)?;
//! migrations.migrate().await?;
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`database`] - Engine connectors, the facade and statement translation
//! - [`logging`] - `fern` setup and the injectable logger capability
//! - [`migrations`] - Schema file runner and ledger
//! - [`retry`] - Fixed-delay retry policy for networked connects
//! - [`structs`] - CLI argument parsing

/// Configuration management module.
///
/// Handles loading, parsing, and validating configuration from TOML files
/// and environment variables.
pub mod config;

/// Database module with PostgreSQL and SQLite support.
///
/// Provides the adapter contract, both engine connectors and the facade
/// that selects one of them at construction.
pub mod database;

/// Logging module.
///
/// Installs the `fern` dispatcher for the binary and defines the logger
/// capability injected into library components.
pub mod logging;

/// Schema migration module.
///
/// Applies pending `*.sql` files in order and tracks them in a ledger table.
pub mod migrations;

/// Retry module used by the networked connector.
pub mod retry;

/// CLI argument parsing.
pub mod structs;
