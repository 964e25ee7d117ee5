//! Configuration data structures.
//!
//! Each struct corresponds to a section in the TOML configuration file.

/// Root configuration structure containing all settings.
pub mod configuration;

/// Database engine selection and per-engine settings.
pub mod database_config;

/// Schema-file directory and ledger table settings.
pub mod migration_config;

/// PostgreSQL connection, pool and retry settings.
pub mod pgsql_config;

/// SQLite file settings.
pub mod sqlite_config;
