//! Implementation blocks for configuration structures.

pub mod configuration;

pub mod database_config;

pub mod migration_config;

pub mod pgsql_config;

pub mod sqlite_config;
