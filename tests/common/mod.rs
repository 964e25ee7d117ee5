#![allow(dead_code)]
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use carebase::config::structs::database_config::DatabaseConfig;
use carebase::config::structs::migration_config::MigrationConfig;
use carebase::config::structs::pgsql_config::PgSQLConfig;
use carebase::database::enums::database_drivers::DatabaseDrivers;
use carebase::database::structs::database_connector::DatabaseConnector;
use carebase::database::traits::database_backend::DatabaseBackend;
use carebase::logging::structs::memory_logger::MemoryLogger;
use carebase::migrations::structs::migration_manager::MigrationManager;

pub type TestDatabase = Arc<DatabaseConnector>;
pub type TestLogger = Arc<MemoryLogger>;

pub fn create_sqlite_config(path: &str) -> DatabaseConfig {
    let mut config = DatabaseConfig::default();
    config.engine = DatabaseDrivers::sqlite3;
    config.sqlite.path = path.to_string();
    config
}

/// PostgreSQL settings pointing at a port nothing listens on.
pub fn create_unreachable_pgsql_config(max_retries: u32) -> DatabaseConfig {
    let mut config = DatabaseConfig::default();
    config.engine = DatabaseDrivers::pgsql;
    config.pgsql = PgSQLConfig {
        host: String::from("127.0.0.1"),
        port: 1,
        connect_timeout: 1,
        max_retries,
        retry_delay: 0,
        drain_timeout: 1,
        ..PgSQLConfig::default()
    };
    config
}

pub fn create_logger() -> TestLogger {
    Arc::new(MemoryLogger::new())
}

pub async fn create_memory_database(logger: TestLogger) -> TestDatabase {
    let database = Arc::new(DatabaseConnector::new(&create_sqlite_config(":memory:"), logger));
    database.connect().await.expect("in-memory database opens");
    database
}

pub fn write_schema(directory: &Path, name: &str, sql: &str) {
    std::fs::create_dir_all(directory).expect("schema directory is writable");
    std::fs::write(directory.join(name), sql).expect("schema file is writable");
}

pub fn create_migration_manager(database: TestDatabase, directory: &Path, logger: TestLogger) -> MigrationManager {
    let config = MigrationConfig {
        directory: directory.to_string_lossy().to_string(),
        table: String::from("schema_migrations"),
    };
    MigrationManager::new(database, config, logger).expect("ledger table name is valid")
}

pub fn schema_directory() -> TempDir {
    tempfile::tempdir().expect("temporary directory")
}

pub const USERS_SCHEMA: &str = "-- users\nCREATE TABLE users (\n    id INTEGER PRIMARY KEY,\n    email TEXT NOT NULL UNIQUE\n);\n";

pub const PATIENTS_SCHEMA: &str = "CREATE TABLE patients (\n    id INTEGER PRIMARY KEY,\n    user_id INTEGER NOT NULL REFERENCES users(id),\n    name TEXT NOT NULL\n);\nCREATE INDEX idx_patients_user ON patients (user_id);\n";
