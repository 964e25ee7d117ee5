mod common;

use std::fs;
use carebase::config::enums::configuration_error::ConfigurationError;
use carebase::config::structs::configuration::Configuration;
use carebase::database::enums::database_drivers::DatabaseDrivers;
use carebase::database::structs::database_connector::DatabaseConnector;
use carebase::database::traits::database_backend::DatabaseBackend;

#[test]
fn test_load_from_file_valid_configuration() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("config.toml");
    fs::write(&path, r#"
log_level = "warn"

[database]
engine = "sqlite3"

[database.sqlite]
path = ":memory:"

[migrations]
directory = "schema"
table = "ledger"
"#).unwrap();

    let config = Configuration::load_from_file(path.to_str().unwrap(), false).unwrap();

    assert_eq!(config.log_level, "warn");
    assert_eq!(config.database.engine, DatabaseDrivers::sqlite3);
    assert!(config.database.sqlite.is_memory());
    assert_eq!(config.migrations.directory, "schema");
    assert_eq!(config.migrations.table, "ledger");
}

#[test]
fn test_load_from_file_rejects_invalid_table() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("config.toml");
    fs::write(&path, "[migrations]\ntable = \"ledger table\"\n").unwrap();

    let result = Configuration::load_from_file(path.to_str().unwrap(), false);

    assert!(matches!(result, Err(ConfigurationError::ValidationError(_))));
}

#[test]
fn test_generated_default_configuration_is_loadable() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("config").join("carebase.toml");
    let path = path.to_str().unwrap();

    assert!(Configuration::load_from_file(path, true).is_err());
    let config = Configuration::load_file(path).unwrap();

    assert_eq!(config, Configuration::init());
}

#[tokio::test]
async fn test_configuration_drives_connector() {
    let config = Configuration::load(b"[database.sqlite]\npath = \":memory:\"\n").unwrap();
    let database = DatabaseConnector::new(&config.database, common::create_logger());

    let status = database.connect().await.unwrap().unwrap();

    assert_eq!(status.engine, DatabaseDrivers::sqlite3);
    database.disconnect().await.unwrap();
}
