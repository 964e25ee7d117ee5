use serde::{Deserialize, Serialize};
use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::migration_config::MigrationConfig;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Configuration {
    pub log_level: String,
    pub database: DatabaseConfig,
    pub migrations: MigrationConfig,
}
