use serde::{Deserialize, Serialize};
use crate::config::structs::pgsql_config::PgSQLConfig;
use crate::config::structs::sqlite_config::SQLiteConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub engine: DatabaseDrivers,
    pub pgsql: PgSQLConfig,
    pub sqlite: SQLiteConfig,
}
