use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::pgsql_config::PgSQLConfig;
use crate::config::structs::sqlite_config::SQLiteConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            engine: DatabaseDrivers::sqlite3,
            pgsql: PgSQLConfig::default(),
            sqlite: SQLiteConfig::default(),
        }
    }
}
