use crate::config::structs::migration_config::MigrationConfig;

impl Default for MigrationConfig {
    fn default() -> Self {
        MigrationConfig {
            directory: String::from("database/migrations"),
            table: String::from("schema_migrations"),
        }
    }
}
