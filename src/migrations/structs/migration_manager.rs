use std::fmt;
use std::sync::Arc;
use crate::config::structs::migration_config::MigrationConfig;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::logging::traits::logger::Logger;

pub struct MigrationManager {
    pub(crate) database: Arc<DatabaseConnector>,
    pub(crate) config: MigrationConfig,
    pub(crate) logger: Arc<dyn Logger>,
}

impl fmt::Debug for MigrationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationManager")
            .field("engine", &self.database.engine())
            .field("config", &self.config)
            .finish()
    }
}
