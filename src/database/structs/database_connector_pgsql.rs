use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicU32;
use parking_lot::RwLock;
use sqlx::{Pool, Postgres};
use crate::config::structs::pgsql_config::PgSQLConfig;
use crate::logging::traits::logger::Logger;

pub struct DatabaseConnectorPgSQL {
    pub(crate) config: PgSQLConfig,
    pub(crate) pool: RwLock<Option<Pool<Postgres>>>,
    pub(crate) waiting: AtomicU32,
    pub(crate) logger: Arc<dyn Logger>,
}

impl fmt::Debug for DatabaseConnectorPgSQL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConnectorPgSQL")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("database", &self.config.database)
            .field("connected", &self.pool.read().is_some())
            .finish()
    }
}
