use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use sqlx::SqliteConnection;
use tokio::sync::Mutex;
use crate::config::structs::sqlite_config::SQLiteConfig;
use crate::logging::traits::logger::Logger;

pub struct DatabaseConnectorSQLite {
    pub(crate) config: SQLiteConfig,
    pub(crate) connection: Mutex<Option<SqliteConnection>>,
    pub(crate) connected: AtomicBool,
    pub(crate) logger: Arc<dyn Logger>,
}

impl fmt::Debug for DatabaseConnectorSQLite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConnectorSQLite")
            .field("path", &self.config.path)
            .field("connection", &"<sqlx::SqliteConnection>")
            .field("connected", &self.connected.load(Ordering::Relaxed))
            .finish()
    }
}
