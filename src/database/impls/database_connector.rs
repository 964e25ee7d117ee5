use std::sync::Arc;
use async_trait::async_trait;
use log::Level;
use crate::config::structs::database_config::DatabaseConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::enums::db_value::DbValue;
use crate::database::enums::transaction_handle::TransactionHandle;
use crate::database::errors::DatabaseError;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::database_connector_pgsql::DatabaseConnectorPgSQL;
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;
use crate::database::structs::health_status::HealthStatus;
use crate::database::structs::pool_stats::PoolStats;
use crate::database::structs::query_result::QueryResult;
use crate::database::traits::database_backend::{DatabaseBackend, TransactionWork};
use crate::logging::traits::logger::Logger;

impl DatabaseConnector {
    /// Builds the connector for `config.engine`. Nothing is opened until
    /// [`connect`](DatabaseBackend::connect).
    pub fn new(config: &DatabaseConfig, logger: Arc<dyn Logger>) -> DatabaseConnector
    {
        logger.log(Level::Info, "[BOOT] Database engine selected", &[
            ("engine", format!("{:?}", config.engine)),
        ]);
        let mut structure = DatabaseConnector { sqlite: None, pgsql: None, engine: config.engine };
        match config.engine {
            DatabaseDrivers::sqlite3 => {
                structure.sqlite = Some(DatabaseConnectorSQLite::new(config.sqlite.clone(), logger));
            }
            DatabaseDrivers::pgsql => {
                structure.pgsql = Some(DatabaseConnectorPgSQL::new(config.pgsql.clone(), logger));
            }
        }
        structure
    }

    pub fn engine(&self) -> DatabaseDrivers
    {
        self.engine
    }

    /// Pool telemetry for the networked engine; `None` for SQLite or before connect.
    pub fn pool_stats(&self) -> Option<PoolStats>
    {
        match self.engine {
            DatabaseDrivers::pgsql => self.pgsql.as_ref().and_then(|pgsql| pgsql.pool_stats()),
            DatabaseDrivers::sqlite3 => None,
        }
    }

    fn backend_missing(&self) -> DatabaseError
    {
        DatabaseError::ConnectionError(format!("{:?} connector was not initialised", self.engine))
    }

    fn sqlite(&self) -> Result<&DatabaseConnectorSQLite, DatabaseError>
    {
        self.sqlite.as_ref().ok_or_else(|| self.backend_missing())
    }

    fn pgsql(&self) -> Result<&DatabaseConnectorPgSQL, DatabaseError>
    {
        self.pgsql.as_ref().ok_or_else(|| self.backend_missing())
    }
}

#[async_trait]
impl DatabaseBackend for DatabaseConnector {
    async fn connect(&self) -> Result<Option<HealthStatus>, DatabaseError>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => self.sqlite()?.connect().await,
            DatabaseDrivers::pgsql => self.pgsql()?.connect().await,
        }
    }

    async fn disconnect(&self) -> Result<(), DatabaseError>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => self.sqlite()?.disconnect().await,
            DatabaseDrivers::pgsql => self.pgsql()?.disconnect().await,
        }
    }

    async fn query(&self, statement: &str, params: &[DbValue]) -> Result<QueryResult, DatabaseError>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => self.sqlite()?.query(statement, params).await,
            DatabaseDrivers::pgsql => self.pgsql()?.query(statement, params).await,
        }
    }

    async fn transaction<T, F>(&self, work: F) -> Result<T, DatabaseError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(TransactionHandle<'c>) -> TransactionWork<'c, T> + Send + 'static,
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => self.sqlite()?.transaction(work).await,
            DatabaseDrivers::pgsql => self.pgsql()?.transaction(work).await,
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, DatabaseError>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => self.sqlite()?.health_check().await,
            DatabaseDrivers::pgsql => self.pgsql()?.health_check().await,
        }
    }

    fn is_connected(&self) -> bool
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => self.sqlite.as_ref().is_some_and(|sqlite| sqlite.is_connected()),
            DatabaseDrivers::pgsql => self.pgsql.as_ref().is_some_and(|pgsql| pgsql.is_connected()),
        }
    }
}
