use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use log::Level;
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row as SqlxRow, Sqlite, SqliteConnection, TypeInfo, ValueRef};
use tokio::sync::Mutex;
use crate::config::structs::sqlite_config::SQLiteConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::enums::db_value::DbValue;
use crate::database::enums::transaction_handle::TransactionHandle;
use crate::database::errors::DatabaseError;
use crate::database::helpers::{is_insert, is_select, rewrite_placeholders, statement_prefix};
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;
use crate::database::structs::health_status::HealthStatus;
use crate::database::structs::query_result::{QueryResult, Row};
use crate::database::traits::database_backend::{DatabaseBackend, TransactionWork};
use crate::logging::traits::logger::Logger;

const ENGINE: DatabaseDrivers = DatabaseDrivers::sqlite3;
const LOG_PREFIX: &str = "[SQLite]";
const HEALTH_CHECK: &str = "SELECT datetime('now') AS server_time, sqlite_version() AS version";

impl DatabaseConnectorSQLite {
    #[tracing::instrument(level = "debug", skip(logger))]
    pub fn new(config: SQLiteConfig, logger: Arc<dyn Logger>) -> DatabaseConnectorSQLite {
        DatabaseConnectorSQLite {
            config,
            connection: Mutex::new(None),
            connected: AtomicBool::new(false),
            logger,
        }
    }

    pub fn connect_options(config: &SQLiteConfig) -> Result<SqliteConnectOptions, DatabaseError> {
        let options = if config.is_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|error| DatabaseError::ConnectionError(error.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.path)
                .create_if_missing(true)
        };
        Ok(options
            .foreign_keys(true)
            .log_statements(log::LevelFilter::Debug)
            .log_slow_statements(log::LevelFilter::Warn, Duration::from_secs(1)))
    }

    fn ensure_directory(path: &str) -> Result<(), DatabaseError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        Ok(())
    }

    pub(crate) fn bind_params<'q>(statement: &'q str, params: &'q [DbValue]) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        let mut query = sqlx::query(statement);
        for param in params {
            query = match param {
                DbValue::Null => query.bind(Option::<String>::None),
                DbValue::Integer(value) => query.bind(*value),
                DbValue::Real(value) => query.bind(*value),
                DbValue::Text(value) => query.bind(value.as_str()),
                DbValue::Blob(value) => query.bind(value.as_slice()),
                DbValue::Boolean(value) => query.bind(*value),
            };
        }
        query
    }

    /// Runs one statement on `connection`: `SELECT` statements return their
    /// rows, everything else reports affected rows and the inserted row id.
    pub(crate) async fn execute_on(
        connection: &mut SqliteConnection,
        statement: &str,
        params: &[DbValue],
    ) -> Result<QueryResult, DatabaseError> {
        let rewritten = rewrite_placeholders(statement);
        let query = Self::bind_params(rewritten.as_str(), params);

        if is_select(statement) {
            let fetched = query
                .fetch_all(&mut *connection)
                .await
                .map_err(|error| DatabaseError::query(error, statement))?;
            let mut rows = Vec::with_capacity(fetched.len());
            for row in &fetched {
                rows.push(Self::decode_row(row).map_err(|error| DatabaseError::query(error, statement))?);
            }
            return Ok(QueryResult {
                row_count: rows.len() as u64,
                rows,
                last_insert_id: None,
            });
        }

        let done = query
            .execute(&mut *connection)
            .await
            .map_err(|error| DatabaseError::query(error, statement))?;
        let last_insert_id = (is_insert(statement) && done.rows_affected() > 0)
            .then(|| done.last_insert_rowid());
        Ok(QueryResult {
            rows: Vec::new(),
            row_count: done.rows_affected(),
            last_insert_id,
        })
    }

    /// Decodes by the storage class of each value, not the declared column type.
    pub(crate) fn decode_row(row: &SqliteRow) -> Result<Row, sqlx::Error> {
        let mut decoded = Row::new();
        for column in row.columns() {
            let index = column.ordinal();
            let raw = row.try_get_raw(index)?;
            let value = if raw.is_null() {
                Value::Null
            } else {
                let storage_class = raw.type_info().name().to_string();
                match storage_class.as_str() {
                    "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
                    "REAL" => serde_json::Number::from_f64(row.try_get::<f64, _>(index)?)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    "BLOB" => Value::String(hex::encode(row.try_get::<Vec<u8>, _>(index)?)),
                    _ => Value::String(row.try_get::<String, _>(index)?),
                }
            };
            decoded.insert(column.name().to_string(), value);
        }
        Ok(decoded)
    }

    async fn probe(connection: &mut SqliteConnection) -> Result<HealthStatus, DatabaseError> {
        let row = sqlx::query(HEALTH_CHECK)
            .fetch_one(&mut *connection)
            .await
            .map_err(|error| DatabaseError::HealthCheckError(error.to_string()))?;
        Ok(HealthStatus {
            engine: ENGINE,
            server_time: row.try_get("server_time").map_err(|error| DatabaseError::HealthCheckError(error.to_string()))?,
            version: row.try_get("version").map_err(|error| DatabaseError::HealthCheckError(error.to_string()))?,
        })
    }

    fn log_failure(&self, message: &str, statement: &str, error: &DatabaseError) {
        self.logger.log(Level::Error, &format!("{} {}", LOG_PREFIX, message), &[
            ("statement", statement_prefix(statement)),
            ("error", error.to_string()),
        ]);
    }
}

#[async_trait]
impl DatabaseBackend for DatabaseConnectorSQLite {
    async fn connect(&self) -> Result<Option<HealthStatus>, DatabaseError> {
        let mut guard = self.connection.lock().await;
        if let Some(connection) = guard.as_mut() {
            return Self::probe(connection).await.map(Some);
        }

        if !self.config.is_memory() {
            Self::ensure_directory(&self.config.path)?;
        }
        let options = Self::connect_options(&self.config)?;
        let mut connection = match options.connect().await {
            Ok(connection) => connection,
            Err(error) => {
                self.logger.log(Level::Error, &format!("{} Unable to open database", LOG_PREFIX), &[
                    ("path", self.config.path.clone()),
                    ("error", error.to_string()),
                ]);
                return Err(DatabaseError::ConnectionError(error.to_string()));
            }
        };

        let status = match Self::probe(&mut connection).await {
            Ok(status) => status,
            Err(error) => {
                let _ = connection.close().await;
                return Err(error);
            }
        };
        *guard = Some(connection);
        self.connected.store(true, Ordering::SeqCst);

        self.logger.log(Level::Info, &format!("{} Connected", LOG_PREFIX), &[
            ("path", self.config.path.clone()),
            ("version", status.version.clone()),
        ]);
        Ok(Some(status))
    }

    async fn disconnect(&self) -> Result<(), DatabaseError> {
        let mut guard = self.connection.lock().await;
        self.connected.store(false, Ordering::SeqCst);
        let Some(connection) = guard.take() else {
            return Ok(());
        };
        match connection.close().await {
            Ok(()) => {
                self.logger.log(Level::Info, &format!("{} Disconnected", LOG_PREFIX), &[]);
                Ok(())
            }
            Err(error) => {
                self.logger.log(Level::Warn, &format!("{} Error while closing database", LOG_PREFIX), &[
                    ("error", error.to_string()),
                ]);
                Err(DatabaseError::DisconnectError(error.to_string()))
            }
        }
    }

    async fn query(&self, statement: &str, params: &[DbValue]) -> Result<QueryResult, DatabaseError> {
        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or(DatabaseError::NotConnected)?;
        let result = Self::execute_on(connection, statement, params).await;
        if let Err(error) = &result {
            self.log_failure("Query failed", statement, error);
        }
        result
    }

    async fn transaction<T, F>(&self, work: F) -> Result<T, DatabaseError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(TransactionHandle<'c>) -> TransactionWork<'c, T> + Send + 'static,
    {
        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or(DatabaseError::NotConnected)?;

        // Dropping `transaction` before commit queues a ROLLBACK on the connection.
        let mut transaction = Connection::begin(connection)
            .await
            .map_err(|error| DatabaseError::TransactionError(error.to_string()))?;

        let outcome = work(TransactionHandle::SQLite(&mut *transaction)).await;
        match outcome {
            Ok(value) => {
                if let Err(error) = transaction.commit().await {
                    self.logger.log(Level::Error, &format!("{} Commit failed, transaction rolled back", LOG_PREFIX), &[
                        ("error", error.to_string()),
                    ]);
                    return Err(DatabaseError::TransactionError(error.to_string()));
                }
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = transaction.rollback().await {
                    self.logger.log(Level::Error, &format!("{} Rollback failed", LOG_PREFIX), &[
                        ("error", rollback_error.to_string()),
                    ]);
                }
                self.logger.log(Level::Warn, &format!("{} Transaction rolled back", LOG_PREFIX), &[
                    ("error", error.to_string()),
                ]);
                Err(error)
            }
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, DatabaseError> {
        let mut guard = self.connection.lock().await;
        let connection = guard
            .as_mut()
            .ok_or_else(|| DatabaseError::HealthCheckError(String::from("database is not connected")))?;
        Self::probe(connection).await
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
