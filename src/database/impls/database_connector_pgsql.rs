use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use async_trait::async_trait;
use log::Level;
use serde_json::Value;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::types::Oid;
use sqlx::postgres::{PgArgumentBuffer, PgArguments, PgConnectOptions, PgPoolOptions, PgRow, PgSslMode, PgTypeInfo};
use sqlx::query::Query;
use sqlx::{Column, ConnectOptions, Connection, Encode, PgConnection, Pool, Postgres, Row as SqlxRow, Type, TypeInfo};
use crate::config::structs::pgsql_config::PgSQLConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::enums::db_value::DbValue;
use crate::database::enums::transaction_handle::TransactionHandle;
use crate::database::errors::DatabaseError;
use crate::database::helpers::{is_insert, returns_rows, statement_prefix};
use crate::database::structs::database_connector_pgsql::DatabaseConnectorPgSQL;
use crate::database::structs::health_status::HealthStatus;
use crate::database::structs::pool_stats::PoolStats;
use crate::database::structs::query_result::{QueryResult, Row};
use crate::database::traits::database_backend::{DatabaseBackend, TransactionWork};
use crate::logging::traits::logger::Logger;
use crate::retry::structs::retry_policy::RetryPolicy;

const ENGINE: DatabaseDrivers = DatabaseDrivers::pgsql;
const LOG_PREFIX: &str = "[PgSQL]";
const HEALTH_CHECK: &str = "SELECT NOW()::text AS server_time, version() AS version";
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(100);
const FORCE_CLOSE_GRACE: Duration = Duration::from_secs(1);
/// sqlx's own slow-statement log; the adapter reports slow queries at `Warn`.
pub(crate) const SQLX_SLOW_STATEMENT_LEVEL: log::LevelFilter = log::LevelFilter::Debug;

/// NULL sent with an unspecified parameter type, so the server infers the
/// column type instead of rejecting a typed text NULL.
struct UntypedNull;

impl Type<Postgres> for UntypedNull {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_oid(Oid(0))
    }
}

impl Encode<'_, Postgres> for UntypedNull {
    fn encode_by_ref(&self, _buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        Ok(IsNull::Yes)
    }
}

/// Counts callers blocked in `pool.acquire()`.
struct WaitingGuard<'a>(&'a AtomicU32);

impl<'a> WaitingGuard<'a> {
    fn enter(counter: &'a AtomicU32) -> WaitingGuard<'a> {
        counter.fetch_add(1, Ordering::SeqCst);
        WaitingGuard(counter)
    }
}

impl Drop for WaitingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DatabaseConnectorPgSQL {
    #[tracing::instrument(level = "debug", skip(logger))]
    pub fn new(config: PgSQLConfig, logger: Arc<dyn Logger>) -> DatabaseConnectorPgSQL {
        DatabaseConnectorPgSQL {
            config,
            pool: parking_lot::RwLock::new(None),
            waiting: AtomicU32::new(0),
            logger,
        }
    }

    pub fn connect_options(config: &PgSQLConfig) -> PgConnectOptions {
        let ssl_mode = match config.tls {
            true => PgSslMode::Require,
            false => PgSslMode::Prefer,
        };
        PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.database)
            .ssl_mode(ssl_mode)
            .log_statements(log::LevelFilter::Debug)
            .log_slow_statements(SQLX_SLOW_STATEMENT_LEVEL, config.slow_query_threshold())
    }

    /// Pool telemetry, `None` until connected.
    pub fn pool_stats(&self) -> Option<PoolStats> {
        let guard = self.pool.read();
        guard.as_ref().map(|pool| PoolStats {
            size: pool.size(),
            idle: pool.num_idle() as u32,
            waiting: self.waiting.load(Ordering::SeqCst),
        })
    }

    fn current_pool(&self) -> Option<Pool<Postgres>> {
        self.pool.read().clone()
    }

    async fn try_connect(&self) -> Result<(Pool<Postgres>, HealthStatus), DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .idle_timeout(self.config.idle_timeout())
            .acquire_timeout(self.config.connect_timeout())
            .connect_with(Self::connect_options(&self.config))
            .await
            .map_err(|error| DatabaseError::ConnectionError(error.to_string()))?;

        let probed = match pool.acquire().await {
            Ok(mut connection) => Self::probe(&mut *connection).await,
            Err(error) => Err(DatabaseError::ConnectionError(error.to_string())),
        };
        match probed {
            Ok(status) => Ok((pool, status)),
            Err(error) => {
                pool.close().await;
                Err(error)
            }
        }
    }

    async fn probe(connection: &mut PgConnection) -> Result<HealthStatus, DatabaseError> {
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

    pub(crate) fn bind_params<'q>(statement: &'q str, params: &'q [DbValue]) -> Query<'q, Postgres, PgArguments> {
        let mut query = sqlx::query(statement);
        for param in params {
            query = match param {
                DbValue::Null => query.bind(UntypedNull),
                DbValue::Integer(value) => query.bind(*value),
                DbValue::Real(value) => query.bind(*value),
                DbValue::Text(value) => query.bind(value.as_str()),
                DbValue::Blob(value) => query.bind(value.as_slice()),
                DbValue::Boolean(value) => query.bind(*value),
            };
        }
        query
    }

    /// Runs one statement on `connection`. Statements that produce a row set
    /// (including `... RETURNING`) return their rows; an `INSERT ... RETURNING id`
    /// also reports the first `id` as `last_insert_id`.
    pub(crate) async fn execute_on(
        connection: &mut PgConnection,
        statement: &str,
        params: &[DbValue],
    ) -> Result<QueryResult, DatabaseError> {
        let query = Self::bind_params(statement, params);

        if returns_rows(statement) {
            let fetched = query
                .fetch_all(&mut *connection)
                .await
                .map_err(|error| DatabaseError::query(error, statement))?;
            let mut rows = Vec::with_capacity(fetched.len());
            for row in &fetched {
                rows.push(Self::decode_row(row).map_err(|error| DatabaseError::query(error, statement))?);
            }
            let last_insert_id = match is_insert(statement) {
                true => rows.first().and_then(|row| row.get("id")).and_then(Value::as_i64),
                false => None,
            };
            return Ok(QueryResult {
                row_count: rows.len() as u64,
                rows,
                last_insert_id,
            });
        }

        let done = query
            .execute(&mut *connection)
            .await
            .map_err(|error| DatabaseError::query(error, statement))?;
        Ok(QueryResult {
            rows: Vec::new(),
            row_count: done.rows_affected(),
            last_insert_id: None,
        })
    }

    pub(crate) fn decode_row(row: &PgRow) -> Result<Row, sqlx::Error> {
        let mut decoded = Row::new();
        for column in row.columns() {
            let value = Self::decode_value(row, column.ordinal(), column.type_info().name())?;
            decoded.insert(column.name().to_string(), value);
        }
        Ok(decoded)
    }

    fn decode_value(row: &PgRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
        Ok(match type_name {
            "BOOL" => Value::from(row.try_get::<Option<bool>, _>(index)?),
            "INT2" => Value::from(row.try_get::<Option<i16>, _>(index)?),
            "INT4" => Value::from(row.try_get::<Option<i32>, _>(index)?),
            "INT8" => Value::from(row.try_get::<Option<i64>, _>(index)?),
            "FLOAT4" => Value::from(row.try_get::<Option<f32>, _>(index)?),
            "FLOAT8" => Value::from(row.try_get::<Option<f64>, _>(index)?),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Value::from(row.try_get::<Option<String>, _>(index)?),
            "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(index)?.unwrap_or(Value::Null),
            "UUID" => Value::from(row.try_get::<Option<uuid::Uuid>, _>(index)?.map(|uuid| uuid.to_string())),
            "TIMESTAMPTZ" => Value::from(
                row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)?.map(|time| time.to_rfc3339()),
            ),
            "TIMESTAMP" => Value::from(row.try_get::<Option<chrono::NaiveDateTime>, _>(index)?.map(|time| time.to_string())),
            "DATE" => Value::from(row.try_get::<Option<chrono::NaiveDate>, _>(index)?.map(|date| date.to_string())),
            "TIME" => Value::from(row.try_get::<Option<chrono::NaiveTime>, _>(index)?.map(|time| time.to_string())),
            "BYTEA" => Value::from(row.try_get::<Option<Vec<u8>>, _>(index)?.map(hex::encode)),
            _ => Value::from(row.try_get::<Option<String>, _>(index).ok().flatten()),
        })
    }

    /// Warns when a statement ran longer than `slow_query_threshold`.
    pub(crate) fn report_slow_query(&self, statement: &str, elapsed: Duration) -> bool {
        if elapsed <= self.config.slow_query_threshold() {
            return false;
        }
        self.logger.log(Level::Warn, &format!("{} Slow query", LOG_PREFIX), &[
            ("statement", statement_prefix(statement)),
            ("elapsed_ms", elapsed.as_millis().to_string()),
        ]);
        true
    }

    /// Polls `active` until it reports no checked-out connections or
    /// `drain_timeout` passes. Returns `false` (after warning) on timeout.
    pub(crate) async fn drain<A>(&self, active: A) -> bool
    where
        A: Fn() -> usize,
    {
        let drained = tokio::time::timeout(self.config.drain_timeout(), async {
            while active() > 0 {
                tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
            }
        }).await;
        if drained.is_err() {
            self.logger.log(Level::Warn, &format!("{} Drain timeout exceeded, forcing close", LOG_PREFIX), &[
                ("drain_timeout_s", self.config.drain_timeout.to_string()),
                ("active", active().to_string()),
            ]);
            return false;
        }
        true
    }

    fn log_failure(&self, message: &str, statement: &str, error: &DatabaseError) {
        self.logger.log(Level::Error, &format!("{} {}", LOG_PREFIX, message), &[
            ("statement", statement_prefix(statement)),
            ("error", error.to_string()),
        ]);
    }
}

#[async_trait]
impl DatabaseBackend for DatabaseConnectorPgSQL {
    async fn connect(&self) -> Result<Option<HealthStatus>, DatabaseError> {
        let existing = self.current_pool();
        if let Some(pool) = existing {
            let mut connection = pool
                .acquire()
                .await
                .map_err(|error| DatabaseError::ConnectionError(error.to_string()))?;
            return Self::probe(&mut *connection).await.map(Some);
        }

        self.logger.log(Level::Info, &format!("{} Connecting", LOG_PREFIX), &[
            ("address", self.config.address()),
            ("tls", self.config.tls.to_string()),
        ]);
        let policy = RetryPolicy::new(self.config.max_retries, self.config.retry_delay(), self.logger.clone());
        let Some((pool, status)) = policy.run("PgSQL connect", || self.try_connect()).await else {
            self.logger.log(Level::Error, &format!("{} Unable to connect, continuing without database", LOG_PREFIX), &[
                ("address", self.config.address()),
            ]);
            return Ok(None);
        };

        let replaced = self.pool.write().replace(pool);
        if let Some(previous) = replaced {
            previous.close().await;
        }
        self.logger.log(Level::Info, &format!("{} Connected", LOG_PREFIX), &[
            ("address", self.config.address()),
            ("version", status.version.clone()),
        ]);
        Ok(Some(status))
    }

    /// Stops handing out the pool, waits up to `drain_timeout` for in-flight
    /// work to return its connections, then closes. Never fails.
    async fn disconnect(&self) -> Result<(), DatabaseError> {
        let taken = self.pool.write().take();
        let Some(pool) = taken else {
            return Ok(());
        };

        self.logger.log(Level::Info, &format!("{} Draining pool", LOG_PREFIX), &[
            ("active", (pool.size() as usize).saturating_sub(pool.num_idle()).to_string()),
        ]);
        let drained = self.drain(|| (pool.size() as usize).saturating_sub(pool.num_idle())).await;
        match drained {
            true => {
                pool.close().await;
                self.logger.log(Level::Info, &format!("{} Disconnected", LOG_PREFIX), &[]);
            }
            false => {
                if tokio::time::timeout(FORCE_CLOSE_GRACE, pool.close()).await.is_err() {
                    self.logger.log(Level::Error, &format!("{} Connections still checked out after forced close", LOG_PREFIX), &[]);
                }
            }
        }
        Ok(())
    }

    async fn query(&self, statement: &str, params: &[DbValue]) -> Result<QueryResult, DatabaseError> {
        let pool = self.current_pool().ok_or(DatabaseError::NotConnected)?;
        let started = Instant::now();
        let acquired = {
            let _waiting = WaitingGuard::enter(&self.waiting);
            pool.acquire().await
        };
        let mut connection = acquired.map_err(|error| DatabaseError::ConnectionError(error.to_string()))?;

        let result = Self::execute_on(&mut *connection, statement, params).await;
        self.report_slow_query(statement, started.elapsed());
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
        let pool = self.current_pool().ok_or(DatabaseError::NotConnected)?;
        let acquired = {
            let _waiting = WaitingGuard::enter(&self.waiting);
            pool.acquire().await
        };
        let mut connection = acquired.map_err(|error| DatabaseError::ConnectionError(error.to_string()))?;

        // Dropping `transaction` before commit queues a ROLLBACK before the
        // connection goes back to the pool.
        let mut transaction = Connection::begin(&mut *connection)
            .await
            .map_err(|error| DatabaseError::TransactionError(error.to_string()))?;

        let outcome = work(TransactionHandle::PgSQL(&mut *transaction)).await;
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
        let pool = self
            .current_pool()
            .ok_or_else(|| DatabaseError::HealthCheckError(String::from("database is not connected")))?;
        let mut connection = pool
            .acquire()
            .await
            .map_err(|error| DatabaseError::HealthCheckError(error.to_string()))?;
        Self::probe(&mut *connection).await
    }

    fn is_connected(&self) -> bool {
        self.pool.read().as_ref().is_some_and(|pool| !pool.is_closed())
    }
}
