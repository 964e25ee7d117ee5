use async_trait::async_trait;
use futures_util::future::BoxFuture;
use crate::database::enums::db_value::DbValue;
use crate::database::enums::transaction_handle::TransactionHandle;
use crate::database::errors::DatabaseError;
use crate::database::structs::health_status::HealthStatus;
use crate::database::structs::query_result::QueryResult;

/// Future returned by the work closure of a transaction.
pub type TransactionWork<'c, T> = BoxFuture<'c, Result<T, DatabaseError>>;

#[async_trait]
pub trait DatabaseBackend: Send + Sync {
    /// Opens the engine connection and probes it.
    ///
    /// `Ok(None)` means the networked engine stayed unreachable after every
    /// retry; the connector is unusable until a later `connect()` succeeds.
    async fn connect(&self) -> Result<Option<HealthStatus>, DatabaseError>;

    async fn disconnect(&self) -> Result<(), DatabaseError>;

    async fn query(&self, statement: &str, params: &[DbValue]) -> Result<QueryResult, DatabaseError>;

    /// Runs `work` between `BEGIN` and `COMMIT` on one connection.
    ///
    /// Dropping the returned future before it completes rolls the transaction
    /// back and releases the connection.
    ///
    /// An `Err` from `work` rolls the transaction back and is returned as-is.
    async fn transaction<T, F>(&self, work: F) -> Result<T, DatabaseError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(TransactionHandle<'c>) -> TransactionWork<'c, T> + Send + 'static;

    async fn health_check(&self) -> Result<HealthStatus, DatabaseError>;

    fn is_connected(&self) -> bool;
}
