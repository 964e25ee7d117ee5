use crate::database::enums::db_value::DbValue;
use crate::database::enums::transaction_handle::TransactionHandle;
use crate::database::errors::DatabaseError;
use crate::database::structs::database_connector_pgsql::DatabaseConnectorPgSQL;
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;
use crate::database::structs::query_result::QueryResult;

impl TransactionHandle<'_> {
    /// Runs `statement` inside the open transaction, with the same result
    /// shape as a standalone query on the owning connector.
    pub async fn query(&mut self, statement: &str, params: &[DbValue]) -> Result<QueryResult, DatabaseError> {
        match self {
            TransactionHandle::PgSQL(connection) => DatabaseConnectorPgSQL::execute_on(connection, statement, params).await,
            TransactionHandle::SQLite(connection) => DatabaseConnectorSQLite::execute_on(connection, statement, params).await,
        }
    }
}
