use sqlx::{PgConnection, SqliteConnection};

/// The single connection a transaction runs on.
///
/// Handed by value to the work closure of
/// [`DatabaseBackend::transaction`](crate::database::traits::database_backend::DatabaseBackend::transaction);
/// the borrow ends when the work future completes, after which the connector
/// commits or rolls back on the same connection.
pub enum TransactionHandle<'c> {
    PgSQL(&'c mut PgConnection),
    SQLite(&'c mut SqliteConnection),
}
