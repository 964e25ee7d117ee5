/// Facade forwarding to the active engine.
pub mod database_connector;

/// SQLite single-connection connector.
pub mod database_connector_sqlite;

/// PostgreSQL pooled connector.
pub mod database_connector_pgsql;

/// Conversions into bind values.
pub mod db_value;

/// Statement execution inside a transaction.
pub mod transaction_handle;
