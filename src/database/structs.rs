//! Database connector structures.

/// Facade selecting and forwarding to one engine connector.
pub mod database_connector;

/// SQLite-specific database connector.
pub mod database_connector_sqlite;

/// PostgreSQL-specific database connector.
pub mod database_connector_pgsql;

/// Result of a successful health probe.
pub mod health_status;

/// Read-only pool telemetry snapshot.
pub mod pool_stats;

/// Normalized statement result.
pub mod query_result;
