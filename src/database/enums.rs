//! Database enumeration types.

/// Supported database driver types (sqlite3, pgsql).
pub mod database_drivers;

/// Bound parameter values.
pub mod db_value;

/// Borrowed connection handed to transactional work.
pub mod transaction_handle;
