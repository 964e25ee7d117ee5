/// Applies and tracks schema files.
pub mod migration_manager;

/// One ledger row.
pub mod migration_record;

/// Executed versus pending schema files.
pub mod migration_status;

/// A `*.sql` file found in the schema directory.
pub mod schema_file;
