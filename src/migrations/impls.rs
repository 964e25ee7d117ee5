/// Ledger handling and migration runs.
pub mod migration_manager;
