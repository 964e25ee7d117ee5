//! Dual-engine data-access layer.
//!
//! Every persistence call in the platform goes through the
//! [`DatabaseConnector`](structs::database_connector::DatabaseConnector) facade,
//! which owns exactly one engine-specific connector chosen at construction:
//!
//! - **PostgreSQL**: a bounded `sqlx` pool with retrying connect, slow-query
//!   warnings and a bounded drain on disconnect.
//! - **SQLite**: a single file-backed (or in-memory) connection with
//!   foreign keys enforced and `$N` placeholders rewritten to `?N`.
//!
//! # Architecture
//!
//! - `DatabaseBackend` trait defines the five-operation contract
//! - Each engine has its own connector implementing it
//! - `DatabaseConnector` forwards to whichever engine is active
//! - `helpers` holds the statement translation shared by both engines
//!
//! # Example
//!
//! ```rust,ignore
//! use carebase::database::structs::database_connector::DatabaseConnector;
//! use carebase::database::traits::database_backend::DatabaseBackend;
//!
//! let database = DatabaseConnector::new(&config.database, logger);
//! if database.connect().await?.is_none() {
//!     // networked backend unreachable after all retries
//! }
//! let result = database.query("SELECT id FROM users WHERE email = $1", &[email.into()]).await?;
//! ```

/// Engine selector, parameter values and the transaction handle.
pub mod enums;

/// Error taxonomy for adapter operations.
pub mod errors;

/// Statement translation shared by both engines.
pub mod helpers;

/// Implementation blocks for the connectors and value types.
pub mod impls;

/// Connector and result structures.
pub mod structs;

/// Adapter contract.
pub mod traits;
