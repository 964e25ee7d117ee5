//! Logger capability.

/// `log(level, message, fields)` sink injected into connectors and the migration manager.
pub mod logger;
