//! Bundled logger structures.

/// Logger forwarding to the `log` facade.
pub mod log_forwarder;

/// Logger recording entries in memory.
pub mod memory_logger;
