//! Logging setup and the injectable logger capability.
//!
//! The binary installs a `fern` dispatcher through [`logging::setup_logging`].
//! Library components never talk to the `log` macros for operational events
//! directly; they receive an `Arc<dyn Logger>` so deployments and tests can
//! redirect or capture what the data-access layer reports.
//!
//! - [`LogForwarder`](structs::log_forwarder::LogForwarder) forwards to `log`
//! - [`MemoryLogger`](structs::memory_logger::MemoryLogger) records entries in memory

/// `fern` dispatcher setup and level parsing.
#[allow(clippy::module_inception)]
pub mod logging;

/// Implementation blocks for the bundled loggers.
pub mod impls;

/// Bundled logger structures.
pub mod structs;

/// Logger capability trait.
pub mod traits;
