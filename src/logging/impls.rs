//! Implementation blocks for the bundled loggers.

pub mod log_forwarder;

pub mod memory_logger;
