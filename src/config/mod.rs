//! Configuration management module.
//!
//! This module handles loading, parsing, and validating the data-access
//! configuration from TOML files, with environment variable overrides for
//! the values that usually differ per deployment.
//!
//! # Configuration Structure
//!
//! The configuration file (`config.toml`) contains sections for:
//! - **database**: engine selector plus the `pgsql` and `sqlite` settings
//! - **migrations**: schema-file directory and ledger table name
//!
//! # Example
//!
//! ```rust,ignore
//! use carebase::config::structs::configuration::Configuration;
//!
//! // Load configuration from file, writing defaults when asked
//! let config = Configuration::load_from_file("config.toml", false)?;
//!
//! // Generate default configuration
//! let default_config = Configuration::init();
//! ```

/// Configuration error enumeration.
pub mod enums;

/// Configuration data structures.
pub mod structs;

/// Implementation blocks for configuration loading/saving.
pub mod impls;
