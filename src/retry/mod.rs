//! Fixed-delay retry policy.
//!
//! Used by the PostgreSQL connector to ride out a database server that is
//! still starting or briefly unreachable. Each failed attempt is reported to
//! the injected logger; after the last attempt the policy gives up with `None`
//! instead of an error, leaving the caller to decide whether running without a
//! database is acceptable.

/// Retry policy structure.
pub mod structs;

/// Retry execution.
pub mod impls;
