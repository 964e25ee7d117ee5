//! Database adapter trait definitions.

/// The five-operation contract every engine connector implements.
pub mod database_backend;
