//! Retry policy structures.

pub mod retry_policy;
