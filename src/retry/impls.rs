//! Implementation blocks for the retry policy.

pub mod retry_policy;
