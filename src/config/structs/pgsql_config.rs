use serde::{Deserialize, Serialize};

/// PostgreSQL settings. Timeouts are in seconds, `retry_delay` and
/// `slow_query_threshold` in milliseconds.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PgSQLConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub idle_timeout: u64,
    pub connect_timeout: u64,
    pub tls: bool,
    pub max_retries: u32,
    pub retry_delay: u64,
    pub drain_timeout: u64,
    pub slow_query_threshold: u64,
}
