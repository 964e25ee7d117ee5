use std::fmt;
use std::time::Duration;
use crate::config::structs::pgsql_config::PgSQLConfig;

impl PgSQLConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay)
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout)
    }

    pub fn slow_query_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_query_threshold)
    }

    /// `host:port/database`, safe for logs.
    pub fn address(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

impl Default for PgSQLConfig {
    fn default() -> Self {
        PgSQLConfig {
            host: String::from("localhost"),
            port: 5432,
            username: String::from("postgres"),
            password: String::new(),
            database: String::from("carebase"),
            max_connections: 20,
            idle_timeout: 30,
            connect_timeout: 2,
            tls: false,
            max_retries: 5,
            retry_delay: 5000,
            drain_timeout: 10,
            slow_query_threshold: 1000,
        }
    }
}

impl fmt::Debug for PgSQLConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgSQLConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("idle_timeout", &self.idle_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("tls", &self.tls)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("drain_timeout", &self.drain_timeout)
            .field("slow_query_threshold", &self.slow_query_threshold)
            .finish()
    }
}
