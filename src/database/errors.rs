use thiserror::Error;
use crate::database::helpers::statement_prefix;

/// PostgreSQL SQLSTATE codes for "object already exists" (table, object, schema, column).
const ALREADY_EXISTS_CODES: [&str; 4] = ["42P07", "42710", "42P06", "42701"];

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Disconnect error: {0}")]
    DisconnectError(String),

    #[error("Query error: {message} (statement: {statement})")]
    QueryError {
        message: String,
        statement: String,
        code: Option<String>,
    },

    #[error("Transaction error: {0}")]
    TransactionError(String),

    #[error("Health check error: {0}")]
    HealthCheckError(String),

    #[error("Migration error in {name}: {message}")]
    MigrationError {
        name: String,
        message: String,
    },

    #[error("Database is not connected")]
    NotConnected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatabaseError {
    /// Wraps a driver error raised by `statement`, keeping only a prefix of the
    /// statement text and never the bound values.
    pub fn query(error: sqlx::Error, statement: &str) -> Self {
        let code = error
            .as_database_error()
            .and_then(|db_error| db_error.code())
            .map(|code| code.into_owned());
        DatabaseError::QueryError {
            message: error.to_string(),
            statement: statement_prefix(statement),
            code,
        }
    }

    pub fn is_already_exists(&self) -> bool {
        match self {
            DatabaseError::QueryError { message, code, .. } => {
                code.as_deref().is_some_and(|code| ALREADY_EXISTS_CODES.contains(&code))
                    || message.to_lowercase().contains("already exists")
            }
            _ => false,
        }
    }
}
