#[cfg(test)]
mod migrations_tests {
    mod helpers_tests {
        use crate::migrations::helpers::{split_statements, strip_comment_lines};

        #[test]
        fn test_split_statements_drops_blank_fragments() {
            let sql = "CREATE TABLE a (id INTEGER);\n\nCREATE TABLE b (id INTEGER);\n;  ;\n";
            assert_eq!(split_statements(sql), vec![
                String::from("CREATE TABLE a (id INTEGER)"),
                String::from("CREATE TABLE b (id INTEGER)"),
            ]);
        }

        #[test]
        fn test_split_statements_drops_comment_only_fragments() {
            let sql = "-- users table\nCREATE TABLE users (id INTEGER);\n-- trailing note\n-- nothing else;\n";
            assert_eq!(split_statements(sql), vec![String::from("CREATE TABLE users (id INTEGER)")]);
        }

        #[test]
        fn test_strip_comment_lines_keeps_statement_lines() {
            let fragment = "\n  -- index for lookups\n  CREATE INDEX idx_email\n  ON users (email)\n";
            assert_eq!(strip_comment_lines(fragment), "CREATE INDEX idx_email\n  ON users (email)");
        }

        #[test]
        fn test_split_statements_empty_file() {
            assert!(split_statements("").is_empty());
            assert!(split_statements("-- only a comment\n").is_empty());
        }
    }

    mod migration_manager_tests {
        use std::sync::Arc;
        use crate::config::structs::database_config::DatabaseConfig;
        use crate::config::structs::migration_config::MigrationConfig;
        use crate::database::errors::DatabaseError;
        use crate::database::structs::database_connector::DatabaseConnector;
        use crate::logging::structs::memory_logger::MemoryLogger;
        use crate::migrations::structs::migration_manager::MigrationManager;

        #[test]
        fn test_rejects_unsafe_ledger_table() {
            let logger = Arc::new(MemoryLogger::new());
            let database = Arc::new(DatabaseConnector::new(&DatabaseConfig::default(), logger.clone()));
            let config = MigrationConfig {
                directory: String::from("database/migrations"),
                table: String::from("ledger; DROP TABLE users"),
            };
            let result = MigrationManager::new(database, config, logger);
            assert!(matches!(result, Err(DatabaseError::MigrationError { .. })));
        }
    }
}
