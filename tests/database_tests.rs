mod common;

use proptest::prelude::*;
use serde_json::json;
use carebase::database::enums::database_drivers::DatabaseDrivers;
use carebase::database::enums::db_value::DbValue;
use carebase::database::errors::DatabaseError;
use carebase::database::structs::database_connector::DatabaseConnector;
use carebase::database::traits::database_backend::DatabaseBackend;

const USERS_TABLE: &str = "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL UNIQUE)";

#[tokio::test]
async fn test_count_on_empty_table() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();

    let result = database.query("SELECT COUNT(*) as count FROM users", &[]).await.unwrap();

    assert_eq!(result.row_count, 1);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0]["count"], json!(0));
    assert_eq!(result.last_insert_id, None);
}

#[tokio::test]
async fn test_insert_reports_last_insert_id() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();

    let first = database
        .query("INSERT INTO users (email) VALUES ($1)", &[DbValue::from("ada@example.org")])
        .await
        .unwrap();
    let second = database
        .query("INSERT INTO users (email) VALUES ($1)", &[DbValue::from("grace@example.org")])
        .await
        .unwrap();

    assert_eq!(first.row_count, 1);
    assert_eq!(first.last_insert_id, Some(1));
    assert_eq!(second.last_insert_id, Some(2));
    assert!(first.rows.is_empty());
}

#[tokio::test]
async fn test_insert_without_changes_has_no_insert_id() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();
    database.query("INSERT INTO users (email) VALUES ($1)", &["ada@example.org".into()]).await.unwrap();

    let ignored = database
        .query("INSERT OR IGNORE INTO users (email) VALUES ($1)", &["ada@example.org".into()])
        .await
        .unwrap();

    assert_eq!(ignored.row_count, 0);
    assert_eq!(ignored.last_insert_id, None);
}

#[tokio::test]
async fn test_update_reports_affected_rows() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();
    for email in ["a@example.org", "b@example.org", "c@example.org"] {
        database.query("INSERT INTO users (email) VALUES ($1)", &[email.into()]).await.unwrap();
    }

    let result = database
        .query("UPDATE users SET email = email || $1 WHERE id > $2", &[".test".into(), DbValue::Integer(1)])
        .await
        .unwrap();

    assert_eq!(result.row_count, 2);
    assert_eq!(result.last_insert_id, None);
}

#[tokio::test]
async fn test_select_with_parameters_and_nulls() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT, score REAL)", &[]).await.unwrap();
    database
        .query("INSERT INTO notes (body, score) VALUES ($1, $2)", &[DbValue::Null, DbValue::Real(4.5)])
        .await
        .unwrap();

    let result = database
        .query("SELECT id, body, score FROM notes WHERE score > $1", &[DbValue::Integer(1)])
        .await
        .unwrap();

    assert_eq!(result.row_count, 1);
    let row = &result.rows[0];
    assert_eq!(row.keys().collect::<Vec<&String>>(), vec!["id", "body", "score"]);
    assert_eq!(row["body"], json!(null));
    assert_eq!(row["score"], json!(4.5));
}

#[tokio::test]
async fn test_query_error_omits_parameter_values() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();
    database.query("INSERT INTO users (email) VALUES ($1)", &["secret@example.org".into()]).await.unwrap();

    let error = database
        .query("INSERT INTO users (email) VALUES ($1)", &["secret@example.org".into()])
        .await
        .unwrap_err();

    match &error {
        DatabaseError::QueryError { statement, .. } => {
            assert_eq!(statement, "INSERT INTO users (email) VALUES ($1)");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!error.to_string().contains("secret@example.org"));
}

#[tokio::test]
async fn test_transaction_commits_on_ok() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();

    let inserted = database.transaction(|mut handle| Box::pin(async move {
        let first = handle.query("INSERT INTO users (email) VALUES ($1)", &["a@example.org".into()]).await?;
        handle.query("INSERT INTO users (email) VALUES ($1)", &["b@example.org".into()]).await?;
        let count = handle.query("SELECT COUNT(*) AS count FROM users", &[]).await?;
        Ok::<_, DatabaseError>((first.last_insert_id, count.rows[0]["count"].clone()))
    })).await.unwrap();

    assert_eq!(inserted, (Some(1), json!(2)));
    let result = database.query("SELECT COUNT(*) AS count FROM users", &[]).await.unwrap();
    assert_eq!(result.rows[0]["count"], json!(2));
}

#[tokio::test]
async fn test_transaction_rolls_back_and_returns_same_error() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();

    let result: Result<(), DatabaseError> = database.transaction(|mut handle| Box::pin(async move {
        handle.query("INSERT INTO users (email) VALUES ($1)", &["a@example.org".into()]).await?;
        Err(DatabaseError::MigrationError {
            name: String::from("sentinel"),
            message: String::from("work failed"),
        })
    })).await;

    match result {
        Err(DatabaseError::MigrationError { name, message }) => {
            assert_eq!(name, "sentinel");
            assert_eq!(message, "work failed");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    let count = database.query("SELECT COUNT(*) AS count FROM users", &[]).await.unwrap();
    assert_eq!(count.rows[0]["count"], json!(0));
}

#[tokio::test]
async fn test_transaction_rolls_back_on_statement_error() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();

    let result: Result<(), DatabaseError> = database.transaction(|mut handle| Box::pin(async move {
        handle.query("INSERT INTO users (email) VALUES ($1)", &["a@example.org".into()]).await?;
        handle.query("INSERT INTO users (email) VALUES ($1)", &["a@example.org".into()]).await?;
        Ok::<(), DatabaseError>(())
    })).await;

    assert!(matches!(result, Err(DatabaseError::QueryError { .. })));
    let count = database.query("SELECT COUNT(*) AS count FROM users", &[]).await.unwrap();
    assert_eq!(count.rows[0]["count"], json!(0));
}

#[tokio::test]
async fn test_cancelled_transaction_rolls_back_and_releases_connection() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();

    let cancelled = tokio::time::timeout(
        std::time::Duration::from_millis(100),
        database.transaction(|mut handle| Box::pin(async move {
            handle.query("INSERT INTO users (email) VALUES ($1)", &["abandoned@example.org".into()]).await?;
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Ok::<(), DatabaseError>(())
        })),
    ).await;
    assert!(cancelled.is_err());

    let count = database.query("SELECT COUNT(*) AS count FROM users", &[]).await.unwrap();
    assert_eq!(count.rows[0]["count"], json!(0));

    let inserted = database.transaction(|mut handle| Box::pin(async move {
        let result = handle.query("INSERT INTO users (email) VALUES ($1)", &["kept@example.org".into()]).await?;
        Ok::<_, DatabaseError>(result.row_count)
    })).await.unwrap();
    assert_eq!(inserted, 1);
    let count = database.query("SELECT COUNT(*) AS count FROM users", &[]).await.unwrap();
    assert_eq!(count.rows[0]["count"], json!(1));
}

#[tokio::test]
async fn test_failed_commit_is_logged_and_rolled_back() {
    let logger = common::create_logger();
    let database = common::create_memory_database(logger.clone()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();
    database
        .query(
            "CREATE TABLE visits (id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL REFERENCES users(id) DEFERRABLE INITIALLY DEFERRED)",
            &[],
        )
        .await
        .unwrap();

    let result: Result<(), DatabaseError> = database.transaction(|mut handle| Box::pin(async move {
        handle.query("INSERT INTO visits (user_id) VALUES ($1)", &[DbValue::Integer(42)]).await?;
        Ok::<(), DatabaseError>(())
    })).await;

    assert!(matches!(result, Err(DatabaseError::TransactionError(_))));
    assert_eq!(logger.count(log::Level::Error, "[SQLite] Commit failed, transaction rolled back"), 1);
    let count = database.query("SELECT COUNT(*) AS count FROM visits", &[]).await.unwrap();
    assert_eq!(count.rows[0]["count"], json!(0));
    let next: Result<(), DatabaseError> = database
        .transaction(|_handle| Box::pin(async move { Ok::<(), DatabaseError>(()) }))
        .await;
    assert!(next.is_ok());
}

#[tokio::test]
async fn test_foreign_keys_are_enforced() {
    let database = common::create_memory_database(common::create_logger()).await;
    database.query(USERS_TABLE, &[]).await.unwrap();
    database
        .query("CREATE TABLE patients (id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL REFERENCES users(id))", &[])
        .await
        .unwrap();

    let result = database.query("INSERT INTO patients (user_id) VALUES ($1)", &[DbValue::Integer(42)]).await;

    assert!(matches!(result, Err(DatabaseError::QueryError { .. })));
}

#[tokio::test]
async fn test_operations_before_connect() {
    let database = DatabaseConnector::new(&common::create_sqlite_config(":memory:"), common::create_logger());

    assert!(!database.is_connected());
    assert!(matches!(database.query("SELECT 1", &[]).await, Err(DatabaseError::NotConnected)));
    let transaction: Result<(), DatabaseError> = database.transaction(|_handle| Box::pin(async move { Ok::<(), DatabaseError>(()) })).await;
    assert!(matches!(transaction, Err(DatabaseError::NotConnected)));
    assert!(matches!(database.health_check().await, Err(DatabaseError::HealthCheckError(_))));
}

#[tokio::test]
async fn test_disconnect_then_query() {
    let logger = common::create_logger();
    let database = common::create_memory_database(logger.clone()).await;
    assert!(database.is_connected());

    database.disconnect().await.unwrap();

    assert!(!database.is_connected());
    assert!(matches!(database.query("SELECT 1", &[]).await, Err(DatabaseError::NotConnected)));
    assert_eq!(logger.count(log::Level::Info, "[SQLite] Disconnected"), 1);
}

#[tokio::test]
async fn test_health_check_reports_engine() {
    let database = common::create_memory_database(common::create_logger()).await;

    let status = database.health_check().await.unwrap();

    assert_eq!(status.engine, DatabaseDrivers::sqlite3);
    assert!(status.version.starts_with('3'));
    assert!(!status.server_time.is_empty());
    assert_eq!(database.engine(), DatabaseDrivers::sqlite3);
    assert!(database.pool_stats().is_none());
}

#[tokio::test]
async fn test_file_database_creates_directory_and_persists() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("nested").join("data").join("carebase.db");
    let config = common::create_sqlite_config(path.to_str().unwrap());

    let database = DatabaseConnector::new(&config, common::create_logger());
    database.connect().await.unwrap().unwrap();
    database.query(USERS_TABLE, &[]).await.unwrap();
    database.query("INSERT INTO users (email) VALUES ($1)", &["a@example.org".into()]).await.unwrap();
    database.disconnect().await.unwrap();
    assert!(path.exists());

    let reopened = DatabaseConnector::new(&config, common::create_logger());
    reopened.connect().await.unwrap();
    let result = reopened.query("SELECT email FROM users", &[]).await.unwrap();
    assert_eq!(result.rows[0]["email"], json!("a@example.org"));
    reopened.disconnect().await.unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn test_random_transactions_release_connection(outcomes in prop::collection::vec(any::<bool>(), 250)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (committed, count) = runtime.block_on(async {
            let database = common::create_memory_database(common::create_logger()).await;
            database.query("CREATE TABLE events (id INTEGER PRIMARY KEY, seq INTEGER NOT NULL)", &[]).await.unwrap();

            for (seq, commit) in outcomes.iter().copied().enumerate() {
                let result: Result<(), DatabaseError> = database.transaction(move |mut handle| Box::pin(async move {
                    handle.query("INSERT INTO events (seq) VALUES ($1)", &[(seq as i64).into()]).await?;
                    match commit {
                        true => Ok(()),
                        false => Err(DatabaseError::TransactionError(String::from("abandoned"))),
                    }
                })).await;
                assert_eq!(result.is_ok(), commit);
            }

            let count = database.query("SELECT COUNT(*) AS count FROM events", &[]).await.unwrap();
            database.disconnect().await.unwrap();
            (outcomes.iter().filter(|commit| **commit).count(), count.rows[0]["count"].clone())
        });
        prop_assert_eq!(count, json!(committed));
    }
}
