use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use log::Level;
use serde_json::Value;
use crate::config::structs::migration_config::MigrationConfig;
use crate::database::enums::db_value::DbValue;
use crate::database::errors::DatabaseError;
use crate::database::helpers::{is_valid_identifier, statement_prefix};
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::query_result::Row;
use crate::database::traits::database_backend::DatabaseBackend;
use crate::logging::traits::logger::Logger;
use crate::migrations::helpers::split_statements;
use crate::migrations::structs::migration_manager::MigrationManager;
use crate::migrations::structs::migration_record::MigrationRecord;
use crate::migrations::structs::migration_status::MigrationStatus;
use crate::migrations::structs::schema_file::SchemaFile;

const LOG_PREFIX: &str = "[MIGRATE]";

impl MigrationManager {
    /// Fails when the ledger table name is not a plain SQL identifier, since it
    /// is interpolated into statements.
    pub fn new(database: Arc<DatabaseConnector>, config: MigrationConfig, logger: Arc<dyn Logger>) -> Result<MigrationManager, DatabaseError>
    {
        if !is_valid_identifier(&config.table) {
            return Err(DatabaseError::MigrationError {
                name: config.table.clone(),
                message: String::from("ledger table name must be a plain SQL identifier"),
            });
        }
        Ok(MigrationManager { database, config, logger })
    }

    pub fn directory(&self) -> &Path
    {
        Path::new(&self.config.directory)
    }

    async fn ensure_connected(&self) -> Result<(), DatabaseError>
    {
        if self.database.is_connected() {
            return Ok(());
        }
        match self.database.connect().await? {
            Some(_) => Ok(()),
            None => Err(DatabaseError::ConnectionError(String::from("database is unreachable, migrations cannot run"))),
        }
    }

    async fn ensure_ledger(&self) -> Result<(), DatabaseError>
    {
        let statement = format!(
            "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY, name VARCHAR(255) NOT NULL UNIQUE, applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP)",
            self.config.table
        );
        self.database.query(&statement, &[]).await?;
        Ok(())
    }

    fn malformed_ledger(&self, column: &str) -> DatabaseError
    {
        DatabaseError::MigrationError {
            name: self.config.table.clone(),
            message: format!("ledger row has no usable {} column", column),
        }
    }

    fn text_column(&self, row: &Row, column: &str) -> Result<String, DatabaseError>
    {
        row.get(column)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| self.malformed_ledger(column))
    }

    fn id_column(&self, row: &Row) -> Result<i64, DatabaseError>
    {
        row.get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| self.malformed_ledger("id"))
    }

    async fn executed_names(&self) -> Result<Vec<String>, DatabaseError>
    {
        let result = self.database
            .query(&format!("SELECT name FROM {} ORDER BY id", self.config.table), &[])
            .await?;
        result.rows.iter().map(|row| self.text_column(row, "name")).collect()
    }

    /// `*.sql` files of the schema directory sorted by name, creating the
    /// directory when it does not exist yet.
    pub async fn schema_files(&self) -> Result<Vec<SchemaFile>, DatabaseError>
    {
        let directory = self.directory();
        if !tokio::fs::try_exists(directory).await? {
            self.logger.log(Level::Info, &format!("{} Creating schema directory", LOG_PREFIX), &[
                ("directory", self.config.directory.clone()),
            ]);
            tokio::fs::create_dir_all(directory).await?;
        }

        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(directory).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_sql = path.extension().is_some_and(|extension| extension == "sql");
            if !is_sql || !entry.file_type().await?.is_file() {
                continue;
            }
            files.push(SchemaFile {
                name: entry.file_name().to_string_lossy().to_string(),
                path,
            });
        }
        files.sort();
        Ok(files)
    }

    pub async fn status(&self) -> Result<MigrationStatus, DatabaseError>
    {
        self.ensure_connected().await?;
        self.ensure_ledger().await?;
        let executed = self.executed_names().await?;
        let applied: HashSet<&str> = executed.iter().map(String::as_str).collect();
        let pending: Vec<String> = self.schema_files().await?
            .into_iter()
            .map(|file| file.name)
            .filter(|name| !applied.contains(name.as_str()))
            .collect();
        let total = executed.len() + pending.len();
        Ok(MigrationStatus { executed, pending, total })
    }

    /// Applies every pending schema file in name order and returns the names
    /// applied by this run.
    pub async fn migrate(&self) -> Result<Vec<String>, DatabaseError>
    {
        self.ensure_connected().await?;
        self.ensure_ledger().await?;
        let executed: HashSet<String> = self.executed_names().await?.into_iter().collect();
        let pending: Vec<SchemaFile> = self.schema_files().await?
            .into_iter()
            .filter(|file| !executed.contains(&file.name))
            .collect();

        if pending.is_empty() {
            self.logger.log(Level::Info, &format!("{} Schema is up to date", LOG_PREFIX), &[]);
            return Ok(Vec::new());
        }

        let mut applied = Vec::with_capacity(pending.len());
        for file in pending {
            self.apply(&file).await?;
            applied.push(file.name);
        }
        self.logger.log(Level::Info, &format!("{} Migrations applied", LOG_PREFIX), &[
            ("count", applied.len().to_string()),
        ]);
        Ok(applied)
    }

    /// Runs one schema file and its ledger insert in a single transaction.
    ///
    /// Each statement gets its own savepoint so an "already exists" failure can
    /// be undone and skipped without aborting the rest of the file.
    async fn apply(&self, file: &SchemaFile) -> Result<(), DatabaseError>
    {
        let sql = tokio::fs::read_to_string(&file.path).await.map_err(|error| DatabaseError::MigrationError {
            name: file.name.clone(),
            message: error.to_string(),
        })?;
        let statements = split_statements(&sql);
        self.logger.log(Level::Info, &format!("{} Applying migration", LOG_PREFIX), &[
            ("migration", file.name.clone()),
            ("statements", statements.len().to_string()),
        ]);

        let name = file.name.clone();
        let ledger_insert = format!(
            "INSERT INTO {0} (id, name) SELECT COALESCE(MAX(id), 0) + 1, $1 FROM {0}",
            self.config.table
        );
        let logger = self.logger.clone();

        let outcome = self.database.transaction(move |mut handle| Box::pin(async move {
            for (index, statement) in statements.iter().enumerate() {
                let savepoint = format!("migration_statement_{}", index + 1);
                handle.query(&format!("SAVEPOINT {}", savepoint), &[]).await?;
                match handle.query(statement, &[]).await {
                    Ok(_) => {
                        handle.query(&format!("RELEASE SAVEPOINT {}", savepoint), &[]).await?;
                    }
                    Err(error) if error.is_already_exists() => {
                        handle.query(&format!("ROLLBACK TO SAVEPOINT {}", savepoint), &[]).await?;
                        handle.query(&format!("RELEASE SAVEPOINT {}", savepoint), &[]).await?;
                        logger.log(Level::Warn, &format!("{} Skipping statement, object already exists", LOG_PREFIX), &[
                            ("migration", name.clone()),
                            ("statement", statement_prefix(statement)),
                        ]);
                    }
                    Err(error) => {
                        return Err(DatabaseError::MigrationError {
                            name: name.clone(),
                            message: error.to_string(),
                        });
                    }
                }
            }
            handle.query(&ledger_insert, &[DbValue::from(name.as_str())]).await?;
            Ok(())
        })).await;

        if let Err(error) = &outcome {
            self.logger.log(Level::Error, &format!("{} Migration failed", LOG_PREFIX), &[
                ("migration", file.name.clone()),
                ("error", error.to_string()),
            ]);
        }
        outcome
    }

    /// Removes the most recent ledger record and returns its name.
    ///
    /// Only the ledger changes; whatever the schema file created stays.
    pub async fn rollback(&self) -> Result<Option<String>, DatabaseError>
    {
        self.ensure_connected().await?;
        self.ensure_ledger().await?;
        let latest = self.database
            .query(&format!("SELECT id, name FROM {} ORDER BY id DESC LIMIT 1", self.config.table), &[])
            .await?;
        let Some(row) = latest.rows.first() else {
            self.logger.log(Level::Info, &format!("{} Nothing to roll back", LOG_PREFIX), &[]);
            return Ok(None);
        };
        let id = self.id_column(row)?;
        let name = self.text_column(row, "name")?;

        self.database
            .query(&format!("DELETE FROM {} WHERE id = $1", self.config.table), &[DbValue::from(id)])
            .await?;
        self.logger.log(Level::Warn, &format!("{} Removed ledger record, schema changes are not undone", LOG_PREFIX), &[
            ("migration", name.clone()),
        ]);
        Ok(Some(name))
    }

    /// Full ledger in application order.
    pub async fn records(&self) -> Result<Vec<MigrationRecord>, DatabaseError>
    {
        self.ensure_connected().await?;
        self.ensure_ledger().await?;
        let result = self.database
            .query(&format!("SELECT id, name, CAST(applied_at AS TEXT) AS applied_at FROM {} ORDER BY id", self.config.table), &[])
            .await?;
        result.rows
            .iter()
            .map(|row| Ok(MigrationRecord {
                id: self.id_column(row)?,
                name: self.text_column(row, "name")?,
                applied_at: self.text_column(row, "applied_at")?,
            }))
            .collect()
    }
}
