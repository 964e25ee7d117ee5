use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::structs::database_connector_pgsql::DatabaseConnectorPgSQL;
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;

#[derive(Debug)]
pub struct DatabaseConnector {
    pub(crate) sqlite: Option<DatabaseConnectorSQLite>,
    pub(crate) pgsql: Option<DatabaseConnectorPgSQL>,
    pub(crate) engine: DatabaseDrivers,
}
