use serde::{Deserialize, Serialize};
use crate::database::enums::database_drivers::DatabaseDrivers;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub engine: DatabaseDrivers,
    pub server_time: String,
    pub version: String,
}
