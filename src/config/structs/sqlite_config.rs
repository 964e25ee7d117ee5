use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SQLiteConfig {
    /// Database file, or `:memory:` for a private in-memory database.
    pub path: String,
}
