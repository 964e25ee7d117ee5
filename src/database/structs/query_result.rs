use serde::{Deserialize, Serialize};

/// One result row, columns in select-list order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Engine-independent statement result.
///
/// `row_count` is the number of returned rows for reads and the number of
/// affected rows for writes. `last_insert_id` is only reported by SQLite.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub row_count: u64,
    pub last_insert_id: Option<i64>,
}
