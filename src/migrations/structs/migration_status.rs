use serde::{Deserialize, Serialize};

/// `executed` is in ledger order, `pending` in file-name order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationStatus {
    pub executed: Vec<String>,
    pub pending: Vec<String>,
    pub total: usize,
}
