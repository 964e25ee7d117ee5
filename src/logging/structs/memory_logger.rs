use log::Level;
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

#[derive(Debug, Default)]
pub struct MemoryLogger {
    pub(crate) entries: Mutex<Vec<LogEntry>>,
}
