use log::Level;
use crate::logging::structs::memory_logger::{LogEntry, MemoryLogger};
use crate::logging::traits::logger::{LogField, Logger};

impl MemoryLogger {
    pub fn new() -> MemoryLogger {
        MemoryLogger::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Number of entries at `level` whose message contains `needle`.
    pub fn count(&self, level: Level, needle: &str) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.level == level && entry.message.contains(needle))
            .count()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str, fields: &[LogField]) {
        self.entries.lock().push(LogEntry {
            level,
            message: message.to_string(),
            fields: fields.to_vec(),
        });
    }
}
