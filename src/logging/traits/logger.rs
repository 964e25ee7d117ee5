use log::Level;

/// Structured key/value attached to a log entry.
pub type LogField = (&'static str, String);

#[cfg_attr(test, mockall::automock)]
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str, fields: &[LogField]);
}
