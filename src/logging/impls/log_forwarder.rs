use log::Level;
use crate::logging::structs::log_forwarder::LogForwarder;
use crate::logging::traits::logger::{LogField, Logger};

impl LogForwarder {
    pub fn new(target: &str) -> LogForwarder {
        LogForwarder { target: target.to_string() }
    }

    pub fn render(message: &str, fields: &[LogField]) -> String {
        if fields.is_empty() {
            return message.to_string();
        }
        let rendered: Vec<String> = fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        format!("{} {}", message, rendered.join(" "))
    }
}

impl Default for LogForwarder {
    fn default() -> Self {
        LogForwarder::new(env!("CARGO_PKG_NAME"))
    }
}

impl Logger for LogForwarder {
    fn log(&self, level: Level, message: &str, fields: &[LogField]) {
        log::log!(target: self.target.as_str(), level, "{}", Self::render(message, fields));
    }
}
