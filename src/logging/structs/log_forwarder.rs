#[derive(Debug, Clone)]
pub struct LogForwarder {
    pub(crate) target: String,
}
