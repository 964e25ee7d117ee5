use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use crate::logging::traits::logger::Logger;

#[derive(Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub(crate) logger: Arc<dyn Logger>,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .finish()
    }
}
