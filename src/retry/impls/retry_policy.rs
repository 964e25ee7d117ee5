use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use log::Level;
use crate::logging::traits::logger::Logger;
use crate::retry::structs::retry_policy::RetryPolicy;

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration, logger: Arc<dyn Logger>) -> RetryPolicy {
        RetryPolicy { max_attempts, delay, logger }
    }

    /// Attempts actually made by [`run`](Self::run); a zero setting still tries once.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Awaits `operation` until it succeeds or the attempts run out.
    ///
    /// Sleeps `delay` between attempts, never after the last one.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let attempts = self.attempts();
        for attempt in 1..=attempts {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        self.logger.log(Level::Info, &format!("[RETRY] {} succeeded", label), &[
                            ("attempt", attempt.to_string()),
                        ]);
                    }
                    return Some(value);
                }
                Err(error) => {
                    self.logger.log(Level::Warn, &format!("[RETRY] {} attempt failed", label), &[
                        ("attempt", attempt.to_string()),
                        ("max_attempts", attempts.to_string()),
                        ("error", error.to_string()),
                    ]);
                    if attempt < attempts && !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }
        self.logger.log(Level::Error, &format!("[RETRY] {} gave up", label), &[
            ("attempts", attempts.to_string()),
        ]);
        None
    }
}
