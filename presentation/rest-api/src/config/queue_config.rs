use std::env;

/// Queue the REST API publishes payments to
///
/// Environment variables:
/// - PAYMENT_QUEUE: payments queue name (default: "payments")
#[derive(Debug, Clone)]
pub struct QueueConfig {
    pub payment_queue: String,
}

impl QueueConfig {
    pub fn from_env() -> Self {
        Self {
            payment_queue: env::var("PAYMENT_QUEUE").unwrap_or_else(|_| "payments".to_string()),
        }
    }
}
