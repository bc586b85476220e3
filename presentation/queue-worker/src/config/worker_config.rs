use std::{env, str::FromStr, time::Duration};

/// Polling behaviour shared by both consumers
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    pub batch_size: u32,
    pub poll_interval: Duration,
    pub visibility_timeout: Duration,
    /// Deliveries allowed before a message is redriven to the failure queue
    pub max_receive_count: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            poll_interval: Duration::from_millis(1000),
            visibility_timeout: Duration::from_secs(30),
            max_receive_count: 5,
        }
    }
}

/// Queue names and polling settings
///
/// Environment variables:
/// - IMAGE_QUEUE / IMAGE_FAILURE_QUEUE (default: "images" / "images-dlq")
/// - PAYMENT_QUEUE / PAYMENT_FAILURE_QUEUE (default: "payments" / "payments-dlq")
/// - QUEUE_BATCH_SIZE (default: 10)
/// - QUEUE_POLL_INTERVAL_MS (default: 1000)
/// - QUEUE_VISIBILITY_TIMEOUT_SECS (default: 30)
/// - QUEUE_MAX_RECEIVE_COUNT (default: 5)
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub image_queue: String,
    pub image_failure_queue: String,
    pub payment_queue: String,
    pub payment_failure_queue: String,
    pub poll: PollSettings,
}

impl WorkerConfig {
    pub fn from_env() -> Self {
        let defaults = PollSettings::default();

        Self {
            image_queue: string_or("IMAGE_QUEUE", "images"),
            image_failure_queue: string_or("IMAGE_FAILURE_QUEUE", "images-dlq"),
            payment_queue: string_or("PAYMENT_QUEUE", "payments"),
            payment_failure_queue: string_or("PAYMENT_FAILURE_QUEUE", "payments-dlq"),
            poll: PollSettings {
                batch_size: parse_or("QUEUE_BATCH_SIZE", defaults.batch_size).max(1),
                poll_interval: Duration::from_millis(parse_or("QUEUE_POLL_INTERVAL_MS", 1000)),
                visibility_timeout: Duration::from_secs(parse_or(
                    "QUEUE_VISIBILITY_TIMEOUT_SECS",
                    30,
                )),
                max_receive_count: parse_or("QUEUE_MAX_RECEIVE_COUNT", defaults.max_receive_count),
            },
        }
    }
}

pub(crate) fn string_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Unset or unparsable values fall back to `default`.
pub(crate) fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
