use async_trait::async_trait;

use super::model::QueueMessage;

/// Per-message processing function run by the batch failure isolator.
///
/// Implementations must be idempotent: any message may be delivered again.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    type Error: std::fmt::Display + Send;

    async fn handle(&self, message: &QueueMessage) -> Result<(), Self::Error>;
}
