use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::QueueError;

use super::model::QueueMessage;

/// Port over an at-least-once message queue with visibility timeouts.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    async fn send(&self, queue: &str, body: &str) -> Result<(), QueueError>;

    /// Sends all bodies or none.
    async fn send_batch(&self, queue: &str, bodies: &[String]) -> Result<(), QueueError>;

    /// Claims up to `max_messages` visible messages and hides them for
    /// `visibility_timeout`. Messages not deleted in time are delivered again.
    async fn receive(
        &self,
        queue: &str,
        max_messages: u32,
        visibility_timeout: Duration,
    ) -> Result<Vec<QueueMessage>, QueueError>;

    async fn delete(&self, queue: &str, ids: &[String]) -> Result<(), QueueError>;
}
