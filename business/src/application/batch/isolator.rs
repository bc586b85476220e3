use std::sync::Arc;

use futures::future::join_all;

use crate::domain::batch::errors::BatchError;
use crate::domain::batch::handler::MessageHandler;
use crate::domain::batch::isolation::{BatchVerdict, partition};
use crate::domain::batch::model::{BatchReport, QueueMessage};
use crate::domain::batch::queue::MessageQueue;
use crate::domain::logger::Logger;

/// Runs a handler over every message of a batch and decides what the batch
/// reports back, forwarding partial failures to `failure_queue`.
pub struct BatchFailureIsolator {
    pub queue: Arc<dyn MessageQueue>,
    pub failure_queue: String,
    pub logger: Arc<dyn Logger>,
}

impl BatchFailureIsolator {
    pub async fn run<H>(
        &self,
        handler: &H,
        messages: Vec<QueueMessage>,
    ) -> Result<BatchReport, BatchError>
    where
        H: MessageHandler + ?Sized,
    {
        let results = join_all(messages.iter().map(|message| handler.handle(message))).await;
        let partition = partition(messages.into_iter().zip(results));

        for failed in &partition.failed {
            self.logger.warn(&format!(
                "Message {} failed: {}",
                failed.message.id, failed.reason
            ));
        }

        let total = partition.total();
        match partition.verdict() {
            BatchVerdict::Succeeded => {
                self.logger
                    .debug(&format!("Batch of {} messages processed", total));
                Ok(BatchReport {
                    total,
                    succeeded: total,
                    forwarded: 0,
                })
            }
            BatchVerdict::AllFailed => {
                self.logger.error(&format!(
                    "{}/{} messages failed, failing entire batch",
                    total, total
                ));
                Err(BatchError::AllFailed {
                    failed: total,
                    total,
                })
            }
            BatchVerdict::PartiallyFailed => {
                let bodies = partition.failed_bodies();
                self.logger.warn(&format!(
                    "{}/{} messages failed, forwarding to {}",
                    bodies.len(),
                    total,
                    self.failure_queue
                ));
                self.queue.send_batch(&self.failure_queue, &bodies).await?;
                Ok(BatchReport {
                    total,
                    succeeded: partition.succeeded.len(),
                    forwarded: bodies.len(),
                })
            }
        }
    }
}
