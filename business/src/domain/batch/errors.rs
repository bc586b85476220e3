use crate::domain::errors::QueueError;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Nothing in the batch succeeded; the whole batch is left for redelivery.
    #[error("batch.all_failed: {failed}/{total}")]
    AllFailed { failed: usize, total: usize },
    #[error("batch.failure_queue_unavailable")]
    FailureQueue(#[from] QueueError),
}
