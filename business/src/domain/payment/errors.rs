#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment.malformed_payload")]
    MalformedPayload,
    #[error("payment.empty_batch")]
    EmptyBatch,
    #[error("payment.validation_failed: {0}")]
    ValidationFailed(&'static str),
    /// The toll record is missing or already paid. The two causes are not
    /// distinguishable from the store's answer.
    #[error("payment.precondition_failed")]
    PreconditionFailed,
    #[error("payment.storage_failed")]
    StorageFailed(crate::domain::errors::RepositoryError),
    #[error("payment.queue_failed")]
    QueueFailed(#[from] crate::domain::errors::QueueError),
}

impl From<crate::domain::errors::RepositoryError> for PaymentError {
    fn from(err: crate::domain::errors::RepositoryError) -> Self {
        match err {
            crate::domain::errors::RepositoryError::PreconditionFailed => {
                PaymentError::PreconditionFailed
            }
            other => PaymentError::StorageFailed(other),
        }
    }
}
