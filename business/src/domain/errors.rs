/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A conditional write was rejected by the store: the key is missing or
    /// the guarded attribute is already set.
    #[error("repository.precondition_failed")]
    PreconditionFailed,
    #[error("repository.database_error")]
    DatabaseError,
}

/// Message queue errors for domain layer.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue.send_failed")]
    SendFailed,
    #[error("queue.receive_failed")]
    ReceiveFailed,
    #[error("queue.delete_failed")]
    DeleteFailed,
}
