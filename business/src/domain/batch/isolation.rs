use super::model::QueueMessage;

/// A message whose processing failed, with the rendered cause.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedMessage {
    pub message: QueueMessage,
    pub reason: String,
}

/// Outcome of a batch split into the messages that succeeded and those that failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPartition {
    pub succeeded: Vec<QueueMessage>,
    pub failed: Vec<FailedMessage>,
}

/// What the batch as a whole reports back to the messaging layer.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchVerdict {
    /// Every message succeeded (or the batch was empty).
    Succeeded,
    /// Report success, forward only the failed bodies to the failure queue.
    PartiallyFailed,
    /// Report failure so the whole batch is redelivered.
    AllFailed,
}

/// Folds per-message outcomes into a partition. Order inside each side
/// follows the input order.
pub fn partition<E, I>(outcomes: I) -> BatchPartition
where
    E: std::fmt::Display,
    I: IntoIterator<Item = (QueueMessage, Result<(), E>)>,
{
    outcomes
        .into_iter()
        .fold(BatchPartition::default(), |mut acc, (message, outcome)| {
            match outcome {
                Ok(()) => acc.succeeded.push(message),
                Err(err) => acc.failed.push(FailedMessage {
                    message,
                    reason: err.to_string(),
                }),
            }
            acc
        })
}

impl BatchPartition {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn verdict(&self) -> BatchVerdict {
        match (self.succeeded.len(), self.failed.len()) {
            (_, 0) => BatchVerdict::Succeeded,
            (0, _) => BatchVerdict::AllFailed,
            _ => BatchVerdict::PartiallyFailed,
        }
    }

    /// Original bodies of the failed messages, each exactly once.
    pub fn failed_bodies(&self) -> Vec<String> {
        self.failed.iter().map(|f| f.message.body.clone()).collect()
    }
}
