/// One delivery from a message queue.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueMessage {
    pub id: String,
    pub body: String,
    /// How many times this message has been handed out, this delivery included.
    pub receive_count: u32,
}

impl QueueMessage {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            receive_count: 1,
        }
    }
}

/// Summary of a batch that was not failed as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    /// Messages re-submitted to the failure queue.
    pub forwarded: usize,
}
