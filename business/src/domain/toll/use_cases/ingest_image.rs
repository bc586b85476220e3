use async_trait::async_trait;

use crate::domain::toll::errors::TollError;
use crate::domain::toll::model::TollRecord;

pub struct IngestImageParams {
    /// Raw object-created notification as received from the queue.
    pub notification: String,
}

#[async_trait]
pub trait IngestImageUseCase: Send + Sync {
    async fn execute(&self, params: IngestImageParams) -> Result<Vec<TollRecord>, TollError>;
}
