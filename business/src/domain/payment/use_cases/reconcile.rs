use async_trait::async_trait;

use crate::domain::payment::errors::PaymentError;

pub struct ReconcilePaymentsParams {
    /// Raw payment batch as received from the queue.
    pub body: String,
}

#[async_trait]
pub trait ReconcilePaymentsUseCase: Send + Sync {
    /// Returns the number of payments attached.
    async fn execute(&self, params: ReconcilePaymentsParams) -> Result<usize, PaymentError>;
}
