use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::batch::queue::MessageQueue;
use crate::domain::logger::Logger;
use crate::domain::payment::errors::PaymentError;
use crate::domain::payment::model::PaymentBatch;
use crate::domain::payment::use_cases::submit::{SubmitPaymentsParams, SubmitPaymentsUseCase};

/// Validates a payment batch and enqueues it for reconciliation.
///
/// An empty list is rejected with `EmptyBatch`; the legacy intake accepted
/// it and enqueued nothing.
pub struct SubmitPaymentsUseCaseImpl {
    pub queue: Arc<dyn MessageQueue>,
    pub payment_queue: String,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SubmitPaymentsUseCase for SubmitPaymentsUseCaseImpl {
    async fn execute(&self, params: SubmitPaymentsParams) -> Result<(), PaymentError> {
        let batch = PaymentBatch {
            payments: params.payments,
        };
        if batch.payments.is_empty() {
            return Err(PaymentError::EmptyBatch);
        }
        batch.validate()?;

        let body = batch.to_message_body()?;
        self.queue.send(&self.payment_queue, &body).await?;

        self.logger.info(&format!(
            "Enqueued {} payments to {}",
            batch.payments.len(),
            self.payment_queue
        ));
        Ok(())
    }
}
