use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::batch::handler::MessageHandler;
use crate::domain::batch::model::QueueMessage;
use crate::domain::logger::Logger;
use crate::domain::payment::errors::PaymentError;
use crate::domain::payment::model::PaymentBatch;
use crate::domain::payment::use_cases::reconcile::{
    ReconcilePaymentsParams, ReconcilePaymentsUseCase,
};
use crate::domain::shared::plate::PlateNumber;
use crate::domain::toll::repository::TollRepository;

pub struct ReconcilePaymentsUseCaseImpl {
    pub repository: Arc<dyn TollRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ReconcilePaymentsUseCase for ReconcilePaymentsUseCaseImpl {
    async fn execute(&self, params: ReconcilePaymentsParams) -> Result<usize, PaymentError> {
        let batch = PaymentBatch::parse(&params.body)?;
        batch.validate()?;

        let mut attached = 0;
        let mut first_failure = None;
        for payment in &batch.payments {
            let plate = PlateNumber::normalized(&payment.plate_number);
            let outcome = self
                .repository
                .attach_payment(&plate, &payment.toll_record_id, &payment.payment_id)
                .await
                .map_err(PaymentError::from);

            match outcome {
                Ok(()) => {
                    attached += 1;
                    self.logger.info(&format!(
                        "Payment {} attached to toll {} ({})",
                        payment.payment_id, payment.toll_record_id, plate
                    ));
                }
                Err(err) => {
                    self.logger.warn(&format!(
                        "Payment {} not attached to toll {} ({}): {}",
                        payment.payment_id, payment.toll_record_id, plate, err
                    ));
                    if first_failure.is_none() {
                        first_failure = Some(err);
                    }
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(attached),
        }
    }
}

/// Adapts the reconciliation use case to the batch failure isolator.
pub struct ReconcilePaymentsHandler {
    pub use_case: Arc<dyn ReconcilePaymentsUseCase>,
}

#[async_trait]
impl MessageHandler for ReconcilePaymentsHandler {
    type Error = PaymentError;

    async fn handle(&self, message: &QueueMessage) -> Result<(), PaymentError> {
        self.use_case
            .execute(ReconcilePaymentsParams {
                body: message.body.clone(),
            })
            .await
            .map(|_| ())
    }
}
