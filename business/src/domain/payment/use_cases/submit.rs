use async_trait::async_trait;

use crate::domain::payment::errors::PaymentError;
use crate::domain::payment::model::Payment;

pub struct SubmitPaymentsParams {
    pub payments: Vec<Payment>,
}

#[async_trait]
pub trait SubmitPaymentsUseCase: Send + Sync {
    async fn execute(&self, params: SubmitPaymentsParams) -> Result<(), PaymentError>;
}
