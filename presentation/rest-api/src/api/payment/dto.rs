use poem_openapi::Object;

use business::domain::payment::model::Payment;

#[derive(Debug, Clone, Object)]
pub struct PaymentRequest {
    /// Identifier issued by the payment provider
    pub payment_id: String,
    pub plate_number: String,
    /// The `id` of the toll being paid
    pub toll_record_id: String,
}

impl From<PaymentRequest> for Payment {
    fn from(request: PaymentRequest) -> Self {
        Payment {
            payment_id: request.payment_id,
            plate_number: request.plate_number,
            toll_record_id: request.toll_record_id,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct SubmitPaymentsRequest {
    pub payments: Vec<PaymentRequest>,
}

#[derive(Debug, Clone, Object)]
pub struct SubmitPaymentsAccepted {
    /// Number of payments queued for reconciliation
    pub accepted: u32,
}
