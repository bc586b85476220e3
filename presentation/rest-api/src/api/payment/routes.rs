use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::payment::use_cases::submit::{SubmitPaymentsParams, SubmitPaymentsUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::payment::dto::{SubmitPaymentsAccepted, SubmitPaymentsRequest};
use crate::api::tags::ApiTags;

pub struct PaymentApi {
    submit_use_case: Arc<dyn SubmitPaymentsUseCase>,
}

impl PaymentApi {
    pub fn new(submit_use_case: Arc<dyn SubmitPaymentsUseCase>) -> Self {
        Self { submit_use_case }
    }
}

/// Payment intake API
#[OpenApi]
impl PaymentApi {
    /// Submit payments
    ///
    /// Queues the payments for reconciliation against their toll records.
    /// Acceptance does not mean the tolls are paid yet; a payment for a
    /// missing or already paid toll ends up on the payments failure queue.
    #[oai(path = "/payments", method = "post", tag = "ApiTags::Payments")]
    async fn submit_payments(&self, body: Json<SubmitPaymentsRequest>) -> SubmitPaymentsResponse {
        let payments: Vec<_> = body.0.payments.into_iter().map(|p| p.into()).collect();
        let accepted = payments.len() as u32;

        match self
            .submit_use_case
            .execute(SubmitPaymentsParams { payments })
            .await
        {
            Ok(()) => SubmitPaymentsResponse::Accepted(Json(SubmitPaymentsAccepted { accepted })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => SubmitPaymentsResponse::BadRequest(json),
                    _ => SubmitPaymentsResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum SubmitPaymentsResponse {
    #[oai(status = 202)]
    Accepted(Json<SubmitPaymentsAccepted>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
