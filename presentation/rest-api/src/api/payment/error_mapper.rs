use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::payment::errors::PaymentError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for PaymentError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            PaymentError::EmptyBatch => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "payment.empty_batch".to_string(),
            ),
            PaymentError::ValidationFailed(field) => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                format!("payment.{}_empty", field),
            ),
            PaymentError::MalformedPayload => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "payment.malformed_payload".to_string(),
            ),
            PaymentError::QueueFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "queue.send_failed".to_string(),
            ),
            PaymentError::PreconditionFailed | PaymentError::StorageFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence".to_string(),
            ),
        };

        (status, ErrorResponse::json(name, message))
    }
}
