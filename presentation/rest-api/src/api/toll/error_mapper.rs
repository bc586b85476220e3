use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::toll::errors::TollError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for TollError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            TollError::InvalidPlate => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "toll.invalid_plate",
            ),
            TollError::StorageFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence",
            ),
            TollError::MalformedEvent
            | TollError::MalformedKey
            | TollError::DetectionFailed
            | TollError::PricingFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "toll.ingestion_failed",
            ),
        };

        (status, ErrorResponse::json(name, message))
    }
}
