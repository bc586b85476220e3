use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Body of every non-2xx answer. `message` is a dotted error code such as
/// `toll.invalid_plate`.
#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn json(name: &str, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            name: name.to_string(),
            message: message.into(),
        })
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
