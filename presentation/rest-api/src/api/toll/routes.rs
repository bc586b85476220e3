use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::toll::use_cases::get_by_plate::{
    GetTollsByPlateParams, GetTollsByPlateUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;
use crate::api::toll::dto::{TollListResponse, TollResponse};

pub struct TollApi {
    get_by_plate_use_case: Arc<dyn GetTollsByPlateUseCase>,
}

impl TollApi {
    pub fn new(get_by_plate_use_case: Arc<dyn GetTollsByPlateUseCase>) -> Self {
        Self {
            get_by_plate_use_case,
        }
    }
}

/// Toll lookup API
#[OpenApi]
impl TollApi {
    /// List tolls for a plate
    ///
    /// The plate is normalized before lookup, so `xyz 789` and `XYZ-789`
    /// return the same tolls. An unknown plate yields an empty list.
    #[oai(path = "/tolls/:plate", method = "get", tag = "ApiTags::Tolls")]
    async fn get_tolls_by_plate(&self, plate: Path<String>) -> GetTollsByPlateResponse {
        let params = GetTollsByPlateParams {
            plate_number: plate.0,
        };

        match self.get_by_plate_use_case.execute(params).await {
            Ok(records) => {
                let tolls: Vec<TollResponse> = records.into_iter().map(|r| r.into()).collect();
                GetTollsByPlateResponse::Ok(Json(TollListResponse { tolls }))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => GetTollsByPlateResponse::BadRequest(json),
                    _ => GetTollsByPlateResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetTollsByPlateResponse {
    #[oai(status = 200)]
    Ok(Json<TollListResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
