use async_trait::async_trait;

use crate::domain::toll::errors::TollError;
use crate::domain::toll::model::TollRecord;

pub struct GetTollsByPlateParams {
    pub plate_number: String,
}

#[async_trait]
pub trait GetTollsByPlateUseCase: Send + Sync {
    async fn execute(&self, params: GetTollsByPlateParams) -> Result<Vec<TollRecord>, TollError>;
}
