use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shared::plate::PlateNumber;
use crate::domain::toll::errors::TollError;
use crate::domain::toll::model::TollRecord;
use crate::domain::toll::repository::TollRepository;
use crate::domain::toll::use_cases::get_by_plate::{
    GetTollsByPlateParams, GetTollsByPlateUseCase,
};

pub struct GetTollsByPlateUseCaseImpl {
    pub repository: Arc<dyn TollRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetTollsByPlateUseCase for GetTollsByPlateUseCaseImpl {
    async fn execute(&self, params: GetTollsByPlateParams) -> Result<Vec<TollRecord>, TollError> {
        let plate = PlateNumber::normalized(&params.plate_number);
        if plate.is_empty() {
            return Err(TollError::InvalidPlate);
        }

        self.logger
            .info(&format!("Fetching tolls for plate: {}", plate));
        let tolls = self.repository.query_by_plate(&plate).await?;
        self.logger
            .info(&format!("Found {} tolls for plate {}", tolls.len(), plate));
        Ok(tolls)
    }
}
