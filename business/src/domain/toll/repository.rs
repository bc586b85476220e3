use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::plate::PlateNumber;

use super::model::TollRecord;

#[async_trait]
pub trait TollRepository: Send + Sync {
    /// Upsert keyed by `(plate_number, id)`. Never modifies `payment_id`.
    async fn put(&self, record: &TollRecord) -> Result<(), RepositoryError>;

    /// All records of one plate, in no particular order.
    async fn query_by_plate(&self, plate: &PlateNumber) -> Result<Vec<TollRecord>, RepositoryError>;

    /// Atomically sets `payment_id` on an existing, unpaid record.
    ///
    /// Fails with [`RepositoryError::PreconditionFailed`] when the record does
    /// not exist or already carries a payment.
    async fn attach_payment(
        &self,
        plate: &PlateNumber,
        toll_record_id: &str,
        payment_id: &str,
    ) -> Result<(), RepositoryError>;
}
