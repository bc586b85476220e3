use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use sqlx::FromRow;

use business::domain::shared::plate::PlateNumber;
use business::domain::toll::model::TollRecord;
use business::domain::toll::value_objects::ImageReference;

#[derive(Debug, FromRow)]
pub struct TollEntity {
    pub plate_number: String,
    pub id: String,
    pub toll_booth_id: String,
    pub crossed_at: DateTime<Utc>,
    pub cost: BigDecimal,
    pub image_bucket: String,
    pub image_key: String,
    pub payment_id: Option<String>,
}

impl TollEntity {
    pub fn into_domain(self) -> TollRecord {
        TollRecord::from_repository(
            self.id,
            // Stored plates are already normalized; normalizing again is a no-op.
            PlateNumber::normalized(&self.plate_number),
            self.toll_booth_id,
            self.crossed_at,
            self.cost.to_f64().unwrap_or_default(),
            ImageReference::new(self.image_bucket, self.image_key),
            self.payment_id,
        )
    }
}
