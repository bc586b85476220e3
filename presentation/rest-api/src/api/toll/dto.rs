use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::toll::model::TollRecord;

#[derive(Debug, Clone, Object)]
pub struct TollResponse {
    /// Toll record identifier, used as `tollRecordId` when paying
    pub id: String,
    /// When the vehicle crossed the booth
    pub timestamp: DateTime<Utc>,
    /// Normalized plate number
    pub plate_number: String,
    /// Toll booth identifier
    pub toll_id: String,
    /// Payment attached to this toll, absent while unpaid
    #[oai(skip_serializing_if_is_none)]
    pub payment_id: Option<String>,
    pub cost: f64,
}

impl From<TollRecord> for TollResponse {
    fn from(record: TollRecord) -> Self {
        Self {
            id: record.id,
            timestamp: record.timestamp,
            plate_number: record.plate_number.to_string(),
            toll_id: record.toll_booth_id,
            payment_id: record.payment_id,
            cost: record.cost,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct TollListResponse {
    pub tolls: Vec<TollResponse>,
}
