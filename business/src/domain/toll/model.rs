use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use super::errors::TollError;
use super::value_objects::ImageReference;
use crate::domain::shared::plate::PlateNumber;

/// One detected toll crossing. Identity is `(plate_number, id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TollRecord {
    pub id: String,
    pub plate_number: PlateNumber,
    pub toll_booth_id: String,
    pub timestamp: DateTime<Utc>,
    pub cost: f64,
    pub image: ImageReference,
    pub payment_id: Option<String>,
}

pub struct NewTollRecordProps {
    pub plate_number: PlateNumber,
    pub toll_booth_id: String,
    pub timestamp: DateTime<Utc>,
    pub cost: f64,
    pub image: ImageReference,
}

impl TollRecord {
    /// Builds an unpaid record whose id is derived from the crossing itself,
    /// so a redelivered image maps onto the record already stored.
    pub fn new(props: NewTollRecordProps) -> Result<Self, TollError> {
        if props.plate_number.is_empty() {
            return Err(TollError::InvalidPlate);
        }

        let id = Self::derive_id(&props.plate_number, &props.toll_booth_id, props.timestamp);
        Ok(Self {
            id,
            plate_number: props.plate_number,
            toll_booth_id: props.toll_booth_id,
            timestamp: props.timestamp,
            cost: props.cost,
            image: props.image,
            payment_id: None,
        })
    }

    /// Hex SHA-256 of `plate|booth|timestamp`.
    pub fn derive_id(plate: &PlateNumber, toll_booth_id: &str, timestamp: DateTime<Utc>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(plate.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(toll_booth_id.as_bytes());
        hasher.update(b"|");
        hasher.update(
            timestamp
                .to_rfc3339_opts(SecondsFormat::AutoSi, true)
                .as_bytes(),
        );
        format!("{:x}", hasher.finalize())
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: String,
        plate_number: PlateNumber,
        toll_booth_id: String,
        timestamp: DateTime<Utc>,
        cost: f64,
        image: ImageReference,
        payment_id: Option<String>,
    ) -> Self {
        Self {
            id,
            plate_number,
            toll_booth_id,
            timestamp,
            cost,
            image,
            payment_id,
        }
    }
}
