use serde::Deserialize;

use super::errors::TollError;
use super::value_objects::{ImageReference, decode_object_key};

/// Object-created notification published by the image bucket.
#[derive(Debug, Deserialize)]
pub struct ObjectCreatedNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<ObjectCreatedRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectCreatedRecord {
    pub s3: ObjectEntity,
}

#[derive(Debug, Deserialize)]
pub struct ObjectEntity {
    pub bucket: BucketEntity,
    pub object: ObjectKeyEntity,
}

#[derive(Debug, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectKeyEntity {
    /// Form-url-encoded key.
    pub key: String,
}

impl ObjectCreatedNotification {
    pub fn parse(body: &str) -> Result<Self, TollError> {
        serde_json::from_str(body).map_err(|_| TollError::MalformedEvent)
    }

    /// Decoded image references, one per record. A key that does not
    /// decode fails the whole notification with `MalformedKey`.
    pub fn images(&self) -> Result<Vec<ImageReference>, TollError> {
        self.records
            .iter()
            .map(|r| {
                decode_object_key(&r.s3.object.key)
                    .map(|key| ImageReference::new(&r.s3.bucket.name, key))
            })
            .collect()
    }
}
