#[derive(Debug, thiserror::Error)]
pub enum TollError {
    #[error("toll.invalid_plate")]
    InvalidPlate,
    #[error("toll.malformed_event")]
    MalformedEvent,
    #[error("toll.malformed_key")]
    MalformedKey,
    #[error("toll.detection_failed")]
    DetectionFailed,
    #[error("toll.pricing_failed")]
    PricingFailed,
    #[error("toll.storage_failed")]
    StorageFailed(#[from] crate::domain::errors::RepositoryError),
}
