use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::batch::handler::MessageHandler;
use crate::domain::batch::model::QueueMessage;
use crate::domain::logger::Logger;
use crate::domain::shared::plate::PlateNumber;
use crate::domain::toll::errors::TollError;
use crate::domain::toll::events::ObjectCreatedNotification;
use crate::domain::toll::model::{NewTollRecordProps, TollRecord};
use crate::domain::toll::repository::TollRepository;
use crate::domain::toll::services::{
    DetectionFilter, PricingService, TextDetectionService, select_plate_text,
};
use crate::domain::toll::use_cases::ingest_image::{IngestImageParams, IngestImageUseCase};
use crate::domain::toll::value_objects::{ImageReference, TollObjectKey};

pub struct IngestImageUseCaseImpl {
    pub repository: Arc<dyn TollRepository>,
    pub detector: Arc<dyn TextDetectionService>,
    pub pricing: Arc<dyn PricingService>,
    pub filter: DetectionFilter,
    pub logger: Arc<dyn Logger>,
}

impl IngestImageUseCaseImpl {
    async fn ingest(&self, image: ImageReference) -> Result<TollRecord, TollError> {
        let key = TollObjectKey::parse(&image.key)?;

        let detections = self.detector.detect_text(&image, &self.filter).await?;
        let raw_plate = select_plate_text(&detections).ok_or(TollError::DetectionFailed)?;
        let plate_number = PlateNumber::normalized(raw_plate);
        if plate_number.is_empty() {
            return Err(TollError::DetectionFailed);
        }

        let cost = self
            .pricing
            .toll_cost(&key.toll_booth_id, key.timestamp)
            .await?;

        let record = TollRecord::new(NewTollRecordProps {
            plate_number,
            toll_booth_id: key.toll_booth_id,
            timestamp: key.timestamp,
            cost,
            image,
        })?;

        self.repository.put(&record).await?;
        Ok(record)
    }
}

#[async_trait]
impl IngestImageUseCase for IngestImageUseCaseImpl {
    async fn execute(&self, params: IngestImageParams) -> Result<Vec<TollRecord>, TollError> {
        let notification = ObjectCreatedNotification::parse(&params.notification)?;
        let images = notification.images()?;
        if images.is_empty() {
            self.logger
                .info("Notification carries no object records, nothing to ingest");
        }

        let mut records = Vec::with_capacity(images.len());
        for image in images {
            self.logger.debug(&format!("Ingesting image {}", image));
            let record = self.ingest(image).await?;
            self.logger.info(&format!(
                "Toll {} stored for plate {} at booth {}",
                record.id, record.plate_number, record.toll_booth_id
            ));
            records.push(record);
        }

        Ok(records)
    }
}

/// Adapts the ingestion use case to the batch failure isolator.
pub struct IngestImageHandler {
    pub use_case: Arc<dyn IngestImageUseCase>,
}

#[async_trait]
impl MessageHandler for IngestImageHandler {
    type Error = TollError;

    async fn handle(&self, message: &QueueMessage) -> Result<(), TollError> {
        self.use_case
            .execute(IngestImageParams {
                notification: message.body.clone(),
            })
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::toll::services::{DetectionType, TextDetection};
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::mock;

    mock! {
        pub TollRepo {}

        #[async_trait]
        impl TollRepository for TollRepo {
            async fn put(&self, record: &TollRecord) -> Result<(), RepositoryError>;
            async fn query_by_plate(&self, plate: &PlateNumber) -> Result<Vec<TollRecord>, RepositoryError>;
            async fn attach_payment(
                &self,
                plate: &PlateNumber,
                toll_record_id: &str,
                payment_id: &str,
            ) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Detector {}

        #[async_trait]
        impl TextDetectionService for Detector {
            async fn detect_text(
                &self,
                image: &ImageReference,
                filter: &DetectionFilter,
            ) -> Result<Vec<TextDetection>, TollError>;
        }
    }

    mock! {
        pub Pricing {}

        #[async_trait]
        impl PricingService for Pricing {
            async fn toll_cost(
                &self,
                toll_booth_id: &str,
                timestamp: DateTime<Utc>,
            ) -> Result<f64, TollError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn fixed_pricing() -> MockPricing {
        let mut pricing = MockPricing::new();
        pricing.expect_toll_cost().returning(|_, _| Ok(2.5));
        pricing
    }

    fn detector_returning(text: &'static str) -> MockDetector {
        let mut detector = MockDetector::new();
        detector.expect_detect_text().returning(move |_, _| {
            Ok(vec![
                TextDetection {
                    text: "TOLL ROAD".to_string(),
                    confidence: 91.0,
                    detection_type: DetectionType::Line,
                },
                TextDetection {
                    text: text.to_string(),
                    confidence: 99.2,
                    detection_type: DetectionType::Line,
                },
            ])
        });
        detector
    }

    fn notification(key: &str) -> String {
        format!(
            r#"{{"Records":[{{"s3":{{"bucket":{{"name":"toll-images"}},"object":{{"key":"{}"}}}}}}]}}"#,
            key
        )
    }

    fn use_case(
        repository: MockTollRepo,
        detector: MockDetector,
        pricing: MockPricing,
    ) -> IngestImageUseCaseImpl {
        IngestImageUseCaseImpl {
            repository: Arc::new(repository),
            detector: Arc::new(detector),
            pricing: Arc::new(pricing),
            filter: DetectionFilter::default(),
            logger: mock_logger(),
        }
    }

    #[tokio::test]
    async fn should_store_toll_record_derived_from_key_and_detected_text() {
        let mut repository = MockTollRepo::new();
        repository
            .expect_put()
            .withf(|record| record.plate_number.as_str() == "XYZ789" && record.payment_id.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let result = use_case(repository, detector_returning("xyz 789"), fixed_pricing())
            .execute(IngestImageParams {
                notification: notification("5/2023-01-01T12%3A00%3A00Z.jpg"),
            })
            .await;

        let records = result.unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.toll_booth_id, "5");
        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(record.plate_number.as_str(), "XYZ789");
        assert_eq!(record.cost, 2.5);
        assert_eq!(record.image.key, "5/2023-01-01T12:00:00Z.jpg");
    }

    #[tokio::test]
    async fn should_write_same_record_id_when_image_is_redelivered() {
        let mut repository = MockTollRepo::new();
        repository.expect_put().times(2).returning(|_| Ok(()));
        let use_case = use_case(repository, detector_returning("xyz 789"), fixed_pricing());

        let first = use_case
            .execute(IngestImageParams {
                notification: notification("5/2023-01-01T12:00:00Z.jpg"),
            })
            .await
            .unwrap();
        let second = use_case
            .execute(IngestImageParams {
                notification: notification("5/2023-01-01T12:00:00Z.jpg"),
            })
            .await
            .unwrap();

        assert_eq!(first[0].id, second[0].id);
    }

    #[tokio::test]
    async fn should_fail_with_malformed_key_before_calling_detector() {
        let mut repository = MockTollRepo::new();
        repository.expect_put().never();
        let mut detector = MockDetector::new();
        detector.expect_detect_text().never();

        let result = use_case(repository, detector, fixed_pricing())
            .execute(IngestImageParams {
                notification: notification("uploads/not-a-timestamp.jpg"),
            })
            .await;

        assert!(matches!(result.unwrap_err(), TollError::MalformedKey));
    }

    #[tokio::test]
    async fn should_fail_with_malformed_event_when_body_is_not_a_notification() {
        let result = use_case(MockTollRepo::new(), MockDetector::new(), MockPricing::new())
            .execute(IngestImageParams {
                notification: "{{{".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), TollError::MalformedEvent));
    }

    #[tokio::test]
    async fn should_fail_with_detection_failed_when_no_line_detected() {
        let mut repository = MockTollRepo::new();
        repository.expect_put().never();
        let mut detector = MockDetector::new();
        detector.expect_detect_text().returning(|_, _| {
            Ok(vec![TextDetection {
                text: "XYZ".to_string(),
                confidence: 99.0,
                detection_type: DetectionType::Word,
            }])
        });

        let result = use_case(repository, detector, fixed_pricing())
            .execute(IngestImageParams {
                notification: notification("5/2023-01-01T12:00:00Z.jpg"),
            })
            .await;

        assert!(matches!(result.unwrap_err(), TollError::DetectionFailed));
    }

    #[tokio::test]
    async fn should_fail_with_detection_failed_when_detector_errors() {
        let mut detector = MockDetector::new();
        detector
            .expect_detect_text()
            .returning(|_, _| Err(TollError::DetectionFailed));

        let result = use_case(MockTollRepo::new(), detector, fixed_pricing())
            .execute(IngestImageParams {
                notification: notification("5/2023-01-01T12:00:00Z.jpg"),
            })
            .await;

        assert!(matches!(result.unwrap_err(), TollError::DetectionFailed));
    }

    #[tokio::test]
    async fn should_fail_with_detection_failed_when_text_normalizes_to_nothing() {
        let result = use_case(MockTollRepo::new(), detector_returning(" - "), fixed_pricing())
            .execute(IngestImageParams {
                notification: notification("5/2023-01-01T12:00:00Z.jpg"),
            })
            .await;

        assert!(matches!(result.unwrap_err(), TollError::DetectionFailed));
    }

    #[tokio::test]
    async fn should_fail_with_storage_failed_when_put_fails() {
        let mut repository = MockTollRepo::new();
        repository
            .expect_put()
            .returning(|_| Err(RepositoryError::DatabaseError));

        let result = use_case(repository, detector_returning("xyz 789"), fixed_pricing())
            .execute(IngestImageParams {
                notification: notification("5/2023-01-01T12:00:00Z.jpg"),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            TollError::StorageFailed(RepositoryError::DatabaseError)
        ));
    }

    #[tokio::test]
    async fn should_succeed_without_writes_when_notification_has_no_records() {
        let mut repository = MockTollRepo::new();
        repository.expect_put().never();

        let result = use_case(repository, MockDetector::new(), MockPricing::new())
            .execute(IngestImageParams {
                notification: r#"{"Event":"s3:TestEvent"}"#.to_string(),
            })
            .await;

        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_report_handler_failure_for_bad_message() {
        let handler = IngestImageHandler {
            use_case: Arc::new(use_case(
                MockTollRepo::new(),
                MockDetector::new(),
                MockPricing::new(),
            )),
        };

        let result = handler
            .handle(&QueueMessage::new("m1", "not json"))
            .await;

        assert!(matches!(result.unwrap_err(), TollError::MalformedEvent));
    }
}
