use std::sync::Arc;

use business::application::batch::isolator::BatchFailureIsolator;
use business::application::payment::reconcile::{
    ReconcilePaymentsHandler, ReconcilePaymentsUseCaseImpl,
};
use business::application::toll::ingest_image::{IngestImageHandler, IngestImageUseCaseImpl};
use business::domain::batch::queue::MessageQueue;
use business::domain::logger::Logger;
use logger::TracingLogger;
use persistence::queue::repository::MessageQueuePostgres;
use persistence::toll::repository::TollRepositoryPostgres;
use pricing::fixed::FixedTollPricing;
use vision::client::VisionClient;
use vision::text_detector::TextDetectorHttp;

use crate::config::detection_config::DetectionConfig;
use crate::config::pricing_config::PricingConfig;
use crate::config::worker_config::WorkerConfig;
use crate::consumer::QueueConsumer;

pub struct DependencyContainer {
    pub ingestion: QueueConsumer<IngestImageHandler>,
    pub reconciliation: QueueConsumer<ReconcilePaymentsHandler>,
}

impl DependencyContainer {
    pub fn new(
        pool: sqlx::PgPool,
        worker: WorkerConfig,
        detection: DetectionConfig,
        pricing: PricingConfig,
    ) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);

        // Infrastructure adapters
        let toll_repository = Arc::new(TollRepositoryPostgres::new(pool.clone()));
        let message_queue: Arc<dyn MessageQueue> = Arc::new(MessageQueuePostgres::new(pool));
        let detector = Arc::new(TextDetectorHttp::new(VisionClient::new(
            detection.base_url,
            detection.api_key,
            detection.timeout,
        )));
        let toll_pricing = Arc::new(FixedTollPricing::new(pricing.base_cost));

        let ingest_use_case = Arc::new(IngestImageUseCaseImpl {
            repository: toll_repository.clone(),
            detector,
            pricing: toll_pricing,
            filter: detection.filter,
            logger: logger.clone(),
        });
        let reconcile_use_case = Arc::new(ReconcilePaymentsUseCaseImpl {
            repository: toll_repository,
            logger: logger.clone(),
        });

        let ingestion = QueueConsumer {
            name: "ingestion",
            queue: message_queue.clone(),
            source_queue: worker.image_queue,
            isolator: BatchFailureIsolator {
                queue: message_queue.clone(),
                failure_queue: worker.image_failure_queue,
                logger: logger.clone(),
            },
            handler: IngestImageHandler {
                use_case: ingest_use_case,
            },
            settings: worker.poll.clone(),
        };
        let reconciliation = QueueConsumer {
            name: "reconciliation",
            queue: message_queue.clone(),
            source_queue: worker.payment_queue,
            isolator: BatchFailureIsolator {
                queue: message_queue,
                failure_queue: worker.payment_failure_queue,
                logger,
            },
            handler: ReconcilePaymentsHandler {
                use_case: reconcile_use_case,
            },
            settings: worker.poll,
        };

        Self {
            ingestion,
            reconciliation,
        }
    }
}
