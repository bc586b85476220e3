use std::sync::Arc;

use logger::TracingLogger;
use persistence::queue::repository::MessageQueuePostgres;
use persistence::toll::repository::TollRepositoryPostgres;

use business::application::payment::submit::SubmitPaymentsUseCaseImpl;
use business::application::toll::get_by_plate::GetTollsByPlateUseCaseImpl;

use crate::api::health::routes::HealthApi;
use crate::api::payment::routes::PaymentApi;
use crate::api::toll::routes::TollApi;
use crate::config::queue_config::QueueConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub toll_api: TollApi,
    pub payment_api: PaymentApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, queues: &QueueConfig) -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = HealthApi::new(pool.clone());

        // Infrastructure adapters
        let toll_repository = Arc::new(TollRepositoryPostgres::new(pool.clone()));
        let message_queue = Arc::new(MessageQueuePostgres::new(pool));

        let get_by_plate_use_case = Arc::new(GetTollsByPlateUseCaseImpl {
            repository: toll_repository,
            logger: logger.clone(),
        });
        let submit_use_case = Arc::new(SubmitPaymentsUseCaseImpl {
            queue: message_queue,
            payment_queue: queues.payment_queue.clone(),
            logger,
        });

        Self {
            health_api,
            toll_api: TollApi::new(get_by_plate_use_case),
            payment_api: PaymentApi::new(submit_use_case),
        }
    }
}
