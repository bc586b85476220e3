use std::sync::Arc;

use tokio::sync::watch;

use business::application::batch::isolator::BatchFailureIsolator;
use business::domain::batch::handler::MessageHandler;
use business::domain::batch::model::QueueMessage;
use business::domain::batch::queue::MessageQueue;
use business::domain::errors::QueueError;

use crate::config::worker_config::PollSettings;

/// Splits off messages delivered more than `max_receive_count` times.
///
/// Returns `(fresh, exhausted)`; order within each side is preserved.
pub fn split_exhausted(
    messages: Vec<QueueMessage>,
    max_receive_count: u32,
) -> (Vec<QueueMessage>, Vec<QueueMessage>) {
    messages
        .into_iter()
        .partition(|m| m.receive_count <= max_receive_count)
}

fn ids(messages: &[QueueMessage]) -> Vec<String> {
    messages.iter().map(|m| m.id.clone()).collect()
}

/// Polls one queue and feeds each batch through the failure isolator.
pub struct QueueConsumer<H> {
    pub name: &'static str,
    pub queue: Arc<dyn MessageQueue>,
    pub source_queue: String,
    pub isolator: BatchFailureIsolator,
    pub handler: H,
    pub settings: PollSettings,
}

impl<H: MessageHandler> QueueConsumer<H> {
    /// Receives and processes one batch. Returns how many messages were
    /// received, zero meaning the queue was empty.
    pub async fn poll_once(&self) -> Result<usize, QueueError> {
        let messages = self
            .queue
            .receive(
                &self.source_queue,
                self.settings.batch_size,
                self.settings.visibility_timeout,
            )
            .await?;
        let received = messages.len();
        if received == 0 {
            return Ok(0);
        }

        let (fresh, exhausted) = split_exhausted(messages, self.settings.max_receive_count);
        if !exhausted.is_empty() {
            self.redrive(&exhausted).await;
        }
        if fresh.is_empty() {
            return Ok(received);
        }

        let fresh_ids = ids(&fresh);
        match self.isolator.run(&self.handler, fresh).await {
            Ok(report) => {
                tracing::info!(
                    consumer = self.name,
                    total = report.total,
                    succeeded = report.succeeded,
                    forwarded = report.forwarded,
                    "batch processed"
                );
                if let Err(e) = self.queue.delete(&self.source_queue, &fresh_ids).await {
                    tracing::error!(consumer = self.name, "deleting processed batch failed: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!(
                    consumer = self.name,
                    "batch left for redelivery: {}",
                    e
                );
            }
        }

        Ok(received)
    }

    /// Moves messages that keep failing to the failure queue. They are only
    /// deleted once the forward succeeded.
    async fn redrive(&self, exhausted: &[QueueMessage]) {
        let bodies: Vec<String> = exhausted.iter().map(|m| m.body.clone()).collect();
        if let Err(e) = self
            .queue
            .send_batch(&self.isolator.failure_queue, &bodies)
            .await
        {
            tracing::error!(
                consumer = self.name,
                "redriving {} messages to {} failed: {}",
                bodies.len(),
                self.isolator.failure_queue,
                e
            );
            return;
        }

        tracing::warn!(
            consumer = self.name,
            "redrove {} messages to {} after {} deliveries",
            bodies.len(),
            self.isolator.failure_queue,
            self.settings.max_receive_count
        );
        if let Err(e) = self.queue.delete(&self.source_queue, &ids(exhausted)).await {
            tracing::error!(consumer = self.name, "deleting redriven messages failed: {}", e);
        }
    }

    /// Polls until `shutdown` flips to true. Sleeps for the poll interval
    /// whenever the queue is empty or unreachable.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(consumer = self.name, queue = %self.source_queue, "consumer started");

        while !*shutdown.borrow() {
            let idle = match self.poll_once().await {
                Ok(received) => received == 0,
                Err(e) => {
                    tracing::error!(consumer = self.name, "receive failed: {}", e);
                    true
                }
            };

            if idle {
                tokio::select! {
                    _ = tokio::time::sleep(self.settings.poll_interval) => {}
                    _ = shutdown.changed() => {}
                }
            }
        }

        tracing::info!(consumer = self.name, "consumer stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use std::sync::Mutex;
    use std::time::Duration;

    use business::domain::logger::Logger;
    use logger::TracingLogger;

    mock! {
        pub Queue {}

        #[async_trait]
        impl MessageQueue for Queue {
            async fn send(&self, queue: &str, body: &str) -> Result<(), QueueError>;
            async fn send_batch(&self, queue: &str, bodies: &[String]) -> Result<(), QueueError>;
            async fn receive(
                &self,
                queue: &str,
                max_messages: u32,
                visibility_timeout: Duration,
            ) -> Result<Vec<QueueMessage>, QueueError>;
            async fn delete(&self, queue: &str, ids: &[String]) -> Result<(), QueueError>;
        }
    }

    /// Records every body it sees and fails those starting with "bad".
    #[derive(Default)]
    struct RecordingHandler {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessageHandler for RecordingHandler {
        type Error = String;

        async fn handle(&self, message: &QueueMessage) -> Result<(), String> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(message.body.clone());
            }
            if message.body.starts_with("bad") {
                Err(format!("rejected {}", message.body))
            } else {
                Ok(())
            }
        }
    }

    fn message(id: &str, body: &str, receive_count: u32) -> QueueMessage {
        QueueMessage {
            id: id.to_string(),
            body: body.to_string(),
            receive_count,
        }
    }

    fn consumer(queue: MockQueue) -> QueueConsumer<RecordingHandler> {
        let queue: Arc<dyn MessageQueue> = Arc::new(queue);
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        QueueConsumer {
            name: "test",
            queue: queue.clone(),
            source_queue: "images".to_string(),
            isolator: BatchFailureIsolator {
                queue,
                failure_queue: "images-dlq".to_string(),
                logger,
            },
            handler: RecordingHandler::default(),
            settings: PollSettings::default(),
        }
    }

    #[test]
    fn should_split_messages_past_max_receive_count() {
        let messages = vec![
            message("1", "a", 1),
            message("2", "b", 6),
            message("3", "c", 5),
        ];

        let (fresh, exhausted) = split_exhausted(messages, 5);

        assert_eq!(ids(&fresh), vec!["1", "3"]);
        assert_eq!(ids(&exhausted), vec!["2"]);
    }

    #[tokio::test]
    async fn should_report_empty_queue() {
        let mut queue = MockQueue::new();
        queue.expect_receive().returning(|_, _, _| Ok(vec![]));
        queue.expect_delete().never();

        let received = consumer(queue).poll_once().await.unwrap();

        assert_eq!(received, 0);
    }

    #[tokio::test]
    async fn should_delete_whole_batch_when_all_messages_succeed() {
        let mut queue = MockQueue::new();
        queue
            .expect_receive()
            .withf(|queue, max, _| queue == "images" && *max == 10)
            .returning(|_, _, _| Ok(vec![message("1", "a", 1), message("2", "b", 1)]));
        queue.expect_send_batch().never();
        queue
            .expect_delete()
            .withf(|queue, ids| queue == "images" && ids == ["1".to_string(), "2".to_string()])
            .times(1)
            .returning(|_, _| Ok(()));

        let received = consumer(queue).poll_once().await.unwrap();

        assert_eq!(received, 2);
    }

    #[tokio::test]
    async fn should_forward_failures_and_delete_batch_when_partially_failed() {
        let mut queue = MockQueue::new();
        queue
            .expect_receive()
            .returning(|_, _, _| Ok(vec![message("1", "a", 1), message("2", "bad", 1)]));
        queue
            .expect_send_batch()
            .withf(|queue, bodies| queue == "images-dlq" && bodies == ["bad".to_string()])
            .times(1)
            .returning(|_, _| Ok(()));
        queue
            .expect_delete()
            .withf(|_, ids| ids.len() == 2)
            .times(1)
            .returning(|_, _| Ok(()));

        consumer(queue).poll_once().await.unwrap();
    }

    #[tokio::test]
    async fn should_leave_batch_for_redelivery_when_all_messages_fail() {
        let mut queue = MockQueue::new();
        queue
            .expect_receive()
            .returning(|_, _, _| Ok(vec![message("1", "bad-1", 1), message("2", "bad-2", 1)]));
        queue.expect_send_batch().never();
        queue.expect_delete().never();

        let received = consumer(queue).poll_once().await.unwrap();

        assert_eq!(received, 2);
    }

    #[tokio::test]
    async fn should_redrive_exhausted_messages_without_handling_them() {
        let mut queue = MockQueue::new();
        queue
            .expect_receive()
            .returning(|_, _, _| Ok(vec![message("1", "stuck", 6), message("2", "a", 1)]));
        queue
            .expect_send_batch()
            .withf(|queue, bodies| queue == "images-dlq" && bodies == ["stuck".to_string()])
            .times(1)
            .returning(|_, _| Ok(()));
        queue
            .expect_delete()
            .withf(|_, ids| ids == ["1".to_string()])
            .times(1)
            .returning(|_, _| Ok(()));
        queue
            .expect_delete()
            .withf(|_, ids| ids == ["2".to_string()])
            .times(1)
            .returning(|_, _| Ok(()));
        let consumer = consumer(queue);

        consumer.poll_once().await.unwrap();

        let seen = consumer.handler.seen.lock().unwrap().clone();
        assert_eq!(seen, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn should_keep_exhausted_messages_when_redrive_fails() {
        let mut queue = MockQueue::new();
        queue
            .expect_receive()
            .returning(|_, _, _| Ok(vec![message("1", "stuck", 9)]));
        queue
            .expect_send_batch()
            .returning(|_, _| Err(QueueError::SendFailed));
        queue.expect_delete().never();

        let received = consumer(queue).poll_once().await.unwrap();

        assert_eq!(received, 1);
    }

    #[tokio::test]
    async fn should_propagate_receive_failure() {
        let mut queue = MockQueue::new();
        queue
            .expect_receive()
            .returning(|_, _, _| Err(QueueError::ReceiveFailed));

        let result = consumer(queue).poll_once().await;

        assert!(matches!(result, Err(QueueError::ReceiveFailed)));
    }

    #[tokio::test]
    async fn should_stop_when_shutdown_is_signalled() {
        let mut queue = MockQueue::new();
        queue.expect_receive().returning(|_, _, _| Ok(vec![]));
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(consumer(queue).run(rx));

        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
