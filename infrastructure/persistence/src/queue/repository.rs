use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::batch::model::QueueMessage;
use business::domain::batch::queue::MessageQueue;
use business::domain::errors::QueueError;

use super::entity::QueueMessageEntity;

/// Message queue on top of the `queue_messages` table.
///
/// Receiving a message hides it until its visibility timeout expires; a
/// message that is not deleted before then is handed out again.
pub struct MessageQueuePostgres {
    pool: PgPool,
}

impl MessageQueuePostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const INSERT_MESSAGE: &str = "INSERT INTO queue_messages (id, queue, body) VALUES ($1, $2, $3)";

#[async_trait]
impl MessageQueue for MessageQueuePostgres {
    async fn send(&self, queue: &str, body: &str) -> Result<(), QueueError> {
        sqlx::query(INSERT_MESSAGE)
            .bind(Uuid::new_v4())
            .bind(queue)
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("send to {} failed: {}", queue, e);
                QueueError::SendFailed
            })?;

        Ok(())
    }

    async fn send_batch(&self, queue: &str, bodies: &[String]) -> Result<(), QueueError> {
        let send_failed = |e: sqlx::Error| {
            tracing::error!("batch send to {} failed: {}", queue, e);
            QueueError::SendFailed
        };

        let mut tx = self.pool.begin().await.map_err(send_failed)?;
        for body in bodies {
            sqlx::query(INSERT_MESSAGE)
                .bind(Uuid::new_v4())
                .bind(queue)
                .bind(body)
                .execute(&mut *tx)
                .await
                .map_err(send_failed)?;
        }
        tx.commit().await.map_err(send_failed)?;

        Ok(())
    }

    async fn receive(
        &self,
        queue: &str,
        max_messages: u32,
        visibility_timeout: Duration,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        let entities = sqlx::query_as::<_, QueueMessageEntity>(
            r#"UPDATE queue_messages
            SET visible_at = now() + make_interval(secs => $3),
                receive_count = receive_count + 1
            WHERE id IN (
                SELECT id FROM queue_messages
                WHERE queue = $1 AND visible_at <= now()
                ORDER BY created_at
                LIMIT $2
                FOR UPDATE SKIP LOCKED
            )
            RETURNING id, body, receive_count"#,
        )
        .bind(queue)
        .bind(i64::from(max_messages))
        .bind(visibility_timeout.as_secs_f64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("receive from {} failed: {}", queue, e);
            QueueError::ReceiveFailed
        })?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn delete(&self, queue: &str, ids: &[String]) -> Result<(), QueueError> {
        if ids.is_empty() {
            return Ok(());
        }

        let ids = ids
            .iter()
            .map(|id| Uuid::parse_str(id))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| QueueError::DeleteFailed)?;

        sqlx::query("DELETE FROM queue_messages WHERE queue = $1 AND id = ANY($2)")
            .bind(queue)
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("delete from {} failed: {}", queue, e);
                QueueError::DeleteFailed
            })?;

        Ok(())
    }
}
