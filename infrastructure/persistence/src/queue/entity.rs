use sqlx::FromRow;
use uuid::Uuid;

use business::domain::batch::model::QueueMessage;

#[derive(Debug, FromRow)]
pub struct QueueMessageEntity {
    pub id: Uuid,
    pub body: String,
    pub receive_count: i32,
}

impl QueueMessageEntity {
    pub fn into_domain(self) -> QueueMessage {
        QueueMessage {
            id: self.id.to_string(),
            body: self.body,
            receive_count: u32::try_from(self.receive_count).unwrap_or_default(),
        }
    }
}
