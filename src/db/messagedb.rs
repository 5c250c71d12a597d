use async_trait::async_trait;

use super::{error::StorageError, DBClient};
use crate::{dtos::messagedtos::CreateMessageDto, models::messagemodels::Message};

#[async_trait]
pub trait MessageExt: Send + Sync {
    /// Every message the user sent or received.
    async fn get_messages_by_user(&self, user_id: i32) -> Result<Vec<Message>, StorageError>;

    /// The conversation between two users, in either direction.
    async fn get_messages_between_users(
        &self,
        user_one_id: i32,
        user_two_id: i32,
    ) -> Result<Vec<Message>, StorageError>;

    async fn get_messages_by_property(&self, property_id: i32) -> Result<Vec<Message>, StorageError>;

    async fn create_message(&self, message: CreateMessageDto) -> Result<Message, StorageError>;

    /// Idempotent: marking an already read message returns it unchanged.
    async fn mark_message_as_read(&self, message_id: i32) -> Result<Option<Message>, StorageError>;
}

#[async_trait]
impl MessageExt for DBClient {
    async fn get_messages_by_user(&self, user_id: i32) -> Result<Vec<Message>, StorageError> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE sender_id = $1 OR recipient_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn get_messages_between_users(
        &self,
        user_one_id: i32,
        user_two_id: i32,
    ) -> Result<Vec<Message>, StorageError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY id
            "#,
        )
        .bind(user_one_id)
        .bind(user_two_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn get_messages_by_property(&self, property_id: i32) -> Result<Vec<Message>, StorageError> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE property_id = $1 ORDER BY id",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn create_message(&self, message: CreateMessageDto) -> Result<Message, StorageError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (sender_id, recipient_id, property_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(message.sender_id)
        .bind(message.recipient_id)
        .bind(message.property_id)
        .bind(message.content)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            "message {} sent from {} to {}",
            message.id,
            message.sender_id,
            message.recipient_id
        );
        Ok(message)
    }

    async fn mark_message_as_read(&self, message_id: i32) -> Result<Option<Message>, StorageError> {
        let message = sqlx::query_as::<_, Message>(
            "UPDATE messages SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }
}
