use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::message::{Message, MessageStatus},
    use_cases::message::MessageRepo,
};

const MESSAGE_COLUMNS: &str = "id, inquiry_id, sender_id, content, status, original_content, moderated_by, created_at, moderated_at";

fn row_to_message(row: sqlx::postgres::PgRow) -> Message {
    Message {
        id: row.get("id"),
        inquiry_id: row.get("inquiry_id"),
        sender_id: row.get("sender_id"),
        content: row.get("content"),
        status: MessageStatus::from_str(row.get("status")),
        original_content: row.get("original_content"),
        moderated_by: row.get("moderated_by"),
        created_at: row.get("created_at"),
        moderated_at: row.get("moderated_at"),
    }
}

#[async_trait]
impl MessageRepo for PostgresPersistence {
    async fn create(
        &self,
        inquiry_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> AppResult<Message> {
        let id = Uuid::new_v4();
        let row = sqlx::query(&format!(
            r#"
                INSERT INTO messages (id, inquiry_id, sender_id, content, status)
                VALUES ($1, $2, $3, $4, 'pending')
                RETURNING {MESSAGE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(inquiry_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_message(row))
    }

    async fn get_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>> {
        let row = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_message))
    }

    async fn list_for_inquiry(&self, inquiry_id: Uuid) -> AppResult<Vec<Message>> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE inquiry_id = $1 ORDER BY created_at ASC"
        ))
        .bind(inquiry_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_message).collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<Message>> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE status = 'pending' ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_message).collect())
    }

    async fn moderate(
        &self,
        message_id: Uuid,
        status: MessageStatus,
        content: Option<&str>,
        original_content: Option<&str>,
        moderated_by: Uuid,
    ) -> AppResult<Message> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE messages
                SET status = $2,
                    content = COALESCE($3, content),
                    original_content = COALESCE($4, original_content),
                    moderated_by = $5,
                    moderated_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {MESSAGE_COLUMNS}
            "#,
        ))
        .bind(message_id)
        .bind(status.as_str())
        .bind(content)
        .bind(original_content)
        .bind(moderated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_message(row))
    }
}
