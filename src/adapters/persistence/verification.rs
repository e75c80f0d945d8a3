use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::verification::{AttemptStatus, VerificationAttempt, VerificationMethod},
    use_cases::verification::VerificationAttemptRepo,
};

const ATTEMPT_COLUMNS: &str = "id, listing_id, method, token, file_url, status, moderation_notes, resolved_by, created_at, resolved_at";

fn row_to_attempt(row: sqlx::postgres::PgRow) -> VerificationAttempt {
    VerificationAttempt {
        id: row.get("id"),
        listing_id: row.get("listing_id"),
        method: VerificationMethod::from_str(row.get("method")),
        token: row.get("token"),
        file_url: row.get("file_url"),
        status: AttemptStatus::from_str(row.get("status")),
        moderation_notes: row.get("moderation_notes"),
        resolved_by: row.get("resolved_by"),
        created_at: row.get("created_at"),
        resolved_at: row.get("resolved_at"),
    }
}

#[async_trait]
impl VerificationAttemptRepo for PostgresPersistence {
    async fn create(
        &self,
        listing_id: Uuid,
        method: VerificationMethod,
        token: &str,
        file_url: Option<&str>,
    ) -> AppResult<VerificationAttempt> {
        let id = Uuid::new_v4();
        let row = sqlx::query(&format!(
            r#"
                INSERT INTO verification_attempts (id, listing_id, method, token, file_url, status)
                VALUES ($1, $2, $3, $4, $5, 'pending')
                RETURNING {ATTEMPT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(listing_id)
        .bind(method.as_str())
        .bind(token)
        .bind(file_url)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_attempt(row))
    }

    async fn get_by_id(&self, attempt_id: Uuid) -> AppResult<Option<VerificationAttempt>> {
        let row = sqlx::query(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM verification_attempts WHERE id = $1"
        ))
        .bind(attempt_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_attempt))
    }

    async fn get_pending_for_listing(
        &self,
        listing_id: Uuid,
    ) -> AppResult<Option<VerificationAttempt>> {
        let row = sqlx::query(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM verification_attempts WHERE listing_id = $1 AND status = 'pending'"
        ))
        .bind(listing_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_attempt))
    }

    async fn list_pending(&self) -> AppResult<Vec<VerificationAttempt>> {
        let rows = sqlx::query(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM verification_attempts WHERE status = 'pending' ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_attempt).collect())
    }

    async fn resolve(
        &self,
        attempt_id: Uuid,
        status: AttemptStatus,
        notes: Option<&str>,
        resolved_by: Uuid,
    ) -> AppResult<VerificationAttempt> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE verification_attempts
                SET status = $2, moderation_notes = $3, resolved_by = $4, resolved_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {ATTEMPT_COLUMNS}
            "#,
        ))
        .bind(attempt_id)
        .bind(status.as_str())
        .bind(notes)
        .bind(resolved_by)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_attempt(row))
    }
}
