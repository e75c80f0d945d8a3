use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::inquiry::{Inquiry, InquiryStatus},
    use_cases::inquiry::{InquiryRepo, NewInquiry},
    use_cases::listing::ListingInquiryCount,
};

const INQUIRY_COLUMNS: &str = "id, listing_id, buyer_id, buyer_name, buyer_email, buyer_phone, budget_range, timeline, message, status, moderation_notes, created_at, updated_at";

fn row_to_inquiry(row: sqlx::postgres::PgRow) -> Inquiry {
    Inquiry {
        id: row.get("id"),
        listing_id: row.get("listing_id"),
        buyer_id: row.get("buyer_id"),
        buyer_name: row.get("buyer_name"),
        buyer_email: row.get("buyer_email"),
        buyer_phone: row.get("buyer_phone"),
        budget_range: row.get("budget_range"),
        timeline: row.get("timeline"),
        message: row.get("message"),
        status: InquiryStatus::from_str(row.get("status")),
        moderation_notes: row.get("moderation_notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl InquiryRepo for PostgresPersistence {
    async fn create(&self, buyer_id: Uuid, input: &NewInquiry) -> AppResult<Inquiry> {
        let id = Uuid::new_v4();
        let row = sqlx::query(&format!(
            r#"
                INSERT INTO inquiries (id, listing_id, buyer_id, buyer_name, buyer_email, buyer_phone, budget_range, timeline, message, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending_review')
                RETURNING {INQUIRY_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(input.listing_id)
        .bind(buyer_id)
        .bind(&input.buyer_name)
        .bind(&input.buyer_email)
        .bind(&input.buyer_phone)
        .bind(&input.budget_range)
        .bind(&input.timeline)
        .bind(&input.message)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_inquiry(row))
    }

    async fn get_by_id(&self, inquiry_id: Uuid) -> AppResult<Option<Inquiry>> {
        let row = sqlx::query(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE id = $1"
        ))
        .bind(inquiry_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_inquiry))
    }

    async fn list_by_buyer(&self, buyer_id: Uuid) -> AppResult<Vec<Inquiry>> {
        let rows = sqlx::query(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE buyer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_inquiry).collect())
    }

    async fn list_approved_by_listing_ids(&self, listing_ids: &[Uuid]) -> AppResult<Vec<Inquiry>> {
        let rows = sqlx::query(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE listing_id = ANY($1) AND status = 'approved' ORDER BY created_at DESC"
        ))
        .bind(listing_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_inquiry).collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<Inquiry>> {
        let rows = sqlx::query(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE status = 'pending_review' ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_inquiry).collect())
    }

    async fn set_status(
        &self,
        inquiry_id: Uuid,
        status: InquiryStatus,
        notes: Option<&str>,
    ) -> AppResult<Inquiry> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE inquiries
                SET status = $2, moderation_notes = $3, updated_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {INQUIRY_COLUMNS}
            "#,
        ))
        .bind(inquiry_id)
        .bind(status.as_str())
        .bind(notes)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_inquiry(row))
    }

    async fn resubmit(&self, inquiry_id: Uuid, message: &str) -> AppResult<Inquiry> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE inquiries
                SET message = $2, status = 'pending_review', updated_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {INQUIRY_COLUMNS}
            "#,
        ))
        .bind(inquiry_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_inquiry(row))
    }
}

#[async_trait]
impl ListingInquiryCount for PostgresPersistence {
    async fn count_for_listing(&self, listing_id: Uuid) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM inquiries WHERE listing_id = $1")
            .bind(listing_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(row.get("count"))
    }
}
