use std::str::FromStr;

use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::payment::{Payment, PaymentStatus},
    use_cases::deal::{NewPaymentProof, PaymentRepo},
};

const PAYMENT_COLUMNS: &str = "id, deal_id, submitted_by, amount_cents, currency, proof_url, status, review_notes, reviewed_by, created_at, reviewed_at";

fn row_to_payment(row: sqlx::postgres::PgRow) -> Payment {
    Payment {
        id: row.get("id"),
        deal_id: row.get("deal_id"),
        submitted_by: row.get("submitted_by"),
        amount_cents: row.get("amount_cents"),
        currency: row.get("currency"),
        proof_url: row.get("proof_url"),
        status: PaymentStatus::from_str(row.get("status")).unwrap_or(PaymentStatus::Pending),
        review_notes: row.get("review_notes"),
        reviewed_by: row.get("reviewed_by"),
        created_at: row.get("created_at"),
        reviewed_at: row.get("reviewed_at"),
    }
}

#[async_trait]
impl PaymentRepo for PostgresPersistence {
    async fn create(
        &self,
        deal_id: Uuid,
        submitted_by: Uuid,
        input: &NewPaymentProof,
    ) -> AppResult<Payment> {
        let id = Uuid::new_v4();
        let row = sqlx::query(&format!(
            r#"
                INSERT INTO payments (id, deal_id, submitted_by, amount_cents, currency, proof_url, status)
                VALUES ($1, $2, $3, $4, $5, $6, 'pending')
                RETURNING {PAYMENT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(deal_id)
        .bind(submitted_by)
        .bind(input.amount_cents)
        .bind(&input.currency)
        .bind(&input.proof_url)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_payment(row))
    }

    async fn get_by_id(&self, payment_id: Uuid) -> AppResult<Option<Payment>> {
        let row = sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_payment))
    }

    async fn get_pending_for_deal(&self, deal_id: Uuid) -> AppResult<Option<Payment>> {
        let row = sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE deal_id = $1 AND status = 'pending'"
        ))
        .bind(deal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_payment))
    }

    async fn list_for_deal(&self, deal_id: Uuid) -> AppResult<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE deal_id = $1 ORDER BY created_at DESC"
        ))
        .bind(deal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_payment).collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE status = 'pending' ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_payment).collect())
    }

    async fn resolve(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
        notes: Option<&str>,
        reviewed_by: Uuid,
    ) -> AppResult<Payment> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE payments
                SET status = $2, review_notes = $3, reviewed_by = $4, reviewed_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {PAYMENT_COLUMNS}
            "#,
        ))
        .bind(payment_id)
        .bind(status.as_ref())
        .bind(notes)
        .bind(reviewed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_payment(row))
    }
}
