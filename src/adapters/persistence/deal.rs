use std::str::FromStr;

use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::deal::{Deal, DealStatus, PaymentMethod},
    use_cases::deal::{DealRepo, NewDeal},
};

const DEAL_COLUMNS: &str = "id, inquiry_id, listing_id, buyer_id, seller_id, agreed_price_cents, currency, payment_method, status, agreed_at, payment_pending_at, payment_confirmed_at, transfer_initiated_at, completed_at, disputed_at, created_at, updated_at";

fn row_to_deal(row: sqlx::postgres::PgRow) -> Deal {
    Deal {
        id: row.get("id"),
        inquiry_id: row.get("inquiry_id"),
        listing_id: row.get("listing_id"),
        buyer_id: row.get("buyer_id"),
        seller_id: row.get("seller_id"),
        agreed_price_cents: row.get("agreed_price_cents"),
        currency: row.get("currency"),
        payment_method: PaymentMethod::from_str(row.get("payment_method"))
            .unwrap_or(PaymentMethod::Other),
        status: DealStatus::from_str(row.get("status")).unwrap_or(DealStatus::Negotiating),
        agreed_at: row.get("agreed_at"),
        payment_pending_at: row.get("payment_pending_at"),
        payment_confirmed_at: row.get("payment_confirmed_at"),
        transfer_initiated_at: row.get("transfer_initiated_at"),
        completed_at: row.get("completed_at"),
        disputed_at: row.get("disputed_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Column recording when the deal entered the given status, if any.
fn status_timestamp_column(status: DealStatus) -> Option<&'static str> {
    match status {
        DealStatus::Agreed => Some("agreed_at"),
        DealStatus::PaymentPending => Some("payment_pending_at"),
        DealStatus::PaymentConfirmed => Some("payment_confirmed_at"),
        DealStatus::TransferInitiated => Some("transfer_initiated_at"),
        DealStatus::Completed => Some("completed_at"),
        DealStatus::Disputed => Some("disputed_at"),
        DealStatus::Negotiating => None,
    }
}

#[async_trait]
impl DealRepo for PostgresPersistence {
    async fn create(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
        seller_id: Uuid,
        input: &NewDeal,
    ) -> AppResult<Deal> {
        let id = Uuid::new_v4();
        // inquiry_id carries a unique constraint; a duplicate surfaces as Conflict.
        let row = sqlx::query(&format!(
            r#"
                INSERT INTO deals (id, inquiry_id, listing_id, buyer_id, seller_id, agreed_price_cents, currency, payment_method, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'negotiating')
                RETURNING {DEAL_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(input.inquiry_id)
        .bind(listing_id)
        .bind(buyer_id)
        .bind(seller_id)
        .bind(input.agreed_price_cents)
        .bind(&input.currency)
        .bind(input.payment_method.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_deal(row))
    }

    async fn get_by_id(&self, deal_id: Uuid) -> AppResult<Option<Deal>> {
        let row = sqlx::query(&format!("SELECT {DEAL_COLUMNS} FROM deals WHERE id = $1"))
            .bind(deal_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(row.map(row_to_deal))
    }

    async fn get_by_inquiry(&self, inquiry_id: Uuid) -> AppResult<Option<Deal>> {
        let row = sqlx::query(&format!(
            "SELECT {DEAL_COLUMNS} FROM deals WHERE inquiry_id = $1"
        ))
        .bind(inquiry_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_deal))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Deal>> {
        let rows = sqlx::query(&format!(
            "SELECT {DEAL_COLUMNS} FROM deals WHERE buyer_id = $1 OR seller_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_deal).collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Deal>> {
        let rows = sqlx::query(&format!(
            "SELECT {DEAL_COLUMNS} FROM deals ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_deal).collect())
    }

    async fn set_status(&self, deal_id: Uuid, status: DealStatus) -> AppResult<Deal> {
        let query = match status_timestamp_column(status) {
            Some(column) => format!(
                r#"
                    UPDATE deals
                    SET status = $2, {column} = CURRENT_TIMESTAMP, updated_at = CURRENT_TIMESTAMP
                    WHERE id = $1
                    RETURNING {DEAL_COLUMNS}
                "#,
            ),
            None => format!(
                r#"
                    UPDATE deals
                    SET status = $2, updated_at = CURRENT_TIMESTAMP
                    WHERE id = $1
                    RETURNING {DEAL_COLUMNS}
                "#,
            ),
        };
        let row = sqlx::query(&query)
            .bind(deal_id)
            .bind(status.as_ref())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(row_to_deal(row))
    }
}
