use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::listing::{GeographicScope, Listing, ListingStatus, PriceType},
    use_cases::listing::{ListingRepo, ListingUpdate, NewListing},
};

const LISTING_COLUMNS: &str = "id, owner_id, name, price_cents, price_type, status, geographic_scope, category, state_code, city, verification_token, rejection_reason, created_at, updated_at";

fn row_to_listing(row: sqlx::postgres::PgRow) -> Listing {
    Listing {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        price_cents: row.get("price_cents"),
        price_type: PriceType::from_str(row.get("price_type")),
        status: ListingStatus::from_str(row.get("status")),
        geographic_scope: GeographicScope::from_str(row.get("geographic_scope")),
        category: row.get("category"),
        state_code: row.get("state_code"),
        city: row.get("city"),
        verification_token: row.get("verification_token"),
        rejection_reason: row.get("rejection_reason"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl ListingRepo for PostgresPersistence {
    async fn create(&self, owner_id: Uuid, input: &NewListing) -> AppResult<Listing> {
        let id = Uuid::new_v4();
        let row = sqlx::query(&format!(
            r#"
                INSERT INTO listings (id, owner_id, name, price_cents, price_type, status, geographic_scope, category, state_code, city)
                VALUES ($1, $2, $3, $4, $5, 'draft', $6, $7, $8, $9)
                RETURNING {LISTING_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.price_cents)
        .bind(input.price_type.as_str())
        .bind(input.geographic_scope.as_str())
        .bind(&input.category)
        .bind(&input.state_code)
        .bind(&input.city)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_listing(row))
    }

    async fn get_by_id(&self, listing_id: Uuid) -> AppResult<Option<Listing>> {
        let row = sqlx::query(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
        ))
        .bind(listing_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_listing))
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Listing>> {
        let row = sqlx::query(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_listing))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Listing>> {
        let rows = sqlx::query(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_listing).collect())
    }

    async fn list_published(&self) -> AppResult<Vec<Listing>> {
        let rows = sqlx::query(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE status = 'published' ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_listing).collect())
    }

    async fn update_fields(&self, listing_id: Uuid, update: &ListingUpdate) -> AppResult<Listing> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE listings
                SET price_cents = COALESCE($2, price_cents),
                    price_type = COALESCE($3, price_type),
                    geographic_scope = COALESCE($4, geographic_scope),
                    category = COALESCE($5, category),
                    state_code = COALESCE($6, state_code),
                    city = COALESCE($7, city),
                    updated_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {LISTING_COLUMNS}
            "#,
        ))
        .bind(listing_id)
        .bind(update.price_cents)
        .bind(update.price_type.map(|p| p.as_str()))
        .bind(update.geographic_scope.map(|g| g.as_str()))
        .bind(&update.category)
        .bind(&update.state_code)
        .bind(&update.city)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_listing(row))
    }

    async fn set_status(&self, listing_id: Uuid, status: ListingStatus) -> AppResult<Listing> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE listings
                SET status = $2, updated_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {LISTING_COLUMNS}
            "#,
        ))
        .bind(listing_id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_listing(row))
    }

    async fn set_rejected(&self, listing_id: Uuid, reason: &str) -> AppResult<Listing> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE listings
                SET status = 'rejected', rejection_reason = $2, updated_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {LISTING_COLUMNS}
            "#,
        ))
        .bind(listing_id)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_listing(row))
    }

    async fn set_verification_token(&self, listing_id: Uuid, token: &str) -> AppResult<Listing> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE listings
                SET verification_token = $2, updated_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {LISTING_COLUMNS}
            "#,
        ))
        .bind(listing_id)
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_listing(row))
    }

    async fn delete(&self, listing_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(listing_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
