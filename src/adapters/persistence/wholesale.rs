use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::wholesale::{WholesaleDomain, WholesaleSale, WholesaleStatus},
    use_cases::wholesale::{NewWholesaleDomain, WholesaleRepo},
};

const WHOLESALE_COLUMNS: &str = "id, owner_id, name, price_cents, status, created_at, updated_at";

fn row_to_domain(row: sqlx::postgres::PgRow) -> WholesaleDomain {
    WholesaleDomain {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        price_cents: row.get("price_cents"),
        status: WholesaleStatus::from_str(row.get("status")),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn row_to_sale(row: sqlx::postgres::PgRow) -> WholesaleSale {
    WholesaleSale {
        id: row.get("id"),
        wholesale_domain_id: row.get("wholesale_domain_id"),
        buyer_id: row.get("buyer_id"),
        price_cents: row.get("price_cents"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl WholesaleRepo for PostgresPersistence {
    async fn create(
        &self,
        owner_id: Uuid,
        input: &NewWholesaleDomain,
    ) -> AppResult<WholesaleDomain> {
        let id = Uuid::new_v4();
        let row = sqlx::query(&format!(
            r#"
                INSERT INTO wholesale_domains (id, owner_id, name, price_cents, status)
                VALUES ($1, $2, $3, $4, 'pending_approval')
                RETURNING {WHOLESALE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.price_cents)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_domain(row))
    }

    async fn get_by_id(&self, domain_id: Uuid) -> AppResult<Option<WholesaleDomain>> {
        let row = sqlx::query(&format!(
            "SELECT {WHOLESALE_COLUMNS} FROM wholesale_domains WHERE id = $1"
        ))
        .bind(domain_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_domain))
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<WholesaleDomain>> {
        let row = sqlx::query(&format!(
            "SELECT {WHOLESALE_COLUMNS} FROM wholesale_domains WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_domain))
    }

    async fn list_active(&self) -> AppResult<Vec<WholesaleDomain>> {
        let rows = sqlx::query(&format!(
            "SELECT {WHOLESALE_COLUMNS} FROM wholesale_domains WHERE status = 'active' ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_domain).collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<WholesaleDomain>> {
        let rows = sqlx::query(&format!(
            "SELECT {WHOLESALE_COLUMNS} FROM wholesale_domains WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_domain).collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<WholesaleDomain>> {
        let rows = sqlx::query(&format!(
            "SELECT {WHOLESALE_COLUMNS} FROM wholesale_domains WHERE status = 'pending_approval' ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_domain).collect())
    }

    async fn set_status(
        &self,
        domain_id: Uuid,
        status: WholesaleStatus,
    ) -> AppResult<WholesaleDomain> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE wholesale_domains
                SET status = $2, updated_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING {WHOLESALE_COLUMNS}
            "#,
        ))
        .bind(domain_id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_domain(row))
    }

    async fn record_sale(
        &self,
        domain_id: Uuid,
        buyer_id: Uuid,
        price_cents: i64,
    ) -> AppResult<WholesaleSale> {
        let id = Uuid::new_v4();
        let row = sqlx::query(
            r#"
                INSERT INTO wholesale_sales (id, wholesale_domain_id, buyer_id, price_cents)
                VALUES ($1, $2, $3, $4)
                RETURNING id, wholesale_domain_id, buyer_id, price_cents, created_at
            "#,
        )
        .bind(id)
        .bind(domain_id)
        .bind(buyer_id)
        .bind(price_cents)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_sale(row))
    }
}
