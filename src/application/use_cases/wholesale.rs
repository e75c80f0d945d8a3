use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::auth::AuthContext;
use crate::application::validators::is_valid_domain_name;
use crate::domain::entities::wholesale::{
    WholesaleDomain, WholesaleModerationAction, WholesaleSale, WholesaleStatus,
};

#[derive(Debug, Clone)]
pub struct NewWholesaleDomain {
    pub name: String,
    pub price_cents: i64,
}

#[async_trait]
pub trait WholesaleRepo: Send + Sync {
    async fn create(&self, owner_id: Uuid, input: &NewWholesaleDomain)
    -> AppResult<WholesaleDomain>;
    async fn get_by_id(&self, domain_id: Uuid) -> AppResult<Option<WholesaleDomain>>;
    async fn get_by_name(&self, name: &str) -> AppResult<Option<WholesaleDomain>>;
    async fn list_active(&self) -> AppResult<Vec<WholesaleDomain>>;
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<WholesaleDomain>>;
    async fn list_pending(&self) -> AppResult<Vec<WholesaleDomain>>;
    async fn set_status(
        &self,
        domain_id: Uuid,
        status: WholesaleStatus,
    ) -> AppResult<WholesaleDomain>;
    async fn record_sale(
        &self,
        domain_id: Uuid,
        buyer_id: Uuid,
        price_cents: i64,
    ) -> AppResult<WholesaleSale>;
}

/// The wholesale pool is feature-flagged; every operation checks the flag
/// before touching state.
#[derive(Clone)]
pub struct WholesaleUseCases {
    repo: Arc<dyn WholesaleRepo>,
    enabled: bool,
}

impl WholesaleUseCases {
    pub fn new(repo: Arc<dyn WholesaleRepo>, enabled: bool) -> Self {
        Self { repo, enabled }
    }

    fn check_enabled(&self) -> AppResult<()> {
        if self.enabled {
            Ok(())
        } else {
            Err(AppError::ServiceUnavailable)
        }
    }

    #[instrument(skip(self))]
    pub async fn submit(
        &self,
        ctx: AuthContext,
        input: NewWholesaleDomain,
    ) -> AppResult<WholesaleDomain> {
        self.check_enabled()?;

        let mut input = input;
        input.name = input.name.trim().to_lowercase();
        if !is_valid_domain_name(&input.name) {
            return Err(AppError::InvalidInput(
                "Wholesale entry must be a registrable domain".into(),
            ));
        }
        if input.price_cents <= 0 {
            return Err(AppError::InvalidInput("Price must be positive".into()));
        }
        if self.repo.get_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(
                "Domain is already in the wholesale pool".into(),
            ));
        }

        self.repo.create(ctx.user_id, &input).await
    }

    /// The public pool; only active entries are browsable.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> AppResult<Vec<WholesaleDomain>> {
        self.check_enabled()?;
        self.repo.list_active().await
    }

    #[instrument(skip(self))]
    pub async fn list_mine(&self, ctx: AuthContext) -> AppResult<Vec<WholesaleDomain>> {
        self.check_enabled()?;
        self.repo.list_by_owner(ctx.user_id).await
    }

    #[instrument(skip(self))]
    pub async fn list_pending(&self, ctx: AuthContext) -> AppResult<Vec<WholesaleDomain>> {
        self.check_enabled()?;
        ctx.require_admin()?;
        self.repo.list_pending().await
    }

    #[instrument(skip(self))]
    pub async fn moderate(
        &self,
        ctx: AuthContext,
        domain_id: Uuid,
        action: WholesaleModerationAction,
    ) -> AppResult<WholesaleDomain> {
        self.check_enabled()?;
        ctx.require_admin()?;

        let domain = self
            .repo
            .get_by_id(domain_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let next = match action {
            WholesaleModerationAction::Approve => WholesaleStatus::Active,
            WholesaleModerationAction::Remove => WholesaleStatus::Removed,
        };
        if !domain.status.can_transition_to(next) {
            return Err(AppError::InvalidState(format!(
                "Wholesale entry cannot move from {} to {}",
                domain.status.as_str(),
                next.as_str()
            )));
        }

        self.repo.set_status(domain.id, next).await
    }

    /// The owner may withdraw a non-terminal entry at any time.
    #[instrument(skip(self))]
    pub async fn withdraw(&self, ctx: AuthContext, domain_id: Uuid) -> AppResult<WholesaleDomain> {
        self.check_enabled()?;

        let domain = self
            .repo
            .get_by_id(domain_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if domain.owner_id != ctx.user_id && !ctx.role.is_admin() {
            return Err(AppError::NotFound);
        }
        if !domain.status.can_transition_to(WholesaleStatus::Removed) {
            return Err(AppError::InvalidState(format!(
                "Wholesale entry is already {}",
                domain.status.as_str()
            )));
        }

        self.repo.set_status(domain.id, WholesaleStatus::Removed).await
    }

    /// Instant fixed-price purchase: the first buyer wins and the entry goes
    /// straight to sold.
    #[instrument(skip(self))]
    pub async fn purchase(
        &self,
        ctx: AuthContext,
        domain_id: Uuid,
    ) -> AppResult<(WholesaleSale, WholesaleDomain)> {
        self.check_enabled()?;

        let domain = self
            .repo
            .get_by_id(domain_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if domain.owner_id == ctx.user_id {
            return Err(AppError::Forbidden);
        }
        if domain.status != WholesaleStatus::Active {
            return Err(AppError::InvalidState(format!(
                "Wholesale entry is not for sale (currently {})",
                domain.status.as_str()
            )));
        }

        let sale = self
            .repo
            .record_sale(domain.id, ctx.user_id, domain.price_cents)
            .await?;
        let domain = self.repo.set_status(domain.id, WholesaleStatus::Sold).await?;

        Ok((sale, domain))
    }
}
