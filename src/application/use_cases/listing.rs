use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::auth::AuthContext;
use crate::application::validators::is_valid_domain_name;
use crate::domain::entities::listing::{GeographicScope, Listing, ListingStatus, PriceType};

#[derive(Debug, Clone)]
pub struct NewListing {
    pub name: String,
    pub price_cents: i64,
    pub price_type: PriceType,
    pub geographic_scope: GeographicScope,
    pub category: Option<String>,
    pub state_code: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListingUpdate {
    pub price_cents: Option<i64>,
    pub price_type: Option<PriceType>,
    pub geographic_scope: Option<GeographicScope>,
    pub category: Option<String>,
    pub state_code: Option<String>,
    pub city: Option<String>,
}

#[async_trait]
pub trait ListingRepo: Send + Sync {
    async fn create(&self, owner_id: Uuid, input: &NewListing) -> AppResult<Listing>;
    async fn get_by_id(&self, listing_id: Uuid) -> AppResult<Option<Listing>>;
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Listing>>;
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Listing>>;
    async fn list_published(&self) -> AppResult<Vec<Listing>>;
    async fn update_fields(&self, listing_id: Uuid, update: &ListingUpdate) -> AppResult<Listing>;
    async fn set_status(&self, listing_id: Uuid, status: ListingStatus) -> AppResult<Listing>;
    async fn set_rejected(&self, listing_id: Uuid, reason: &str) -> AppResult<Listing>;
    async fn set_verification_token(&self, listing_id: Uuid, token: &str) -> AppResult<Listing>;
    async fn delete(&self, listing_id: Uuid) -> AppResult<()>;
}

/// Inquiry count lookup used by the deletion guard; implemented by the
/// inquiry persistence adapter.
#[async_trait]
pub trait ListingInquiryCount: Send + Sync {
    async fn count_for_listing(&self, listing_id: Uuid) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct ListingUseCases {
    repo: Arc<dyn ListingRepo>,
    inquiry_counts: Arc<dyn ListingInquiryCount>,
}

impl ListingUseCases {
    pub fn new(repo: Arc<dyn ListingRepo>, inquiry_counts: Arc<dyn ListingInquiryCount>) -> Self {
        Self {
            repo,
            inquiry_counts,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_draft(&self, ctx: AuthContext, input: NewListing) -> AppResult<Listing> {
        let mut input = input;
        input.name = input.name.trim().to_lowercase();

        if !is_valid_domain_name(&input.name) {
            return Err(AppError::InvalidInput(
                "Listing name must be a registrable domain (e.g., miami-homes.com)".into(),
            ));
        }
        if input.price_cents <= 0 {
            return Err(AppError::InvalidInput("Price must be positive".into()));
        }
        if self.repo.get_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict("Domain is already listed".into()));
        }

        self.repo.create(ctx.user_id, &input).await
    }

    #[instrument(skip(self))]
    pub async fn get_owned(&self, ctx: AuthContext, listing_id: Uuid) -> AppResult<Listing> {
        let listing = self
            .repo
            .get_by_id(listing_id)
            .await?
            .ok_or(AppError::NotFound)?;
        // Missing ownership presents as NotFound, same as a missing row.
        if listing.owner_id != ctx.user_id && !ctx.role.is_admin() {
            return Err(AppError::NotFound);
        }
        Ok(listing)
    }

    #[instrument(skip(self))]
    pub async fn list_mine(&self, ctx: AuthContext) -> AppResult<Vec<Listing>> {
        self.repo.list_by_owner(ctx.user_id).await
    }

    #[instrument(skip(self))]
    pub async fn list_published(&self) -> AppResult<Vec<Listing>> {
        self.repo.list_published().await
    }

    /// Field edits are only allowed while the listing is a draft.
    #[instrument(skip(self))]
    pub async fn update_draft(
        &self,
        ctx: AuthContext,
        listing_id: Uuid,
        update: ListingUpdate,
    ) -> AppResult<Listing> {
        let listing = self.get_owned(ctx, listing_id).await?;
        if listing.status != ListingStatus::Draft {
            return Err(AppError::InvalidState(format!(
                "Listing can only be edited while in draft (currently {})",
                listing.status.as_str()
            )));
        }
        if let Some(price) = update.price_cents
            && price <= 0
        {
            return Err(AppError::InvalidInput("Price must be positive".into()));
        }
        self.repo.update_fields(listing.id, &update).await
    }

    #[instrument(skip(self))]
    pub async fn submit_for_verification(
        &self,
        ctx: AuthContext,
        listing_id: Uuid,
    ) -> AppResult<Listing> {
        self.transition(ctx, listing_id, ListingStatus::PendingVerification)
            .await
    }

    #[instrument(skip(self))]
    pub async fn publish(&self, ctx: AuthContext, listing_id: Uuid) -> AppResult<Listing> {
        self.transition(ctx, listing_id, ListingStatus::Published)
            .await
    }

    #[instrument(skip(self))]
    pub async fn pause(&self, ctx: AuthContext, listing_id: Uuid) -> AppResult<Listing> {
        self.transition(ctx, listing_id, ListingStatus::Paused)
            .await
    }

    #[instrument(skip(self))]
    pub async fn mark_sold(&self, ctx: AuthContext, listing_id: Uuid) -> AppResult<Listing> {
        self.transition(ctx, listing_id, ListingStatus::Sold).await
    }

    /// A rejected listing goes back to draft for another round of edits and
    /// resubmission.
    #[instrument(skip(self))]
    pub async fn resubmit(&self, ctx: AuthContext, listing_id: Uuid) -> AppResult<Listing> {
        self.transition(ctx, listing_id, ListingStatus::Draft).await
    }

    /// Listings that have received inquiries are never hard-deleted; pausing
    /// is the only removal path for them.
    #[instrument(skip(self))]
    pub async fn delete(&self, ctx: AuthContext, listing_id: Uuid) -> AppResult<()> {
        let listing = self.get_owned(ctx, listing_id).await?;
        let inquiries = self.inquiry_counts.count_for_listing(listing.id).await?;
        if inquiries > 0 {
            return Err(AppError::Conflict(
                "Listing has inquiries and cannot be deleted; pause it instead".into(),
            ));
        }
        self.repo.delete(listing.id).await
    }

    async fn transition(
        &self,
        ctx: AuthContext,
        listing_id: Uuid,
        next: ListingStatus,
    ) -> AppResult<Listing> {
        let listing = self.get_owned(ctx, listing_id).await?;
        if !listing.status.can_transition_to(next) {
            return Err(AppError::InvalidState(format!(
                "Listing cannot move from {} to {}",
                listing.status.as_str(),
                next.as_str()
            )));
        }
        self.repo.set_status(listing.id, next).await
    }
}
