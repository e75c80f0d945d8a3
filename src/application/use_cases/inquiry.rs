use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::auth::AuthContext;
use crate::application::validators::is_valid_email;
use crate::domain::entities::inquiry::{Inquiry, InquiryModerationAction, InquiryStatus};
use crate::domain::entities::listing::ListingStatus;
use crate::use_cases::listing::ListingRepo;

#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub listing_id: Uuid,
    pub buyer_name: String,
    pub buyer_email: String,
    pub buyer_phone: Option<String>,
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
    pub message: String,
}

#[async_trait]
pub trait InquiryRepo: Send + Sync {
    async fn create(&self, buyer_id: Uuid, input: &NewInquiry) -> AppResult<Inquiry>;
    async fn get_by_id(&self, inquiry_id: Uuid) -> AppResult<Option<Inquiry>>;
    async fn list_by_buyer(&self, buyer_id: Uuid) -> AppResult<Vec<Inquiry>>;
    async fn list_approved_by_listing_ids(&self, listing_ids: &[Uuid]) -> AppResult<Vec<Inquiry>>;
    async fn list_pending(&self) -> AppResult<Vec<Inquiry>>;
    async fn set_status(
        &self,
        inquiry_id: Uuid,
        status: InquiryStatus,
        notes: Option<&str>,
    ) -> AppResult<Inquiry>;
    async fn resubmit(&self, inquiry_id: Uuid, message: &str) -> AppResult<Inquiry>;
}

#[derive(Clone)]
pub struct InquiryUseCases {
    inquiries: Arc<dyn InquiryRepo>,
    listings: Arc<dyn ListingRepo>,
}

impl InquiryUseCases {
    pub fn new(inquiries: Arc<dyn InquiryRepo>, listings: Arc<dyn ListingRepo>) -> Self {
        Self {
            inquiries,
            listings,
        }
    }

    /// A buyer opens an inquiry against a published listing. It stays
    /// invisible to the seller until an admin approves it.
    #[instrument(skip(self, input))]
    pub async fn create(&self, ctx: AuthContext, input: NewInquiry) -> AppResult<Inquiry> {
        if !is_valid_email(input.buyer_email.trim()) {
            return Err(AppError::InvalidInput("Invalid email format".into()));
        }
        if input.message.trim().is_empty() {
            return Err(AppError::InvalidInput("Message cannot be empty".into()));
        }

        let listing = self
            .listings
            .get_by_id(input.listing_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if listing.status != ListingStatus::Published {
            return Err(AppError::InvalidState(
                "Listing is not open for inquiries".into(),
            ));
        }
        if listing.owner_id == ctx.user_id {
            return Err(AppError::Forbidden);
        }

        self.inquiries.create(ctx.user_id, &input).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, ctx: AuthContext, inquiry_id: Uuid) -> AppResult<Inquiry> {
        let inquiry = self
            .inquiries
            .get_by_id(inquiry_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if inquiry.buyer_id == ctx.user_id || ctx.role.is_admin() {
            return Ok(inquiry);
        }

        // The seller only ever sees approved inquiries on their own listings.
        let listing = self
            .listings
            .get_by_id(inquiry.listing_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if listing.owner_id == ctx.user_id && inquiry.status == InquiryStatus::Approved {
            return Ok(inquiry);
        }

        Err(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn list_mine(&self, ctx: AuthContext) -> AppResult<Vec<Inquiry>> {
        self.inquiries.list_by_buyer(ctx.user_id).await
    }

    /// Approved inquiries across all of the seller's listings.
    #[instrument(skip(self))]
    pub async fn list_for_seller(&self, ctx: AuthContext) -> AppResult<Vec<Inquiry>> {
        let listings = self.listings.list_by_owner(ctx.user_id).await?;
        let ids: Vec<Uuid> = listings.iter().map(|l| l.id).collect();
        if ids.is_empty() {
            return Ok(vec![]);
        }
        self.inquiries.list_approved_by_listing_ids(&ids).await
    }

    #[instrument(skip(self))]
    pub async fn list_pending(&self, ctx: AuthContext) -> AppResult<Vec<Inquiry>> {
        ctx.require_admin()?;
        self.inquiries.list_pending().await
    }

    /// One-time moderation transition. Approve and Reject are terminal;
    /// RequestChanges hands the inquiry back to the buyer.
    #[instrument(skip(self))]
    pub async fn moderate(
        &self,
        ctx: AuthContext,
        inquiry_id: Uuid,
        action: InquiryModerationAction,
        notes: Option<String>,
    ) -> AppResult<Inquiry> {
        ctx.require_admin()?;

        let inquiry = self
            .inquiries
            .get_by_id(inquiry_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !inquiry.status.is_moderatable() {
            return Err(AppError::InvalidState(format!(
                "Inquiry is not awaiting review (currently {})",
                inquiry.status.as_str()
            )));
        }

        self.inquiries
            .set_status(inquiry.id, action.resulting_status(), notes.as_deref())
            .await
    }

    /// After RequestChanges, the buyer may amend the message and requeue the
    /// inquiry for review.
    #[instrument(skip(self))]
    pub async fn resubmit(
        &self,
        ctx: AuthContext,
        inquiry_id: Uuid,
        message: String,
    ) -> AppResult<Inquiry> {
        let inquiry = self
            .inquiries
            .get_by_id(inquiry_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if inquiry.buyer_id != ctx.user_id {
            return Err(AppError::NotFound);
        }
        if inquiry.status != InquiryStatus::ChangesRequested {
            return Err(AppError::InvalidState(format!(
                "Only inquiries with requested changes can be resubmitted (currently {})",
                inquiry.status.as_str()
            )));
        }
        if message.trim().is_empty() {
            return Err(AppError::InvalidInput("Message cannot be empty".into()));
        }

        self.inquiries.resubmit(inquiry.id, &message).await
    }
}
