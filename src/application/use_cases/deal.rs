use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::auth::AuthContext;
use crate::domain::entities::deal::{Deal, DealStatus, PaymentMethod};
use crate::domain::entities::inquiry::InquiryStatus;
use crate::domain::entities::payment::{Payment, PaymentReviewAction, PaymentStatus};
use crate::use_cases::inquiry::InquiryRepo;
use crate::use_cases::listing::ListingRepo;

#[derive(Debug, Clone)]
pub struct NewDeal {
    pub inquiry_id: Uuid,
    pub agreed_price_cents: i64,
    pub currency: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone)]
pub struct NewPaymentProof {
    pub amount_cents: i64,
    pub currency: String,
    pub proof_url: String,
}

#[async_trait]
pub trait DealRepo: Send + Sync {
    async fn create(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
        seller_id: Uuid,
        input: &NewDeal,
    ) -> AppResult<Deal>;
    async fn get_by_id(&self, deal_id: Uuid) -> AppResult<Option<Deal>>;
    async fn get_by_inquiry(&self, inquiry_id: Uuid) -> AppResult<Option<Deal>>;
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Deal>>;
    async fn list_all(&self) -> AppResult<Vec<Deal>>;
    async fn set_status(&self, deal_id: Uuid, status: DealStatus) -> AppResult<Deal>;
}

#[async_trait]
pub trait PaymentRepo: Send + Sync {
    async fn create(
        &self,
        deal_id: Uuid,
        submitted_by: Uuid,
        input: &NewPaymentProof,
    ) -> AppResult<Payment>;
    async fn get_by_id(&self, payment_id: Uuid) -> AppResult<Option<Payment>>;
    async fn get_pending_for_deal(&self, deal_id: Uuid) -> AppResult<Option<Payment>>;
    async fn list_for_deal(&self, deal_id: Uuid) -> AppResult<Vec<Payment>>;
    async fn list_pending(&self) -> AppResult<Vec<Payment>>;
    async fn resolve(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
        notes: Option<&str>,
        reviewed_by: Uuid,
    ) -> AppResult<Payment>;
}

#[derive(Clone)]
pub struct DealUseCases {
    deals: Arc<dyn DealRepo>,
    payments: Arc<dyn PaymentRepo>,
    inquiries: Arc<dyn InquiryRepo>,
    listings: Arc<dyn ListingRepo>,
}

impl DealUseCases {
    pub fn new(
        deals: Arc<dyn DealRepo>,
        payments: Arc<dyn PaymentRepo>,
        inquiries: Arc<dyn InquiryRepo>,
        listings: Arc<dyn ListingRepo>,
    ) -> Self {
        Self {
            deals,
            payments,
            inquiries,
            listings,
        }
    }

    /// The seller opens a deal out of an approved inquiry on their listing.
    /// At most one deal per inquiry.
    #[instrument(skip(self, input))]
    pub async fn create_from_inquiry(&self, ctx: AuthContext, input: NewDeal) -> AppResult<Deal> {
        if input.agreed_price_cents <= 0 {
            return Err(AppError::InvalidInput("Price must be positive".into()));
        }

        let inquiry = self
            .inquiries
            .get_by_id(input.inquiry_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let listing = self
            .listings
            .get_by_id(inquiry.listing_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if listing.owner_id != ctx.user_id {
            return Err(AppError::NotFound);
        }
        if inquiry.status != InquiryStatus::Approved {
            return Err(AppError::InvalidState(
                "A deal can only be opened from an approved inquiry".into(),
            ));
        }
        if self.deals.get_by_inquiry(inquiry.id).await?.is_some() {
            return Err(AppError::Conflict(
                "A deal already exists for this inquiry".into(),
            ));
        }

        self.deals
            .create(listing.id, inquiry.buyer_id, listing.owner_id, &input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, ctx: AuthContext, deal_id: Uuid) -> AppResult<Deal> {
        let deal = self
            .deals
            .get_by_id(deal_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !deal.is_party(ctx.user_id) && !ctx.role.is_admin() {
            return Err(AppError::NotFound);
        }
        Ok(deal)
    }

    #[instrument(skip(self))]
    pub async fn list_mine(&self, ctx: AuthContext) -> AppResult<Vec<Deal>> {
        self.deals.list_for_user(ctx.user_id).await
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self, ctx: AuthContext) -> AppResult<Vec<Deal>> {
        ctx.require_admin()?;
        self.deals.list_all().await
    }

    /// Single-step advance along the lifecycle, or into Disputed from any
    /// non-terminal state. Either party may move the deal; PaymentConfirmed
    /// is reserved for payment review.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        ctx: AuthContext,
        deal_id: Uuid,
        next: DealStatus,
    ) -> AppResult<Deal> {
        let deal = self.get(ctx, deal_id).await?;

        if next == DealStatus::PaymentConfirmed && !ctx.role.is_admin() {
            return Err(AppError::InvalidState(
                "Payment confirmation happens through payment review".into(),
            ));
        }
        if !deal.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(
                deal.status.as_ref(),
                next.as_ref(),
            ));
        }

        let updated = self.deals.set_status(deal.id, next).await?;

        // Closing the deal also closes out the listing, where that move is
        // still legal.
        if next == DealStatus::Completed
            && let Some(listing) = self.listings.get_by_id(deal.listing_id).await?
            && listing
                .status
                .can_transition_to(crate::domain::entities::listing::ListingStatus::Sold)
        {
            self.listings
                .set_status(listing.id, crate::domain::entities::listing::ListingStatus::Sold)
                .await?;
        }

        Ok(updated)
    }

    /// The buyer attaches proof of payment while the deal waits on it. Only
    /// one proof may be under review at a time.
    #[instrument(skip(self, input))]
    pub async fn submit_payment_proof(
        &self,
        ctx: AuthContext,
        deal_id: Uuid,
        input: NewPaymentProof,
    ) -> AppResult<Payment> {
        if input.amount_cents <= 0 {
            return Err(AppError::InvalidInput("Amount must be positive".into()));
        }

        let deal = self.get(ctx, deal_id).await?;
        if deal.buyer_id != ctx.user_id {
            return Err(AppError::Forbidden);
        }
        if deal.status != DealStatus::PaymentPending {
            return Err(AppError::InvalidState(format!(
                "Deal is not awaiting payment (currently {})",
                deal.status.as_ref()
            )));
        }
        if self.payments.get_pending_for_deal(deal.id).await?.is_some() {
            return Err(AppError::Conflict(
                "A payment proof is already under review for this deal".into(),
            ));
        }

        self.payments.create(deal.id, ctx.user_id, &input).await
    }

    #[instrument(skip(self))]
    pub async fn list_payments(&self, ctx: AuthContext, deal_id: Uuid) -> AppResult<Vec<Payment>> {
        let deal = self.get(ctx, deal_id).await?;
        self.payments.list_for_deal(deal.id).await
    }

    #[instrument(skip(self))]
    pub async fn list_pending_payments(&self, ctx: AuthContext) -> AppResult<Vec<Payment>> {
        ctx.require_admin()?;
        self.payments.list_pending().await
    }

    /// Admin verdict on a submitted proof. Confirm advances the deal to
    /// PaymentConfirmed; Fail leaves the deal in PaymentPending so the buyer
    /// can submit again.
    #[instrument(skip(self))]
    pub async fn review_payment(
        &self,
        ctx: AuthContext,
        payment_id: Uuid,
        action: PaymentReviewAction,
        notes: Option<String>,
    ) -> AppResult<(Payment, Deal)> {
        ctx.require_admin()?;

        let payment = self
            .payments
            .get_by_id(payment_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if payment.status.is_resolved() {
            return Err(AppError::InvalidState(format!(
                "Payment has already been reviewed ({})",
                payment.status.as_ref()
            )));
        }
        let deal = self
            .deals
            .get_by_id(payment.deal_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let deal = match action {
            PaymentReviewAction::Confirm => {
                if !deal.status.can_transition_to(DealStatus::PaymentConfirmed) {
                    return Err(AppError::invalid_transition(
                        deal.status.as_ref(),
                        DealStatus::PaymentConfirmed.as_ref(),
                    ));
                }
                self.deals
                    .set_status(deal.id, DealStatus::PaymentConfirmed)
                    .await?
            }
            PaymentReviewAction::Fail => deal,
        };

        let status = match action {
            PaymentReviewAction::Confirm => PaymentStatus::Confirmed,
            PaymentReviewAction::Fail => PaymentStatus::Failed,
        };
        let payment = self
            .payments
            .resolve(payment.id, status, notes.as_deref(), ctx.user_id)
            .await?;

        Ok((payment, deal))
    }
}
