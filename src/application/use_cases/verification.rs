use std::sync::Arc;

use async_trait::async_trait;
use rand::RngCore;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::auth::AuthContext;
use crate::domain::entities::listing::{Listing, ListingStatus};
use crate::domain::entities::verification::{
    AttemptStatus, VerificationAttempt, VerificationMethod, VerificationModerationAction,
};
use crate::use_cases::listing::ListingRepo;

#[async_trait]
pub trait VerificationAttemptRepo: Send + Sync {
    async fn create(
        &self,
        listing_id: Uuid,
        method: VerificationMethod,
        token: &str,
        file_url: Option<&str>,
    ) -> AppResult<VerificationAttempt>;
    async fn get_by_id(&self, attempt_id: Uuid) -> AppResult<Option<VerificationAttempt>>;
    async fn get_pending_for_listing(
        &self,
        listing_id: Uuid,
    ) -> AppResult<Option<VerificationAttempt>>;
    async fn list_pending(&self) -> AppResult<Vec<VerificationAttempt>>;
    async fn resolve(
        &self,
        attempt_id: Uuid,
        status: AttemptStatus,
        notes: Option<&str>,
        resolved_by: Uuid,
    ) -> AppResult<VerificationAttempt>;
}

/// Instructions shown to the seller: where to place the token so the
/// reviewing admin can check it by hand.
#[derive(Debug, Clone)]
pub struct VerificationInstructions {
    pub token: String,
    pub method: VerificationMethod,
    pub dns_record_name: String,
    pub file_path: String,
}

#[derive(Clone)]
pub struct VerificationUseCases {
    attempts: Arc<dyn VerificationAttemptRepo>,
    listings: Arc<dyn ListingRepo>,
}

impl VerificationUseCases {
    pub fn new(attempts: Arc<dyn VerificationAttemptRepo>, listings: Arc<dyn ListingRepo>) -> Self {
        Self { attempts, listings }
    }

    /// Produce the opaque token for a listing awaiting verification.
    ///
    /// Idempotent while an attempt is outstanding: the token bound to the
    /// pending attempt (or already stored on the listing) is returned
    /// unchanged rather than rotated.
    #[instrument(skip(self))]
    pub async fn generate_token(
        &self,
        ctx: AuthContext,
        listing_id: Uuid,
        method: VerificationMethod,
    ) -> AppResult<VerificationInstructions> {
        let listing = self.get_owned_listing(ctx, listing_id).await?;

        if listing.status != ListingStatus::PendingVerification {
            return Err(AppError::InvalidState(format!(
                "Listing must be submitted for verification first (currently {})",
                listing.status.as_str()
            )));
        }

        if let Some(pending) = self.attempts.get_pending_for_listing(listing.id).await? {
            return Ok(instructions(&listing, pending.method, pending.token));
        }

        let token = match &listing.verification_token {
            Some(token) => token.clone(),
            None => {
                let token = new_token();
                self.listings
                    .set_verification_token(listing.id, &token)
                    .await?;
                token
            }
        };

        Ok(instructions(&listing, method, token))
    }

    /// Record the seller's claim that the token is in place. At most one
    /// unresolved attempt may exist per listing.
    #[instrument(skip(self))]
    pub async fn submit_attempt(
        &self,
        ctx: AuthContext,
        listing_id: Uuid,
        method: VerificationMethod,
        file_url: Option<String>,
    ) -> AppResult<VerificationAttempt> {
        let listing = self.get_owned_listing(ctx, listing_id).await?;

        if listing.status != ListingStatus::PendingVerification {
            return Err(AppError::InvalidState(format!(
                "Listing must be submitted for verification first (currently {})",
                listing.status.as_str()
            )));
        }

        if self
            .attempts
            .get_pending_for_listing(listing.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A verification attempt is already awaiting review".into(),
            ));
        }

        let Some(token) = listing.verification_token.clone() else {
            return Err(AppError::InvalidState(
                "Generate a verification token before submitting an attempt".into(),
            ));
        };

        if method == VerificationMethod::FileUpload && file_url.is_none() {
            return Err(AppError::InvalidInput(
                "File upload verification requires a file URL".into(),
            ));
        }

        self.attempts
            .create(listing.id, method, &token, file_url.as_deref())
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_pending(&self, ctx: AuthContext) -> AppResult<Vec<VerificationAttempt>> {
        ctx.require_admin()?;
        self.attempts.list_pending().await
    }

    /// Admin judgment on an attempt. There is no automated DNS or file
    /// check anywhere in the system; the admin reads the instructions and
    /// decides. Resolved attempts are immutable.
    #[instrument(skip(self))]
    pub async fn moderate_attempt(
        &self,
        ctx: AuthContext,
        attempt_id: Uuid,
        action: VerificationModerationAction,
        notes: Option<String>,
    ) -> AppResult<(VerificationAttempt, Listing)> {
        ctx.require_admin()?;

        let attempt = self
            .attempts
            .get_by_id(attempt_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if attempt.status.is_resolved() {
            return Err(AppError::InvalidState(
                "Verification attempt is already resolved".into(),
            ));
        }

        let listing = self
            .listings
            .get_by_id(attempt.listing_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let listing = match action {
            VerificationModerationAction::Approve => {
                if !listing.status.can_transition_to(ListingStatus::Verified) {
                    return Err(AppError::InvalidState(format!(
                        "Listing is no longer awaiting verification (currently {})",
                        listing.status.as_str()
                    )));
                }
                self.listings
                    .set_status(listing.id, ListingStatus::Verified)
                    .await?
            }
            VerificationModerationAction::Reject => {
                let reason = notes.as_deref().unwrap_or("Verification rejected");
                self.listings.set_rejected(listing.id, reason).await?
            }
        };

        let status = match action {
            VerificationModerationAction::Approve => AttemptStatus::Approved,
            VerificationModerationAction::Reject => AttemptStatus::Rejected,
        };
        let attempt = self
            .attempts
            .resolve(attempt.id, status, notes.as_deref(), ctx.user_id)
            .await?;

        Ok((attempt, listing))
    }

    async fn get_owned_listing(&self, ctx: AuthContext, listing_id: Uuid) -> AppResult<Listing> {
        let listing = self
            .listings
            .get_by_id(listing_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if listing.owner_id != ctx.user_id && !ctx.role.is_admin() {
            return Err(AppError::NotFound);
        }
        Ok(listing)
    }
}

fn new_token() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("geodomain-verify-{}", hex::encode(bytes))
}

fn instructions(
    listing: &Listing,
    method: VerificationMethod,
    token: String,
) -> VerificationInstructions {
    VerificationInstructions {
        dns_record_name: format!("_geodomain-challenge.{}", listing.name),
        file_path: format!("https://{}/.well-known/geodomain-verify.txt", listing.name),
        method,
        token,
    }
}
