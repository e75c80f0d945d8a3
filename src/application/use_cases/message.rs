use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::auth::AuthContext;
use crate::domain::entities::inquiry::InquiryStatus;
use crate::domain::entities::message::{Message, MessageModerationAction, MessageStatus};
use crate::use_cases::inquiry::InquiryRepo;
use crate::use_cases::listing::ListingRepo;

#[async_trait]
pub trait MessageRepo: Send + Sync {
    async fn create(&self, inquiry_id: Uuid, sender_id: Uuid, content: &str)
    -> AppResult<Message>;
    async fn get_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>>;
    async fn list_for_inquiry(&self, inquiry_id: Uuid) -> AppResult<Vec<Message>>;
    async fn list_pending(&self) -> AppResult<Vec<Message>>;
    async fn moderate(
        &self,
        message_id: Uuid,
        status: MessageStatus,
        content: Option<&str>,
        original_content: Option<&str>,
        moderated_by: Uuid,
    ) -> AppResult<Message>;
}

#[derive(Clone)]
pub struct MessageUseCases {
    messages: Arc<dyn MessageRepo>,
    inquiries: Arc<dyn InquiryRepo>,
    listings: Arc<dyn ListingRepo>,
}

impl MessageUseCases {
    pub fn new(
        messages: Arc<dyn MessageRepo>,
        inquiries: Arc<dyn InquiryRepo>,
        listings: Arc<dyn ListingRepo>,
    ) -> Self {
        Self {
            messages,
            inquiries,
            listings,
        }
    }

    /// Resolves the (buyer, seller) pair for an inquiry thread and checks the
    /// caller belongs to it. Admins pass regardless.
    async fn thread_access(&self, ctx: AuthContext, inquiry_id: Uuid) -> AppResult<InquiryThread> {
        let inquiry = self
            .inquiries
            .get_by_id(inquiry_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let listing = self
            .listings
            .get_by_id(inquiry.listing_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let thread = InquiryThread {
            inquiry_status: inquiry.status,
            buyer_id: inquiry.buyer_id,
            seller_id: listing.owner_id,
        };
        if ctx.role.is_admin() || thread.is_party(ctx.user_id) {
            Ok(thread)
        } else {
            Err(AppError::NotFound)
        }
    }

    /// Either party posts into the thread. Messages start pending and are
    /// invisible to the other side until an admin releases them.
    #[instrument(skip(self, content))]
    pub async fn send(
        &self,
        ctx: AuthContext,
        inquiry_id: Uuid,
        content: String,
    ) -> AppResult<Message> {
        if content.trim().is_empty() {
            return Err(AppError::InvalidInput("Message cannot be empty".into()));
        }

        let thread = self.thread_access(ctx, inquiry_id).await?;
        if !thread.is_party(ctx.user_id) {
            return Err(AppError::Forbidden);
        }
        if thread.inquiry_status != InquiryStatus::Approved {
            return Err(AppError::InvalidState(
                "Messaging opens once the inquiry is approved".into(),
            ));
        }

        self.messages.create(inquiry_id, ctx.user_id, &content).await
    }

    /// The thread as the caller is allowed to see it: parties get approved
    /// messages plus their own pending ones, admins get everything.
    #[instrument(skip(self))]
    pub async fn list_thread(&self, ctx: AuthContext, inquiry_id: Uuid) -> AppResult<Vec<Message>> {
        self.thread_access(ctx, inquiry_id).await?;
        let mut messages = self.messages.list_for_inquiry(inquiry_id).await?;
        if !ctx.role.is_admin() {
            messages.retain(|m| {
                m.status == MessageStatus::Approved
                    || (m.sender_id == ctx.user_id && m.status == MessageStatus::Pending)
            });
        }
        Ok(messages)
    }

    #[instrument(skip(self))]
    pub async fn list_pending(&self, ctx: AuthContext) -> AppResult<Vec<Message>> {
        ctx.require_admin()?;
        self.messages.list_pending().await
    }

    /// Approve releases the message as written; Edit releases a substituted
    /// body while keeping the original for the audit trail; Reject withholds
    /// it entirely.
    #[instrument(skip(self, action))]
    pub async fn moderate(
        &self,
        ctx: AuthContext,
        message_id: Uuid,
        action: MessageModerationAction,
    ) -> AppResult<Message> {
        ctx.require_admin()?;

        let message = self
            .messages
            .get_by_id(message_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if message.status != MessageStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "Message has already been moderated ({})",
                message.status.as_str()
            )));
        }

        match action {
            MessageModerationAction::Approve => {
                self.messages
                    .moderate(message.id, MessageStatus::Approved, None, None, ctx.user_id)
                    .await
            }
            MessageModerationAction::Reject => {
                self.messages
                    .moderate(message.id, MessageStatus::Rejected, None, None, ctx.user_id)
                    .await
            }
            MessageModerationAction::Edit { edited_content } => {
                if edited_content.trim().is_empty() {
                    return Err(AppError::InvalidInput(
                        "Edited content cannot be empty".into(),
                    ));
                }
                self.messages
                    .moderate(
                        message.id,
                        MessageStatus::Approved,
                        Some(&edited_content),
                        Some(&message.content),
                        ctx.user_id,
                    )
                    .await
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct InquiryThread {
    inquiry_status: InquiryStatus,
    buyer_id: Uuid,
    seller_id: Uuid,
}

impl InquiryThread {
    fn is_party(&self, user_id: Uuid) -> bool {
        self.buyer_id == user_id || self.seller_id == user_id
    }
}
