//! In-memory mock implementations for inquiry and message repositories.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::inquiry::{InquiryRepo, NewInquiry},
    application::use_cases::listing::ListingInquiryCount,
    application::use_cases::message::MessageRepo,
    domain::entities::inquiry::{Inquiry, InquiryStatus},
    domain::entities::message::{Message, MessageStatus},
    test_utils::create_test_inquiry,
};

/// In-memory implementation of InquiryRepo for testing. Also implements
/// the inquiry-count lookup the listing deletion guard relies on.
#[derive(Default)]
pub struct InMemoryInquiryRepo {
    pub inquiries: Mutex<HashMap<Uuid, Inquiry>>,
}

impl InMemoryInquiryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inquiries(inquiries: Vec<Inquiry>) -> Self {
        let map: HashMap<Uuid, Inquiry> = inquiries.into_iter().map(|i| (i.id, i)).collect();
        Self {
            inquiries: Mutex::new(map),
        }
    }

    /// Plant a pending inquiry against the listing, for deletion-guard tests.
    pub fn seed_inquiry_for_listing(&self, listing_id: Uuid) -> Inquiry {
        let inquiry = create_test_inquiry(listing_id, |_| {});
        self.inquiries
            .lock()
            .unwrap()
            .insert(inquiry.id, inquiry.clone());
        inquiry
    }
}

#[async_trait]
impl InquiryRepo for InMemoryInquiryRepo {
    async fn create(&self, buyer_id: Uuid, input: &NewInquiry) -> AppResult<Inquiry> {
        let now = chrono::Utc::now().naive_utc();
        let inquiry = Inquiry {
            id: Uuid::new_v4(),
            listing_id: input.listing_id,
            buyer_id,
            buyer_name: input.buyer_name.clone(),
            buyer_email: input.buyer_email.clone(),
            buyer_phone: input.buyer_phone.clone(),
            budget_range: input.budget_range.clone(),
            timeline: input.timeline.clone(),
            message: input.message.clone(),
            status: InquiryStatus::PendingReview,
            moderation_notes: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.inquiries
            .lock()
            .unwrap()
            .insert(inquiry.id, inquiry.clone());
        Ok(inquiry)
    }

    async fn get_by_id(&self, inquiry_id: Uuid) -> AppResult<Option<Inquiry>> {
        Ok(self.inquiries.lock().unwrap().get(&inquiry_id).cloned())
    }

    async fn list_by_buyer(&self, buyer_id: Uuid) -> AppResult<Vec<Inquiry>> {
        Ok(self
            .inquiries
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.buyer_id == buyer_id)
            .cloned()
            .collect())
    }

    async fn list_approved_by_listing_ids(&self, listing_ids: &[Uuid]) -> AppResult<Vec<Inquiry>> {
        Ok(self
            .inquiries
            .lock()
            .unwrap()
            .values()
            .filter(|i| {
                i.status == InquiryStatus::Approved && listing_ids.contains(&i.listing_id)
            })
            .cloned()
            .collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<Inquiry>> {
        Ok(self
            .inquiries
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.status == InquiryStatus::PendingReview)
            .cloned()
            .collect())
    }

    async fn set_status(
        &self,
        inquiry_id: Uuid,
        status: InquiryStatus,
        notes: Option<&str>,
    ) -> AppResult<Inquiry> {
        let mut inquiries = self.inquiries.lock().unwrap();
        let inquiry = inquiries.get_mut(&inquiry_id).ok_or(AppError::NotFound)?;

        inquiry.status = status;
        inquiry.moderation_notes = notes.map(|n| n.to_string());
        inquiry.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(inquiry.clone())
    }

    async fn resubmit(&self, inquiry_id: Uuid, message: &str) -> AppResult<Inquiry> {
        let mut inquiries = self.inquiries.lock().unwrap();
        let inquiry = inquiries.get_mut(&inquiry_id).ok_or(AppError::NotFound)?;

        inquiry.message = message.to_string();
        inquiry.status = InquiryStatus::PendingReview;
        inquiry.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(inquiry.clone())
    }
}

#[async_trait]
impl ListingInquiryCount for InMemoryInquiryRepo {
    async fn count_for_listing(&self, listing_id: Uuid) -> AppResult<i64> {
        Ok(self
            .inquiries
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.listing_id == listing_id)
            .count() as i64)
    }
}

/// In-memory implementation of MessageRepo for testing.
#[derive(Default)]
pub struct InMemoryMessageRepo {
    pub messages: Mutex<HashMap<Uuid, Message>>,
}

impl InMemoryMessageRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(messages: Vec<Message>) -> Self {
        let map: HashMap<Uuid, Message> = messages.into_iter().map(|m| (m.id, m)).collect();
        Self {
            messages: Mutex::new(map),
        }
    }
}

#[async_trait]
impl MessageRepo for InMemoryMessageRepo {
    async fn create(
        &self,
        inquiry_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> AppResult<Message> {
        let message = Message {
            id: Uuid::new_v4(),
            inquiry_id,
            sender_id,
            content: content.to_string(),
            status: MessageStatus::Pending,
            original_content: None,
            moderated_by: None,
            created_at: Some(chrono::Utc::now().naive_utc()),
            moderated_at: None,
        };

        self.messages
            .lock()
            .unwrap()
            .insert(message.id, message.clone());
        Ok(message)
    }

    async fn get_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>> {
        Ok(self.messages.lock().unwrap().get(&message_id).cloned())
    }

    async fn list_for_inquiry(&self, inquiry_id: Uuid) -> AppResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .messages
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.inquiry_id == inquiry_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn list_pending(&self) -> AppResult<Vec<Message>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.status == MessageStatus::Pending)
            .cloned()
            .collect())
    }

    async fn moderate(
        &self,
        message_id: Uuid,
        status: MessageStatus,
        content: Option<&str>,
        original_content: Option<&str>,
        moderated_by: Uuid,
    ) -> AppResult<Message> {
        let mut messages = self.messages.lock().unwrap();
        let message = messages.get_mut(&message_id).ok_or(AppError::NotFound)?;

        message.status = status;
        if let Some(content) = content {
            message.content = content.to_string();
        }
        if let Some(original) = original_content {
            message.original_content = Some(original.to_string());
        }
        message.moderated_by = Some(moderated_by);
        message.moderated_at = Some(chrono::Utc::now().naive_utc());

        Ok(message.clone())
    }
}
