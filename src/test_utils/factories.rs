//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible
//! defaults. Use the closure parameter to override specific fields as needed.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domain::entities::{
    deal::{Deal, DealStatus, PaymentMethod},
    inquiry::{Inquiry, InquiryStatus},
    listing::{GeographicScope, Listing, ListingStatus, PriceType},
    message::{Message, MessageStatus},
    payment::{Payment, PaymentStatus},
    verification::{AttemptStatus, VerificationAttempt, VerificationMethod},
    wholesale::{WholesaleDomain, WholesaleStatus},
};

/// Create a test listing with sensible defaults.
pub fn create_test_listing(overrides: impl FnOnce(&mut Listing)) -> Listing {
    let mut listing = Listing {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        name: "miami-condos.com".to_string(),
        price_cents: 250_000,
        price_type: PriceType::Fixed,
        status: ListingStatus::Draft,
        geographic_scope: GeographicScope::City,
        category: Some("real-estate".to_string()),
        state_code: Some("FL".to_string()),
        city: Some("Miami".to_string()),
        verification_token: None,
        rejection_reason: None,
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut listing);
    listing
}

/// Create a test inquiry against the given listing.
pub fn create_test_inquiry(
    listing_id: Uuid,
    overrides: impl FnOnce(&mut Inquiry),
) -> Inquiry {
    let mut inquiry = Inquiry {
        id: Uuid::new_v4(),
        listing_id,
        buyer_id: Uuid::new_v4(),
        buyer_name: "Pat Buyer".to_string(),
        buyer_email: "pat@example.com".to_string(),
        buyer_phone: None,
        budget_range: Some("$1k-$5k".to_string()),
        timeline: Some("30 days".to_string()),
        message: "Interested in this domain".to_string(),
        status: InquiryStatus::PendingReview,
        moderation_notes: None,
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut inquiry);
    inquiry
}

/// Create a test message in the given inquiry thread.
pub fn create_test_message(
    inquiry_id: Uuid,
    overrides: impl FnOnce(&mut Message),
) -> Message {
    let mut message = Message {
        id: Uuid::new_v4(),
        inquiry_id,
        sender_id: Uuid::new_v4(),
        content: "Can you share traffic figures?".to_string(),
        status: MessageStatus::Pending,
        original_content: None,
        moderated_by: None,
        created_at: Some(test_datetime()),
        moderated_at: None,
    };
    overrides(&mut message);
    message
}

/// Create a test verification attempt for the given listing.
pub fn create_test_attempt(
    listing_id: Uuid,
    overrides: impl FnOnce(&mut VerificationAttempt),
) -> VerificationAttempt {
    let mut attempt = VerificationAttempt {
        id: Uuid::new_v4(),
        listing_id,
        method: VerificationMethod::DnsTxt,
        token: "geodomain-verify-00112233445566778899aabbccddeeff".to_string(),
        file_url: None,
        status: AttemptStatus::Pending,
        moderation_notes: None,
        resolved_by: None,
        created_at: Some(test_datetime()),
        resolved_at: None,
    };
    overrides(&mut attempt);
    attempt
}

/// Create a test deal with sensible defaults.
pub fn create_test_deal(overrides: impl FnOnce(&mut Deal)) -> Deal {
    let mut deal = Deal {
        id: Uuid::new_v4(),
        inquiry_id: Uuid::new_v4(),
        listing_id: Uuid::new_v4(),
        buyer_id: Uuid::new_v4(),
        seller_id: Uuid::new_v4(),
        agreed_price_cents: 750_000,
        currency: "USD".to_string(),
        payment_method: PaymentMethod::Escrow,
        status: DealStatus::Negotiating,
        agreed_at: None,
        payment_pending_at: None,
        payment_confirmed_at: None,
        transfer_initiated_at: None,
        completed_at: None,
        disputed_at: None,
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut deal);
    deal
}

/// Create a test payment proof for the given deal.
pub fn create_test_payment(deal_id: Uuid, overrides: impl FnOnce(&mut Payment)) -> Payment {
    let mut payment = Payment {
        id: Uuid::new_v4(),
        deal_id,
        submitted_by: Uuid::new_v4(),
        amount_cents: 750_000,
        currency: "USD".to_string(),
        proof_url: "https://files.example.com/wire-receipt.pdf".to_string(),
        status: PaymentStatus::Pending,
        review_notes: None,
        reviewed_by: None,
        created_at: Some(test_datetime()),
        reviewed_at: None,
    };
    overrides(&mut payment);
    payment
}

/// Create a test wholesale pool entry with sensible defaults.
pub fn create_test_wholesale_domain(
    overrides: impl FnOnce(&mut WholesaleDomain),
) -> WholesaleDomain {
    let mut domain = WholesaleDomain {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        name: "bulk-deals.com".to_string(),
        price_cents: 9_900,
        status: WholesaleStatus::PendingApproval,
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut domain);
    domain
}

/// Returns a fixed test datetime for consistent test data.
pub fn test_datetime() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2026-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}
