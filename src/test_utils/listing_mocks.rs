//! In-memory mock implementations for listing and verification repositories.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::listing::{ListingRepo, ListingUpdate, NewListing},
    application::use_cases::verification::VerificationAttemptRepo,
    domain::entities::listing::{Listing, ListingStatus},
    domain::entities::verification::{AttemptStatus, VerificationAttempt, VerificationMethod},
};

/// In-memory implementation of ListingRepo for testing.
#[derive(Default)]
pub struct InMemoryListingRepo {
    pub listings: Mutex<HashMap<Uuid, Listing>>,
}

impl InMemoryListingRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial listings for testing.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        let map: HashMap<Uuid, Listing> = listings.into_iter().map(|l| (l.id, l)).collect();
        Self {
            listings: Mutex::new(map),
        }
    }

    /// Get all listings (for test assertions).
    pub fn get_all(&self) -> Vec<Listing> {
        self.listings.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl ListingRepo for InMemoryListingRepo {
    async fn create(&self, owner_id: Uuid, input: &NewListing) -> AppResult<Listing> {
        let mut listings = self.listings.lock().unwrap();

        if listings.values().any(|l| l.name == input.name) {
            return Err(AppError::Conflict("Domain is already listed".into()));
        }

        let now = chrono::Utc::now().naive_utc();
        let listing = Listing {
            id: Uuid::new_v4(),
            owner_id,
            name: input.name.clone(),
            price_cents: input.price_cents,
            price_type: input.price_type,
            status: ListingStatus::Draft,
            geographic_scope: input.geographic_scope,
            category: input.category.clone(),
            state_code: input.state_code.clone(),
            city: input.city.clone(),
            verification_token: None,
            rejection_reason: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn get_by_id(&self, listing_id: Uuid) -> AppResult<Option<Listing>> {
        Ok(self.listings.lock().unwrap().get(&listing_id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Listing>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .values()
            .find(|l| l.name == name)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Listing>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_published(&self) -> AppResult<Vec<Listing>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.status == ListingStatus::Published)
            .cloned()
            .collect())
    }

    async fn update_fields(&self, listing_id: Uuid, update: &ListingUpdate) -> AppResult<Listing> {
        let mut listings = self.listings.lock().unwrap();
        let listing = listings.get_mut(&listing_id).ok_or(AppError::NotFound)?;

        if let Some(price) = update.price_cents {
            listing.price_cents = price;
        }
        if let Some(price_type) = update.price_type {
            listing.price_type = price_type;
        }
        if let Some(scope) = update.geographic_scope {
            listing.geographic_scope = scope;
        }
        if let Some(category) = &update.category {
            listing.category = Some(category.clone());
        }
        if let Some(state_code) = &update.state_code {
            listing.state_code = Some(state_code.clone());
        }
        if let Some(city) = &update.city {
            listing.city = Some(city.clone());
        }
        listing.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(listing.clone())
    }

    async fn set_status(&self, listing_id: Uuid, status: ListingStatus) -> AppResult<Listing> {
        let mut listings = self.listings.lock().unwrap();
        let listing = listings.get_mut(&listing_id).ok_or(AppError::NotFound)?;

        listing.status = status;
        listing.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(listing.clone())
    }

    async fn set_rejected(&self, listing_id: Uuid, reason: &str) -> AppResult<Listing> {
        let mut listings = self.listings.lock().unwrap();
        let listing = listings.get_mut(&listing_id).ok_or(AppError::NotFound)?;

        listing.status = ListingStatus::Rejected;
        listing.rejection_reason = Some(reason.to_string());
        listing.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(listing.clone())
    }

    async fn set_verification_token(&self, listing_id: Uuid, token: &str) -> AppResult<Listing> {
        let mut listings = self.listings.lock().unwrap();
        let listing = listings.get_mut(&listing_id).ok_or(AppError::NotFound)?;

        listing.verification_token = Some(token.to_string());
        listing.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(listing.clone())
    }

    async fn delete(&self, listing_id: Uuid) -> AppResult<()> {
        self.listings
            .lock()
            .unwrap()
            .remove(&listing_id)
            .ok_or(AppError::NotFound)?;
        Ok(())
    }
}

/// In-memory implementation of VerificationAttemptRepo for testing.
#[derive(Default)]
pub struct InMemoryVerificationAttemptRepo {
    pub attempts: Mutex<HashMap<Uuid, VerificationAttempt>>,
}

impl InMemoryVerificationAttemptRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attempts(attempts: Vec<VerificationAttempt>) -> Self {
        let map: HashMap<Uuid, VerificationAttempt> =
            attempts.into_iter().map(|a| (a.id, a)).collect();
        Self {
            attempts: Mutex::new(map),
        }
    }
}

#[async_trait]
impl VerificationAttemptRepo for InMemoryVerificationAttemptRepo {
    async fn create(
        &self,
        listing_id: Uuid,
        method: VerificationMethod,
        token: &str,
        file_url: Option<&str>,
    ) -> AppResult<VerificationAttempt> {
        let now = chrono::Utc::now().naive_utc();
        let attempt = VerificationAttempt {
            id: Uuid::new_v4(),
            listing_id,
            method,
            token: token.to_string(),
            file_url: file_url.map(|u| u.to_string()),
            status: AttemptStatus::Pending,
            moderation_notes: None,
            resolved_by: None,
            created_at: Some(now),
            resolved_at: None,
        };

        self.attempts
            .lock()
            .unwrap()
            .insert(attempt.id, attempt.clone());
        Ok(attempt)
    }

    async fn get_by_id(&self, attempt_id: Uuid) -> AppResult<Option<VerificationAttempt>> {
        Ok(self.attempts.lock().unwrap().get(&attempt_id).cloned())
    }

    async fn get_pending_for_listing(
        &self,
        listing_id: Uuid,
    ) -> AppResult<Option<VerificationAttempt>> {
        Ok(self
            .attempts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.listing_id == listing_id && a.status == AttemptStatus::Pending)
            .cloned())
    }

    async fn list_pending(&self) -> AppResult<Vec<VerificationAttempt>> {
        Ok(self
            .attempts
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.status == AttemptStatus::Pending)
            .cloned()
            .collect())
    }

    async fn resolve(
        &self,
        attempt_id: Uuid,
        status: AttemptStatus,
        notes: Option<&str>,
        resolved_by: Uuid,
    ) -> AppResult<VerificationAttempt> {
        let mut attempts = self.attempts.lock().unwrap();
        let attempt = attempts.get_mut(&attempt_id).ok_or(AppError::NotFound)?;

        attempt.status = status;
        attempt.moderation_notes = notes.map(|n| n.to_string());
        attempt.resolved_by = Some(resolved_by);
        attempt.resolved_at = Some(chrono::Utc::now().naive_utc());

        Ok(attempt.clone())
    }
}
