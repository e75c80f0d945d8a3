//! Builder for assembling an [`AppState`] backed entirely by in-memory
//! repositories, for route-level tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum_extra::extract::cookie::Cookie;
use secrecy::SecretString;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    application::jwt,
    domain::entities::deal::Deal,
    domain::entities::inquiry::Inquiry,
    domain::entities::listing::Listing,
    domain::entities::message::Message,
    domain::entities::payment::Payment,
    domain::entities::user::UserRole,
    domain::entities::verification::VerificationAttempt,
    domain::entities::wholesale::WholesaleDomain,
    infra::config::AppConfig,
    infra::rate_limit::RateLimiterTrait,
    test_utils::{
        InMemoryDealRepo, InMemoryInquiryRepo, InMemoryListingRepo, InMemoryMessageRepo,
        InMemoryPaymentRepo, InMemoryVerificationAttemptRepo, InMemoryWholesaleRepo,
    },
    use_cases::{
        deal::DealUseCases, inquiry::InquiryUseCases, listing::ListingUseCases,
        message::MessageUseCases, verification::VerificationUseCases, wholesale::WholesaleUseCases,
    },
};

const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-bytes!";

/// Rate limiter that never limits.
pub struct InMemoryRateLimiter;

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check(&self, _ip: &str, _user_id: Option<&str>) -> AppResult<()> {
        Ok(())
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: SecretString::new(TEST_JWT_SECRET.into()),
        session_ttl: time::Duration::hours(1),
        cors_origin: "http://localhost:3000".parse().unwrap(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        redis_url: "redis://127.0.0.1:6379".into(),
        rate_limit_window_secs: 60,
        rate_limit_per_ip: 1_000,
        rate_limit_per_user: 1_000,
        database_url: "postgres://test".into(),
        trust_proxy: false,
        wholesale_enabled: true,
    }
}

/// A session cookie for the given user, signed with the builder's secret.
pub fn session_cookie(user_id: Uuid, role: UserRole) -> Cookie<'static> {
    let secret = SecretString::new(TEST_JWT_SECRET.into());
    let token = jwt::issue(user_id, role, &secret, time::Duration::hours(1)).unwrap();
    Cookie::new("access_token", token)
}

#[derive(Default)]
pub struct TestAppStateBuilder {
    listings: Vec<Listing>,
    attempts: Vec<VerificationAttempt>,
    inquiries: Vec<Inquiry>,
    messages: Vec<Message>,
    deals: Vec<Deal>,
    payments: Vec<Payment>,
    wholesale_domains: Vec<WholesaleDomain>,
    wholesale_disabled: bool,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listings.push(listing);
        self
    }

    pub fn with_attempt(mut self, attempt: VerificationAttempt) -> Self {
        self.attempts.push(attempt);
        self
    }

    pub fn with_inquiry(mut self, inquiry: Inquiry) -> Self {
        self.inquiries.push(inquiry);
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_deal(mut self, deal: Deal) -> Self {
        self.deals.push(deal);
        self
    }

    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payments.push(payment);
        self
    }

    pub fn with_wholesale_domain(mut self, domain: WholesaleDomain) -> Self {
        self.wholesale_domains.push(domain);
        self
    }

    pub fn wholesale_enabled(mut self, enabled: bool) -> Self {
        self.wholesale_disabled = !enabled;
        self
    }

    pub fn build(self) -> AppState {
        let listings = Arc::new(InMemoryListingRepo::with_listings(self.listings));
        let attempts = Arc::new(InMemoryVerificationAttemptRepo::with_attempts(self.attempts));
        let inquiries = Arc::new(InMemoryInquiryRepo::with_inquiries(self.inquiries));
        let messages = Arc::new(InMemoryMessageRepo::with_messages(self.messages));
        let deals = Arc::new(InMemoryDealRepo::with_deals(self.deals));
        let payments = Arc::new(InMemoryPaymentRepo::with_payments(self.payments));
        let wholesale = Arc::new(InMemoryWholesaleRepo::with_domains(self.wholesale_domains));

        AppState {
            config: Arc::new(test_config()),
            listing_use_cases: Arc::new(ListingUseCases::new(
                listings.clone(),
                inquiries.clone(),
            )),
            verification_use_cases: Arc::new(VerificationUseCases::new(
                attempts.clone(),
                listings.clone(),
            )),
            inquiry_use_cases: Arc::new(InquiryUseCases::new(
                inquiries.clone(),
                listings.clone(),
            )),
            message_use_cases: Arc::new(MessageUseCases::new(
                messages.clone(),
                inquiries.clone(),
                listings.clone(),
            )),
            deal_use_cases: Arc::new(DealUseCases::new(
                deals.clone(),
                payments.clone(),
                inquiries.clone(),
                listings.clone(),
            )),
            wholesale_use_cases: Arc::new(WholesaleUseCases::new(
                wholesale,
                !self.wholesale_disabled,
            )),
            rate_limiter: Arc::new(InMemoryRateLimiter),
        }
    }
}
