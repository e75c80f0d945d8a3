use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    infra::rate_limit::RateLimiterTrait,
    use_cases::{
        deal::DealUseCases, inquiry::InquiryUseCases, listing::ListingUseCases,
        message::MessageUseCases, verification::VerificationUseCases, wholesale::WholesaleUseCases,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub listing_use_cases: Arc<ListingUseCases>,
    pub verification_use_cases: Arc<VerificationUseCases>,
    pub inquiry_use_cases: Arc<InquiryUseCases>,
    pub message_use_cases: Arc<MessageUseCases>,
    pub deal_use_cases: Arc<DealUseCases>,
    pub wholesale_use_cases: Arc<WholesaleUseCases>,
    pub rate_limiter: Arc<dyn RateLimiterTrait>,
}
