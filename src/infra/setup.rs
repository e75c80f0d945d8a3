use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::http::app_state::AppState,
    infra::{config::AppConfig, postgres_persistence, rate_limit::RedisRateLimiter},
    use_cases::{
        deal::{DealRepo, DealUseCases, PaymentRepo},
        inquiry::{InquiryRepo, InquiryUseCases},
        listing::{ListingInquiryCount, ListingRepo, ListingUseCases},
        message::{MessageRepo, MessageUseCases},
        verification::{VerificationAttemptRepo, VerificationUseCases},
        wholesale::{WholesaleRepo, WholesaleUseCases},
    },
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);

    let rate_limiter = Arc::new(
        RedisRateLimiter::new(
            &config.redis_url,
            config.rate_limit_window_secs,
            config.rate_limit_per_ip,
            config.rate_limit_per_user,
        )
        .await?,
    );

    let listing_repo = postgres_arc.clone() as Arc<dyn ListingRepo>;
    let inquiry_repo = postgres_arc.clone() as Arc<dyn InquiryRepo>;
    let inquiry_counts = postgres_arc.clone() as Arc<dyn ListingInquiryCount>;
    let attempt_repo = postgres_arc.clone() as Arc<dyn VerificationAttemptRepo>;
    let message_repo = postgres_arc.clone() as Arc<dyn MessageRepo>;
    let deal_repo = postgres_arc.clone() as Arc<dyn DealRepo>;
    let payment_repo = postgres_arc.clone() as Arc<dyn PaymentRepo>;
    let wholesale_repo = postgres_arc.clone() as Arc<dyn WholesaleRepo>;

    let listing_use_cases = ListingUseCases::new(listing_repo.clone(), inquiry_counts);
    let verification_use_cases = VerificationUseCases::new(attempt_repo, listing_repo.clone());
    let inquiry_use_cases = InquiryUseCases::new(inquiry_repo.clone(), listing_repo.clone());
    let message_use_cases =
        MessageUseCases::new(message_repo, inquiry_repo.clone(), listing_repo.clone());
    let deal_use_cases = DealUseCases::new(deal_repo, payment_repo, inquiry_repo, listing_repo);
    let wholesale_use_cases = WholesaleUseCases::new(wholesale_repo, config.wholesale_enabled);

    Ok(AppState {
        config: Arc::new(config),
        listing_use_cases: Arc::new(listing_use_cases),
        verification_use_cases: Arc::new(verification_use_cases),
        inquiry_use_cases: Arc::new(inquiry_use_cases),
        message_use_cases: Arc::new(message_use_cases),
        deal_use_cases: Arc::new(deal_use_cases),
        wholesale_use_cases: Arc::new(wholesale_use_cases),
        rate_limiter,
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "geodomain_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
