use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, routes::current_user},
    app_error::AppResult,
    domain::entities::wholesale::{WholesaleDomain, WholesaleModerationAction, WholesaleSale},
    use_cases::wholesale::NewWholesaleDomain,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_domain))
        .route("/", get(list_active))
        .route("/mine", get(list_mine))
        .route("/pending", get(list_pending))
        .route("/{domain_id}/moderate", post(moderate_domain))
        .route("/{domain_id}", delete(withdraw_domain))
        .route("/{domain_id}/purchase", post(purchase_domain))
}

#[derive(Deserialize)]
struct SubmitPayload {
    name: String,
    price_cents: i64,
}

#[derive(Deserialize)]
struct ModeratePayload {
    action: WholesaleModerationAction,
}

#[derive(Serialize)]
struct WholesaleDomainResponse {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    price_cents: i64,
    status: String,
    created_at: Option<chrono::NaiveDateTime>,
}

impl From<WholesaleDomain> for WholesaleDomainResponse {
    fn from(d: WholesaleDomain) -> Self {
        WholesaleDomainResponse {
            id: d.id,
            owner_id: d.owner_id,
            name: d.name,
            price_cents: d.price_cents,
            status: d.status.as_str().to_string(),
            created_at: d.created_at,
        }
    }
}

#[derive(Serialize)]
struct SaleResponse {
    id: Uuid,
    wholesale_domain_id: Uuid,
    buyer_id: Uuid,
    price_cents: i64,
    created_at: Option<chrono::NaiveDateTime>,
}

impl From<WholesaleSale> for SaleResponse {
    fn from(s: WholesaleSale) -> Self {
        SaleResponse {
            id: s.id,
            wholesale_domain_id: s.wholesale_domain_id,
            buyer_id: s.buyer_id,
            price_cents: s.price_cents,
            created_at: s.created_at,
        }
    }
}

async fn submit_domain(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SubmitPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let domain = app_state
        .wholesale_use_cases
        .submit(
            ctx,
            NewWholesaleDomain {
                name: payload.name,
                price_cents: payload.price_cents,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WholesaleDomainResponse::from(domain)),
    ))
}

/// The browsable pool; no session required.
async fn list_active(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let domains = app_state.wholesale_use_cases.list_active().await?;
    let response: Vec<WholesaleDomainResponse> = domains.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn list_mine(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let domains = app_state.wholesale_use_cases.list_mine(ctx).await?;
    let response: Vec<WholesaleDomainResponse> = domains.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn list_pending(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let domains = app_state.wholesale_use_cases.list_pending(ctx).await?;
    let response: Vec<WholesaleDomainResponse> = domains.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn moderate_domain(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(domain_id): Path<Uuid>,
    Json(payload): Json<ModeratePayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let domain = app_state
        .wholesale_use_cases
        .moderate(ctx, domain_id, payload.action)
        .await?;
    Ok(Json(WholesaleDomainResponse::from(domain)))
}

async fn withdraw_domain(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(domain_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let domain = app_state.wholesale_use_cases.withdraw(ctx, domain_id).await?;
    Ok(Json(WholesaleDomainResponse::from(domain)))
}

async fn purchase_domain(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(domain_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let (sale, domain) = app_state.wholesale_use_cases.purchase(ctx, domain_id).await?;

    Ok(Json(serde_json::json!({
        "sale": SaleResponse::from(sale),
        "domain": WholesaleDomainResponse::from(domain),
    })))
}
