use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, routes::current_user},
    app_error::AppResult,
    domain::entities::listing::{GeographicScope, Listing, PriceType},
    domain::entities::verification::{VerificationAttempt, VerificationMethod},
    use_cases::listing::{ListingUpdate, NewListing},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_listing))
        .route("/", get(list_my_listings))
        .route("/public", get(list_published))
        .route("/{listing_id}", get(get_listing))
        .route("/{listing_id}", patch(update_listing))
        .route("/{listing_id}", delete(delete_listing))
        .route("/{listing_id}/submit", post(submit_for_verification))
        .route("/{listing_id}/publish", post(publish))
        .route("/{listing_id}/pause", post(pause))
        .route("/{listing_id}/sold", post(mark_sold))
        .route("/{listing_id}/resubmit", post(resubmit))
        .route("/{listing_id}/verification/token", post(generate_token))
        .route("/{listing_id}/verification/attempts", post(submit_attempt))
}

#[derive(Deserialize)]
struct CreateListingPayload {
    name: String,
    price_cents: i64,
    price_type: String,
    geographic_scope: String,
    category: Option<String>,
    state_code: Option<String>,
    city: Option<String>,
}

#[derive(Deserialize)]
struct UpdateListingPayload {
    price_cents: Option<i64>,
    price_type: Option<String>,
    geographic_scope: Option<String>,
    category: Option<String>,
    state_code: Option<String>,
    city: Option<String>,
}

#[derive(Deserialize)]
struct AttemptPayload {
    method: String,
    file_url: Option<String>,
}

#[derive(Serialize)]
struct ListingResponse {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    price_cents: i64,
    price_type: String,
    status: String,
    geographic_scope: String,
    category: Option<String>,
    state_code: Option<String>,
    city: Option<String>,
    rejection_reason: Option<String>,
    created_at: Option<chrono::NaiveDateTime>,
    updated_at: Option<chrono::NaiveDateTime>,
}

impl From<Listing> for ListingResponse {
    fn from(l: Listing) -> Self {
        ListingResponse {
            id: l.id,
            owner_id: l.owner_id,
            name: l.name,
            price_cents: l.price_cents,
            price_type: l.price_type.as_str().to_string(),
            status: l.status.as_str().to_string(),
            geographic_scope: l.geographic_scope.as_str().to_string(),
            category: l.category,
            state_code: l.state_code,
            city: l.city,
            rejection_reason: l.rejection_reason,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Serialize)]
struct InstructionsResponse {
    token: String,
    method: String,
    dns_record_name: String,
    file_path: String,
}

#[derive(Serialize)]
struct AttemptResponse {
    id: Uuid,
    listing_id: Uuid,
    method: String,
    status: String,
    file_url: Option<String>,
    created_at: Option<chrono::NaiveDateTime>,
}

impl From<VerificationAttempt> for AttemptResponse {
    fn from(a: VerificationAttempt) -> Self {
        AttemptResponse {
            id: a.id,
            listing_id: a.listing_id,
            method: a.method.as_str().to_string(),
            status: a.status.as_str().to_string(),
            file_url: a.file_url,
            created_at: a.created_at,
        }
    }
}

async fn create_listing(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CreateListingPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let listing = app_state
        .listing_use_cases
        .create_draft(
            ctx,
            NewListing {
                name: payload.name,
                price_cents: payload.price_cents,
                price_type: PriceType::from_str(&payload.price_type),
                geographic_scope: GeographicScope::from_str(&payload.geographic_scope),
                category: payload.category,
                state_code: payload.state_code,
                city: payload.city,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ListingResponse::from(listing))))
}

async fn list_my_listings(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let listings = app_state.listing_use_cases.list_mine(ctx).await?;
    let response: Vec<ListingResponse> = listings.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// The public marketplace browse endpoint; no session required.
async fn list_published(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let listings = app_state.listing_use_cases.list_published().await?;
    let response: Vec<ListingResponse> = listings.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn get_listing(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let listing = app_state.listing_use_cases.get_owned(ctx, listing_id).await?;
    Ok(Json(ListingResponse::from(listing)))
}

async fn update_listing(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
    Json(payload): Json<UpdateListingPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let listing = app_state
        .listing_use_cases
        .update_draft(
            ctx,
            listing_id,
            ListingUpdate {
                price_cents: payload.price_cents,
                price_type: payload.price_type.as_deref().map(PriceType::from_str),
                geographic_scope: payload
                    .geographic_scope
                    .as_deref()
                    .map(GeographicScope::from_str),
                category: payload.category,
                state_code: payload.state_code,
                city: payload.city,
            },
        )
        .await?;

    Ok(Json(ListingResponse::from(listing)))
}

async fn delete_listing(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    app_state.listing_use_cases.delete(ctx, listing_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_for_verification(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let listing = app_state
        .listing_use_cases
        .submit_for_verification(ctx, listing_id)
        .await?;
    Ok(Json(ListingResponse::from(listing)))
}

async fn publish(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let listing = app_state.listing_use_cases.publish(ctx, listing_id).await?;
    Ok(Json(ListingResponse::from(listing)))
}

async fn pause(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let listing = app_state.listing_use_cases.pause(ctx, listing_id).await?;
    Ok(Json(ListingResponse::from(listing)))
}

async fn mark_sold(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let listing = app_state.listing_use_cases.mark_sold(ctx, listing_id).await?;
    Ok(Json(ListingResponse::from(listing)))
}

async fn resubmit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let listing = app_state.listing_use_cases.resubmit(ctx, listing_id).await?;
    Ok(Json(ListingResponse::from(listing)))
}

async fn generate_token(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
    Json(payload): Json<AttemptPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let instructions = app_state
        .verification_use_cases
        .generate_token(ctx, listing_id, VerificationMethod::from_str(&payload.method))
        .await?;

    Ok(Json(InstructionsResponse {
        token: instructions.token,
        method: instructions.method.as_str().to_string(),
        dns_record_name: instructions.dns_record_name,
        file_path: instructions.file_path,
    }))
}

async fn submit_attempt(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(listing_id): Path<Uuid>,
    Json(payload): Json<AttemptPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let attempt = app_state
        .verification_use_cases
        .submit_attempt(
            ctx,
            listing_id,
            VerificationMethod::from_str(&payload.method),
            payload.file_url,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AttemptResponse::from(attempt))))
}
