use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, routes::current_user},
    app_error::AppResult,
    domain::entities::deal::{Deal, DealStatus, PaymentMethod},
    domain::entities::payment::{Payment, PaymentReviewAction},
    use_cases::deal::{NewDeal, NewPaymentProof},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_deal))
        .route("/", get(list_my_deals))
        .route("/all", get(list_all_deals))
        .route("/payments/pending", get(list_pending_payments))
        .route("/payments/{payment_id}/review", post(review_payment))
        .route("/{deal_id}", get(get_deal))
        .route("/{deal_id}/status", post(update_deal_status))
        .route("/{deal_id}/payments", get(list_deal_payments))
        .route("/{deal_id}/payments", post(submit_payment_proof))
}

#[derive(Deserialize)]
struct CreateDealPayload {
    inquiry_id: Uuid,
    agreed_price_cents: i64,
    currency: String,
    payment_method: PaymentMethod,
}

#[derive(Deserialize)]
struct UpdateStatusPayload {
    status: DealStatus,
}

#[derive(Deserialize)]
struct PaymentProofPayload {
    amount_cents: i64,
    currency: String,
    proof_url: String,
}

#[derive(Deserialize)]
struct ReviewPayload {
    action: PaymentReviewAction,
    notes: Option<String>,
}

#[derive(Serialize)]
struct DealResponse {
    id: Uuid,
    inquiry_id: Uuid,
    listing_id: Uuid,
    buyer_id: Uuid,
    seller_id: Uuid,
    agreed_price_cents: i64,
    currency: String,
    payment_method: PaymentMethod,
    status: DealStatus,
    agreed_at: Option<chrono::NaiveDateTime>,
    payment_pending_at: Option<chrono::NaiveDateTime>,
    payment_confirmed_at: Option<chrono::NaiveDateTime>,
    transfer_initiated_at: Option<chrono::NaiveDateTime>,
    completed_at: Option<chrono::NaiveDateTime>,
    disputed_at: Option<chrono::NaiveDateTime>,
    created_at: Option<chrono::NaiveDateTime>,
}

impl From<Deal> for DealResponse {
    fn from(d: Deal) -> Self {
        DealResponse {
            id: d.id,
            inquiry_id: d.inquiry_id,
            listing_id: d.listing_id,
            buyer_id: d.buyer_id,
            seller_id: d.seller_id,
            agreed_price_cents: d.agreed_price_cents,
            currency: d.currency,
            payment_method: d.payment_method,
            status: d.status,
            agreed_at: d.agreed_at,
            payment_pending_at: d.payment_pending_at,
            payment_confirmed_at: d.payment_confirmed_at,
            transfer_initiated_at: d.transfer_initiated_at,
            completed_at: d.completed_at,
            disputed_at: d.disputed_at,
            created_at: d.created_at,
        }
    }
}

#[derive(Serialize)]
struct PaymentResponse {
    id: Uuid,
    deal_id: Uuid,
    submitted_by: Uuid,
    amount_cents: i64,
    currency: String,
    proof_url: String,
    status: String,
    review_notes: Option<String>,
    created_at: Option<chrono::NaiveDateTime>,
    reviewed_at: Option<chrono::NaiveDateTime>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        PaymentResponse {
            id: p.id,
            deal_id: p.deal_id,
            submitted_by: p.submitted_by,
            amount_cents: p.amount_cents,
            currency: p.currency,
            proof_url: p.proof_url,
            status: p.status.as_ref().to_string(),
            review_notes: p.review_notes,
            created_at: p.created_at,
            reviewed_at: p.reviewed_at,
        }
    }
}

async fn create_deal(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CreateDealPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let deal = app_state
        .deal_use_cases
        .create_from_inquiry(
            ctx,
            NewDeal {
                inquiry_id: payload.inquiry_id,
                agreed_price_cents: payload.agreed_price_cents,
                currency: payload.currency,
                payment_method: payload.payment_method,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(DealResponse::from(deal))))
}

async fn list_my_deals(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let deals = app_state.deal_use_cases.list_mine(ctx).await?;
    let response: Vec<DealResponse> = deals.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn list_all_deals(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let deals = app_state.deal_use_cases.list_all(ctx).await?;
    let response: Vec<DealResponse> = deals.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn get_deal(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(deal_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let deal = app_state.deal_use_cases.get(ctx, deal_id).await?;
    Ok(Json(DealResponse::from(deal)))
}

async fn update_deal_status(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(deal_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let deal = app_state
        .deal_use_cases
        .update_status(ctx, deal_id, payload.status)
        .await?;
    Ok(Json(DealResponse::from(deal)))
}

async fn submit_payment_proof(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(deal_id): Path<Uuid>,
    Json(payload): Json<PaymentProofPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let payment = app_state
        .deal_use_cases
        .submit_payment_proof(
            ctx,
            deal_id,
            NewPaymentProof {
                amount_cents: payload.amount_cents,
                currency: payload.currency,
                proof_url: payload.proof_url,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

async fn list_deal_payments(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(deal_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let payments = app_state.deal_use_cases.list_payments(ctx, deal_id).await?;
    let response: Vec<PaymentResponse> = payments.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn list_pending_payments(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let payments = app_state.deal_use_cases.list_pending_payments(ctx).await?;
    let response: Vec<PaymentResponse> = payments.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn review_payment(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(payment_id): Path<Uuid>,
    Json(payload): Json<ReviewPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let (payment, deal) = app_state
        .deal_use_cases
        .review_payment(ctx, payment_id, payload.action, payload.notes)
        .await?;

    Ok(Json(serde_json::json!({
        "payment": PaymentResponse::from(payment),
        "deal": DealResponse::from(deal),
    })))
}
