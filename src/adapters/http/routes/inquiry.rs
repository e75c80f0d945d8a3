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
    domain::entities::inquiry::{Inquiry, InquiryModerationAction},
    domain::entities::message::Message,
    use_cases::inquiry::NewInquiry,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_inquiry))
        .route("/", get(list_my_inquiries))
        .route("/received", get(list_received))
        .route("/pending", get(list_pending))
        .route("/{inquiry_id}", get(get_inquiry))
        .route("/{inquiry_id}/moderate", post(moderate_inquiry))
        .route("/{inquiry_id}/resubmit", post(resubmit_inquiry))
        .route("/{inquiry_id}/messages", get(list_messages))
        .route("/{inquiry_id}/messages", post(send_message))
}

#[derive(Deserialize)]
struct CreateInquiryPayload {
    listing_id: Uuid,
    buyer_name: String,
    buyer_email: String,
    buyer_phone: Option<String>,
    budget_range: Option<String>,
    timeline: Option<String>,
    message: String,
}

#[derive(Deserialize)]
struct ModeratePayload {
    action: InquiryModerationAction,
    notes: Option<String>,
}

#[derive(Deserialize)]
struct ResubmitPayload {
    message: String,
}

#[derive(Deserialize)]
struct SendMessagePayload {
    content: String,
}

#[derive(Serialize)]
struct InquiryResponse {
    id: Uuid,
    listing_id: Uuid,
    buyer_name: String,
    buyer_email: String,
    buyer_phone: Option<String>,
    budget_range: Option<String>,
    timeline: Option<String>,
    message: String,
    status: String,
    moderation_notes: Option<String>,
    created_at: Option<chrono::NaiveDateTime>,
}

impl From<Inquiry> for InquiryResponse {
    fn from(i: Inquiry) -> Self {
        InquiryResponse {
            id: i.id,
            listing_id: i.listing_id,
            buyer_name: i.buyer_name,
            buyer_email: i.buyer_email,
            buyer_phone: i.buyer_phone,
            budget_range: i.budget_range,
            timeline: i.timeline,
            message: i.message,
            status: i.status.as_str().to_string(),
            moderation_notes: i.moderation_notes,
            created_at: i.created_at,
        }
    }
}

#[derive(Serialize)]
struct MessageResponse {
    id: Uuid,
    inquiry_id: Uuid,
    sender_id: Uuid,
    content: String,
    status: String,
    created_at: Option<chrono::NaiveDateTime>,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        MessageResponse {
            id: m.id,
            inquiry_id: m.inquiry_id,
            sender_id: m.sender_id,
            content: m.content,
            status: m.status.as_str().to_string(),
            created_at: m.created_at,
        }
    }
}

async fn create_inquiry(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CreateInquiryPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let inquiry = app_state
        .inquiry_use_cases
        .create(
            ctx,
            NewInquiry {
                listing_id: payload.listing_id,
                buyer_name: payload.buyer_name,
                buyer_email: payload.buyer_email,
                buyer_phone: payload.buyer_phone,
                budget_range: payload.budget_range,
                timeline: payload.timeline,
                message: payload.message,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(InquiryResponse::from(inquiry))))
}

async fn list_my_inquiries(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let inquiries = app_state.inquiry_use_cases.list_mine(ctx).await?;
    let response: Vec<InquiryResponse> = inquiries.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// Approved inquiries across the caller's listings.
async fn list_received(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let inquiries = app_state.inquiry_use_cases.list_for_seller(ctx).await?;
    let response: Vec<InquiryResponse> = inquiries.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn list_pending(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let inquiries = app_state.inquiry_use_cases.list_pending(ctx).await?;
    let response: Vec<InquiryResponse> = inquiries.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn get_inquiry(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(inquiry_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let inquiry = app_state.inquiry_use_cases.get(ctx, inquiry_id).await?;
    Ok(Json(InquiryResponse::from(inquiry)))
}

async fn moderate_inquiry(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(inquiry_id): Path<Uuid>,
    Json(payload): Json<ModeratePayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let inquiry = app_state
        .inquiry_use_cases
        .moderate(ctx, inquiry_id, payload.action, payload.notes)
        .await?;
    Ok(Json(InquiryResponse::from(inquiry)))
}

async fn resubmit_inquiry(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(inquiry_id): Path<Uuid>,
    Json(payload): Json<ResubmitPayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let inquiry = app_state
        .inquiry_use_cases
        .resubmit(ctx, inquiry_id, payload.message)
        .await?;
    Ok(Json(InquiryResponse::from(inquiry)))
}

async fn list_messages(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(inquiry_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let messages = app_state
        .message_use_cases
        .list_thread(ctx, inquiry_id)
        .await?;
    let response: Vec<MessageResponse> = messages.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn send_message(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(inquiry_id): Path<Uuid>,
    Json(payload): Json<SendMessagePayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let message = app_state
        .message_use_cases
        .send(ctx, inquiry_id, payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}
