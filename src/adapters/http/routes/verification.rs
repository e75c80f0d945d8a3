use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, routes::current_user},
    app_error::AppResult,
    domain::entities::verification::{VerificationAttempt, VerificationModerationAction},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/attempts/pending", get(list_pending_attempts))
        .route("/attempts/{attempt_id}/moderate", post(moderate_attempt))
}

#[derive(Deserialize)]
struct ModeratePayload {
    action: VerificationModerationAction,
    notes: Option<String>,
}

#[derive(Serialize)]
struct PendingAttemptResponse {
    id: Uuid,
    listing_id: Uuid,
    method: String,
    token: String,
    file_url: Option<String>,
    created_at: Option<chrono::NaiveDateTime>,
}

impl From<VerificationAttempt> for PendingAttemptResponse {
    fn from(a: VerificationAttempt) -> Self {
        PendingAttemptResponse {
            id: a.id,
            listing_id: a.listing_id,
            method: a.method.as_str().to_string(),
            token: a.token,
            file_url: a.file_url,
            created_at: a.created_at,
        }
    }
}

/// The admin review queue, oldest first.
async fn list_pending_attempts(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let attempts = app_state.verification_use_cases.list_pending(ctx).await?;
    let response: Vec<PendingAttemptResponse> = attempts.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn moderate_attempt(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(attempt_id): Path<Uuid>,
    Json(payload): Json<ModeratePayload>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let (attempt, listing) = app_state
        .verification_use_cases
        .moderate_attempt(ctx, attempt_id, payload.action, payload.notes)
        .await?;

    Ok(Json(serde_json::json!({
        "attempt_id": attempt.id,
        "attempt_status": attempt.status.as_str(),
        "listing_id": listing.id,
        "listing_status": listing.status.as_str(),
    })))
}
