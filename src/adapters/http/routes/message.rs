use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, routes::current_user},
    app_error::AppResult,
    domain::entities::message::{Message, MessageModerationAction},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(list_pending_messages))
        .route("/{message_id}/moderate", post(moderate_message))
}

#[derive(Serialize)]
struct ModeratedMessageResponse {
    id: Uuid,
    inquiry_id: Uuid,
    sender_id: Uuid,
    content: String,
    status: String,
    original_content: Option<String>,
    created_at: Option<chrono::NaiveDateTime>,
    moderated_at: Option<chrono::NaiveDateTime>,
}

impl From<Message> for ModeratedMessageResponse {
    fn from(m: Message) -> Self {
        ModeratedMessageResponse {
            id: m.id,
            inquiry_id: m.inquiry_id,
            sender_id: m.sender_id,
            content: m.content,
            status: m.status.as_str().to_string(),
            original_content: m.original_content,
            created_at: m.created_at,
            moderated_at: m.moderated_at,
        }
    }
}

async fn list_pending_messages(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let messages = app_state.message_use_cases.list_pending(ctx).await?;
    let response: Vec<ModeratedMessageResponse> = messages.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

async fn moderate_message(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(message_id): Path<Uuid>,
    Json(action): Json<MessageModerationAction>,
) -> AppResult<impl IntoResponse> {
    let ctx = current_user(&jar, &app_state)?;

    let message = app_state
        .message_use_cases
        .moderate(ctx, message_id, action)
        .await?;
    Ok(Json(ModeratedMessageResponse::from(message)))
}
