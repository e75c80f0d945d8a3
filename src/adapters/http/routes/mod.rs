pub mod deal;
pub mod inquiry;
pub mod listing;
pub mod message;
pub mod verification;
pub mod wholesale;

use axum::Router;
use axum_extra::extract::cookie::CookieJar;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::{auth::AuthContext, jwt},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/listings", listing::router())
        .nest("/verification", verification::router())
        .nest("/inquiries", inquiry::router())
        .nest("/messages", message::router())
        .nest("/deals", deal::router())
        .nest("/wholesale", wholesale::router())
}

/// Decode the session cookie into the caller's auth context.
pub(crate) fn current_user(jar: &CookieJar, app_state: &AppState) -> AppResult<AuthContext> {
    let Some(access_cookie) = jar.get("access_token") else {
        return Err(AppError::InvalidCredentials);
    };
    jwt::verify(access_cookie.value(), &app_state.config.jwt_secret)
}
