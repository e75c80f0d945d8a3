pub mod app_error;
pub mod auth;
pub mod jwt;
pub mod use_cases;
pub mod validators;

pub use app_error::{AppError, AppResult};
