use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::user::UserRole;

/// Authenticated caller, passed explicitly to every use case.
///
/// The session provider that mints the token lives outside this service;
/// we only decode and trust its claims.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthContext {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}
