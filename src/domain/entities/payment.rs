use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use uuid::Uuid;

/// Payment proof status. Resolved only by admin review of the uploaded
/// proof URL; there is no gateway integration or automated reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Failed,
}

impl PaymentStatus {
    /// Resolved payments are immutable.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

/// Admin decision on a submitted payment proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentReviewAction {
    Confirm,
    Fail,
}

#[derive(Debug, Clone)]
pub struct Payment {
    pub id: Uuid,
    pub deal_id: Uuid,
    pub submitted_by: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub proof_url: String,
    pub status: PaymentStatus,
    pub review_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub reviewed_at: Option<chrono::NaiveDateTime>,
}
