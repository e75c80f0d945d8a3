use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryStatus {
    PendingReview,
    Approved,
    Rejected,
    ChangesRequested,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::PendingReview => "pending_review",
            InquiryStatus::Approved => "approved",
            InquiryStatus::Rejected => "rejected",
            InquiryStatus::ChangesRequested => "changes_requested",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "approved" => InquiryStatus::Approved,
            "rejected" => InquiryStatus::Rejected,
            "changes_requested" => InquiryStatus::ChangesRequested,
            _ => InquiryStatus::PendingReview,
        }
    }

    /// Approve and Reject are one-time terminal moderation outcomes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InquiryStatus::Approved | InquiryStatus::Rejected)
    }

    /// Whether an admin may still act on this inquiry.
    pub fn is_moderatable(&self) -> bool {
        matches!(self, InquiryStatus::PendingReview)
    }
}

/// Admin decision on a buyer inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryModerationAction {
    Approve,
    Reject,
    RequestChanges,
}

impl InquiryModerationAction {
    pub fn resulting_status(&self) -> InquiryStatus {
        match self {
            InquiryModerationAction::Approve => InquiryStatus::Approved,
            InquiryModerationAction::Reject => InquiryStatus::Rejected,
            InquiryModerationAction::RequestChanges => InquiryStatus::ChangesRequested,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Inquiry {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub buyer_name: String,
    pub buyer_email: String,
    pub buyer_phone: Option<String>,
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
    pub message: String,
    pub status: InquiryStatus,
    pub moderation_notes: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}
