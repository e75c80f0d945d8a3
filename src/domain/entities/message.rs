use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Pending,
    Approved,
    Rejected,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Approved => "approved",
            MessageStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "approved" => MessageStatus::Approved,
            "rejected" => MessageStatus::Rejected,
            _ => MessageStatus::Pending,
        }
    }
}

/// Admin decision on a buyer/seller message. Edit substitutes the content
/// before marking the message approved.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum MessageModerationAction {
    Approve,
    Reject,
    Edit { edited_content: String },
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub inquiry_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub status: MessageStatus,
    /// Original content preserved when an admin edit substituted it.
    pub original_content: Option<String>,
    pub moderated_by: Option<Uuid>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub moderated_at: Option<chrono::NaiveDateTime>,
}
