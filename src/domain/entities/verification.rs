use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationMethod {
    DnsTxt,
    FileUpload,
}

impl VerificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::DnsTxt => "dns_txt",
            VerificationMethod::FileUpload => "file_upload",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "file_upload" => VerificationMethod::FileUpload,
            _ => VerificationMethod::DnsTxt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Pending,
    Approved,
    Rejected,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::Pending => "pending",
            AttemptStatus::Approved => "approved",
            AttemptStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "approved" => AttemptStatus::Approved,
            "rejected" => AttemptStatus::Rejected,
            _ => AttemptStatus::Pending,
        }
    }

    /// Resolved attempts are immutable.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AttemptStatus::Pending)
    }
}

/// Admin decision on a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationModerationAction {
    Approve,
    Reject,
}

#[derive(Debug, Clone)]
pub struct VerificationAttempt {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub method: VerificationMethod,
    pub token: String,
    pub file_url: Option<String>,
    pub status: AttemptStatus,
    pub moderation_notes: Option<String>,
    pub resolved_by: Option<Uuid>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub resolved_at: Option<chrono::NaiveDateTime>,
}
