use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WholesaleStatus {
    PendingApproval,
    Active,
    Sold,
    Removed,
}

impl WholesaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WholesaleStatus::PendingApproval => "pending_approval",
            WholesaleStatus::Active => "active",
            WholesaleStatus::Sold => "sold",
            WholesaleStatus::Removed => "removed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "active" => WholesaleStatus::Active,
            "sold" => WholesaleStatus::Sold,
            "removed" => WholesaleStatus::Removed,
            _ => WholesaleStatus::PendingApproval,
        }
    }

    pub fn can_transition_to(&self, next: WholesaleStatus) -> bool {
        use WholesaleStatus::*;
        matches!(
            (self, next),
            (PendingApproval, Active) | (PendingApproval, Removed) | (Active, Sold) | (Active, Removed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WholesaleStatus::Sold | WholesaleStatus::Removed)
    }
}

/// Admin decision on a wholesale pool submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WholesaleModerationAction {
    Approve,
    Remove,
}

/// A domain listed into the fixed-price wholesale pool, bypassing
/// individual negotiation.
#[derive(Debug, Clone)]
pub struct WholesaleDomain {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub status: WholesaleStatus,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct WholesaleSale {
    pub id: Uuid,
    pub wholesale_domain_id: Uuid,
    pub buyer_id: Uuid,
    pub price_cents: i64,
    pub created_at: Option<chrono::NaiveDateTime>,
}
