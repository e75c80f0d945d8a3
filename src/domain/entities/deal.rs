use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Deal lifecycle status.
///
/// The happy path is monotonic; Disputed is reachable from every non-terminal
/// state; Completed and Disputed never transition further.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DealStatus {
    Negotiating,
    Agreed,
    PaymentPending,
    PaymentConfirmed,
    TransferInitiated,
    Completed,
    Disputed,
}

impl DealStatus {
    /// The next step along the happy path, if any.
    pub fn next_on_happy_path(&self) -> Option<DealStatus> {
        match self {
            DealStatus::Negotiating => Some(DealStatus::Agreed),
            DealStatus::Agreed => Some(DealStatus::PaymentPending),
            DealStatus::PaymentPending => Some(DealStatus::PaymentConfirmed),
            DealStatus::PaymentConfirmed => Some(DealStatus::TransferInitiated),
            DealStatus::TransferInitiated => Some(DealStatus::Completed),
            DealStatus::Completed | DealStatus::Disputed => None,
        }
    }

    /// Total transition predicate: one step forward, or into Disputed.
    pub fn can_transition_to(&self, next: DealStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == DealStatus::Disputed {
            return true;
        }
        self.next_on_happy_path() == Some(next)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DealStatus::Completed | DealStatus::Disputed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Escrow,
    Crypto,
    Other,
}

#[derive(Debug, Clone)]
pub struct Deal {
    pub id: Uuid,
    pub inquiry_id: Uuid,
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub agreed_price_cents: i64,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub status: DealStatus,
    pub agreed_at: Option<chrono::NaiveDateTime>,
    pub payment_pending_at: Option<chrono::NaiveDateTime>,
    pub payment_confirmed_at: Option<chrono::NaiveDateTime>,
    pub transfer_initiated_at: Option<chrono::NaiveDateTime>,
    pub completed_at: Option<chrono::NaiveDateTime>,
    pub disputed_at: Option<chrono::NaiveDateTime>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

impl Deal {
    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.buyer_id == user_id || self.seller_id == user_id
    }
}
