use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Draft,
    PendingVerification,
    Verified,
    Rejected,
    Published,
    Paused,
    Sold,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Draft => "draft",
            ListingStatus::PendingVerification => "pending_verification",
            ListingStatus::Verified => "verified",
            ListingStatus::Rejected => "rejected",
            ListingStatus::Published => "published",
            ListingStatus::Paused => "paused",
            ListingStatus::Sold => "sold",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "pending_verification" => ListingStatus::PendingVerification,
            "verified" => ListingStatus::Verified,
            "rejected" => ListingStatus::Rejected,
            "published" => ListingStatus::Published,
            "paused" => ListingStatus::Paused,
            "sold" => ListingStatus::Sold,
            _ => ListingStatus::Draft,
        }
    }

    /// Total transition predicate for the listing lifecycle.
    ///
    /// Forward-only, with two deliberate exceptions: Rejected → Draft
    /// (resubmission) and the Published ⇄ Paused pair.
    pub fn can_transition_to(&self, next: ListingStatus) -> bool {
        use ListingStatus::*;
        matches!(
            (self, next),
            (Draft, PendingVerification)
                | (PendingVerification, Verified)
                | (PendingVerification, Rejected)
                | (Rejected, Draft)
                | (Verified, Published)
                | (Verified, Paused)
                | (Verified, Sold)
                | (Published, Paused)
                | (Published, Sold)
                | (Paused, Published)
                | (Paused, Sold)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ListingStatus::Sold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceType {
    Fixed,
    Negotiable,
    MakeOffer,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Fixed => "fixed",
            PriceType::Negotiable => "negotiable",
            PriceType::MakeOffer => "make_offer",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "negotiable" => PriceType::Negotiable,
            "make_offer" => PriceType::MakeOffer,
            _ => PriceType::Fixed,
        }
    }
}

/// Geographic scope of a listed domain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeographicScope {
    National,
    State,
    City,
}

impl GeographicScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeographicScope::National => "national",
            GeographicScope::State => "state",
            GeographicScope::City => "city",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "state" => GeographicScope::State,
            "city" => GeographicScope::City,
            _ => GeographicScope::National,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Listing {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub price_type: PriceType,
    pub status: ListingStatus,
    pub geographic_scope: GeographicScope,
    pub category: Option<String>,
    pub state_code: Option<String>,
    pub city: Option<String>,
    pub verification_token: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}
