//! In-memory mock implementations for deal, payment, and wholesale
//! repositories.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::deal::{DealRepo, NewDeal, NewPaymentProof, PaymentRepo},
    application::use_cases::wholesale::{NewWholesaleDomain, WholesaleRepo},
    domain::entities::deal::{Deal, DealStatus},
    domain::entities::payment::{Payment, PaymentStatus},
    domain::entities::wholesale::{WholesaleDomain, WholesaleSale, WholesaleStatus},
};

/// In-memory implementation of DealRepo for testing.
#[derive(Default)]
pub struct InMemoryDealRepo {
    pub deals: Mutex<HashMap<Uuid, Deal>>,
}

impl InMemoryDealRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deals(deals: Vec<Deal>) -> Self {
        let map: HashMap<Uuid, Deal> = deals.into_iter().map(|d| (d.id, d)).collect();
        Self {
            deals: Mutex::new(map),
        }
    }
}

#[async_trait]
impl DealRepo for InMemoryDealRepo {
    async fn create(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
        seller_id: Uuid,
        input: &NewDeal,
    ) -> AppResult<Deal> {
        let mut deals = self.deals.lock().unwrap();

        if deals.values().any(|d| d.inquiry_id == input.inquiry_id) {
            return Err(AppError::Conflict(
                "A deal already exists for this inquiry".into(),
            ));
        }

        let now = chrono::Utc::now().naive_utc();
        let deal = Deal {
            id: Uuid::new_v4(),
            inquiry_id: input.inquiry_id,
            listing_id,
            buyer_id,
            seller_id,
            agreed_price_cents: input.agreed_price_cents,
            currency: input.currency.clone(),
            payment_method: input.payment_method,
            status: DealStatus::Negotiating,
            agreed_at: None,
            payment_pending_at: None,
            payment_confirmed_at: None,
            transfer_initiated_at: None,
            completed_at: None,
            disputed_at: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        deals.insert(deal.id, deal.clone());
        Ok(deal)
    }

    async fn get_by_id(&self, deal_id: Uuid) -> AppResult<Option<Deal>> {
        Ok(self.deals.lock().unwrap().get(&deal_id).cloned())
    }

    async fn get_by_inquiry(&self, inquiry_id: Uuid) -> AppResult<Option<Deal>> {
        Ok(self
            .deals
            .lock()
            .unwrap()
            .values()
            .find(|d| d.inquiry_id == inquiry_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Deal>> {
        Ok(self
            .deals
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.is_party(user_id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Deal>> {
        Ok(self.deals.lock().unwrap().values().cloned().collect())
    }

    async fn set_status(&self, deal_id: Uuid, status: DealStatus) -> AppResult<Deal> {
        let mut deals = self.deals.lock().unwrap();
        let deal = deals.get_mut(&deal_id).ok_or(AppError::NotFound)?;

        let now = chrono::Utc::now().naive_utc();
        deal.status = status;
        match status {
            DealStatus::Agreed => deal.agreed_at = Some(now),
            DealStatus::PaymentPending => deal.payment_pending_at = Some(now),
            DealStatus::PaymentConfirmed => deal.payment_confirmed_at = Some(now),
            DealStatus::TransferInitiated => deal.transfer_initiated_at = Some(now),
            DealStatus::Completed => deal.completed_at = Some(now),
            DealStatus::Disputed => deal.disputed_at = Some(now),
            DealStatus::Negotiating => {}
        }
        deal.updated_at = Some(now);

        Ok(deal.clone())
    }
}

/// In-memory implementation of PaymentRepo for testing.
#[derive(Default)]
pub struct InMemoryPaymentRepo {
    pub payments: Mutex<HashMap<Uuid, Payment>>,
}

impl InMemoryPaymentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payments(payments: Vec<Payment>) -> Self {
        let map: HashMap<Uuid, Payment> = payments.into_iter().map(|p| (p.id, p)).collect();
        Self {
            payments: Mutex::new(map),
        }
    }
}

#[async_trait]
impl PaymentRepo for InMemoryPaymentRepo {
    async fn create(
        &self,
        deal_id: Uuid,
        submitted_by: Uuid,
        input: &NewPaymentProof,
    ) -> AppResult<Payment> {
        let payment = Payment {
            id: Uuid::new_v4(),
            deal_id,
            submitted_by,
            amount_cents: input.amount_cents,
            currency: input.currency.clone(),
            proof_url: input.proof_url.clone(),
            status: PaymentStatus::Pending,
            review_notes: None,
            reviewed_by: None,
            created_at: Some(chrono::Utc::now().naive_utc()),
            reviewed_at: None,
        };

        self.payments
            .lock()
            .unwrap()
            .insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn get_by_id(&self, payment_id: Uuid) -> AppResult<Option<Payment>> {
        Ok(self.payments.lock().unwrap().get(&payment_id).cloned())
    }

    async fn get_pending_for_deal(&self, deal_id: Uuid) -> AppResult<Option<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .find(|p| p.deal_id == deal_id && p.status == PaymentStatus::Pending)
            .cloned())
    }

    async fn list_for_deal(&self, deal_id: Uuid) -> AppResult<Vec<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.deal_id == deal_id)
            .cloned()
            .collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.status == PaymentStatus::Pending)
            .cloned()
            .collect())
    }

    async fn resolve(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
        notes: Option<&str>,
        reviewed_by: Uuid,
    ) -> AppResult<Payment> {
        let mut payments = self.payments.lock().unwrap();
        let payment = payments.get_mut(&payment_id).ok_or(AppError::NotFound)?;

        payment.status = status;
        payment.review_notes = notes.map(|n| n.to_string());
        payment.reviewed_by = Some(reviewed_by);
        payment.reviewed_at = Some(chrono::Utc::now().naive_utc());

        Ok(payment.clone())
    }
}

/// In-memory implementation of WholesaleRepo for testing.
#[derive(Default)]
pub struct InMemoryWholesaleRepo {
    pub domains: Mutex<HashMap<Uuid, WholesaleDomain>>,
    pub sales: Mutex<Vec<WholesaleSale>>,
}

impl InMemoryWholesaleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domains(domains: Vec<WholesaleDomain>) -> Self {
        let map: HashMap<Uuid, WholesaleDomain> =
            domains.into_iter().map(|d| (d.id, d)).collect();
        Self {
            domains: Mutex::new(map),
            sales: Mutex::new(vec![]),
        }
    }

    /// Get all recorded sales (for test assertions).
    pub fn get_sales(&self) -> Vec<WholesaleSale> {
        self.sales.lock().unwrap().clone()
    }
}

#[async_trait]
impl WholesaleRepo for InMemoryWholesaleRepo {
    async fn create(
        &self,
        owner_id: Uuid,
        input: &NewWholesaleDomain,
    ) -> AppResult<WholesaleDomain> {
        let mut domains = self.domains.lock().unwrap();

        if domains.values().any(|d| d.name == input.name) {
            return Err(AppError::Conflict(
                "Domain is already in the wholesale pool".into(),
            ));
        }

        let now = chrono::Utc::now().naive_utc();
        let domain = WholesaleDomain {
            id: Uuid::new_v4(),
            owner_id,
            name: input.name.clone(),
            price_cents: input.price_cents,
            status: WholesaleStatus::PendingApproval,
            created_at: Some(now),
            updated_at: Some(now),
        };

        domains.insert(domain.id, domain.clone());
        Ok(domain)
    }

    async fn get_by_id(&self, domain_id: Uuid) -> AppResult<Option<WholesaleDomain>> {
        Ok(self.domains.lock().unwrap().get(&domain_id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<WholesaleDomain>> {
        Ok(self
            .domains
            .lock()
            .unwrap()
            .values()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn list_active(&self) -> AppResult<Vec<WholesaleDomain>> {
        Ok(self
            .domains
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.status == WholesaleStatus::Active)
            .cloned()
            .collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<WholesaleDomain>> {
        Ok(self
            .domains
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<WholesaleDomain>> {
        Ok(self
            .domains
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.status == WholesaleStatus::PendingApproval)
            .cloned()
            .collect())
    }

    async fn set_status(
        &self,
        domain_id: Uuid,
        status: WholesaleStatus,
    ) -> AppResult<WholesaleDomain> {
        let mut domains = self.domains.lock().unwrap();
        let domain = domains.get_mut(&domain_id).ok_or(AppError::NotFound)?;

        domain.status = status;
        domain.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(domain.clone())
    }

    async fn record_sale(
        &self,
        domain_id: Uuid,
        buyer_id: Uuid,
        price_cents: i64,
    ) -> AppResult<WholesaleSale> {
        let sale = WholesaleSale {
            id: Uuid::new_v4(),
            wholesale_domain_id: domain_id,
            buyer_id,
            price_cents,
            created_at: Some(chrono::Utc::now().naive_utc()),
        };

        self.sales.lock().unwrap().push(sale.clone());
        Ok(sale)
    }
}
