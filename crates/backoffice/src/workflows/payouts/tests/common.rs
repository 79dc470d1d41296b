use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::workflows::access::{AccessPolicy, OpenAccess, OperatorId};
use crate::workflows::payouts::domain::{NewPayout, PayoutId, PayoutRecord, PayoutStatus};
use crate::workflows::payouts::repository::{PayoutInsert, PayoutRepository, RepositoryError};
use crate::workflows::payouts::router::PayoutRouterState;
use crate::workflows::payouts::{payout_router, PayoutService};
use crate::workflows::trainers::TrainerId;

pub(super) fn operator() -> OperatorId {
    OperatorId(1)
}

pub(super) fn bank_transfer(amount: Decimal) -> NewPayout {
    NewPayout {
        trainer_id: TrainerId(42),
        amount,
        method: "bank_transfer".to_string(),
        actor: operator(),
    }
}

pub(super) fn build_service() -> (PayoutService<MemoryPayouts>, Arc<MemoryPayouts>) {
    let repository = Arc::new(MemoryPayouts::default());
    let service = PayoutService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryPayouts {
    inner: Arc<Mutex<MemoryPayoutsInner>>,
}

#[derive(Default)]
struct MemoryPayoutsInner {
    next_id: i64,
    records: BTreeMap<PayoutId, PayoutRecord>,
}

impl MemoryPayouts {
    pub(super) fn count(&self) -> usize {
        self.inner.lock().expect("payout mutex poisoned").records.len()
    }
}

impl PayoutRepository for MemoryPayouts {
    fn insert(&self, payout: PayoutInsert) -> Result<PayoutId, RepositoryError> {
        let mut guard = self.inner.lock().expect("payout mutex poisoned");
        guard.next_id += 1;
        let payout_id = PayoutId(guard.next_id);
        guard.records.insert(
            payout_id,
            PayoutRecord {
                payout_id,
                trainer_id: payout.trainer_id,
                amount: payout.amount,
                method: payout.method,
                status: PayoutStatus::Pending,
                transaction_id: None,
                created_at: payout.created_at,
                completed_at: None,
                created_by: payout.created_by,
            },
        );
        Ok(payout_id)
    }

    fn fetch(&self, id: PayoutId) -> Result<Option<PayoutRecord>, RepositoryError> {
        let guard = self.inner.lock().expect("payout mutex poisoned");
        Ok(guard.records.get(&id).cloned())
    }

    fn update(&self, record: PayoutRecord) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("payout mutex poisoned");
        if guard.records.contains_key(&record.payout_id) {
            guard.records.insert(record.payout_id, record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn for_trainer(&self, trainer_id: TrainerId) -> Result<Vec<PayoutRecord>, RepositoryError> {
        let guard = self.inner.lock().expect("payout mutex poisoned");
        let mut records: Vec<_> = guard
            .records
            .values()
            .filter(|record| record.trainer_id == trainer_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.payout_id.cmp(&a.payout_id)));
        Ok(records)
    }
}

pub(super) struct UnavailablePayouts;

impl PayoutRepository for UnavailablePayouts {
    fn insert(&self, _payout: PayoutInsert) -> Result<PayoutId, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: PayoutId) -> Result<Option<PayoutRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: PayoutRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_trainer(&self, _trainer_id: TrainerId) -> Result<Vec<PayoutRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct DenyAll;

impl AccessPolicy for DenyAll {
    fn may_administer(&self, _operator: OperatorId) -> bool {
        false
    }
}

pub(super) fn payout_router_with_service(service: PayoutService<MemoryPayouts>) -> axum::Router {
    payout_router(PayoutRouterState {
        service: Arc::new(service),
        access: Arc::new(OpenAccess),
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
