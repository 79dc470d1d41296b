use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::access::{AccessPolicy, OpenAccess, OperatorId};
use crate::workflows::trainers::domain::{TrainerComplianceRecord, TrainerId};
use crate::workflows::trainers::notices::{DeliveryError, EmailNotice, NoticeCatalog, NoticeMailer};
use crate::workflows::trainers::repository::{RepositoryError, TrainerRepository};
use crate::workflows::trainers::router::ComplianceRouterState;
use crate::workflows::trainers::{compliance_router, TrainerComplianceService};

pub(super) const PORTAL_URL: &str = "https://portal.example.com";

pub(super) fn operator() -> OperatorId {
    OperatorId(1)
}

pub(super) fn catalog() -> NoticeCatalog {
    NoticeCatalog::standard(PORTAL_URL)
}

pub(super) fn coach_record() -> TrainerComplianceRecord {
    TrainerComplianceRecord::new(
        TrainerId(42),
        "Jamie",
        Some("coach@example.com".to_string()),
    )
}

pub(super) fn uncontactable_record() -> TrainerComplianceRecord {
    TrainerComplianceRecord::new(TrainerId(77), "Riley", None)
}

pub(super) fn build_service() -> (
    TrainerComplianceService<MemoryTrainers, MemoryMailer>,
    Arc<MemoryTrainers>,
    Arc<MemoryMailer>,
) {
    let repository = Arc::new(MemoryTrainers::default());
    repository.seed(coach_record());
    repository.seed(uncontactable_record());
    let mailer = Arc::new(MemoryMailer::default());
    let service = TrainerComplianceService::new(repository.clone(), mailer.clone(), catalog());
    (service, repository, mailer)
}

#[derive(Default, Clone)]
pub(super) struct MemoryTrainers {
    records: Arc<Mutex<HashMap<TrainerId, TrainerComplianceRecord>>>,
}

impl MemoryTrainers {
    pub(super) fn seed(&self, record: TrainerComplianceRecord) {
        self.records
            .lock()
            .expect("trainer mutex poisoned")
            .insert(record.trainer_id, record);
    }
}

impl TrainerRepository for MemoryTrainers {
    fn fetch(&self, id: TrainerId) -> Result<Option<TrainerComplianceRecord>, RepositoryError> {
        let guard = self.records.lock().expect("trainer mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn update(&self, record: TrainerComplianceRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("trainer mutex poisoned");
        if guard.contains_key(&record.trainer_id) {
            guard.insert(record.trainer_id, record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn unverified(&self, limit: usize) -> Result<Vec<TrainerComplianceRecord>, RepositoryError> {
        let guard = self.records.lock().expect("trainer mutex poisoned");
        let mut records: Vec<_> = guard
            .values()
            .filter(|record| !record.is_verified)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.trainer_id.0);
        records.truncate(limit);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryMailer {
    sent: Arc<Mutex<Vec<EmailNotice>>>,
}

impl MemoryMailer {
    pub(super) fn sent(&self) -> Vec<EmailNotice> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl NoticeMailer for MemoryMailer {
    fn send(&self, notice: EmailNotice) -> Result<(), DeliveryError> {
        self.sent.lock().expect("mailer mutex poisoned").push(notice);
        Ok(())
    }
}

pub(super) struct RejectingMailer;

impl NoticeMailer for RejectingMailer {
    fn send(&self, _notice: EmailNotice) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct UnavailableTrainers;

impl TrainerRepository for UnavailableTrainers {
    fn fetch(&self, _id: TrainerId) -> Result<Option<TrainerComplianceRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: TrainerComplianceRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn unverified(&self, _limit: usize) -> Result<Vec<TrainerComplianceRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct DenyAll;

impl AccessPolicy for DenyAll {
    fn may_administer(&self, _operator: OperatorId) -> bool {
        false
    }
}

pub(super) fn compliance_router_with_service(
    service: TrainerComplianceService<MemoryTrainers, MemoryMailer>,
) -> axum::Router {
    compliance_router(ComplianceRouterState {
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
