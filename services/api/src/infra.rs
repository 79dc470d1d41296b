use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use backoffice::workflows::payouts::{
    PayoutId, PayoutInsert, PayoutRecord, PayoutRepository, PayoutStatus,
    RepositoryError as PayoutRepositoryError,
};
use backoffice::workflows::trainers::{
    DeliveryError, EmailNotice, NoticeMailer, RepositoryError as TrainerRepositoryError,
    TrainerComplianceRecord, TrainerId, TrainerRepository,
};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTrainerRepository {
    records: Arc<Mutex<HashMap<TrainerId, TrainerComplianceRecord>>>,
}

impl InMemoryTrainerRepository {
    pub(crate) fn seed(&self, record: TrainerComplianceRecord) {
        self.records
            .lock()
            .expect("trainer mutex poisoned")
            .insert(record.trainer_id, record);
    }
}

impl TrainerRepository for InMemoryTrainerRepository {
    fn fetch(
        &self,
        id: TrainerId,
    ) -> Result<Option<TrainerComplianceRecord>, TrainerRepositoryError> {
        let guard = self.records.lock().expect("trainer mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn update(&self, record: TrainerComplianceRecord) -> Result<(), TrainerRepositoryError> {
        let mut guard = self.records.lock().expect("trainer mutex poisoned");
        if guard.contains_key(&record.trainer_id) {
            guard.insert(record.trainer_id, record);
            Ok(())
        } else {
            Err(TrainerRepositoryError::NotFound)
        }
    }

    fn unverified(
        &self,
        limit: usize,
    ) -> Result<Vec<TrainerComplianceRecord>, TrainerRepositoryError> {
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
pub(crate) struct InMemoryPayoutRepository {
    inner: Arc<Mutex<PayoutLedger>>,
}

#[derive(Default)]
struct PayoutLedger {
    next_id: i64,
    records: BTreeMap<PayoutId, PayoutRecord>,
}

impl PayoutRepository for InMemoryPayoutRepository {
    fn insert(&self, payout: PayoutInsert) -> Result<PayoutId, PayoutRepositoryError> {
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

    fn fetch(&self, id: PayoutId) -> Result<Option<PayoutRecord>, PayoutRepositoryError> {
        let guard = self.inner.lock().expect("payout mutex poisoned");
        Ok(guard.records.get(&id).cloned())
    }

    fn update(&self, record: PayoutRecord) -> Result<(), PayoutRepositoryError> {
        let mut guard = self.inner.lock().expect("payout mutex poisoned");
        if guard.records.contains_key(&record.payout_id) {
            guard.records.insert(record.payout_id, record);
            Ok(())
        } else {
            Err(PayoutRepositoryError::NotFound)
        }
    }

    fn for_trainer(
        &self,
        trainer_id: TrainerId,
    ) -> Result<Vec<PayoutRecord>, PayoutRepositoryError> {
        let guard = self.inner.lock().expect("payout mutex poisoned");
        let mut records: Vec<_> = guard
            .records
            .values()
            .filter(|record| record.trainer_id == trainer_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.payout_id.cmp(&a.payout_id))
        });
        Ok(records)
    }
}

/// Mailer standing in for the SMTP relay: records every notice and logs the
/// dispatch so demos and local runs are observable.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNoticeMailer {
    sent: Arc<Mutex<Vec<EmailNotice>>>,
}

impl InMemoryNoticeMailer {
    pub(crate) fn sent(&self) -> Vec<EmailNotice> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl NoticeMailer for InMemoryNoticeMailer {
    fn send(&self, notice: EmailNotice) -> Result<(), DeliveryError> {
        info!(recipient = %notice.recipient, subject = %notice.subject, "notice dispatched");
        self.sent.lock().expect("mailer mutex poisoned").push(notice);
        Ok(())
    }
}

pub(crate) fn seed_demo_trainers(repository: &InMemoryTrainerRepository) {
    repository.seed(TrainerComplianceRecord::new(
        TrainerId(42),
        "Jamie",
        Some("coach@example.com".to_string()),
    ));
    repository.seed(TrainerComplianceRecord::new(
        TrainerId(7),
        "Morgan",
        Some("morgan.trainer@example.com".to_string()),
    ));
    repository.seed(TrainerComplianceRecord::new(TrainerId(13), "Riley", None));
}
