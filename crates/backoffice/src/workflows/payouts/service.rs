use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use super::domain::{CompletePayout, NewPayout, PayoutId, PayoutRecord, PayoutStatus, PayoutView};
use super::repository::{PayoutInsert, PayoutRepository, RepositoryError};
use crate::workflows::trainers::TrainerId;

/// Service owning the payout lifecycle against a storage collaborator.
pub struct PayoutService<R> {
    repository: Arc<R>,
}

impl<R> PayoutService<R>
where
    R: PayoutRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Schedule a disbursement. The amount must not be negative; no check is
    /// made against the trainer's earned balance, payouts are at operator
    /// discretion.
    pub fn create(&self, payout: NewPayout) -> Result<PayoutView, PayoutServiceError> {
        if payout.amount < Decimal::ZERO {
            return Err(PayoutServiceError::NegativeAmount(payout.amount));
        }

        let created_at = Utc::now();
        let insert = PayoutInsert {
            trainer_id: payout.trainer_id,
            amount: payout.amount,
            method: payout.method.clone(),
            created_at,
            created_by: payout.actor,
        };
        let payout_id = self.repository.insert(insert)?;

        info!(
            payout = payout_id.0,
            trainer = payout.trainer_id.0,
            %payout.amount,
            method = %payout.method,
            operator = payout.actor.0,
            "payout scheduled"
        );

        Ok(PayoutRecord {
            payout_id,
            trainer_id: payout.trainer_id,
            amount: payout.amount,
            method: payout.method,
            status: PayoutStatus::Pending,
            transaction_id: None,
            created_at,
            completed_at: None,
            created_by: payout.actor,
        }
        .status_view())
    }

    /// Record a settled disbursement.
    ///
    /// The transition is applied unconditionally: completing an
    /// already-completed payout restamps its transaction id and completion
    /// time. See DESIGN.md for why the pending-only guard is absent.
    pub fn complete(
        &self,
        payout_id: PayoutId,
        command: CompletePayout,
    ) -> Result<PayoutView, PayoutServiceError> {
        let mut record = self
            .repository
            .fetch(payout_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.status = PayoutStatus::Completed;
        record.transaction_id = Some(command.transaction_id);
        record.completed_at = Some(Utc::now());

        self.repository.update(record.clone())?;

        info!(
            payout = payout_id.0,
            trainer = record.trainer_id.0,
            operator = command.actor.0,
            "payout completed"
        );

        Ok(record.status_view())
    }

    /// Fetch one payout for API responses.
    pub fn get(&self, payout_id: PayoutId) -> Result<PayoutView, PayoutServiceError> {
        let record = self
            .repository
            .fetch(payout_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record.status_view())
    }

    /// A trainer's payout history, newest first.
    pub fn statement(&self, trainer_id: TrainerId) -> Result<Vec<PayoutRecord>, PayoutServiceError> {
        Ok(self.repository.for_trainer(trainer_id)?)
    }
}

/// Error raised by the payout service.
#[derive(Debug, thiserror::Error)]
pub enum PayoutServiceError {
    #[error("payout amount must not be negative (got {0})")]
    NegativeAmount(Decimal),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
