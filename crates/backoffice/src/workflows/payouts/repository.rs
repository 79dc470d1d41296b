use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::domain::{PayoutId, PayoutRecord};
use crate::workflows::access::OperatorId;
use crate::workflows::trainers::TrainerId;

/// Row handed to the store on creation; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutInsert {
    pub trainer_id: TrainerId,
    pub amount: Decimal,
    pub method: String,
    pub created_at: DateTime<Utc>,
    pub created_by: OperatorId,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait PayoutRepository: Send + Sync {
    fn insert(&self, payout: PayoutInsert) -> Result<PayoutId, RepositoryError>;
    fn fetch(&self, id: PayoutId) -> Result<Option<PayoutRecord>, RepositoryError>;
    fn update(&self, record: PayoutRecord) -> Result<(), RepositoryError>;
    /// A trainer's payouts, newest first, backing the statement view.
    fn for_trainer(&self, trainer_id: TrainerId) -> Result<Vec<PayoutRecord>, RepositoryError>;
}

/// Error enumeration for payout storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("payout record not found")]
    NotFound,
    #[error("payout store unavailable: {0}")]
    Unavailable(String),
}
